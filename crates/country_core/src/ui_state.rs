use crate::FetchError;

/// Progress of one fetch: in flight, succeeded with a value, or failed with a cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState<T> {
    Loading,
    Success(T),
    Error(FetchError),
}

impl<T> Default for UiState<T> {
    fn default() -> Self {
        UiState::Loading
    }
}

impl<T> UiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    /// `Success` and `Error` end a pipeline run.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UiState<U> {
        match self {
            UiState::Loading => UiState::Loading,
            UiState::Success(value) => UiState::Success(f(value)),
            UiState::Error(err) => UiState::Error(err),
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            UiState::Success(value) => Some(value),
            UiState::Loading | UiState::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            UiState::Error(err) => Some(err),
            UiState::Loading | UiState::Success(_) => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for UiState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => UiState::Success(value),
            Err(err) => UiState::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    #[test]
    fn default_is_loading() {
        let state: UiState<Vec<u8>> = UiState::default();
        assert!(state.is_loading());
        assert!(!state.is_terminal());
    }

    #[test]
    fn result_conversion_picks_variant() {
        let ok: UiState<u8> = Ok(3).into();
        assert_eq!(ok, UiState::Success(3));

        let err: UiState<u8> = Err(FetchError::null_body()).into();
        assert_eq!(err.error().map(|e| &e.kind), Some(&FailureKind::NullBody));
        assert!(err.is_terminal());
    }

    #[test]
    fn map_keeps_error() {
        let state: UiState<Vec<u8>> = UiState::Error(FetchError::new(FailureKind::Network, "down"));
        let mapped = state.map(|v| v.len());
        assert_eq!(
            mapped,
            UiState::Error(FetchError::new(FailureKind::Network, "down"))
        );
    }
}
