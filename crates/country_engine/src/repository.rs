use std::sync::Arc;

use country_core::{Country, FailureKind, FetchError, UiState};
use engine_logging::{engine_debug, engine_error, engine_warn};
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::transport::{CountryTransport, ReqwestTransport, TransportOutcome, TransportSettings};

/// Factory of cold country streams.
///
/// Every call to [`CountrySource::stream_countries`] returns a fresh stream
/// that does nothing until polled and runs its own fetch.
pub trait CountrySource: Send + Sync {
    fn stream_countries(&self) -> BoxStream<'static, UiState<Vec<Country>>>;
}

/// Turns transport outcomes into `Loading` followed by exactly one terminal state.
#[derive(Clone)]
pub struct CountryRepository {
    transport: Arc<dyn CountryTransport>,
    runtime: Handle,
}

impl CountryRepository {
    /// `runtime` is where the network call runs, whichever context polls the stream.
    pub fn new(transport: Arc<dyn CountryTransport>, runtime: Handle) -> Self {
        Self { transport, runtime }
    }

    pub fn with_settings(settings: TransportSettings, runtime: Handle) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(settings)?;
        Ok(Self::new(Arc::new(transport), runtime))
    }
}

impl CountrySource for CountryRepository {
    fn stream_countries(&self) -> BoxStream<'static, UiState<Vec<Country>>> {
        let transport = self.transport.clone();
        let runtime = self.runtime.clone();

        let loading = stream::once(async { UiState::Loading });
        let terminal = stream::once(fetch_on(runtime, transport));
        loading.chain(terminal).boxed()
    }
}

async fn fetch_on(runtime: Handle, transport: Arc<dyn CountryTransport>) -> UiState<Vec<Country>> {
    let mut task = AbortOnDrop(runtime.spawn(async move {
        transport.fetch_countries().await
    }));
    match (&mut task.0).await {
        Ok(Ok(outcome)) => classify(outcome),
        Ok(Err(err)) => {
            engine_warn!("countries fetch failed ({}): {}", err.kind, err.message);
            UiState::Error(err)
        }
        Err(join_err) if join_err.is_cancelled() => {
            engine_debug!("countries fetch cancelled");
            UiState::Error(FetchError::new(FailureKind::Cancelled, join_err.to_string()))
        }
        Err(join_err) => {
            engine_error!("countries fetch panicked: {}", join_err);
            UiState::Error(FetchError::new(FailureKind::Internal, join_err.to_string()))
        }
    }
}

/// Aborts the spawned transport call when the stream polling it goes away.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Maps a raw transport outcome to its terminal state.
pub fn classify(outcome: TransportOutcome) -> UiState<Vec<Country>> {
    match outcome {
        TransportOutcome::Success(Some(countries)) => {
            engine_debug!("countries fetch succeeded with {} entries", countries.len());
            UiState::Success(countries)
        }
        TransportOutcome::Success(None) => {
            engine_warn!("countries response had no body");
            UiState::Error(FetchError::null_body())
        }
        TransportOutcome::Failure { status, error_body } => {
            engine_warn!("countries response status {}", status);
            UiState::Error(FetchError::new(
                FailureKind::HttpStatus(status),
                error_body.unwrap_or_default(),
            ))
        }
    }
}
