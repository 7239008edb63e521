use crate::{Country, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The observed countries state changed.
    CountriesChanged(UiState<Vec<Country>>),
    /// User scrolled the list; `offset` is the index of the first visible row.
    Scrolled { offset: usize },
    /// The list view was torn down (e.g. screen left or reconfigured).
    ViewDestroyed,
    /// The list view was recreated and is ready to receive rows.
    ViewCreated,
    /// User asked to fetch the list again.
    RefreshClicked,
    /// The transient error notice was shown and can go away.
    NoticeDismissed,
}
