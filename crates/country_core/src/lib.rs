//! Country core: data model, tri-state fetch result and the pure list-screen state machine.
mod country;
mod effect;
mod error;
mod msg;
mod state;
mod ui_state;
mod update;
mod view_model;

pub use country::{Country, Currency, Language};
pub use effect::Effect;
pub use error::{FailureKind, FetchError, NULL_BODY_MESSAGE};
pub use msg::Msg;
pub use state::{ListState, ScrollState};
pub use ui_state::UiState;
pub use update::update;
pub use view_model::{CountryRowView, ListViewModel};
