//! Country engine: network transport, the tri-state fetch pipeline and the observable state holder.
mod repository;
mod runtime;
mod transport;
mod view_model;

pub use repository::{classify, CountryRepository, CountrySource};
pub use runtime::{BackgroundRuntime, RuntimeError, RuntimeSettings};
pub use transport::{
    decode_countries, CountryTransport, ReqwestTransport, TransportOutcome, TransportSettings,
    DEFAULT_COUNTRIES_URL,
};
pub use view_model::{CountriesState, CountryViewModel};
