use std::time::Duration;

use country_core::{Country, FailureKind, FetchError};
use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;

pub const DEFAULT_COUNTRIES_URL: &str = "https://gist.githubusercontent.com/peymano-wmt/32dcb892b06648910ddd40406e37fdab/raw/db25946fd77c5873b0303b858e861ce724e0dcd0/countries.json";

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_COUNTRIES_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Raw result of one round trip, before it is turned into a `UiState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    /// 2xx. `None` when the payload was empty or the JSON literal `null`.
    Success(Option<Vec<Country>>),
    /// Non-2xx, with the error body text when it could be read.
    Failure { status: u16, error_body: Option<String> },
}

/// One GET of the countries document. `Err` covers everything below HTTP:
/// connectivity, timeouts, oversized or undecodable payloads.
#[async_trait::async_trait]
pub trait CountryTransport: Send + Sync {
    async fn fetch_countries(&self) -> Result<TransportOutcome, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl CountryTransport for ReqwestTransport {
    async fn fetch_countries(&self) -> Result<TransportOutcome, FetchError> {
        let url = reqwest::Url::parse(&self.settings.url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        engine_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = self
                .read_body(response)
                .await
                .ok()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
            engine_info!("countries request failed with status {}", status);
            return Ok(TransportOutcome::Failure {
                status: status.as_u16(),
                error_body,
            });
        }

        let bytes = self.read_body(response).await?;
        engine_debug!("received {} bytes with status {}", bytes.len(), status);
        decode_countries(&bytes).map(TransportOutcome::Success)
    }
}

/// Decodes a countries payload. Blank input and `null` both mean "no body".
pub fn decode_countries(bytes: &[u8]) -> Result<Option<Vec<Country>>, FetchError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<Vec<Country>>>(bytes)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
