use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use country_core::{Country, FailureKind, FetchError, UiState, NULL_BODY_MESSAGE};
use country_engine::{
    BackgroundRuntime, CountryRepository, CountrySource, CountryTransport, RuntimeSettings,
    TransportOutcome,
};
use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use tokio::runtime::Handle;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn sample_countries() -> Vec<Country> {
    vec![
        Country::new("name1", "capital1", "", "currency", "flag1"),
        Country::new("name2", "capital2", "", "currency", "flag2"),
    ]
}

struct ScriptedTransport {
    result: Result<TransportOutcome, FetchError>,
    calls: AtomicUsize,
    thread_names: Mutex<Vec<Option<String>>>,
}

impl ScriptedTransport {
    fn new(result: Result<TransportOutcome, FetchError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
            thread_names: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CountryTransport for ScriptedTransport {
    async fn fetch_countries(&self) -> Result<TransportOutcome, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.thread_names
            .lock()
            .unwrap()
            .push(std::thread::current().name().map(str::to_owned));
        self.result.clone()
    }
}

struct PanickingTransport;

#[async_trait::async_trait]
impl CountryTransport for PanickingTransport {
    async fn fetch_countries(&self) -> Result<TransportOutcome, FetchError> {
        panic!("transport blew up");
    }
}

async fn collect(repository: &CountryRepository) -> Vec<UiState<Vec<Country>>> {
    repository.stream_countries().collect().await
}

#[tokio::test]
async fn success_emits_loading_then_list() {
    init_logging();
    let transport = ScriptedTransport::new(Ok(TransportOutcome::Success(Some(sample_countries()))));
    let repository = CountryRepository::new(transport.clone(), Handle::current());

    let emissions = collect(&repository).await;

    assert_eq!(
        emissions,
        vec![UiState::Loading, UiState::Success(sample_countries())]
    );
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn first_emission_is_loading_before_transport_runs() {
    init_logging();
    let transport = ScriptedTransport::new(Ok(TransportOutcome::Success(Some(sample_countries()))));
    let repository = CountryRepository::new(transport.clone(), Handle::current());

    let mut stream = repository.stream_countries();
    assert_eq!(transport.calls(), 0);

    assert_eq!(stream.next().await, Some(UiState::Loading));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn null_body_emits_fixed_error() {
    init_logging();
    let transport = ScriptedTransport::new(Ok(TransportOutcome::Success(None)));
    let repository = CountryRepository::new(transport, Handle::current());

    let emissions = collect(&repository).await;

    assert_eq!(emissions.len(), 2);
    assert_eq!(emissions[0], UiState::Loading);
    let err = emissions[1].error().expect("error state");
    assert_eq!(err.kind, FailureKind::NullBody);
    assert_eq!(err.message, NULL_BODY_MESSAGE);
}

#[tokio::test]
async fn http_failure_emits_error_with_body_text() {
    init_logging();
    let transport = ScriptedTransport::new(Ok(TransportOutcome::Failure {
        status: 400,
        error_body: Some("bad request".to_string()),
    }));
    let repository = CountryRepository::new(transport, Handle::current());

    let emissions = collect(&repository).await;

    assert_eq!(
        emissions,
        vec![
            UiState::Loading,
            UiState::Error(FetchError::new(FailureKind::HttpStatus(400), "bad request")),
        ]
    );
}

#[tokio::test]
async fn transport_error_is_contained() {
    init_logging();
    let transport = ScriptedTransport::new(Err(FetchError::new(
        FailureKind::Network,
        "Network error",
    )));
    let repository = CountryRepository::new(transport, Handle::current());

    let emissions = collect(&repository).await;

    assert_eq!(
        emissions,
        vec![
            UiState::Loading,
            UiState::Error(FetchError::new(FailureKind::Network, "Network error")),
        ]
    );
}

#[tokio::test]
async fn panicking_transport_becomes_error() {
    init_logging();
    let repository = CountryRepository::new(Arc::new(PanickingTransport), Handle::current());

    let emissions = collect(&repository).await;

    assert_eq!(emissions.len(), 2);
    assert_eq!(emissions[0], UiState::Loading);
    assert_eq!(
        emissions[1].error().map(|err| err.kind.clone()),
        Some(FailureKind::Internal)
    );
}

#[tokio::test]
async fn each_stream_runs_its_own_fetch() {
    init_logging();
    let transport = ScriptedTransport::new(Ok(TransportOutcome::Success(Some(sample_countries()))));
    let repository = CountryRepository::new(transport.clone(), Handle::current());

    let first = repository.stream_countries();
    let second = repository.stream_countries();
    assert_eq!(transport.calls(), 0);

    let first: Vec<_> = first.collect().await;
    let second: Vec<_> = second.collect().await;

    assert_eq!(first, second);
    assert_eq!(transport.calls(), 2);
}

#[test]
fn fetch_runs_on_the_background_runtime() {
    init_logging();
    let background = BackgroundRuntime::new(&RuntimeSettings {
        worker_threads: 1,
        thread_name: "country-io-test".to_string(),
    })
    .unwrap();
    let transport = ScriptedTransport::new(Ok(TransportOutcome::Success(Some(Vec::new()))));
    let repository = CountryRepository::new(transport.clone(), background.handle());

    let caller = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let emissions: Vec<_> = caller.block_on(repository.stream_countries().collect());

    assert_eq!(emissions, vec![UiState::Loading, UiState::Success(Vec::new())]);
    assert_eq!(
        transport.thread_names.lock().unwrap().as_slice(),
        &[Some("country-io-test".to_string())]
    );
}
