use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use country_core::{Country, UiState};
use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::repository::CountrySource;

pub type CountriesState = UiState<Vec<Country>>;

/// Owns the observable countries slot for one screen.
///
/// The slot starts at `Loading` and is written only by the run started at
/// construction or by the latest [`CountryViewModel::refresh`]. Dropping the
/// view model stops its run.
pub struct CountryViewModel {
    source: Arc<dyn CountrySource>,
    runtime: Handle,
    slot: Arc<watch::Sender<CountriesState>>,
    generation: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CountryViewModel {
    pub fn new(source: Arc<dyn CountrySource>, runtime: Handle) -> Self {
        let (slot, _) = watch::channel(UiState::Loading);
        let view_model = Self {
            source,
            runtime,
            slot: Arc::new(slot),
            generation: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        };
        view_model.refresh();
        view_model
    }

    /// Read-only view of the slot. The receiver sees the current value first.
    pub fn subscribe(&self) -> watch::Receiver<CountriesState> {
        self.slot.subscribe()
    }

    pub fn current(&self) -> CountriesState {
        self.slot.borrow().clone()
    }

    /// Starts a fresh run of the source. A run still in flight is aborted and
    /// anything it would still emit is discarded; the slot keeps its value
    /// until the new run emits `Loading`.
    pub fn refresh(&self) {
        let run = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stream = self.source.stream_countries();
        let slot = self.slot.clone();
        let generation = self.generation.clone();

        let handle = self.runtime.spawn(async move {
            while let Some(state) = stream.next().await {
                if !publish(&slot, &generation, run, state) {
                    engine_debug!("run {} superseded, dropping its emissions", run);
                    return;
                }
            }
            engine_debug!("run {} finished", run);
        });

        let previous = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        engine_info!("countries run {} started", run);
    }
}

impl Drop for CountryViewModel {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let task = self
            .task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }
}

/// Writes `state` unless a newer run has started. The generation check runs
/// under the slot's lock so a superseded run can never land after its successor.
fn publish(
    slot: &watch::Sender<CountriesState>,
    generation: &AtomicU64,
    run: u64,
    state: CountriesState,
) -> bool {
    slot.send_if_modified(|current| {
        if generation.load(Ordering::SeqCst) != run {
            return false;
        }
        *current = state;
        true
    })
}
