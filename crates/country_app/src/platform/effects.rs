use std::sync::mpsc;
use std::sync::Arc;

use country_core::{Effect, Msg};
use country_engine::CountryViewModel;
use engine_logging::{engine_debug, engine_info};
use tokio::runtime::Handle;

use super::app::AppEvent;

pub struct EffectRunner {
    view_model: Arc<CountryViewModel>,
}

impl EffectRunner {
    /// Wires the view model's slot into the app's event channel.
    pub fn new(
        view_model: Arc<CountryViewModel>,
        runtime: &Handle,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let runner = Self { view_model };
        runner.spawn_state_forwarder(runtime, event_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Refresh => {
                    engine_info!("refresh requested");
                    self.view_model.refresh();
                }
            }
        }
    }

    fn spawn_state_forwarder(&self, runtime: &Handle, event_tx: mpsc::Sender<AppEvent>) {
        let mut rx = self.view_model.subscribe();
        runtime.spawn(async move {
            loop {
                let state = rx.borrow_and_update().clone();
                if event_tx
                    .send(AppEvent::Msg(Msg::CountriesChanged(state)))
                    .is_err()
                {
                    break;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
            engine_debug!("state forwarder stopped");
        });
    }
}
