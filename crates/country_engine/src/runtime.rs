use std::future::Future;
use std::io;

use engine_logging::engine_info;
use tokio::runtime::{Builder, Handle, Runtime};

#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub worker_threads: usize,
    pub thread_name: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            worker_threads: 2,
            thread_name: "country-io".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("failed to start background runtime: {0}")]
    Start(#[from] io::Error),
}

/// Multi-threaded runtime that hosts all network work, separate from the caller's thread.
pub struct BackgroundRuntime {
    runtime: Runtime,
}

impl BackgroundRuntime {
    pub fn new(settings: &RuntimeSettings) -> Result<Self, RuntimeError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(settings.worker_threads.max(1))
            .thread_name(settings.thread_name.clone())
            .enable_all()
            .build()?;
        engine_info!(
            "background runtime started ({} workers)",
            settings.worker_threads.max(1)
        );
        Ok(Self { runtime })
    }

    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }

    /// Drives `future` to completion from a thread outside the runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
