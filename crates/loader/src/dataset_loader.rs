use crate::source::RecordSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use view::Dataset;

/// The dataset currently offered to readers.
#[derive(Debug, Clone, Default)]
pub enum DatasetState {
    /// Nothing loaded yet, or the last load failed.
    #[default]
    NotLoaded,
    Loaded(Arc<Dataset>),
}

impl DatasetState {
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match self {
            DatasetState::Loaded(dataset) => Some(dataset),
            DatasetState::NotLoaded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DatasetState::Loaded(_))
    }
}

/// Owns the active dataset and replaces it with one-shot loads.
///
/// The most recently *requested* load wins: a new request aborts the one in flight,
/// and a load only publishes its result if no newer request was made meanwhile.
#[derive(Debug)]
pub struct DatasetLoader {
    state: Arc<watch::Sender<DatasetState>>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DatasetState::NotLoaded);
        Self {
            state: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
        }
    }

    /// Snapshot of the active dataset.
    pub fn current(&self) -> DatasetState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified every time a load publishes.
    pub fn subscribe(&self) -> watch::Receiver<DatasetState> {
        self.state.subscribe()
    }

    /// Starts loading from `source`, superseding any load still in flight.
    ///
    /// Must be called from within a Tokio runtime. The returned handle completes once
    /// the load has published (or been discarded as stale).
    pub fn request(&self, source: Arc<dyn RecordSource>) -> JoinHandle<()> {
        // Held until the new handle is installed, so generations and handle swaps are
        // ordered the same way across concurrent callers.
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            let description = source.describe();
            tracing::info!(source = %description, generation, "Loading box records.");

            let next = match source.fetch_rows().await {
                Ok(rows) => {
                    let dataset = Dataset::from_rows(&rows);
                    tracing::info!(source = %description, records = dataset.len(), "Box records loaded.");
                    DatasetState::Loaded(Arc::new(dataset))
                }
                Err(e) => {
                    tracing::error!(source = %description, error = %e, "Failed to load box records.");
                    DatasetState::NotLoaded
                }
            };

            // Compare and publish under the channel lock so an older load can never
            // overwrite a newer one.
            let published = state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *current = next;
                true
            });
            if !published {
                tracing::debug!(source = %description, generation, "Discarded stale load.");
            }
        });

        if let Some(previous) = in_flight.replace(handle.abort_handle()) {
            previous.abort();
        }
        handle
    }

    /// Loads from `source` and waits for the outcome.
    pub async fn load(&self, source: Arc<dyn RecordSource>) -> DatasetState {
        if let Err(e) = self.request(source).await {
            if !e.is_cancelled() {
                tracing::error!(error = %e, "Load task failed.");
            }
        }
        self.current()
    }
}
