// Shared holder of the current aggregate dataset
use std::sync::{Arc, RwLock};

use crate::domain::aggregate::Dataset;

use super::refresh_signal::RefreshSignal;

/// The single live dataset, written by the fetch controller and read by every
/// plot binding.
///
/// Reads hand out an `Arc` snapshot and writes swap the `Arc` wholesale, so a
/// reader mid-redraw keeps a consistent dataset even while a replacement is
/// installed. The store also owns the refresh signal: publication always
/// happens after the replacement that triggered it, so every handler observes
/// the new snapshot.
pub struct DatasetStore {
    current: RwLock<Arc<Dataset>>,
    signal: RefreshSignal,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Vec::new())),
            signal: RefreshSignal::new(),
        }
    }

    /// Install `rows` as the new dataset. Total replacement; there is no
    /// partial-update operation.
    pub fn replace(&self, rows: Dataset) {
        *self.current.write().unwrap() = Arc::new(rows);
    }

    /// Snapshot of the dataset at this instant.
    pub fn current(&self) -> Arc<Dataset> {
        self.current.read().unwrap().clone()
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.signal.subscribe(handler);
    }

    pub fn publish(&self) {
        self.signal.publish();
    }

    pub fn subscriber_count(&self) -> usize {
        self.signal.subscriber_count()
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}
