use crate::schema::RawDataset;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Storage abstraction for uploaded report datasets, so the aggregation
/// engine only ever sees dataset values passed as arguments. Implementations
/// own whatever consistency guarantee "the current dataset" carries at
/// request time.
pub trait DatasetStore: Send + Sync {
    fn put(&self, name: &str, dataset: RawDataset) -> Result<(), StoreError>;
    fn get(&self, name: &str) -> Result<Option<RawDataset>, StoreError>;
    fn list(&self) -> Result<Vec<String>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("dataset store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store keyed by upload name. Replaces the cross-request
/// mutable global with an explicit, lockable collaborator.
#[derive(Debug, Default)]
pub struct InMemoryDatasetStore {
    datasets: Mutex<BTreeMap<String, RawDataset>>,
}

impl InMemoryDatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, RawDataset>>, StoreError> {
        self.datasets
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned lock".to_string()))
    }
}

impl DatasetStore for InMemoryDatasetStore {
    fn put(&self, name: &str, dataset: RawDataset) -> Result<(), StoreError> {
        self.lock()?.insert(name.to_string(), dataset);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<RawDataset>, StoreError> {
        Ok(self.lock()?.get(name).cloned())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.lock()?.clear();
        Ok(())
    }
}
