//! Key-value storage the stage is persisted in

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

/// Storage Error
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Serde error
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    /// Storage cannot be used
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage backend
///
/// Values are stored as strings under a namespaced key.
pub trait StageStorage: Debug + Send + Sync {
    /// Read a value
    fn read(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write a value
    fn write(&self, key: &str, value: &str) -> Result<(), Error>;
}

impl<T> StageStorage for Arc<T>
where
    T: StageStorage + ?Sized,
{
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        (**self).write(key, value)
    }
}

/// In-memory storage, scoped to the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl StageStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
