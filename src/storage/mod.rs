pub mod json_backend;
pub mod keys;
pub mod memory;
pub mod tracker_store;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// String-keyed persistent storage of JSON values.
pub trait KeyValueStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>>;
    fn set_value(&mut self, key: &str, value: Value) -> Result<()>;

    /// Writes several keys as one update. Backends that persist should
    /// either apply every entry or none of them.
    fn set_many(&mut self, entries: Vec<(String, Value)>) -> Result<()> {
        for (key, value) in entries {
            self.set_value(&key, value)?;
        }
        Ok(())
    }
}

/// Typed access on top of any [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// Returns the stored value for `key`, or `default` when nothing is stored.
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.get_value(key)? {
            Some(Value::Null) | None => Ok(default),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set_value(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

pub use json_backend::{BackupInfo, JsonFileStore};
pub use memory::MemoryStore;
pub use tracker_store::TrackerStore;
