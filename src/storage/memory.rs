use std::collections::HashMap;

use serde_json::Value;

use super::KeyValueStore;
use crate::errors::Result;

/// Volatile store used by tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStoreExt;

    #[test]
    fn get_falls_back_to_default() {
        let mut store = MemoryStore::new();
        let names: Vec<String> = store.get("incomeCategories", Vec::new()).unwrap();
        assert!(names.is_empty());

        store.set("incomeCategories", &vec!["Salary"]).unwrap();
        let names: Vec<String> = store.get("incomeCategories", Vec::new()).unwrap();
        assert_eq!(names, vec!["Salary".to_string()]);
    }

    #[test]
    fn set_overwrites() {
        let mut store = MemoryStore::new();
        store.set("User", "Ada").unwrap();
        store.set("User", "Grace").unwrap();
        assert_eq!(store.get("User", String::new()).unwrap(), "Grace");
        assert_eq!(store.len(), 1);
    }
}
