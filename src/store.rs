use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Values published by the extensions during the initialization pass, keyed by
/// fixed names (see `constants::store`).
///
/// Each key can be published only once per pass. Consumers get shared handles on
/// the published values, which are never mutated afterwards.
#[derive(Default)]
pub struct Store {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Publishes a value under the given key
    ///
    /// # Errors
    /// * `DuplicateName` - if a value was already published under the same key
    pub fn publish<S, V>(&mut self, key: S, value: V) -> Result<()>
    where
        S: Into<String>,
        V: Any + Send + Sync,
    {
        let key = key.into();
        if self.values.contains_key(&key) {
            return Err(Error::DuplicateName {
                kind: "store key",
                name: key,
            });
        }
        self.values.insert(key, Arc::new(value));
        Ok(())
    }

    /// Retrieves the value published under the given key
    ///
    /// # Errors
    /// * `StoreKeyNotFound` - if nothing was published under the key
    /// * `StoreTypeMismatch` - if the published value is not a `V`
    pub fn get<V: Any + Send + Sync>(&self, key: &str) -> Result<Arc<V>> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| Error::StoreKeyNotFound(key.to_string()))?;
        Arc::clone(value)
            .downcast::<V>()
            .map_err(|_| Error::StoreTypeMismatch(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Published keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("keys", &self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_get() {
        let mut store = Store::new();
        store.publish("answer", 42u32).unwrap();
        assert_eq!(*store.get::<u32>("answer").unwrap(), 42);
        assert!(store.contains("answer"));
        assert_eq!(store.keys(), vec!["answer"]);
    }

    #[test]
    fn test_duplicate_key() {
        let mut store = Store::new();
        store.publish("key", "first".to_string()).unwrap();
        let result = store.publish("key", "second".to_string());
        assert!(matches!(
            result,
            Err(Error::DuplicateName { kind: "store key", name }) if name == "key"
        ));
        assert_eq!(store.get::<String>("key").unwrap().as_str(), "first");
    }

    #[test]
    fn test_missing_key_and_type_mismatch() {
        let mut store = Store::new();
        store.publish("number", 1i64).unwrap();
        assert!(matches!(
            store.get::<i64>("missing"),
            Err(Error::StoreKeyNotFound(key)) if key == "missing"
        ));
        assert!(matches!(
            store.get::<String>("number"),
            Err(Error::StoreTypeMismatch(key)) if key == "number"
        ));
    }
}
