//! Synchronous key/value storage for settings and small UI state (`localStorage` in the browser).

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host service for raw string values keyed by name.
///
/// Reads and writes are synchronous so a setting written during an event handler is visible to
/// the very next read, before any async work runs.
pub trait LocalSettingsStore {
    /// Loads a raw value.
    fn load_raw(&self, key: &str) -> Option<String>;

    /// Saves a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable or rejects the write.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), String>;

    /// Deletes a key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage is unavailable.
    fn delete_raw(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Storage that keeps nothing, for unsupported targets.
pub struct NoopLocalSettingsStore;

impl LocalSettingsStore for NoopLocalSettingsStore {
    fn load_raw(&self, _key: &str) -> Option<String> {
        None
    }

    fn save_raw(&self, _key: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_raw(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory storage keyed by string. Clones share the same map.
pub struct MemoryLocalSettingsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryLocalSettingsStore {
    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::default();
        {
            let mut map = store.inner.borrow_mut();
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl LocalSettingsStore for MemoryLocalSettingsStore {
    fn load_raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a JSON value stored under `key`.
///
/// Missing keys and undecodable payloads both read as `None`.
pub fn load_json_with<S: LocalSettingsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Option<T> {
    let raw = store.load_raw(key)?;
    serde_json::from_str(&raw).ok()
}

/// Serializes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_json_with<S: LocalSettingsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_raw(key, &raw)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Geometry {
        width: i32,
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryLocalSettingsStore::default();
        let other = store.clone();
        store.save_raw("tooltips", "disabled").expect("save");
        assert_eq!(other.load_raw("tooltips"), Some("disabled".to_string()));
        other.delete_raw("tooltips").expect("delete");
        assert!(store.is_empty());
    }

    #[test]
    fn json_helpers_ignore_garbage() {
        let store = MemoryLocalSettingsStore::with_entries([("geometry", "{not json")]);
        let store_obj: &dyn LocalSettingsStore = &store;
        assert_eq!(load_json_with::<_, Geometry>(store_obj, "geometry"), None);

        save_json_with(store_obj, "geometry", &Geometry { width: 640 }).expect("save");
        assert_eq!(
            load_json_with::<_, Geometry>(store_obj, "geometry"),
            Some(Geometry { width: 640 })
        );
    }

    #[test]
    fn noop_store_reads_nothing() {
        let store = NoopLocalSettingsStore;
        store.save_raw("k", "v").expect("save");
        assert_eq!(store.load_raw("k"), None);
    }
}
