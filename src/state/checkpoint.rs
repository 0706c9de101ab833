//! Persisted resume position.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// "Resume at step `sequence_index`". Equal to the step count once the course is done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub sequence_index: usize,
    pub slide_index: Option<u32>,
}

impl Checkpoint {
    pub fn at_step(sequence_index: usize) -> Self {
        Self {
            sequence_index,
            slide_index: None,
        }
    }
}

/// String key-value storage surviving page reloads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError>;
    fn remove(&mut self, key: &str) -> Result<(), GameError>;
}

/// `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, GameError> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .map(|storage| Self { storage })
            .ok_or(GameError::StorageUnavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        self.storage.get_item(key).map_err(|e| GameError::Storage {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.storage.set_item(key, value).map_err(|e| GameError::Storage {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), GameError> {
        self.storage.remove_item(key).map_err(|e| GameError::Storage {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// In-memory store. Clones share the same map, so a caller can keep a handle
/// to inspect what was written.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().items.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        let mut inner = self.inner.borrow_mut();
        inner.writes += 1;
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), GameError> {
        self.inner.borrow_mut().items.remove(key);
        Ok(())
    }
}

pub struct CheckpointStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl CheckpointStore {
    pub fn new(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// `None` when nothing usable is stored; corrupt records are logged, not fatal.
    pub fn load(&self) -> Option<Checkpoint> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("checkpoint unreadable: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(cp) => Some(cp),
            Err(e) => {
                log::warn!("ignoring malformed checkpoint {:?}: {}", raw, e);
                None
            }
        }
    }

    pub fn save(&mut self, checkpoint: Checkpoint) -> Result<(), GameError> {
        let raw = serde_json::to_string(&checkpoint)?;
        self.backend.set(&self.key, &raw)
    }

    pub fn clear(&mut self) -> Result<(), GameError> {
        self.backend.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "gameCheckpointv1000";

    fn store() -> (CheckpointStore, MemoryStore) {
        let mem = MemoryStore::default();
        (CheckpointStore::new(Box::new(mem.clone()), KEY), mem)
    }

    #[test]
    fn saved_record_uses_camel_case_json() {
        let (mut cp, mem) = store();
        cp.save(Checkpoint::at_step(3)).unwrap();
        assert_eq!(
            mem.raw(KEY).as_deref(),
            Some(r#"{"sequenceIndex":3,"slideIndex":null}"#)
        );
        assert_eq!(cp.load(), Some(Checkpoint::at_step(3)));
    }

    #[test]
    fn missing_record_loads_as_none() {
        let (cp, _) = store();
        assert_eq!(cp.load(), None);
    }

    #[test]
    fn malformed_records_load_as_none() {
        for raw in ["not json", "{\"sequenceIndex\":-1}", "{\"slideIndex\":2}", "[]"] {
            let (cp, mut mem) = store();
            mem.set(KEY, raw).unwrap();
            assert_eq!(cp.load(), None, "{}", raw);
        }
    }

    #[test]
    fn slide_index_round_trips() {
        let (cp, mut mem) = store();
        mem.set(KEY, r#"{"sequenceIndex":1,"slideIndex":7}"#).unwrap();
        assert_eq!(
            cp.load(),
            Some(Checkpoint {
                sequence_index: 1,
                slide_index: Some(7)
            })
        );
    }

    #[test]
    fn clear_removes_the_record() {
        let (mut cp, _) = store();
        cp.save(Checkpoint::at_step(2)).unwrap();
        cp.clear().unwrap();
        assert_eq!(cp.load(), None);
    }
}
