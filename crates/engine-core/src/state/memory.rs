use crate::{error::StateStoreError, state::KeyValueStore};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Mutex};

/// Process-local store; state lives exactly as long as the host process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<String, StateStoreError> {
        let entries = self.entries.lock().map_err(|_| StateStoreError::Poisoned)?;
        Ok(entries.get(key).cloned().unwrap_or_default())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StateStoreError> {
        let mut entries = self.entries.lock().map_err(|_| StateStoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
