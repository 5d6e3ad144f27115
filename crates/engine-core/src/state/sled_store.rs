use crate::{error::StateStoreError, state::KeyValueStore};
use async_trait::async_trait;
use std::path::Path;

/// On-disk store so the cursor survives a host restart.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StateStoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }
}

#[async_trait]
impl KeyValueStore for SledStore {
    async fn get(&self, key: &str) -> Result<String, StateStoreError> {
        match self.db.get(key)? {
            Some(bytes) => Ok(String::from_utf8(bytes.to_vec())?),
            None => Ok(String::new()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StateStoreError> {
        self.db.insert(key, value.as_bytes())?;
        // The cursor is written right before a delete; it must be durable first.
        self.db.flush_async().await?;
        Ok(())
    }
}
