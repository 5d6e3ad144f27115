use crate::error::StateStoreError;
use async_trait::async_trait;

pub mod memory;
pub mod sled_store;

/// Per-instance string store bridging short-lived invocations.
///
/// Reading a key that was never written yields the empty string, mirroring
/// an unset variable. Callers must serialize access per instance.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<String, StateStoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StateStoreError>;
}
