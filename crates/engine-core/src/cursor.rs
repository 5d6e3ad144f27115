use crate::{error::StateStoreError, state::KeyValueStore};
use model::execution::keys::{LATEST_SEQUENCER_ID, scoped};
use std::sync::Arc;
use tracing::debug;

/// Adopts `candidate` when it is non-empty, otherwise keeps `current`.
///
/// The sequencer column is assumed monotonic; the candidate is not compared
/// against the current value.
pub fn advance(current: &str, candidate: &str) -> String {
    if candidate.is_empty() {
        current.to_string()
    } else {
        candidate.to_string()
    }
}

/// Tracks the last-seen sequencer value of one instance and persists it in the
/// instance store under `<plugin>_LstSeqId`.
pub struct CursorTracker {
    store: Arc<dyn KeyValueStore>,
    key: String,
    current: String,
}

impl CursorTracker {
    /// Starts from `current` without touching the store.
    pub fn new(store: Arc<dyn KeyValueStore>, plugin_name: &str, current: &str) -> Self {
        Self {
            store,
            key: scoped(plugin_name, LATEST_SEQUENCER_ID),
            current: current.to_string(),
        }
    }

    /// Starts from whatever cursor the store holds.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        plugin_name: &str,
    ) -> Result<Self, StateStoreError> {
        let key = scoped(plugin_name, LATEST_SEQUENCER_ID);
        let current = store.get(&key).await?;
        Ok(Self {
            store,
            key,
            current,
        })
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Moves to `candidate` and writes it through to the store. Returns whether
    /// the cursor changed; empty candidates are ignored and nothing is written.
    pub async fn advance(&mut self, candidate: &str) -> Result<bool, StateStoreError> {
        let next = advance(&self.current, candidate);
        if candidate.is_empty() || next == self.current {
            return Ok(false);
        }

        self.store.set(&self.key, &next).await?;
        debug!(key = %self.key, from = %self.current, to = %next, "Cursor advanced");
        self.current = next;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::memory::MemoryStore;

    #[test]
    fn empty_candidate_is_ignored() {
        assert_eq!(advance("41", ""), "41");
        assert_eq!(advance("", ""), "");
        assert_eq!(advance("41", "42"), "42");
    }

    #[test]
    fn never_decreases_for_increasing_sequence() {
        let sequence = ["1", "", "2", "3", "", "", "10", "11"];
        let mut current = String::new();
        let mut last = 0i64;
        for candidate in sequence {
            current = advance(&current, candidate);
            let value: i64 = current.parse().unwrap_or(0);
            assert!(value >= last);
            last = value;
        }
        assert_eq!(current, "11");
    }

    #[tokio::test]
    async fn advance_persists_to_store() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = CursorTracker::new(store.clone(), "in_gdb", "");

        assert!(tracker.advance("5").await.unwrap());
        assert_eq!(store.get("in_gdb_LstSeqId").await.unwrap(), "5");

        assert!(!tracker.advance("").await.unwrap());
        assert!(!tracker.advance("5").await.unwrap());
        assert_eq!(tracker.current(), "5");
    }

    #[tokio::test]
    async fn load_reads_persisted_cursor() {
        let store = Arc::new(MemoryStore::new());
        store.set("in_gdb_LstSeqId", "77").await.unwrap();

        let tracker = CursorTracker::load(store, "in_gdb").await.unwrap();
        assert_eq!(tracker.current(), "77");
    }
}
