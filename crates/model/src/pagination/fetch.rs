use crate::{core::value::Value, records::record::GenericRecord};

/// Outcome of fetching at most one unread row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchResult {
    /// The row, normalized to its canonical text form.
    pub record: Option<GenericRecord>,

    /// Primary-key values of the fetched row, in column order.
    pub keys: Vec<Value>,

    /// Sequencer value of the fetched row; empty when no row was read or the
    /// sequencer column was not selected.
    pub cursor: String,
}

impl FetchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_none()
    }
}
