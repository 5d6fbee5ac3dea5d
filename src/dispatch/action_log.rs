use crate::error::{DispatchError, Result};
use crate::models::DispatchRecord;

/// LIFO stack of dispatcher actions consulted by undo
#[derive(Debug, Default)]
pub struct ActionLog {
    records: Vec<DispatchRecord>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DispatchRecord) {
        tracing::debug!(record = ?record, depth = self.records.len() + 1, "Action logged");
        self.records.push(record);
    }

    /// Remove and return the most recent record
    pub fn pop(&mut self) -> Result<DispatchRecord> {
        self.records.pop().ok_or(DispatchError::Empty("undo"))
    }

    pub fn last(&self) -> Option<&DispatchRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
