use crate::history::interface::{HistoryError, HistoryStore};
use crate::record::ClassificationRecord;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct HistoryStoreMemory {
    records: Mutex<Vec<ClassificationRecord>>,
}

impl HistoryStoreMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for HistoryStoreMemory {
    fn append(&self, record: &ClassificationRecord) -> Result<(), HistoryError> {
        self.records
            .lock()
            .map_err(|_| HistoryError::Poisoned)?
            .push(record.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<ClassificationRecord>, HistoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| HistoryError::Poisoned)?
            .clone();

        // stable sort over reversed insertion order keeps later inserts first on ties
        records.reverse();
        records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

        Ok(records)
    }
}
