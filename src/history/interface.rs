use crate::record::ClassificationRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("history storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: i32, supported: i32 },
    #[error("corrupt history row {id}: {message}")]
    Corrupt { id: i64, message: String },
    #[error("history store lock poisoned")]
    Poisoned,
}

/// Append-only store of completed classifications.
pub trait HistoryStore {
    fn append(&self, record: &ClassificationRecord) -> Result<(), HistoryError>;

    /// Newest first. Records with equal timestamps come back most recently appended first.
    fn list(&self) -> Result<Vec<ClassificationRecord>, HistoryError>;
}
