use crate::history::interface::{HistoryError, HistoryStore};
use crate::history::migrations::run_migrations;
use crate::record::ClassificationRecord;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

pub struct HistoryStoreSqlite {
    conn: Mutex<Connection>,
}

impl HistoryStoreSqlite {
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Self::from_connection(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, HistoryError> {
        let _journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl HistoryStore for HistoryStoreSqlite {
    fn append(&self, record: &ClassificationRecord) -> Result<(), HistoryError> {
        let conn = self.conn.lock().map_err(|_| HistoryError::Poisoned)?;

        conn.execute(
            "INSERT INTO classification_history (timestamp_us, label, confidence, thumbnail)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.timestamp().timestamp_micros(),
                record.label(),
                record.confidence() as f64,
                record.thumbnail(),
            ],
        )?;

        Ok(())
    }

    fn list(&self) -> Result<Vec<ClassificationRecord>, HistoryError> {
        let conn = self.conn.lock().map_err(|_| HistoryError::Poisoned)?;

        let mut stmt = conn.prepare(
            "SELECT id, timestamp_us, label, confidence, thumbnail
             FROM classification_history
             ORDER BY timestamp_us DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, Option<Vec<u8>>>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, timestamp_us, label, confidence, thumbnail) = row?;

            let timestamp =
                DateTime::<Utc>::from_timestamp_micros(timestamp_us).ok_or_else(|| {
                    HistoryError::Corrupt {
                        id,
                        message: format!("timestamp {} out of range", timestamp_us),
                    }
                })?;

            let record = ClassificationRecord::new(timestamp, label, confidence as f32, thumbnail)
                .map_err(|e| HistoryError::Corrupt {
                    id,
                    message: e.to_string(),
                })?;

            records.push(record);
        }

        Ok(records)
    }
}
