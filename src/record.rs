use chrono::{DateTime, SubsecRound, Utc};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("label is empty")]
    EmptyLabel,
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f32),
}

/// One completed classification. Immutable once built.
#[derive(Clone, PartialEq)]
pub struct ClassificationRecord {
    timestamp: DateTime<Utc>,
    label: String,
    confidence: f32,
    thumbnail: Option<Vec<u8>>,
}

impl ClassificationRecord {
    /// The timestamp is truncated to microseconds, the precision history is stored at.
    pub fn new(
        timestamp: DateTime<Utc>,
        label: impl Into<String>,
        confidence: f32,
        thumbnail: Option<Vec<u8>>,
    ) -> Result<Self, RecordError> {
        let label = label.into();

        if label.trim().is_empty() {
            return Err(RecordError::EmptyLabel);
        }

        if !(0.0..=1.0).contains(&confidence) {
            return Err(RecordError::ConfidenceOutOfRange(confidence));
        }

        Ok(Self {
            timestamp: timestamp.trunc_subsecs(6),
            label,
            confidence,
            thumbnail,
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.thumbnail.as_deref()
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0) as u32
    }
}

impl fmt::Debug for ClassificationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRecord")
            .field("timestamp", &self.timestamp)
            .field("label", &self.label)
            .field("confidence", &self.confidence)
            .field("thumbnail_bytes", &self.thumbnail.as_ref().map(Vec::len))
            .finish()
    }
}
