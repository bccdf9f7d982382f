use image::RgbImage;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct InferenceError {
    pub message: String,
}

impl InferenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait ImageClassifier {
    /// Candidates ranked by descending confidence. May be empty.
    fn predict(&self, image: &RgbImage) -> Result<Vec<Classification>, InferenceError>;
}
