use image::DynamicImage;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What the user picked. Resolved to bytes by an `ImageSource`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageSelection {
    pub path: PathBuf,
}

impl ImageSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl fmt::Display for ImageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("could not read {selection}: {message}")]
    Read { selection: String, message: String },
    #[error("unsupported or corrupt image: {0}")]
    Format(String),
    #[error("image has no pixels")]
    Empty,
}

pub trait ImageSource {
    fn fetch(&self, selection: &ImageSelection) -> Result<Vec<u8>, DecodeError>;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        decode_image(bytes)
    }

    fn load(&self, selection: &ImageSelection) -> Result<DynamicImage, DecodeError> {
        let bytes = self.fetch(selection)?;
        self.decode(&bytes)
    }
}

pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    image::load_from_memory(bytes).map_err(|e| DecodeError::Format(e.to_string()))
}
