use crate::image_source::interface::{DecodeError, ImageSelection, ImageSource};
use std::collections::HashMap;
use std::path::PathBuf;

/// Serves images from memory, keyed by path.
#[derive(Debug, Default)]
pub struct ImageSourceFake {
    images: HashMap<PathBuf, Vec<u8>>,
}

impl ImageSourceFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        self.images.insert(path.into(), bytes);
        self
    }
}

impl ImageSource for ImageSourceFake {
    fn fetch(&self, selection: &ImageSelection) -> Result<Vec<u8>, DecodeError> {
        self.images
            .get(&selection.path)
            .cloned()
            .ok_or_else(|| DecodeError::Read {
                selection: selection.to_string(),
                message: "no such image".to_string(),
            })
    }
}
