use crate::image_source::interface::{DecodeError, ImageSelection, ImageSource};
use crate::library::logger::interface::Logger;
use std::sync::Arc;

pub struct ImageSourceFile {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageSourceFile {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_source").with_namespace("file"),
        }
    }
}

impl ImageSource for ImageSourceFile {
    fn fetch(&self, selection: &ImageSelection) -> Result<Vec<u8>, DecodeError> {
        let _ = self.logger.info(&format!("Reading {}", selection));

        std::fs::read(&selection.path).map_err(|e| DecodeError::Read {
            selection: selection.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;
    use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn test_load_reads_and_decodes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 4, Rgb([255, 0, 0])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        std::fs::write(&path, bytes).unwrap();

        let source = ImageSourceFile::new(Arc::new(LoggerFake::new()));
        let image = source.load(&ImageSelection::new(&path)).unwrap();

        assert_eq!(image.dimensions(), (6, 4));
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let source = ImageSourceFile::new(Arc::new(LoggerFake::new()));

        let result = source.load(&ImageSelection::new("./no/such/photo.jpg"));

        assert!(matches!(result, Err(DecodeError::Read { .. })));
    }

    #[test]
    fn test_garbage_bytes_are_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let source = ImageSourceFile::new(Arc::new(LoggerFake::new()));
        let result = source.load(&ImageSelection::new(&path));

        assert!(matches!(result, Err(DecodeError::Format(_))));
    }
}
