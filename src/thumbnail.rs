use image::codecs::jpeg::JpegEncoder;
use image::error::{ParameterError, ParameterErrorKind};
use image::{DynamicImage, ImageError, RgbImage};

/// Encodes a JPEG whose longer side is at most `max_side` pixels.
pub fn encode_thumbnail(image: &RgbImage, max_side: u32, quality: u8) -> Result<Vec<u8>, ImageError> {
    if max_side == 0 || image.width() == 0 || image.height() == 0 {
        return Err(ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )));
    }

    let scaled = if image.width().max(image.height()) > max_side {
        DynamicImage::ImageRgb8(image.clone())
            .thumbnail(max_side, max_side)
            .to_rgb8()
    } else {
        image.clone()
    };

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(&scaled)?;

    Ok(bytes)
}
