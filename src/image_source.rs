#[cfg(test)]
pub mod impl_fake;
pub mod impl_file;
pub mod interface;

use image::{DynamicImage, RgbImage};
use interface::DecodeError;

/// Converts a decoded image into the pixel layout classifiers take.
pub fn to_model_input(image: &DynamicImage) -> Result<RgbImage, DecodeError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::Empty);
    }

    Ok(image.to_rgb8())
}
