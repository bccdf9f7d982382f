use image::{imageops, Rgb, RgbImage};
use tract_onnx::prelude::*;

/// Scales to fit inside `width` x `height` and pads the rest with black.
pub fn resize_image(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if same_aspect_ratio(image.width(), image.height(), width, height) {
        return imageops::resize(image, width, height, imageops::FilterType::Triangle);
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    let scaled = imageops::resize(image, new_w, new_h, imageops::FilterType::Triangle);

    let mut padded = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::replace(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    padded
}

fn same_aspect_ratio(width: u32, height: u32, target_width: u32, target_height: u32) -> bool {
    u64::from(width) * u64::from(target_height) == u64::from(height) * u64::from(target_width)
}

/// NCHW tensor, each channel scaled to [0,1] then normalised by `mean` and `std`.
fn image_to_tensor(image: &RgbImage, mean: &[f32; 3], std: &[f32; 3]) -> Tensor {
    let (width, height) = (image.width() as usize, image.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - mean[c]) / std[c]
    })
    .into_tensor()
}

pub fn resize_image_to_tensor(
    image: &RgbImage,
    width: u32,
    height: u32,
    mean: &[f32; 3],
    std: &[f32; 3],
) -> Tensor {
    let resized = resize_image(image, width, height);
    image_to_tensor(&resized, mean, std)
}
