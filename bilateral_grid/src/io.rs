//! Image decode/encode between disk and [`ImageF32`] buffers.

use std::path::Path;

use image::GrayImage;

use crate::buffer::ImageF32;
use crate::error::Error;

/// Load an image and convert it to a single-channel f32 buffer in `[0, 1]`.
pub fn load(path: &Path) -> Result<ImageF32, Error> {
    let decoded = image::open(path).map_err(|source| Error::Load {
        path: path.to_owned(),
        source,
    })?;
    let gray = decoded.into_luma8();
    let (w, h) = gray.dimensions();
    let data: Vec<f32> = gray
        .into_raw()
        .into_iter()
        .map(|v| f32::from(v) / 255.0)
        .collect();
    Ok(ImageF32::from_raw(w as usize, h as usize, 1, data)
        .expect("luma8 buffer length always matches its dimensions"))
}

/// Save a single-channel buffer as an 8-bit grayscale image, clamping
/// samples to `[0, 1]`.
pub fn save(img: &ImageF32, path: &Path) -> Result<(), Error> {
    if img.channels() != 1 {
        return Err(Error::ShapeMismatch {
            expected: (img.width(), img.height(), 1),
            actual: img.shape(),
        });
    }
    let mut out = GrayImage::new(img.width() as u32, img.height() as u32);
    for (pixel, &v) in out.pixels_mut().zip(img.as_slice()) {
        pixel.0 = [(v.clamp(0.0, 1.0) * 255.0).round() as u8];
    }
    out.save(path).map_err(|source| Error::Save {
        path: path.to_owned(),
        source,
    })
}
