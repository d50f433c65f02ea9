use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{DiopterMap, Shape, TextureMap};
use crate::foundation::error::{HoloError, HoloResult};

/// Decode encoded image bytes into a normalized RGB texture.
///
/// Alpha and any extra channels are dropped; samples are divided by 255.
pub fn decode_texture(bytes: &[u8]) -> HoloResult<TextureMap> {
    let dyn_img = image::load_from_memory(bytes).context("decode texture image from memory")?;
    texture_from_image(&dyn_img)
}

/// Decode encoded image bytes into a normalized single-channel diopter map.
pub fn decode_diopter(bytes: &[u8]) -> HoloResult<DiopterMap> {
    let dyn_img = image::load_from_memory(bytes).context("decode diopter image from memory")?;
    diopter_from_image(&dyn_img)
}

/// Read and decode a texture image from disk.
pub fn load_texture_map(path: impl AsRef<Path>) -> HoloResult<TextureMap> {
    let path = path.as_ref();
    let dyn_img =
        image::open(path).with_context(|| format!("open texture map '{}'", path.display()))?;
    texture_from_image(&dyn_img)
}

/// Read and decode a diopter image from disk.
pub fn load_diopter_map(path: impl AsRef<Path>) -> HoloResult<DiopterMap> {
    let path = path.as_ref();
    let dyn_img =
        image::open(path).with_context(|| format!("open diopter map '{}'", path.display()))?;
    diopter_from_image(&dyn_img)
}

fn texture_from_image(img: &image::DynamicImage) -> HoloResult<TextureMap> {
    let rgb = img.to_rgb8();
    let shape = image_shape(rgb.width(), rgb.height())?;
    let data = rgb
        .pixels()
        .map(|p| [unit(p[0]), unit(p[1]), unit(p[2])])
        .collect();
    TextureMap::new(shape, data)
}

fn diopter_from_image(img: &image::DynamicImage) -> HoloResult<DiopterMap> {
    let luma = img.to_luma8();
    let shape = image_shape(luma.width(), luma.height())?;
    let data = luma.pixels().map(|p| unit(p[0])).collect();
    DiopterMap::new(shape, data)
}

fn image_shape(width: u32, height: u32) -> HoloResult<Shape> {
    if width == 0 || height == 0 {
        return Err(HoloError::validation("decoded image has zero size"));
    }
    Ok(Shape::new(height as usize, width as usize))
}

#[inline]
fn unit(v: u8) -> f64 {
    f64::from(v) / 255.0
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
