use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{DiopterMap, TextureMap};
use crate::foundation::error::HoloResult;
use crate::foundation::math::unit_to_u8;

/// Panel an output image is destined for; used as the file name prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Device {
    /// Color texture panel.
    Oled,
    /// Phase modulator panel.
    Slm,
}

impl Device {
    /// File name prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Device::Oled => "OLED",
            Device::Slm => "SLM",
        }
    }
}

/// `<dir>/<DEVICE>_<name>`.
pub fn output_path(dir: &Path, device: Device, name: &str) -> PathBuf {
    dir.join(format!("{}_{name}", device.prefix()))
}

/// Quantize a color raster to 8-bit RGB.
pub fn texture_to_rgb8(texture: &TextureMap) -> image::RgbImage {
    image::RgbImage::from_fn(texture.width() as u32, texture.height() as u32, |x, y| {
        image::Rgb(texture.get(y as usize, x as usize).map(unit_to_u8))
    })
}

/// Quantize a single-channel raster to 8-bit luma.
pub fn gray_to_luma8(map: &DiopterMap) -> image::GrayImage {
    image::GrayImage::from_fn(map.width() as u32, map.height() as u32, |x, y| {
        image::Luma([unit_to_u8(map.get(y as usize, x as usize))])
    })
}

/// Save a color raster as an 8-bit PNG, creating parent directories.
pub fn save_texture_png(path: &Path, texture: &TextureMap) -> HoloResult<()> {
    ensure_parent_dir(path)?;
    texture_to_rgb8(texture)
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Save a single-channel raster as an 8-bit grayscale PNG, creating parent directories.
pub fn save_gray_png(path: &Path, map: &DiopterMap) -> HoloResult<()> {
    ensure_parent_dir(path)?;
    gray_to_luma8(map)
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> HoloResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
