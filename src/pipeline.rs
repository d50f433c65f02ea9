//! End-to-end batch run: two input images in, three panel images out.

use std::path::{Path, PathBuf};

use crate::assets::decode::{load_diopter_map, load_texture_map};
use crate::assets::encode::{Device, output_path, save_gray_png, save_texture_png};
use crate::depth::quantize::quantize_depth;
use crate::fit::frame::fit_images;
use crate::foundation::core::{DiopterMap, PhaseMask, TextureMap};
use crate::foundation::error::{HoloError, HoloResult};
use crate::params::PipelineConfig;
use crate::phase::synthesize::synthesize_phase_mask;
use crate::transform::homography::Homography;

/// The three rasters a run produces, all normalized to `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOutputs {
    /// Color texture for the OLED panel.
    pub oled_texture: TextureMap,
    /// Diopter map in the SLM frame.
    pub slm_depth: DiopterMap,
    /// Wrapped phase for the SLM.
    pub phase_mask: PhaseMask,
}

/// Quantize (optionally), fit, and synthesize from in-memory rasters.
#[tracing::instrument(skip_all, fields(discretize = config.discretize, levels = config.num_depths))]
pub fn run_pipeline(
    config: &PipelineConfig,
    homography: &Homography,
    texture: &TextureMap,
    depth: &DiopterMap,
) -> HoloResult<PipelineOutputs> {
    config.validate()?;

    let quantized;
    let depth = if config.discretize {
        quantized = quantize_depth(depth, config.num_depths)?;
        &quantized
    } else {
        depth
    };

    let fitted = fit_images(
        homography,
        texture,
        depth,
        config.oled_shape,
        config.slm_shape,
    )?;
    let phase_mask = synthesize_phase_mask(&fitted.slm_depth, &config.params, config.mod_num)?;

    Ok(PipelineOutputs {
        oled_texture: fitted.oled_texture,
        slm_depth: fitted.slm_depth,
        phase_mask,
    })
}

/// Where a file-based run reads from and writes to.
#[derive(Clone, Debug)]
pub struct RunPaths {
    /// Color texture image.
    pub texture: PathBuf,
    /// Grayscale diopter image.
    pub diopter: PathBuf,
    /// Homography file (text or JSON).
    pub homography: PathBuf,
    /// Directory receiving the three PNGs.
    pub out_dir: PathBuf,
}

/// Paths of the files a run wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenOutputs {
    /// `OLED_<texture stem>.png`.
    pub oled_texture: PathBuf,
    /// `SLM_<diopter stem>.png`.
    pub slm_depth: PathBuf,
    /// `SLM_phase_mask_<diopter stem>.png`.
    pub phase_mask: PathBuf,
}

/// Load inputs from disk, run the pipeline, and save the three outputs as PNG.
pub fn run_from_paths(config: &PipelineConfig, paths: &RunPaths) -> HoloResult<WrittenOutputs> {
    let texture = load_texture_map(&paths.texture)?;
    let depth = load_diopter_map(&paths.diopter)?;
    let homography = Homography::from_path(&paths.homography)?;
    tracing::info!(
        texture = %texture.shape(),
        depth = %depth.shape(),
        oled = %config.oled_shape,
        slm = %config.slm_shape,
        "loaded inputs"
    );

    let outputs = run_pipeline(config, &homography, &texture, &depth)?;

    let texture_name = png_name(&paths.texture)?;
    let diopter_name = png_name(&paths.diopter)?;
    let written = WrittenOutputs {
        oled_texture: output_path(&paths.out_dir, Device::Oled, &texture_name),
        slm_depth: output_path(&paths.out_dir, Device::Slm, &diopter_name),
        phase_mask: output_path(
            &paths.out_dir,
            Device::Slm,
            &format!("phase_mask_{diopter_name}"),
        ),
    };

    save_texture_png(&written.oled_texture, &outputs.oled_texture)?;
    save_gray_png(&written.slm_depth, &outputs.slm_depth)?;
    save_gray_png(&written.phase_mask, &outputs.phase_mask)?;
    for path in [
        &written.oled_texture,
        &written.slm_depth,
        &written.phase_mask,
    ] {
        tracing::info!(path = %path.display(), "image saved");
    }
    Ok(written)
}

/// Input file name with its extension forced to `.png`.
fn png_name(path: &Path) -> HoloResult<String> {
    let stem = path
        .file_stem()
        .ok_or_else(|| HoloError::validation(format!("'{}' has no file name", path.display())))?;
    Ok(format!("{}.png", stem.to_string_lossy()))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
