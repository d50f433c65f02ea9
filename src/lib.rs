//! holophase computes the images a two-panel varifocal display needs: an OLED
//! color texture and an SLM phase mask that focuses each pixel at its own depth.
//!
//! # Pipeline overview
//!
//! 1. **Quantize** (optional): `DiopterMap -> DiopterMap` snapped to N focal planes
//! 2. **Fit**: mirror both inputs, crop/pad them to the SLM resolution, then warp the
//!    texture into the OLED frame with the inverse panel homography
//! 3. **Synthesize**: closed-form lens/grating phase per SLM pixel, wrapped and
//!    normalized to `[0, 1]`
//! 4. **Persist** (optional): quantize the three rasters to 8 bits and write PNGs
//!
//! Every stage is a pure function over in-memory rasters; all IO lives in
//! [`assets`] and [`pipeline::run_from_paths`].
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub mod assets;
pub mod depth;
pub mod fit;
pub mod params;
pub mod phase;
pub mod pipeline;
pub mod transform;

pub use assets::decode::{decode_diopter, decode_texture, load_diopter_map, load_texture_map};
pub use assets::encode::{Device, output_path, save_gray_png, save_texture_png};
pub use depth::quantize::{depth_bins, quantize_depth};
pub use fit::crop::{AxisFit, crop_or_pad, crop_or_pad_depth, crop_or_pad_texture, flip_both};
pub use fit::frame::{FittedImages, fit_images};
pub use fit::warp::warp_perspective;
pub use foundation::core::{DiopterMap, PhaseMask, Raster, Rgb, Shape, TextureMap};
pub use foundation::error::{HoloError, HoloResult};
pub use params::{OpticalParams, PipelineConfig};
pub use phase::synthesize::{FringeSlope, synthesize_phase_mask};
pub use pipeline::{PipelineOutputs, RunPaths, WrittenOutputs, run_from_paths, run_pipeline};
pub use transform::homography::Homography;
