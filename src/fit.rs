//! Fitting texture and depth rasters to the OLED and SLM panel frames.

/// Mirroring and centred crop/pad without resampling.
pub mod crop;
/// Fit both input images to their panels.
pub mod frame;
/// Backward perspective warp with bilinear sampling.
pub mod warp;
