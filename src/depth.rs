//! Depth quantization into discrete focal planes.

/// Evenly spaced depth planes and left-closed binning.
pub mod quantize;
