//! Image file boundary: decoding inputs and persisting 8-bit outputs.

/// Decode texture and diopter images into normalized rasters.
pub mod decode;
/// Quantize rasters to 8 bits and write PNGs.
pub mod encode;
