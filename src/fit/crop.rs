use crate::foundation::core::{DiopterMap, Raster, Shape, TextureMap};
use crate::foundation::error::HoloResult;

/// How one axis of a source maps onto the same axis of the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisFit {
    /// First source sample copied.
    pub src_start: usize,
    /// Where that sample lands in the target.
    pub dst_start: usize,
    /// Number of samples copied.
    pub len: usize,
}

impl AxisFit {
    /// Centre `source` samples inside `target`, cropping or zero-padding.
    ///
    /// An odd surplus or deficit puts the extra pixel on the trailing edge.
    pub fn new(source: usize, target: usize) -> Self {
        if source > target {
            Self {
                src_start: (source - target) / 2,
                dst_start: 0,
                len: target,
            }
        } else {
            Self {
                src_start: 0,
                dst_start: (target - source) / 2,
                len: source,
            }
        }
    }
}

/// Mirror a raster along both axes (vertical flip, then horizontal).
pub fn flip_both<P: Copy>(src: &Raster<P>) -> Raster<P> {
    let mut data = src.data().to_vec();
    data.reverse();
    // Reversing the row-major buffer flips rows and columns at once.
    Raster::from_vec_unchecked(src.shape(), data)
}

/// Crop and/or zero-pad `src` to exactly `target`, pixel for pixel.
pub fn crop_or_pad<P: Copy + Default>(src: &Raster<P>, target: Shape) -> HoloResult<Raster<P>> {
    let rows = AxisFit::new(src.height(), target.height);
    let cols = AxisFit::new(src.width(), target.width);
    let mut out = vec![P::default(); target.checked_len()?];
    for i in 0..rows.len {
        let src_row = &src.row(rows.src_start + i)[cols.src_start..cols.src_start + cols.len];
        let dst_off = (rows.dst_start + i) * target.width + cols.dst_start;
        out[dst_off..dst_off + cols.len].copy_from_slice(src_row);
    }
    Ok(Raster::from_vec_unchecked(target, out))
}

/// Single-channel crop/pad.
pub fn crop_or_pad_depth(src: &DiopterMap, target: Shape) -> HoloResult<DiopterMap> {
    crop_or_pad(src, target)
}

/// Color crop/pad; all three channels share one window.
pub fn crop_or_pad_texture(src: &TextureMap, target: Shape) -> HoloResult<TextureMap> {
    crop_or_pad(src, target)
}

#[cfg(test)]
#[path = "../../tests/unit/fit/crop.rs"]
mod tests;
