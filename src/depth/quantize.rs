use crate::foundation::core::DiopterMap;
use crate::foundation::error::{HoloError, HoloResult};
use crate::foundation::math::linspace;

/// Snap every sample of `map` onto one of `levels` evenly spaced depth planes.
///
/// The planes span `[min(map), max(map)]` inclusive. A sample is replaced by the
/// value of the last plane that does not exceed it, so the output holds plane
/// values, not indices. A constant map is returned unchanged.
#[tracing::instrument(skip(map), fields(map_shape = %map.shape()))]
pub fn quantize_depth(map: &DiopterMap, levels: usize) -> HoloResult<DiopterMap> {
    if levels == 0 {
        return Err(HoloError::validation("depth level count must be >= 1"));
    }
    let (lo, hi) = map.min_max();
    if !lo.is_finite() || !hi.is_finite() {
        return Err(HoloError::quantize(format!(
            "diopter map has non-finite extent [{lo}, {hi}]"
        )));
    }
    if lo == hi {
        tracing::debug!(value = lo, "constant diopter map, nothing to quantize");
        return Ok(map.clone());
    }

    let bins = depth_bins(lo, hi, levels);
    tracing::debug!(levels, lo, hi, "quantizing diopter map");
    Ok(map.map(|v| snap(&bins, v)))
}

/// Left edges of the depth planes for the extent `[lo, hi]`.
pub fn depth_bins(lo: f64, hi: f64, levels: usize) -> Vec<f64> {
    linspace(lo, hi, levels)
}

fn snap(bins: &[f64], v: f64) -> f64 {
    // bins[0] is the map minimum, so at least one edge is <= v.
    let idx = bins.partition_point(|&b| b <= v).saturating_sub(1);
    bins[idx]
}

#[cfg(test)]
#[path = "../../tests/unit/depth/quantize.rs"]
mod tests;
