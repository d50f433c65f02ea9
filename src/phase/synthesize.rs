use std::f64::consts::PI;

use rayon::prelude::*;

use crate::foundation::core::{DiopterMap, PhaseMask, Raster};
use crate::foundation::error::{HoloError, HoloResult};
use crate::foundation::math::floor_mod;
use crate::params::OpticalParams;

/// Fringe orders per pixel along x and y for one diopter sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FringeSlope {
    /// Fractional fringe order per pixel along x.
    pub theta_x: f64,
    /// Fractional fringe order per pixel along y.
    pub theta_y: f64,
}

impl FringeSlope {
    /// Grating slope that steers a normalized diopter value `d` to its focal plane.
    pub fn for_diopter(params: &OpticalParams, d: f64) -> Self {
        let w = params.working_range;
        let diopters = d * w;
        let scale_y = params.shift_gain() * (w / 2.0 - diopters);
        let scale_x = scale_y / params.nominal_a;

        let half_period = (params.wavelength * params.f0) / (2.0 * params.slm_pitch);
        let delta_x = -scale_x * half_period;
        let delta_y = -scale_y * half_period;
        let n = params.grating_period();

        Self {
            theta_x: delta_x / n,
            theta_y: delta_y / n,
        }
    }
}

/// Compute the wrapped, normalized phase mask for an SLM-frame diopter map.
///
/// `depth` must already have the panel shape declared by `params`; the pixel
/// grid is centred on the panel and spans `[-width/2, width/2)` by
/// `[-height/2, height/2)`. The raw phase `mod_num * (theta_x*X + theta_y*Y)` is
/// wrapped modulo `mod_num`, scaled by `2*pi/mod_num`, then stretched to
/// `[0, 1]`. A uniform phase yields an all-zero mask.
#[tracing::instrument(
    skip(depth, params),
    fields(depth_shape = %depth.shape(), w = params.working_range)
)]
pub fn synthesize_phase_mask(
    depth: &DiopterMap,
    params: &OpticalParams,
    mod_num: f64,
) -> HoloResult<PhaseMask> {
    params.validate()?;
    if !mod_num.is_finite() || mod_num <= 0.0 {
        return Err(HoloError::synthesis(format!(
            "mod_num must be finite and > 0, got {mod_num}"
        )));
    }
    let panel = params.slm_shape();
    if depth.shape() != panel {
        return Err(HoloError::synthesis(format!(
            "diopter map is {} but the declared SLM panel is {panel}",
            depth.shape()
        )));
    }

    let x0 = -(panel.width as f64) / 2.0;
    let y0 = -(panel.height as f64) / 2.0;
    let factor = mod_num / (2.0 * PI);

    let mut phase = vec![0.0; panel.len()];
    phase
        .par_chunks_mut(panel.width)
        .zip(depth.data().par_chunks(panel.width))
        .enumerate()
        .for_each(|(row, (out, d_row))| {
            let y = y0 + row as f64;
            for (col, (p, &d)) in out.iter_mut().zip(d_row).enumerate() {
                let x = x0 + col as f64;
                let slope = FringeSlope::for_diopter(params, d);
                let raw = mod_num * (slope.theta_x * x + slope.theta_y * y);
                *p = floor_mod(raw, mod_num) / factor;
            }
        });

    normalize_unit(&mut phase)?;
    Ok(Raster::from_vec_unchecked(panel, phase))
}

/// Shift `values` so the minimum is 0, then divide by the new maximum.
///
/// All-equal input becomes all zeros instead of dividing by zero.
fn normalize_unit(values: &mut [f64]) -> HoloResult<()> {
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(HoloError::synthesis(format!(
            "phase contains a non-finite sample ({bad})"
        )));
    }
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = hi - lo;
    if span == 0.0 {
        tracing::debug!(value = lo, "uniform phase, emitting flat mask");
        values.fill(0.0);
        return Ok(());
    }
    tracing::debug!(lo, hi, "normalizing phase");
    values.par_iter_mut().for_each(|v| *v = (*v - lo) / span);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/phase/synthesize.rs"]
mod tests;
