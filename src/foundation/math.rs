/// `num` evenly spaced samples over `[start, stop]`, both ends included.
///
/// Samples are `start + i * step` and the last one is pinned to `stop`, so the
/// endpoints are reproduced exactly.
pub(crate) fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let div = (num - 1) as f64;
            let delta = stop - start;
            let step = delta / div;
            let mut out: Vec<f64> = if step == 0.0 {
                (0..num).map(|i| (i as f64 / div) * delta + start).collect()
            } else {
                (0..num).map(|i| i as f64 * step + start).collect()
            };
            out[num - 1] = stop;
            out
        }
    }
}

/// Floored modulo: the result carries the sign of `m`.
#[inline]
pub(crate) fn floor_mod(v: f64, m: f64) -> f64 {
    let r = v % m;
    if r != 0.0 && (r < 0.0) != (m < 0.0) {
        r + m
    } else {
        r
    }
}

/// Quantize a normalized sample to 8 bits with round-half-to-even.
#[inline]
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    (v * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
