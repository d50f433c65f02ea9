use rayon::prelude::*;

use crate::foundation::core::{Raster, Rgb, Shape, TextureMap};
use crate::foundation::error::HoloResult;
use crate::transform::homography::Homography;

/// Warp `src` by the projective `transform` into a raster of shape `out`.
///
/// Backward mapping: each destination pixel `p` samples the source at
/// `transform^-1 * p` with bilinear interpolation. Pixel centres sit on integer
/// coordinates and neighbours outside the source read as zero, so regions
/// that map off the source come out black. A singular `transform` is an error.
#[tracing::instrument(skip_all, fields(src_shape = %src.shape(), out_shape = %out))]
pub fn warp_perspective(
    src: &TextureMap,
    transform: &Homography,
    out: Shape,
) -> HoloResult<TextureMap> {
    let dst_to_src = transform.inverse()?;
    let mut data = vec![[0.0; 3]; out.checked_len()?];

    data.par_chunks_mut(out.width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                if let Some((sx, sy)) = dst_to_src.apply(x as f64, y as f64) {
                    *px = sample_bilinear(src, sx, sy);
                }
            }
        });

    Ok(Raster::from_vec_unchecked(out, data))
}

fn sample_bilinear(src: &TextureMap, sx: f64, sy: f64) -> Rgb {
    let (w, h) = (src.width() as f64, src.height() as f64);
    // Outside this box all four neighbours are off the source.
    if !(sx > -1.0 && sy > -1.0 && sx < w && sy < h) {
        return [0.0; 3];
    }
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];
    let mut acc = [0.0; 3];
    for (tx, ty, weight) in taps {
        if weight == 0.0 {
            continue;
        }
        let Some(px) = fetch(src, tx, ty) else {
            continue;
        };
        for (a, c) in acc.iter_mut().zip(px) {
            *a += weight * c;
        }
    }
    acc
}

#[inline]
fn fetch(src: &TextureMap, x: i64, y: i64) -> Option<Rgb> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    (x < src.width() && y < src.height()).then(|| src.get(y, x))
}

#[cfg(test)]
#[path = "../../tests/unit/fit/warp.rs"]
mod tests;
