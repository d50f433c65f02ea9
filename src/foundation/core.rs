use crate::foundation::error::{HoloError, HoloResult};

/// One color sample: normalized linear R, G, B in `[0, 1]`.
pub type Rgb = [f64; 3];

/// Single-channel normalized optical power per pixel.
pub type DiopterMap = Raster<f64>;

/// Three-channel normalized color texture.
pub type TextureMap = Raster<Rgb>;

/// Wrapped phase normalized to `[0, 1]`.
pub type PhaseMask = Raster<f64>;

/// Raster dimensions in pixels, always `(height, width)` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl Shape {
    /// Build a shape from `(height, width)`.
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Total pixel count.
    pub fn len(self) -> usize {
        self.height * self.width
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.height == 0 || self.width == 0
    }

    pub(crate) fn checked_len(self) -> HoloResult<usize> {
        if self.is_empty() {
            return Err(HoloError::validation(format!(
                "raster shape must be non-empty, got {self}"
            )));
        }
        self.height
            .checked_mul(self.width)
            .ok_or_else(|| HoloError::validation(format!("raster shape {self} overflows")))
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Row-major, tightly packed 2-D grid of pixels.
///
/// Rasters are never empty: construction rejects zero-sized shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster<P> {
    shape: Shape,
    data: Vec<P>,
}

impl<P: Copy> Raster<P> {
    /// Wrap row-major pixel data; `data.len()` must equal `shape.len()`.
    pub fn new(shape: Shape, data: Vec<P>) -> HoloResult<Self> {
        let expected = shape.checked_len()?;
        if data.len() != expected {
            return Err(HoloError::validation(format!(
                "raster {shape} expects {expected} pixels, got {}",
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Raster with every pixel set to `value`.
    pub fn filled(shape: Shape, value: P) -> HoloResult<Self> {
        let len = shape.checked_len()?;
        Ok(Self {
            shape,
            data: vec![value; len],
        })
    }

    /// Raster built by evaluating `f(y, x)` for every pixel.
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize, usize) -> P) -> HoloResult<Self> {
        let len = shape.checked_len()?;
        let mut data = Vec::with_capacity(len);
        for y in 0..shape.height {
            for x in 0..shape.width {
                data.push(f(y, x));
            }
        }
        Ok(Self { shape, data })
    }

    pub(crate) fn from_vec_unchecked(shape: Shape, data: Vec<P>) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self { shape, data }
    }

    /// Dimensions of the raster.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Row count.
    pub fn height(&self) -> usize {
        self.shape.height
    }

    /// Column count.
    pub fn width(&self) -> usize {
        self.shape.width
    }

    /// Pixel at row `y`, column `x`. Panics when out of bounds.
    pub fn get(&self, y: usize, x: usize) -> P {
        self.data[y * self.shape.width + x]
    }

    /// Borrow row `y`.
    pub fn row(&self, y: usize) -> &[P] {
        let w = self.shape.width;
        &self.data[y * w..(y + 1) * w]
    }

    /// Row-major pixel slice.
    pub fn data(&self) -> &[P] {
        &self.data
    }

    /// Take the row-major pixel buffer.
    pub fn into_data(self) -> Vec<P> {
        self.data
    }

    /// Apply `f` to every pixel, keeping the shape.
    pub fn map<Q: Copy>(&self, f: impl Fn(P) -> Q) -> Raster<Q> {
        Raster {
            shape: self.shape,
            data: self.data.iter().map(|&p| f(p)).collect(),
        }
    }
}

impl Raster<f64> {
    /// Smallest and largest sample, ignoring NaN.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
