//! Projective transform between the OLED and SLM pixel frames.

use std::path::Path;

use anyhow::Context as _;
use nalgebra::{Matrix3, Vector3};

use crate::foundation::error::{HoloError, HoloResult};

/// A 3x3 projective transform acting on homogeneous pixel coordinates `(x, y, 1)`.
///
/// The device homography maps OLED pixel coordinates to SLM pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    m: Matrix3<f64>,
}

impl Homography {
    /// Build from row-major entries. All entries must be finite.
    pub fn new(rows: [[f64; 3]; 3]) -> HoloResult<Self> {
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(HoloError::validation(
                "homography entries must be finite",
            ));
        }
        let m = Matrix3::from_row_slice(&rows.concat());
        Ok(Self { m })
    }

    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    /// Row-major entries.
    pub fn rows(&self) -> [[f64; 3]; 3] {
        let m = &self.m;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Inverse transform; a singular matrix is a fit error.
    pub fn inverse(&self) -> HoloResult<Self> {
        let Some(inv) = self.m.try_inverse() else {
            return Err(HoloError::fit(format!(
                "homography is singular (det = {:e})",
                self.m.determinant()
            )));
        };
        if inv.iter().any(|v| !v.is_finite()) {
            return Err(HoloError::fit("homography inverse is not finite"));
        }
        Ok(Self { m: inv })
    }

    /// Map `(x, y)`; `None` when the point lands on the line at infinity.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let p = self.m * Vector3::new(x, y, 1.0);
        let w = p.z;
        if w == 0.0 || !w.is_finite() {
            return None;
        }
        Some((p.x / w, p.y / w))
    }

    /// Parse 9 row-major numbers separated by whitespace (commas also accepted).
    pub fn from_text(text: &str) -> HoloResult<Self> {
        let values = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<f64>()
                    .map_err(|e| HoloError::serde(format!("homography value '{t}': {e}")))
            })
            .collect::<HoloResult<Vec<f64>>>()?;
        if values.len() != 9 {
            return Err(HoloError::serde(format!(
                "homography needs 9 values, found {}",
                values.len()
            )));
        }
        Self::new([
            [values[0], values[1], values[2]],
            [values[3], values[4], values[5]],
            [values[6], values[7], values[8]],
        ])
    }

    /// Parse a JSON `[[a, b, c], [d, e, f], [g, h, i]]` array.
    pub fn from_json(text: &str) -> HoloResult<Self> {
        let rows: [[f64; 3]; 3] = serde_json::from_str(text)
            .map_err(|e| HoloError::serde(format!("parse homography JSON: {e}")))?;
        Self::new(rows)
    }

    /// Load from disk: `.json` files are parsed as JSON, anything else as text.
    pub fn from_path(path: impl AsRef<Path>) -> HoloResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read homography '{}'", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&text)
        } else {
            Self::from_text(&text)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/homography.rs"]
mod tests;
