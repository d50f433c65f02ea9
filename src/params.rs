//! Optical constants of the display and the run configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Shape;
use crate::foundation::error::{HoloError, HoloResult};

/// Physical constants of one OLED + SLM device.
///
/// This is an immutable value object: the only supported change is picking a
/// different working range before a run, via [`OpticalParams::with_working_range`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpticalParams {
    /// Nominal anamorphic ratio of the relay optics.
    pub nominal_a: f64,
    /// Lens constant.
    pub c0: f64,
    /// Illumination wavelength in meters.
    pub wavelength: f64,
    /// Fourier lens focal length in meters.
    pub f0: f64,
    /// Eyepiece focal length in meters.
    pub fe: f64,
    /// SLM pixel pitch in meters.
    pub slm_pitch: f64,
    /// Working range `W` in diopters.
    pub working_range: f64,
    /// Declared SLM panel width in pixels.
    pub slm_width: usize,
    /// Declared SLM panel height in pixels.
    pub slm_height: usize,
}

impl Default for OpticalParams {
    fn default() -> Self {
        Self {
            nominal_a: -0.14 / 0.08,
            c0: 0.0193,
            wavelength: 530e-9,
            f0: 100e-3,
            fe: 40e-3,
            slm_pitch: 3.74e-6,
            working_range: 4.0,
            slm_width: 4000,
            slm_height: 2464,
        }
    }
}

impl OpticalParams {
    /// Copy of `self` with a different working range `W`.
    pub fn with_working_range(self, working_range: f64) -> Self {
        Self {
            working_range,
            ..self
        }
    }

    /// Declared SLM panel shape.
    pub fn slm_shape(&self) -> Shape {
        Shape::new(self.slm_height, self.slm_width)
    }

    /// Grating period `N = lambda * f0 / pitch`, in pixels.
    pub fn grating_period(&self) -> f64 {
        self.wavelength * self.f0 / self.slm_pitch
    }

    /// Proportionality between `(W/2 - D)` and the vertical shift scale.
    pub fn shift_gain(&self) -> f64 {
        (self.c0 * self.slm_pitch * self.fe * self.fe)
            / (3.0 * self.wavelength * self.f0.powi(3))
    }

    /// Reject constants that would make the phase formula meaningless.
    pub fn validate(&self) -> HoloResult<()> {
        let finite = [
            ("nominal_a", self.nominal_a),
            ("c0", self.c0),
            ("wavelength", self.wavelength),
            ("f0", self.f0),
            ("fe", self.fe),
            ("slm_pitch", self.slm_pitch),
            ("working_range", self.working_range),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(HoloError::validation(format!(
                    "optical parameter '{name}' must be finite, got {v}"
                )));
            }
        }
        for (name, v) in [
            ("nominal_a", self.nominal_a),
            ("wavelength", self.wavelength),
            ("f0", self.f0),
            ("slm_pitch", self.slm_pitch),
        ] {
            if v == 0.0 {
                return Err(HoloError::validation(format!(
                    "optical parameter '{name}' must be non-zero"
                )));
            }
        }
        if self.working_range < 0.0 {
            return Err(HoloError::validation("working_range must be >= 0"));
        }
        if self.slm_width == 0 || self.slm_height == 0 {
            return Err(HoloError::validation(
                "slm_width and slm_height must be >= 1",
            ));
        }
        Ok(())
    }
}

/// Everything a single batch run needs besides the input images and homography.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Quantize the diopter map before fitting.
    pub discretize: bool,
    /// Number of depth levels used when `discretize` is set.
    pub num_depths: usize,
    /// OLED panel resolution.
    pub oled_shape: Shape,
    /// SLM panel resolution.
    pub slm_shape: Shape,
    /// Phase modulation period multiplier.
    pub mod_num: f64,
    /// Device constants.
    pub params: OpticalParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            discretize: true,
            num_depths: 50,
            oled_shape: Shape::new(2560, 2560),
            slm_shape: Shape::new(2464, 4000),
            mod_num: 1.0,
            params: OpticalParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a config from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> HoloResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HoloError::serde(format!("parse pipeline config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HoloResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HoloError::validation(format!("open pipeline config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check shapes, level count and optical constants.
    pub fn validate(&self) -> HoloResult<()> {
        if self.discretize && self.num_depths == 0 {
            return Err(HoloError::validation("num_depths must be >= 1"));
        }
        if self.oled_shape.is_empty() {
            return Err(HoloError::validation(format!(
                "oled_shape must be non-empty, got {}",
                self.oled_shape
            )));
        }
        if self.slm_shape.is_empty() {
            return Err(HoloError::validation(format!(
                "slm_shape must be non-empty, got {}",
                self.slm_shape
            )));
        }
        if !self.mod_num.is_finite() || self.mod_num <= 0.0 {
            return Err(HoloError::validation("mod_num must be finite and > 0"));
        }
        self.params.validate()?;
        if self.params.slm_shape() != self.slm_shape {
            return Err(HoloError::validation(format!(
                "slm_shape {} disagrees with declared panel {}",
                self.slm_shape,
                self.params.slm_shape()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/params.rs"]
mod tests;
