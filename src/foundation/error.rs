/// Convenience result type used across holophase.
pub type HoloResult<T> = Result<T, HoloError>;

/// Top-level error taxonomy; each variant names the stage that failed.
#[derive(thiserror::Error, Debug)]
pub enum HoloError {
    /// Invalid user-provided rasters, shapes, or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while quantizing a diopter map into depth levels.
    #[error("quantize error: {0}")]
    Quantize(String),

    /// Errors while fitting images to the panel frames (crop/pad, warp, homography).
    #[error("fit error: {0}")]
    Fit(String),

    /// Errors while synthesizing the phase mask.
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Errors when parsing configuration or homography files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HoloError {
    /// Build a [`HoloError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HoloError::Quantize`] value.
    pub fn quantize(msg: impl Into<String>) -> Self {
        Self::Quantize(msg.into())
    }

    /// Build a [`HoloError::Fit`] value.
    pub fn fit(msg: impl Into<String>) -> Self {
        Self::Fit(msg.into())
    }

    /// Build a [`HoloError::Synthesis`] value.
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Build a [`HoloError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
