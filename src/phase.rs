//! Analytic phase mask synthesis.

/// Lens/grating phase computation and normalization.
pub mod synthesize;
