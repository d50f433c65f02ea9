//! Projective transforms between panel frames.

/// 3x3 homography with inversion and file loading.
pub mod homography;
