use crate::fit::crop::{crop_or_pad_depth, crop_or_pad_texture, flip_both};
use crate::fit::warp::warp_perspective;
use crate::foundation::core::{DiopterMap, Shape, TextureMap};
use crate::foundation::error::HoloResult;
use crate::transform::homography::Homography;

/// Texture and depth fitted to their panels.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedImages {
    /// Color texture in the OLED frame, shape `oled_shape`.
    pub oled_texture: TextureMap,
    /// Diopter map in the SLM frame, shape `slm_shape`.
    pub slm_depth: DiopterMap,
}

/// Align the texture and depth map with the two panels.
///
/// Both images are mirrored on both axes, then cropped or zero-padded (never
/// resized) to `slm_shape`. The depth map is final at that point. The texture
/// is further warped by `homography^-1` into the OLED frame.
#[tracing::instrument(
    skip(homography, texture, depth),
    fields(texture_shape = %texture.shape(), depth_shape = %depth.shape())
)]
pub fn fit_images(
    homography: &Homography,
    texture: &TextureMap,
    depth: &DiopterMap,
    oled_shape: Shape,
    slm_shape: Shape,
) -> HoloResult<FittedImages> {
    let slm_to_oled = homography.inverse()?;

    let slm_depth = crop_or_pad_depth(&flip_both(depth), slm_shape)?;
    let texture_slm = crop_or_pad_texture(&flip_both(texture), slm_shape)?;
    let oled_texture = warp_perspective(&texture_slm, &slm_to_oled, oled_shape)?;

    tracing::debug!(
        oled = %oled_texture.shape(),
        slm = %slm_depth.shape(),
        "fitted images to panels"
    );
    Ok(FittedImages {
        oled_texture,
        slm_depth,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/fit/frame.rs"]
mod tests;
