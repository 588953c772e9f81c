use crate::foundation::error::TexgenResult;
use crate::raster::pixel::Pixel;
use crate::raster::texture::Texture;

/// Two-texel color ramp from straight-alpha `0xAARRGGBB` endpoints.
///
/// Sampled with [`crate::sample_gradient`], this interpolates linearly from `start` at 0 to
/// `end` at 1.
pub fn linear_gradient(start: u32, end: u32) -> TexgenResult<Texture> {
    Texture::from_pixels(
        2,
        1,
        vec![Pixel::from_argb32(start), Pixel::from_argb32(end)],
    )
}

#[cfg(test)]
#[path = "../../tests/unit/generators/gradient.rs"]
mod tests;
