//! Fixed-point texture lookups.
//!
//! Coordinates are 1.7.24: `1 << 24` spans the whole texture. Repeat addressing masks to 24 bits;
//! clamp addressing limits the coordinate to `[min, 1 - min]`, the centers of the border texels.

use crate::foundation::math::{FIXED_MASK, FIXED_ONE};
use crate::raster::pixel::Pixel;
use crate::raster::texture::Texture;

/// Addressing outside `[0, 1)` along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrap {
    /// Tile the texture.
    #[default]
    Repeat,
    /// Hold the border texel.
    Clamp,
}

/// Reconstruction between texel centers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Texel containing the position.
    #[default]
    Nearest,
    /// Weighted blend of the four nearest texels.
    Bilinear,
}

/// Addressing and reconstruction filter for one lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FilterMode {
    /// Horizontal addressing.
    pub wrap_u: Wrap,
    /// Vertical addressing.
    pub wrap_v: Wrap,
    /// Reconstruction filter.
    pub filter: Filter,
}

impl FilterMode {
    /// Tiled point sampling.
    pub const WRAP_NEAREST: FilterMode = FilterMode::new(Wrap::Repeat, Wrap::Repeat, Filter::Nearest);
    /// Tiled bilinear sampling.
    pub const WRAP_BILINEAR: FilterMode =
        FilterMode::new(Wrap::Repeat, Wrap::Repeat, Filter::Bilinear);
    /// Clamped point sampling.
    pub const CLAMP_NEAREST: FilterMode = FilterMode::new(Wrap::Clamp, Wrap::Clamp, Filter::Nearest);
    /// Clamped bilinear sampling.
    pub const CLAMP_BILINEAR: FilterMode =
        FilterMode::new(Wrap::Clamp, Wrap::Clamp, Filter::Bilinear);

    /// Mode from per-axis addressing and a filter.
    pub const fn new(wrap_u: Wrap, wrap_v: Wrap, filter: Filter) -> Self {
        Self {
            wrap_u,
            wrap_v,
            filter,
        }
    }

    /// Same addressing with another filter.
    pub const fn with_filter(self, filter: Filter) -> Self {
        Self { filter, ..self }
    }
}

fn clamp_axis(v: i32, wrap: Wrap, min: i32) -> i32 {
    match wrap {
        Wrap::Repeat => v,
        Wrap::Clamp => v.clamp(min, FIXED_ONE - min),
    }
}

/// Weight of the right tap: the bits below the texel index, scaled to `0..65536`.
fn frac16(v: i32, shift: u32) -> u32 {
    ((v as u32) << (shift + 8)) >> 16
}

/// Point-sample the texel containing `(x, y)`.
pub fn sample_nearest(tex: &Texture, x: i32, y: i32, mode: FilterMode) -> Pixel {
    let x = clamp_axis(x, mode.wrap_u, tex.min_x()) & FIXED_MASK;
    let y = clamp_axis(y, mode.wrap_v, tex.min_y()) & FIXED_MASK;
    let ix = (x >> (24 - tex.shift_x())) as u32;
    let iy = (y >> (24 - tex.shift_y())) as u32;
    tex.at(ix, iy)
}

/// Bilinear lookup between the four texel centers around `(x, y)`.
pub fn sample_bilinear(tex: &Texture, x: i32, y: i32, mode: FilterMode) -> Pixel {
    let x = clamp_axis(x, mode.wrap_u, tex.min_x()).wrapping_sub(tex.min_x()) & FIXED_MASK;
    let y = clamp_axis(y, mode.wrap_v, tex.min_y()).wrapping_sub(tex.min_y()) & FIXED_MASK;

    let x0 = (x >> (24 - tex.shift_x())) as u32;
    let x1 = (x0 + 1) & (tex.width() - 1);
    let y0 = (y >> (24 - tex.shift_y())) as u32;
    let y1 = (y0 + 1) & (tex.height() - 1);
    let fx = frac16(x, tex.shift_x());
    let fy = frac16(y, tex.shift_y());

    let top = tex.at(x0, y0).lerp(tex.at(x1, y0), fx);
    let bottom = tex.at(x0, y1).lerp(tex.at(x1, y1), fx);
    top.lerp(bottom, fy)
}

/// Dispatch on `mode.filter`.
pub fn sample_filtered(tex: &Texture, x: i32, y: i32, mode: FilterMode) -> Pixel {
    match mode.filter {
        Filter::Nearest => sample_nearest(tex, x, y, mode),
        Filter::Bilinear => sample_bilinear(tex, x, y, mode),
    }
}

/// Look up a color ramp stored in row 0 of `tex`.
///
/// `x` is clamped to `[0, 1 << 24]`; 0 returns the first texel and `1 << 24` the last.
pub fn sample_gradient(tex: &Texture, x: i32) -> Pixel {
    let x = x.clamp(0, FIXED_ONE);
    let x = x - (x >> tex.shift_x());

    let x0 = (x >> (24 - tex.shift_x())) as u32;
    let x1 = (x0 + 1) & (tex.width() - 1);
    let fx = frac16(x, tex.shift_x());
    tex.at(x0, 0).lerp(tex.at(x1, 0), fx)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sampling.rs"]
mod tests;
