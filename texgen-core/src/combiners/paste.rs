//! Compositing a snippet texture into a parallelogram of the destination.

use crate::foundation::error::TexgenResult;
use crate::foundation::math::FIXED_ONE;
use crate::raster::pixel::{
    Pixel, combine_darken, combine_lighten, combine_multiply, combine_over, combine_screen,
};
use crate::raster::placement::Parallelogram;
use crate::raster::sampling::{Filter, FilterMode, sample_filtered};
use crate::raster::texture::Texture;

/// How a pasted pixel `in` merges with the pixel `out` already in the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineOp {
    /// Saturating `out + in`.
    Add,
    /// Saturating `out - in`.
    Sub,
    /// Channel-wise `out * in`.
    MulC,
    /// Channel-wise minimum.
    Min,
    /// Channel-wise maximum.
    Max,
    /// Replace the alpha of `out` with `in.r`.
    SetAlpha,
    /// Scale `out` by `in.r`, then set its alpha to `in.g`.
    PreAlpha,
    /// `in` over `out`.
    #[default]
    Over,
    /// [`combine_multiply`] of `in` and `out`.
    Multiply,
    /// [`combine_screen`] of `in` and `out`.
    Screen,
    /// [`combine_darken`] of `in` and `out`.
    Darken,
    /// [`combine_lighten`] of `in` and `out`.
    Lighten,
}

impl CombineOp {
    /// Merge one pasted pixel into `out`.
    pub fn apply(self, out: Pixel, input: Pixel) -> Pixel {
        match self {
            CombineOp::Add => out + input,
            CombineOp::Sub => out - input,
            CombineOp::MulC => out * input,
            CombineOp::Min => out & input,
            CombineOp::Max => out | input,
            CombineOp::SetAlpha => out.with_alpha(input.r),
            CombineOp::PreAlpha => (out * input.r).with_alpha(input.g),
            CombineOp::Over => combine_over(input, out),
            CombineOp::Multiply => combine_multiply(input, out),
            CombineOp::Screen => combine_screen(input, out),
            CombineOp::Darken => combine_darken(input, out),
            CombineOp::Lighten => combine_lighten(input, out),
        }
    }
}

/// Copy `background` into `dst`, then paste `snippet` over it.
#[tracing::instrument(skip(dst, background, snippet))]
pub fn paste(
    dst: &mut Texture,
    background: &Texture,
    snippet: &Texture,
    area: &Parallelogram,
    op: CombineOp,
    filter: Filter,
) -> TexgenResult<()> {
    dst.ensure_same_size(background, "paste")?;
    dst.copy_from(background);
    paste_in_place(dst, snippet, area, op, filter)
}

/// Map `snippet` onto `area` of `dst` and merge it with `op`.
///
/// `area.origin` is where the snippet's `(0, 0)` corner lands and `area.u`/`area.v` are the
/// images of its unit axes. The snippet is sampled with clamped edges, so it does not tile.
/// A parallelogram covering less than a quarter pixel leaves `dst` untouched.
#[tracing::instrument(skip(dst, snippet))]
pub fn paste_in_place(
    dst: &mut Texture,
    snippet: &Texture,
    area: &Parallelogram,
    op: CombineOp,
    filter: Filter,
) -> TexgenResult<()> {
    if area.is_degenerate(dst.width(), dst.height()) {
        tracing::debug!("paste area smaller than a pixel, skipped");
        return Ok(());
    }

    let [orgx, orgy] = area.origin;
    let [ux, uy] = area.u;
    let [vx, vy] = area.v;
    let (w, h) = (dst.width() as f32, dst.height() as f32);

    let min_x = (((orgx + ux.min(0.0) + vx.min(0.0)) * w).floor() as i32).max(0);
    let min_y = (((orgy + uy.min(0.0) + vy.min(0.0)) * h).floor() as i32).max(0);
    let max_x = (((orgx + ux.max(0.0) + vx.max(0.0)) * w).ceil() as i32).min(dst.width() as i32 - 1);
    let max_y =
        (((orgy + uy.max(0.0) + vy.max(0.0)) * h).ceil() as i32).min(dst.height() as i32 - 1);

    let inv = FIXED_ONE as f32 / area.determinant();
    let rmx = (min_x as f32 + 0.5) / w - orgx;
    let rmy = (min_y as f32 + 0.5) / h - orgy;
    let mut u0 = ((rmx * vy - rmy * vx) * inv) as i32;
    let mut v0 = ((ux * rmy - uy * rmx) * inv) as i32;
    let dudx = (vy * inv / w) as i32;
    let dvdx = (-uy * inv / w) as i32;
    let dudy = (-vx * inv / h) as i32;
    let dvdy = (ux * inv / h) as i32;

    let mode = FilterMode::CLAMP_NEAREST.with_filter(filter);
    let inside = |t: i32| (0..FIXED_ONE).contains(&t);

    for y in min_y..=max_y {
        let (mut u, mut v) = (u0, v0);
        for x in min_x..=max_x {
            if inside(u) && inside(v) {
                let input = sample_filtered(snippet, u, v, mode);
                let out = dst.at_mut(x as u32, y as u32);
                *out = op.apply(*out, input);
            }
            u = u.wrapping_add(dudx);
            v = v.wrapping_add(dvdx);
        }
        u0 = u0.wrapping_add(dudy);
        v0 = v0.wrapping_add(dvdy);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/combiners/paste.rs"]
mod tests;
