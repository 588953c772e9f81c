use rayon::prelude::*;

use crate::foundation::error::TexgenResult;
use crate::raster::pixel::Pixel;
use crate::raster::texture::Texture;

/// How the red channel of the control texture picks between the two inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TernaryOp {
    /// `(1 - c.r) * a + c.r * b`.
    #[default]
    Lerp,
    /// `b` where `c.r >= 0.5`, otherwise `a`.
    Select,
}

fn ternary_pixel(a: Pixel, b: Pixel, c: Pixel, op: TernaryOp) -> Pixel {
    match op {
        TernaryOp::Lerp => !c.r * a + c.r * b,
        TernaryOp::Select => {
            if c.r >= 0x8000 {
                b
            } else {
                a
            }
        }
    }
}

/// Per-pixel blend or selection of `a` and `b` driven by `control`.
#[tracing::instrument(skip(dst, a, b, control))]
pub fn ternary(
    dst: &mut Texture,
    a: &Texture,
    b: &Texture,
    control: &Texture,
    op: TernaryOp,
) -> TexgenResult<()> {
    dst.ensure_same_size(a, "ternary")?;
    dst.ensure_same_size(b, "ternary")?;
    dst.ensure_same_size(control, "ternary")?;

    dst.pixels_mut()
        .par_iter_mut()
        .zip(a.pixels().par_iter())
        .zip(b.pixels().par_iter().zip(control.pixels().par_iter()))
        .for_each(|((out, &pa), (&pb, &pc))| *out = ternary_pixel(pa, pb, pc, op));
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/combiners/ternary.rs"]
mod tests;
