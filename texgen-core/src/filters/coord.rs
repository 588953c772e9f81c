//! Texture-coordinate warps: every output pixel samples the source at a computed UV.

use rayon::prelude::*;

use crate::foundation::error::TexgenResult;
use crate::foundation::math::{FIXED_ONE, mul_shift16};
use crate::foundation::matrix::Matrix44;
use crate::raster::sampling::{FilterMode, sample_filtered};
use crate::raster::texture::Texture;

/// Affine warp: output pixel `(x, y)` samples `src` at `matrix · (x, y)` in texture space.
///
/// Only the upper-left 2×2 block and the translation column `(0, 3)`, `(1, 3)` are used.
#[tracing::instrument(skip(dst, src))]
pub fn coord_matrix_transform(
    dst: &mut Texture,
    src: &Texture,
    matrix: &Matrix44,
    mode: FilterMode,
) -> TexgenResult<()> {
    dst.ensure_same_size(src, "coord_matrix_transform")?;

    let scale_x = (1 << (24 - dst.shift_x())) as f32;
    let scale_y = (1 << (24 - dst.shift_y())) as f32;
    let dudx = (matrix[(0, 0)] * scale_x) as i32;
    let dudy = (matrix[(0, 1)] * scale_y) as i32;
    let dvdx = (matrix[(1, 0)] * scale_x) as i32;
    let dvdy = (matrix[(1, 1)] * scale_y) as i32;

    // start half a texel in, at the first pixel center
    let u0 = (matrix[(0, 3)] * FIXED_ONE as f32 + (dudx.wrapping_add(dudy) >> 1) as f32) as i32;
    let v0 = (matrix[(1, 3)] * FIXED_ONE as f32 + (dvdx.wrapping_add(dvdy) >> 1) as f32) as i32;
    let width = dst.width() as usize;

    dst.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let mut u = u0.wrapping_add(dudy.wrapping_mul(y as i32));
            let mut v = v0.wrapping_add(dvdy.wrapping_mul(y as i32));
            for out in row {
                *out = sample_filtered(src, u, v, mode);
                u = u.wrapping_add(dudx);
                v = v.wrapping_add(dvdx);
            }
        });
    Ok(())
}

/// Displacement warp driven by `remap`.
///
/// The red and green channels of `remap` are signed offsets centered on 32768, scaled by
/// `strength_u`/`strength_v` (1.0 moves by a full texture width at maximum deflection).
#[tracing::instrument(skip(dst, src, remap))]
pub fn coord_remap(
    dst: &mut Texture,
    src: &Texture,
    remap: &Texture,
    strength_u: f32,
    strength_v: f32,
    mode: FilterMode,
) -> TexgenResult<()> {
    dst.ensure_same_size(remap, "coord_remap")?;

    let u0 = dst.min_x();
    let v0 = dst.min_y();
    let scale_u = (FIXED_ONE as f32 * strength_u) as i32;
    let scale_v = (FIXED_ONE as f32 * strength_v) as i32;
    let step_u = 1 << (24 - dst.shift_x());
    let step_v = 1 << (24 - dst.shift_y());
    let width = dst.width() as usize;

    dst.pixels_mut()
        .par_chunks_mut(width)
        .zip(remap.pixels().par_chunks(width))
        .enumerate()
        .for_each(|(y, (row, disp))| {
            let v = v0 + step_v * y as i32;
            let mut u = u0;
            for (out, d) in row.iter_mut().zip(disp) {
                let du = u.wrapping_add(mul_shift16(scale_u, (i32::from(d.r) - 32768) * 2));
                let dv = v.wrapping_add(mul_shift16(scale_v, (i32::from(d.g) - 32768) * 2));
                *out = sample_filtered(src, du, dv, mode);
                u += step_u;
            }
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/filters/coord.rs"]
mod tests;
