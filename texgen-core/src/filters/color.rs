//! Per-pixel color transforms.

use rayon::prelude::*;

use crate::foundation::error::TexgenResult;
use crate::foundation::math::{mul_intens, mul_shift16, umul_shift8};
use crate::foundation::matrix::Matrix44;
use crate::raster::pixel::Pixel;
use crate::raster::sampling::sample_gradient;
use crate::raster::texture::Texture;

/// A [`Matrix44`] converted to 16.16 fixed point, truncating.
struct FixedMatrix([i32; 16]);

impl FixedMatrix {
    fn new(m: &Matrix44) -> Self {
        Self(m.data.map(|v| (v * 65536.0) as i32))
    }

    fn apply(&self, p: Pixel, clamp_premult: bool) -> Pixel {
        let c = p.channels().map(i32::from);
        let row = |i: usize| {
            let m = &self.0[i * 4..i * 4 + 4];
            let v = mul_shift16(m[0], c[0])
                + mul_shift16(m[1], c[1])
                + mul_shift16(m[2], c[2])
                + mul_shift16(m[3], c[3]);
            v.clamp(0, 65535) as u16
        };
        let out = Pixel::new(row(0), row(1), row(2), row(3));
        if clamp_premult { out.clamp_premult() } else { out }
    }
}

/// `dst = matrix · src` per pixel, treating `(r, g, b, a)` as a column vector.
///
/// Channels are clamped to `[0, 65535]`; `clamp_premult` additionally clamps color to alpha.
#[tracing::instrument(skip(dst, src))]
pub fn color_matrix_transform(
    dst: &mut Texture,
    src: &Texture,
    matrix: &Matrix44,
    clamp_premult: bool,
) -> TexgenResult<()> {
    dst.ensure_same_size(src, "color_matrix_transform")?;
    let m = FixedMatrix::new(matrix);
    dst.pixels_mut()
        .par_iter_mut()
        .zip(src.pixels().par_iter())
        .for_each(|(out, &p)| *out = m.apply(p, clamp_premult));
    Ok(())
}

/// [`color_matrix_transform`] writing back into `tex`.
#[tracing::instrument(skip(tex))]
pub fn color_matrix_transform_in_place(tex: &mut Texture, matrix: &Matrix44, clamp_premult: bool) {
    let m = FixedMatrix::new(matrix);
    tex.pixels_mut()
        .par_iter_mut()
        .for_each(|p| *p = m.apply(*p, clamp_premult));
}

fn full_range_index(c: u16) -> i32 {
    let c = i32::from(c);
    (c << 8) + ((c + 128) >> 8)
}

fn sum_channels(a: Pixel, b: Pixel, c: Pixel) -> [u16; 3] {
    let add = |x: u16, y: u16, z: u16| (u32::from(x) + u32::from(y) + u32::from(z)).min(65535) as u16;
    [add(a.r, b.r, c.r), add(a.g, b.g, c.g), add(a.b, b.b, c.b)]
}

/// Remap color channels through three ramps and sum the results.
///
/// Each of `r`, `g`, `b` (un-premultiplied first) indexes its own ramp; the output color is the
/// channel-wise sum of the three ramp samples, premultiplied again by the input alpha. Alpha is
/// kept and fully transparent pixels pass through.
#[tracing::instrument(skip(dst, src, map_r, map_g, map_b))]
pub fn color_remap(
    dst: &mut Texture,
    src: &Texture,
    map_r: &Texture,
    map_g: &Texture,
    map_b: &Texture,
) -> TexgenResult<()> {
    dst.ensure_same_size(src, "color_remap")?;
    dst.pixels_mut()
        .par_iter_mut()
        .zip(src.pixels().par_iter())
        .for_each(|(out, &p)| {
            *out = match p.a {
                0xffff => {
                    let [r, g, b] = sum_channels(
                        sample_gradient(map_r, full_range_index(p.r)),
                        sample_gradient(map_g, full_range_index(p.g)),
                        sample_gradient(map_b, full_range_index(p.b)),
                    );
                    Pixel::new(r, g, b, p.a)
                }
                0 => p,
                a => {
                    let inv_a = (65535u32 << 16) / u32::from(a);
                    let index = |c: u16| umul_shift8(u32::from(c.min(a)), inv_a) as i32;
                    let [r, g, b] = sum_channels(
                        sample_gradient(map_r, index(p.r)),
                        sample_gradient(map_g, index(p.g)),
                        sample_gradient(map_b, index(p.b)),
                    );
                    Pixel::new(mul_intens(r, a), mul_intens(g, a), mul_intens(b, a), a)
                }
            };
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/filters/color.rs"]
mod tests;
