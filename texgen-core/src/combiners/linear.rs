use rayon::prelude::*;

use crate::foundation::error::{TexgenError, TexgenResult};
use crate::foundation::math::{FIXED_ONE, mul_shift16};
use crate::raster::pixel::Pixel;
use crate::raster::sampling::{FilterMode, sample_filtered};
use crate::raster::texture::Texture;

/// Most inputs a single [`linear_combine`] call accepts.
pub const MAX_LINEAR_INPUTS: usize = 255;

const WEIGHT_LIMIT: f32 = 127.0;

/// One weighted term of a [`linear_combine`].
#[derive(Clone, Copy, Debug)]
pub struct LinearInput<'a> {
    /// Sampled input.
    pub texture: &'a Texture,
    /// Multiplier in `[-127, 127]`.
    pub weight: f32,
    /// Texture-space offset added to the sample position (1.0 is one full texture width).
    pub shift_u: f32,
    /// Like `shift_u`, along `v`.
    pub shift_v: f32,
    /// Addressing and filter for the lookup.
    pub filter: FilterMode,
}

impl<'a> LinearInput<'a> {
    /// Unshifted, point-sampled input with wrap-around.
    pub fn new(texture: &'a Texture, weight: f32) -> Self {
        Self {
            texture,
            weight,
            shift_u: 0.0,
            shift_v: 0.0,
            filter: FilterMode::WRAP_NEAREST,
        }
    }
}

fn check_range(v: f32, what: &str) -> TexgenResult<()> {
    if (-WEIGHT_LIMIT..=WEIGHT_LIMIT).contains(&v) {
        Ok(())
    } else {
        Err(TexgenError::validation(format!(
            "linear_combine: {what} {v} outside [-127, 127]"
        )))
    }
}

struct Term<'a> {
    texture: &'a Texture,
    weight: i32,
    du: i32,
    dv: i32,
    filter: FilterMode,
}

/// `dst = const_weight * color + Σ weight_i * input_i`, clamped per channel.
///
/// Each input is sampled at the pixel center of `dst` shifted by its offset, so inputs may
/// have a different size than `dst`.
#[tracing::instrument(skip(dst, inputs), fields(n = inputs.len()))]
pub fn linear_combine(
    dst: &mut Texture,
    color: Pixel,
    const_weight: f32,
    inputs: &[LinearInput<'_>],
) -> TexgenResult<()> {
    if inputs.len() > MAX_LINEAR_INPUTS {
        return Err(TexgenError::validation(format!(
            "linear_combine: {} inputs, at most {MAX_LINEAR_INPUTS} allowed",
            inputs.len()
        )));
    }
    check_range(const_weight, "constant weight")?;

    let terms = inputs
        .iter()
        .map(|input| {
            check_range(input.weight, "weight")?;
            check_range(input.shift_u, "u shift")?;
            check_range(input.shift_v, "v shift")?;
            Ok(Term {
                texture: input.texture,
                weight: (input.weight * 65536.0) as i32,
                du: (input.shift_u * FIXED_ONE as f32) as i32,
                dv: (input.shift_v * FIXED_ONE as f32) as i32,
                filter: input.filter,
            })
        })
        .collect::<TexgenResult<Vec<_>>>()?;

    let t = (const_weight * 65536.0) as i32;
    let base = color.channels().map(|c| mul_shift16(t, i32::from(c)));

    let u0 = dst.min_x();
    let v0 = dst.min_y();
    let step_u = 1 << (24 - dst.shift_x());
    let step_v = 1 << (24 - dst.shift_y());
    let width = dst.width() as usize;

    dst.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let v = v0 + step_v * y as i32;
            let mut u = u0;
            for out in row {
                let mut acc = base;
                for term in &terms {
                    let p = sample_filtered(
                        term.texture,
                        u.wrapping_add(term.du),
                        v.wrapping_add(term.dv),
                        term.filter,
                    );
                    for (a, c) in acc.iter_mut().zip(p.channels()) {
                        *a += mul_shift16(term.weight, i32::from(c));
                    }
                }
                *out = Pixel::from_channels(acc.map(|a| a.clamp(0, 65535) as u16));
                u += step_u;
            }
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/combiners/linear.rs"]
mod tests;
