//! Per-pixel diffuse and specular lighting of a surface through a normal map.

use rayon::prelude::*;

use crate::foundation::error::{TexgenError, TexgenResult};
use crate::foundation::math::FIXED_ONE;
use crate::raster::pixel::Pixel;
use crate::raster::sampling::sample_gradient;
use crate::raster::texture::Texture;

type Vec3 = [f32; 3];

/// Light source for [`bump`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Light {
    /// Parallel light.
    Directional {
        /// Travel direction of the light, any length.
        direction: Vec3,
    },
    /// Light at a point with a cone axis; the axis only matters when a falloff map is given.
    Point {
        /// Texture-space position, `z` above the surface.
        position: Vec3,
        /// Cone axis, any length.
        axis: Vec3,
    },
}

/// Light and material colors for [`bump`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BumpParams {
    /// Where the light comes from.
    pub light: Light,
    /// Added to every lit pixel before it modulates the surface.
    pub ambient: Pixel,
    /// Scaled by `N·L`.
    pub diffuse: Pixel,
}

fn dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: Vec3) -> Vec3 {
    let s = 1.0 / dot(v, v).sqrt();
    v.map(|c| c * s)
}

/// Halfway vector between `l` and the viewer at `+z`.
fn halfway(l: Vec3) -> Vec3 {
    let s = 1.0 / (2.0 + 2.0 * l[2]).sqrt();
    [l[0] * s, l[1] * s, (l[2] + 1.0) * s]
}

fn to_fixed(t: f32) -> i32 {
    (t.max(0.0) * FIXED_ONE as f32) as i32
}

/// Light `surface` with the normals in `normals` (channels centered on 32768).
///
/// Output is `surface * (ambient + diffuse * max(N·L, 0))`. With a `specular` ramp the sample
/// at `N·H` is added on top, keeping the lit alpha. A `falloff` ramp indexed by the angle to
/// the light axis attenuates both the diffuse and specular terms.
#[tracing::instrument(skip(dst, surface, normals, specular, falloff))]
pub fn bump(
    dst: &mut Texture,
    surface: &Texture,
    normals: &Texture,
    specular: Option<&Texture>,
    falloff: Option<&Texture>,
    params: &BumpParams,
) -> TexgenResult<()> {
    dst.ensure_same_size(surface, "bump")?;
    dst.ensure_same_size(normals, "bump")?;

    let axis = match params.light {
        Light::Directional { direction } => direction,
        Light::Point { axis, .. } => axis,
    };
    let len2 = dot(axis, axis);
    if !len2.is_finite() || len2 == 0.0 {
        return Err(TexgenError::validation(
            "bump: light direction must be finite and non-zero",
        ));
    }
    let axis = normalize(axis);
    let sun = axis.map(|c| -c);
    let sun_half = halfway(sun);

    let BumpParams {
        ambient, diffuse, ..
    } = *params;
    let inv_w = 1.0 / dst.width() as f32;
    let inv_h = 1.0 / dst.height() as f32;
    let width = dst.width() as usize;

    dst.pixels_mut()
        .par_chunks_mut(width)
        .zip(surface.pixels().par_chunks(width))
        .zip(normals.pixels().par_chunks(width))
        .enumerate()
        .for_each(|(y, ((row, surf), norm))| {
            for (x, ((out, &s), n)) in row.iter_mut().zip(surf).zip(norm).enumerate() {
                let (l, h) = match params.light {
                    Light::Directional { .. } => (sun, sun_half),
                    Light::Point { position, .. } => {
                        let l = normalize([
                            position[0] - (x as f32 + 0.5) * inv_w,
                            position[1] - (y as f32 + 0.5) * inv_h,
                            position[2],
                        ]);
                        (l, halfway(l))
                    }
                };

                let normal = [n.r, n.g, n.b].map(|c| (i32::from(c) - 0x8000) as f32 / 32768.0);
                let spot = falloff.map(|map| sample_gradient(map, to_fixed(dot(axis, l))));

                let n_dot_l = dot(normal, l).max(0.0);
                let mut lit =
                    Pixel::from_channels(diffuse.channels().map(|c| (n_dot_l * f32::from(c)) as u16));
                if let Some(spot) = spot {
                    lit *= spot;
                }
                *out = s * (lit + ambient);

                if let Some(map) = specular {
                    let mut add = sample_gradient(map, to_fixed(dot(normal, h)));
                    if let Some(spot) = spot {
                        add *= spot;
                    }
                    *out = (*out + add).with_alpha(out.a).clamp_premult();
                }
            }
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/combiners/bump.rs"]
mod tests;
