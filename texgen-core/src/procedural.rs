//! Ready-made recipes built from the basic operators.

use crate::filters::color::color_matrix_transform_in_place;
use crate::foundation::error::{TexgenError, TexgenResult};
use crate::foundation::matrix::Matrix44;
use crate::foundation::random::Xoshiro;
use crate::generators::cells::{CellCenter, CellMode, MAX_CELL_CENTERS, cells};
use crate::raster::pixel::Pixel;
use crate::raster::texture::Texture;

/// Most centers [`random_voronoi`] places.
pub const MAX_VORONOI_CENTERS: usize = MAX_CELL_CENTERS;

/// Seed used by [`random_voronoi`] when callers have no preference.
pub const DEFAULT_VORONOI_SEED: i32 = 0xC564_A1E3_u32 as i32;

fn wrapped_delta(a: f32, b: f32) -> f32 {
    let d = a - b;
    let d = if d < 0.0 { d + 1.0 } else { d };
    d.min(1.0 - d)
}

/// Draw `max_count` random gray centers, then drop every center closer than `min_dist` (on the
/// unit torus) to one kept before it. Dropped slots are refilled from the end of the list.
pub(crate) fn random_centers(
    intensity: u8,
    max_count: usize,
    min_dist: f32,
    seed: i32,
) -> Vec<CellCenter> {
    let mut rng = Xoshiro::from_seed(i64::from(seed) as u64);
    let mut centers: Vec<CellCenter> = (0..max_count)
        .map(|_| {
            let intens = (f32::from(intensity) * rng.next_unit_f32()) as u8;
            let x = rng.next_unit_f32();
            let y = rng.next_unit_f32();
            CellCenter {
                x,
                y,
                color: Pixel::from_rgba8(intens, intens, intens, 255),
            }
        })
        .collect();

    let min_dist2 = min_dist * min_dist;
    let mut i = 1;
    while i < centers.len() {
        let c = centers[i];
        let crowded = centers[..i].iter().any(|o| {
            let dx = wrapped_delta(o.x, c.x);
            let dy = wrapped_delta(o.y, c.y);
            dx * dx + dy * dy < min_dist2
        });
        if crowded {
            centers.swap_remove(i);
        } else {
            i += 1;
        }
    }
    centers
}

/// Voronoi cells around randomly placed centers, each tinted a random gray below `intensity`.
///
/// Centers closer than `min_dist` to an earlier one are discarded, so fewer than `max_count`
/// cells usually remain.
#[tracing::instrument(skip(dst, gradient), fields(w = dst.width(), h = dst.height()))]
pub fn random_voronoi(
    dst: &mut Texture,
    gradient: &Texture,
    intensity: u8,
    max_count: usize,
    min_dist: f32,
    seed: i32,
) -> TexgenResult<()> {
    if max_count == 0 || max_count > MAX_VORONOI_CENTERS {
        return Err(TexgenError::validation(format!(
            "random_voronoi: max_count {max_count} outside 1..={MAX_VORONOI_CENTERS}"
        )));
    }
    if !min_dist.is_finite() {
        return Err(TexgenError::validation("random_voronoi: min_dist must be finite"));
    }

    let centers = random_centers(intensity, max_count, min_dist, seed);
    tracing::debug!(kept = centers.len(), "voronoi centers placed");
    cells(dst, gradient, &centers, 0.0, CellMode::Inner)
}

/// Color matrix that maps black to `start` and white to `end` (straight-alpha `0xAARRGGBB`),
/// keeping alpha.
pub fn colorize_matrix(start: u32, end: u32) -> Matrix44 {
    let s = Pixel::from_argb32(start);
    let e = Pixel::from_argb32(end);
    let span = |a: u16, b: u16| (i32::from(b) - i32::from(a)) as f32 / 65535.0;

    let mut m = Matrix44::zero();
    m[(0, 0)] = span(s.r, e.r);
    m[(1, 1)] = span(s.g, e.g);
    m[(2, 2)] = span(s.b, e.b);
    m[(3, 3)] = 1.0;
    m[(0, 3)] = f32::from(s.r) / 65535.0;
    m[(1, 3)] = f32::from(s.g) / 65535.0;
    m[(2, 3)] = f32::from(s.b) / 65535.0;
    m
}

/// Map a grayscale texture onto the `start..end` color ramp in place.
#[tracing::instrument(skip(tex))]
pub fn colorize(tex: &mut Texture, start: u32, end: u32) {
    color_matrix_transform_in_place(tex, &colorize_matrix(start, end), true);
}

#[cfg(test)]
#[path = "../tests/unit/procedural.rs"]
mod tests;
