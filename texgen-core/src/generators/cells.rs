//! Voronoi cell shading.
//!
//! Distances are measured on a 14-bit fixed-point torus. Each scanline re-sorts the centers by
//! vertical distance (insertion sort, stable with respect to the previous row), then sweeps left
//! to right carrying the nearest and second-nearest center from pixel to pixel. A center can only
//! improve the result while its vertical distance alone is below the current runner-up, which
//! bounds the search.

use crate::foundation::error::{TexgenError, TexgenResult};
use crate::foundation::math::{FIXED_ONE, square};
use crate::raster::pixel::Pixel;
use crate::raster::sampling::sample_gradient;
use crate::raster::texture::Texture;

/// Most centers [`cells`] accepts.
pub const MAX_CELL_CENTERS: usize = 256;

const SCALE_BITS: u32 = 14;
const SCALE: i32 = 1 << SCALE_BITS;

/// A cell seed in `[0, 1)²` and the color multiplied into its cell.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellCenter {
    /// Horizontal position, wrapped into `[0, 1)`.
    pub x: f32,
    /// Vertical position, wrapped into `[0, 1)`.
    pub y: f32,
    /// Multiplied into every pixel of this cell.
    pub color: Pixel,
}

/// Distance measure [`cells`] feeds to the ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMode {
    /// Shade by distance to the nearest center.
    #[default]
    Inner,
    /// Shade by `d0 / (d0 + d1)`, which peaks on the boundaries between cells.
    Outer,
}

#[derive(Clone, Copy, Debug)]
struct CellPoint {
    x: i32,
    y: i32,
    dist_y: i32,
    node: usize,
}

fn torus_dist2(a: i32, b: i32) -> i32 {
    let d = (a - b) & (SCALE - 1);
    square(d.min(SCALE - d))
}

/// Shade every pixel of `dst` by its distance to the nearest `centers`, looked up in `gradient`
/// and multiplied by that cell's color. `amp` scales distance before the lookup.
#[tracing::instrument(skip(dst, gradient, centers), fields(w = dst.width(), h = dst.height(), n = centers.len()))]
pub fn cells(
    dst: &mut Texture,
    gradient: &Texture,
    centers: &[CellCenter],
    amp: f32,
    mode: CellMode,
) -> TexgenResult<()> {
    let needed = match mode {
        CellMode::Inner => 1,
        CellMode::Outer => 2,
    };
    if centers.len() < needed {
        return Err(TexgenError::validation(format!(
            "{mode:?} cells need at least {needed} centers, got {}",
            centers.len()
        )));
    }
    if centers.len() > MAX_CELL_CENTERS {
        return Err(TexgenError::validation(format!(
            "cells accept at most {MAX_CELL_CENTERS} centers, got {}",
            centers.len()
        )));
    }

    let mut points: Vec<CellPoint> = centers
        .iter()
        .enumerate()
        .map(|(node, c)| CellPoint {
            x: ((c.x * SCALE as f32 + 0.5) as i32) & (SCALE - 1),
            y: ((c.y * SCALE as f32 + 0.5) as i32) & (SCALE - 1),
            dist_y: -1,
            node,
        })
        .collect();

    let step_x = 1 << (SCALE_BITS - dst.shift_x());
    let step_y = 1 << (SCALE_BITS - dst.shift_y());
    let amp = amp * FIXED_ONE as f32;
    let width = dst.width() as usize;

    let mut yc = step_y >> 1;
    for row in dst.pixels_mut().chunks_exact_mut(width) {
        for p in &mut points {
            p.dist_y = torus_dist2(yc, p.y);
        }
        for i in 1..points.len() {
            let v = points[i];
            let mut j = i;
            while j > 0 && points[j - 1].dist_y > v.dist_y {
                points[j] = points[j - 1];
                j -= 1;
            }
            points[j] = v;
        }

        let mut best = square(SCALE);
        let mut best2 = best;
        let mut best_i: Option<usize> = None;
        let mut best2_i: Option<usize> = None;

        let mut xc = step_x >> 1;
        for out in row.iter_mut() {
            if let (Some(i0), Some(i1)) = (best_i, best2_i) {
                best = torus_dist2(xc, points[i0].x) + points[i0].dist_y;
                best2 = torus_dist2(xc, points[i1].x) + points[i1].dist_y;
                if best2 < best {
                    std::mem::swap(&mut best, &mut best2);
                    std::mem::swap(&mut best_i, &mut best2_i);
                }
            }

            for (i, p) in points.iter().enumerate() {
                if best2 <= p.dist_y {
                    break;
                }
                let dist = torus_dist2(xc, p.x) + p.dist_y;
                if dist < best {
                    best2 = best;
                    best2_i = best_i;
                    best = dist;
                    best_i = Some(i);
                } else if dist > best && dist < best2 {
                    best2 = dist;
                    best2_i = Some(i);
                }
            }

            let d0 = (f64::from(best).sqrt() / f64::from(SCALE)) as f32;
            let t = match mode {
                CellMode::Inner => ((d0 * amp) as i32).clamp(0, FIXED_ONE),
                CellMode::Outer => {
                    let d1 = (f64::from(best2).sqrt() / f64::from(SCALE)) as f32;
                    if d0 + d1 > 0.0 {
                        ((d0 / (d1 + d0) * 2.0 * amp) as i32).clamp(0, FIXED_ONE)
                    } else {
                        0
                    }
                }
            };

            // the first center always beats the initial bound, so a nearest one exists
            let color = best_i.map_or(Pixel::TRANSPARENT, |i| centers[points[i].node].color);
            *out = sample_gradient(gradient, t) * color;
            xc += step_x;
        }
        yc += step_y;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/generators/cells.rs"]
mod tests;
