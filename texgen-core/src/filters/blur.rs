//! Separable box blur with fractional kernel width.
//!
//! Kernel half-widths are 26.6 fixed point in pixels. A half-width of `s` covers `offset - 1`
//! full taps on each side of the center plus one tap per side weighted `frac / 64`, where
//! `s = 64 (offset - 1) + frac + 32`. Each 1-D pass slides a running sum along the line, and
//! repeated passes (`order`) approach a Gaussian.

use crate::foundation::error::{TexgenError, TexgenResult};
use crate::raster::pixel::Pixel;
use crate::raster::sampling::Wrap;
use crate::raster::texture::Texture;

/// Kernel size, pass count and edge handling for [`blur`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlurParams {
    /// Half-width of the kernel as a fraction of the texture width, clamped to `[0, 1]`.
    pub size_x: f32,
    /// Vertical half-width as a fraction of the texture height.
    pub size_y: f32,
    /// Number of box passes per axis. Zero copies the source.
    pub order: u32,
    /// Horizontal edge handling.
    pub wrap_u: Wrap,
    /// Vertical edge handling.
    pub wrap_v: Wrap,
}

impl BlurParams {
    /// Blur with wrap-around on both axes.
    pub fn new(size_x: f32, size_y: f32, order: u32) -> Self {
        Self {
            size_x,
            size_y,
            order,
            wrap_u: Wrap::Repeat,
            wrap_v: Wrap::Repeat,
        }
    }
}

fn kernel_size(size: f32, pixels: u32) -> i32 {
    (size.clamp(0.0, 1.0) * 64.0 * pixels as f32 / 2.0) as i32
}

fn blur_line(dst: &mut [Pixel], src: &[Pixel], size: i32, wrap: Wrap) {
    debug_assert!(size > 32);
    let frac = i64::from((size - 32) & 63);
    let offset = (size + 32) >> 6;
    debug_assert_eq!((offset - 1) * 64 + frac as i32 + 32, size);

    let width = src.len() as i32;
    let tap = |x: i32| {
        let x = match wrap {
            Wrap::Repeat => x & (width - 1),
            Wrap::Clamp => x.clamp(0, width - 1),
        };
        src[x as usize].channels().map(i64::from)
    };
    let denom = 2 * i64::from(size);
    let bias = i64::from(size);

    let mut accu = [0i64; 4];
    match wrap {
        Wrap::Repeat => {
            let (l, r) = (tap(-offset), tap(offset));
            for c in 0..4 {
                accu[c] = frac * (l[c] + r[c]) + bias;
            }
            for x in -offset + 1..offset {
                let p = tap(x);
                for c in 0..4 {
                    accu[c] += p[c] << 6;
                }
            }
        }
        Wrap::Clamp => {
            // left of the first pixel the edge value repeats
            let (first, r) = (tap(0), tap(offset));
            for c in 0..4 {
                accu[c] = first[c] * i64::from(size + 32) + bias + frac * r[c];
            }
            for x in 1..offset {
                let p = tap(x);
                for c in 0..4 {
                    accu[c] += p[c] << 6;
                }
            }
        }
    }

    for (x, out) in (0..width).zip(dst.iter_mut()) {
        *out = Pixel::from_channels(accu.map(|v| (v / denom) as u16));

        let (l0, l1) = (tap(x - offset), tap(x - offset + 1));
        let (r0, r1) = (tap(x + offset), tap(x + offset + 1));
        for c in 0..4 {
            accu[c] += 64 * (r0[c] - l1[c]) + frac * (r1[c] - r0[c] - l0[c] + l1[c]);
        }
    }
}

/// Run `order` passes over one line, ping-ponging between `line` and `scratch`.
fn blur_passes(line: &mut Vec<Pixel>, scratch: &mut Vec<Pixel>, size: i32, order: u32, wrap: Wrap) {
    for _ in 0..order {
        blur_line(scratch, line, size, wrap);
        std::mem::swap(line, scratch);
    }
}

/// Copy `src` into `dst` and blur it.
#[tracing::instrument(skip(dst, src))]
pub fn blur(dst: &mut Texture, src: &Texture, params: &BlurParams) -> TexgenResult<()> {
    dst.ensure_same_size(src, "blur")?;
    dst.copy_from(src);
    blur_in_place(dst, params)
}

/// Blur rows, then columns, of `tex`.
///
/// An axis whose kernel is at most half a pixel wide is left untouched.
#[tracing::instrument(skip(tex))]
pub fn blur_in_place(tex: &mut Texture, params: &BlurParams) -> TexgenResult<()> {
    if !params.size_x.is_finite() || !params.size_y.is_finite() {
        return Err(TexgenError::validation("blur sizes must be finite"));
    }
    let size_x = kernel_size(params.size_x, tex.width());
    let size_y = kernel_size(params.size_y, tex.height());
    if params.order == 0 || (size_x <= 32 && size_y <= 32) {
        return Ok(());
    }

    let (w, h) = (tex.width() as usize, tex.height() as usize);
    let mut line = Vec::with_capacity(w.max(h));
    let mut scratch = vec![Pixel::TRANSPARENT; w.max(h)];

    if size_x > 32 {
        scratch.truncate(w);
        for row in tex.rows_mut() {
            line.clear();
            line.extend_from_slice(row);
            blur_passes(&mut line, &mut scratch, size_x, params.order, params.wrap_u);
            row.copy_from_slice(&line);
        }
    }

    if size_y > 32 {
        scratch.resize(h, Pixel::TRANSPARENT);
        let pixels = tex.pixels_mut();
        for x in 0..w {
            line.clear();
            line.extend((0..h).map(|y| pixels[y * w + x]));
            blur_passes(&mut line, &mut scratch, size_y, params.order, params.wrap_v);
            for (y, p) in line.iter().enumerate() {
                pixels[y * w + x] = *p;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/filters/blur.rs"]
mod tests;
