use rayon::prelude::*;

use crate::foundation::error::TexgenResult;
use crate::raster::pixel::Pixel;
use crate::raster::texture::Texture;

/// What [`derive`] writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeriveOp {
    /// Slopes as `(dx, dy)` in red and green, 32768 meaning flat.
    Gradient,
    /// Unit normals of the height field, each component biased to `[0, 65535]`.
    #[default]
    Normals,
}

fn to_channel(v: f32) -> u16 {
    (v as i32).clamp(0, 65535) as u16
}

/// Differentiate the red channel of `src` as a height field, with wrap-around at the edges.
///
/// `strength` scales the height differences before the slope or normal is formed.
#[tracing::instrument(skip(dst, src))]
pub fn derive(dst: &mut Texture, src: &Texture, op: DeriveOp, strength: f32) -> TexgenResult<()> {
    dst.ensure_same_size(src, "derive")?;

    let (w, h) = (src.width(), src.height());
    dst.pixels_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            let (up, down) = (y.wrapping_sub(1) & (h - 1), (y + 1) & (h - 1));
            for (x, out) in row.iter_mut().enumerate() {
                let x = x as u32;
                let (left, right) = (x.wrapping_sub(1) & (w - 1), (x + 1) & (w - 1));
                let dx2 = i32::from(src.at(right, y).r) - i32::from(src.at(left, y).r);
                let dy2 = i32::from(src.at(x, down).r) - i32::from(src.at(x, up).r);
                let dx = dx2 as f32 * strength / (2.0 * 65535.0);
                let dy = dy2 as f32 * strength / (2.0 * 65535.0);

                *out = match op {
                    DeriveOp::Gradient => Pixel::new(
                        to_channel(dx * 32768.0 + 32768.0),
                        to_channel(dy * 32768.0 + 32768.0),
                        0,
                        0xffff,
                    ),
                    DeriveOp::Normals => {
                        // (1, 0, dx) × (0, 1, dy) = (-dx, -dy, 1)
                        let scale = 32768.0 * (1.0 / (1.0 + dx * dx + dy * dy).sqrt());
                        Pixel::new(
                            to_channel(-dx * scale + 32768.0),
                            to_channel(-dy * scale + 32768.0),
                            to_channel(scale + 32768.0),
                            0xffff,
                        )
                    }
                };
            }
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/filters/derive.rs"]
mod tests;
