use crate::foundation::error::TexgenResult;
use crate::foundation::math::FIXED_ONE;
use crate::raster::pixel::composite_rover;
use crate::raster::placement::Parallelogram;
use crate::raster::sampling::sample_gradient;
use crate::raster::texture::Texture;

/// A soft-edged parallelogram.
///
/// `area.origin` is the center and `area.u`/`area.v` the half-axes. The inner `rect_u × rect_v`
/// fraction of the half-axes is solid (gradient position 0); outside it the normalized distance
/// to that core, measured in the parallelogram's own coordinates, indexes the gradient up to 1
/// at the outline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlowRectParams {
    /// Center and half-axes.
    pub area: Parallelogram,
    /// Solid fraction of the `u` half-axis.
    pub rect_u: f32,
    /// Solid fraction of the `v` half-axis.
    pub rect_v: f32,
}

/// Copy `background` into `dst` and draw the glow over it.
#[tracing::instrument(skip(dst, background, gradient))]
pub fn glow_rect(
    dst: &mut Texture,
    background: &Texture,
    gradient: &Texture,
    params: &GlowRectParams,
) -> TexgenResult<()> {
    dst.ensure_same_size(background, "glow_rect")?;
    dst.copy_from(background);
    glow_rect_in_place(dst, gradient, params)
}

/// Draw the glow over the current contents of `dst`, compositing each gradient sample under
/// the existing pixel with [`composite_rover`].
#[tracing::instrument(skip(dst, gradient))]
pub fn glow_rect_in_place(
    dst: &mut Texture,
    gradient: &Texture,
    params: &GlowRectParams,
) -> TexgenResult<()> {
    let GlowRectParams {
        area,
        rect_u,
        rect_v,
    } = *params;
    let [orgx, orgy] = area.origin;
    let [ux, uy] = area.u;
    let [vx, vy] = area.v;
    let (w, h) = (dst.width() as f32, dst.height() as f32);

    if area.is_degenerate(dst.width(), dst.height()) {
        tracing::debug!("glow rect smaller than a pixel, skipped");
        return Ok(());
    }

    // Each half-axis is applied separately so the rounding of the bounds is reproducible.
    let min_x = (((orgx - ux.abs() - vx.abs()) * w).floor() as i32).max(0);
    let min_y = (((orgy - uy.abs() - vy.abs()) * h).floor() as i32).max(0);
    let max_x = (((orgx + ux.abs() + vx.abs()) * w).ceil() as i32).min(dst.width() as i32 - 1);
    let max_y = (((orgy + uy.abs() + vy.abs()) * h).ceil() as i32).min(dst.height() as i32 - 1);

    // Cramer's rule for the 16.16 (u, v) coordinates of the first pixel center and their
    // per-pixel steps.
    let inv = 65536.0 / area.determinant();
    let rmx = (min_x as f32 + 0.5) / w - orgx;
    let rmy = (min_y as f32 + 0.5) / h - orgy;
    let mut u0 = ((rmx * vy - rmy * vx) * inv) as i32;
    let mut v0 = ((ux * rmy - uy * rmx) * inv) as i32;
    let dudx = (vy * inv / w) as i32;
    let dvdx = (-uy * inv / w) as i32;
    let dudy = (-vx * inv / h) as i32;
    let dvdy = (ux * inv / h) as i32;

    let ruf = ((rect_u * 65536.0) as i32).min(65535);
    let rvf = ((rect_v * 65536.0) as i32).min(65535);
    let gus = 1.0 / (65536.0 - ruf as f32);
    let gvs = 1.0 / (65536.0 - rvf as f32);

    for y in min_y..=max_y {
        let (mut u, mut v) = (u0, v0);
        for x in min_x..=max_x {
            if u > -65536 && u < 65536 && v > -65536 && v < 65536 {
                let du = (u.abs() - ruf).max(0);
                let dv = (v.abs() - rvf).max(0);
                let out = dst.at_mut(x as u32, y as u32);
                if du == 0 && dv == 0 {
                    *out = composite_rover(*out, sample_gradient(gradient, 0));
                } else {
                    let dus = du as f32 * gus;
                    let dvs = dv as f32 * gvs;
                    let dist = dus * dus + dvs * dvs;
                    if dist < 1.0 {
                        let t = (FIXED_ONE as f32 * dist.sqrt()) as i32;
                        *out = composite_rover(*out, sample_gradient(gradient, t));
                    }
                }
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
#[path = "../../tests/unit/generators/glow.rs"]
mod tests;
