/// A parallelogram in texture space: `origin + s·u + t·v`.
///
/// Paste maps `s, t ∈ [0, 1)` onto the snippet, with `origin` at a corner. GlowRect treats
/// `origin` as the center and `u`, `v` as half-axes, so the shape spans `s, t ∈ (-1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parallelogram {
    /// Anchor point.
    pub origin: [f32; 2],
    /// First axis.
    pub u: [f32; 2],
    /// Second axis.
    pub v: [f32; 2],
}

impl Parallelogram {
    /// Parallelogram from an anchor and two axes.
    pub const fn new(origin: [f32; 2], u: [f32; 2], v: [f32; 2]) -> Self {
        Self { origin, u, v }
    }

    /// Axis-aligned placement covering `[x, x + w) × [y, y + h)`.
    pub const fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new([x, y], [w, 0.0], [0.0, h])
    }

    /// The whole unit square.
    pub const FULL: Parallelogram = Parallelogram::rect(0.0, 0.0, 1.0, 1.0);

    /// Signed area of the `u`/`v` basis.
    pub fn determinant(&self) -> f32 {
        self.u[0] * self.v[1] - self.u[1] * self.v[0]
    }

    /// True when the basis covers less than a quarter of a `width × height` pixel grid cell.
    pub fn is_degenerate(&self, width: u32, height: u32) -> bool {
        self.determinant().abs() * width as f32 * (height as f32) < 0.25
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/placement.rs"]
mod tests;
