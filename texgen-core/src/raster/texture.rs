use crate::foundation::error::{TexgenError, TexgenResult};
use crate::foundation::math::{Fnv1a64, floor_log2, is_pow2};
use crate::raster::pixel::Pixel;

/// Largest supported edge length. Cell generation addresses pixels in a 14-bit torus.
pub const MAX_DIMENSION: u32 = 1 << 14;

/// Power-of-two raster of premultiplied [`Pixel`]s, row-major with row 0 at the top.
///
/// `shift_x`/`shift_y` are `log2` of the dimensions; `min_x`/`min_y` are half a texel in
/// 1.7.24 fixed point, the clamp limit that keeps edge sampling centered on the border texel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    shift_x: u32,
    shift_y: u32,
    min_x: i32,
    min_y: i32,
    data: Vec<Pixel>,
}

fn check_dim(name: &str, v: u32) -> TexgenResult<u32> {
    if !is_pow2(v) || v > MAX_DIMENSION {
        return Err(TexgenError::validation(format!(
            "texture {name} must be a power of two in 1..={MAX_DIMENSION}, got {v}"
        )));
    }
    floor_log2(v).ok_or_else(|| TexgenError::validation(format!("texture {name} is zero")))
}

impl Texture {
    /// Allocate a transparent-black texture.
    pub fn new(width: u32, height: u32) -> TexgenResult<Self> {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    /// Allocate a texture with every pixel set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Pixel) -> TexgenResult<Self> {
        let shift_x = check_dim("width", width)?;
        let shift_y = check_dim("height", height)?;
        Ok(Self {
            width,
            height,
            shift_x,
            shift_y,
            min_x: 1 << (23 - shift_x),
            min_y: 1 << (23 - shift_y),
            data: vec![fill; width as usize * height as usize],
        })
    }

    /// Wrap row-major `pixels`; the count must match the size.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> TexgenResult<Self> {
        let mut tex = Self::new(width, height)?;
        if pixels.len() != tex.data.len() {
            return Err(TexgenError::validation(format!(
                "expected {} pixels for a {width}x{height} texture, got {}",
                tex.data.len(),
                pixels.len()
            )));
        }
        tex.data = pixels;
        Ok(tex)
    }

    /// Change the size in place. Existing contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> TexgenResult<()> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        *self = Self::new(width, height)?;
        Ok(())
    }

    /// Become a copy of `other`, reusing the allocation when sizes match.
    pub fn copy_from(&mut self, other: &Texture) {
        if self.size_matches(other) {
            self.data.copy_from_slice(&other.data);
        } else {
            self.clone_from(other);
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `log2` of the width.
    pub fn shift_x(&self) -> u32 {
        self.shift_x
    }

    /// `log2` of the height.
    pub fn shift_y(&self) -> u32 {
        self.shift_y
    }

    /// Half a texel in 1.7.24, the first pixel center.
    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Half a texel in 1.7.24, vertically.
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Whether both textures have the same dimensions.
    pub fn size_matches(&self, other: &Texture) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Fail with a validation error unless `other` has the same dimensions.
    pub(crate) fn ensure_same_size(&self, other: &Texture, what: &str) -> TexgenResult<()> {
        if self.size_matches(other) {
            return Ok(());
        }
        Err(TexgenError::validation(format!(
            "{what}: size mismatch {}x{} vs {}x{}",
            self.width, self.height, other.width, other.height
        )))
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// Mutable pixels in row-major order.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Take the pixel buffer.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.data
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        ((y << self.shift_x) + x) as usize
    }

    /// Texel at integer position. Panics when out of range, like slice indexing.
    pub fn at(&self, x: u32, y: u32) -> Pixel {
        self.data[self.index(x, y)]
    }

    /// Mutable texel at integer position.
    pub fn at_mut(&mut self, x: u32, y: u32) -> &mut Pixel {
        let i = self.index(x, y);
        &mut self.data[i]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Pixel> {
        self.data.chunks_exact(self.width as usize)
    }

    /// Iterate mutable rows top to bottom.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, Pixel> {
        self.data.chunks_exact_mut(self.width as usize)
    }

    /// Stable 64-bit FNV-1a hash of the size and every channel.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        for p in &self.data {
            for c in p.channels() {
                h.write_u16(c);
            }
        }
        h.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/texture.rs"]
mod tests;
