//! Integer helpers shared by every operator.
//!
//! Texture-space coordinates are 1.7.24 fixed point: `1 << 24` is 1.0, the top 7 bits give
//! headroom while filter kernels step outside `[0, 1)`. Channel values are 16-bit intensities
//! where 65535 is 1.0, and interpolation weights are `0..=65536`.

/// Fixed-point 1.0 in texture space.
pub const FIXED_ONE: i32 = 1 << 24;

/// Mask that wraps a fixed-point coordinate into `[0, 1)`.
pub const FIXED_MASK: i32 = FIXED_ONE - 1;

/// Returns true if `x` is a positive power of two.
pub fn is_pow2(x: u32) -> bool {
    x != 0 && (x & (x - 1)) == 0
}

/// `floor(log2(x))`, or `None` for zero.
pub fn floor_log2(x: u32) -> Option<u32> {
    x.checked_ilog2()
}

/// Interpolate between two 16-bit intensities with `t` in `0..=65536`.
///
/// `t` is clamped first. The result satisfies `lerp(a, b, t) == lerp(b, a, 65536 - t)`.
pub fn lerp(a: u16, b: u16, t: u32) -> u16 {
    let t = i64::from(t.min(0x10000));
    let d = i64::from(b) - i64::from(a);
    (i64::from(a) + ((t * d) >> 16)) as u16
}

/// Float interpolation `a + t * (b - a)`.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Multiply intensities: `round(a * b / 65535)` without a division.
pub fn mul_intens(a: u16, b: u16) -> u16 {
    // 0x8000 rounds, the second shift folds in the 1/65535 vs 1/65536 correction
    let x = u32::from(a) * u32::from(b) + 0x8000;
    ((x + (x >> 16)) >> 16) as u16
}

/// `round(a * b / 65536)` for 16.16 weights applied to intensities.
pub fn mul_shift16(a: i32, b: i32) -> i32 {
    ((i64::from(a) * i64::from(b) + 0x8000) >> 16) as i32
}

/// `round(a * b / 256)` in unsigned arithmetic.
pub fn umul_shift8(a: u32, b: u32) -> u32 {
    ((u64::from(a) * u64::from(b) + 0x80) >> 8) as u32
}

/// Expand an 8-bit channel to 16 bits by bit replication (`0xAB -> 0xABAB`).
pub fn expand8to16(v: u8) -> u16 {
    (u16::from(v) << 8) | u16::from(v)
}

/// `x * x`.
pub fn square(x: i32) -> i32 {
    x * x
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u16(&mut self, v: u16) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
