//! Premultiplied 16-bit-per-channel color values and their blend algebra.
//!
//! All compositing and combine operators are built from the primitive channel operators
//! (`+`, `-`, `*`, `~`, `|`, `&`), so identities such as commutativity of the symmetric blends
//! hold by construction.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Mul, MulAssign, Not, Sub, SubAssign,
};

use crate::foundation::math::{expand8to16, lerp, mul_intens};

/// Four 16-bit channels, color premultiplied by alpha, stored in `r, g, b, a` order.
///
/// The valid state has `r, g, b <= a`; intermediate arithmetic may break that and
/// [`Pixel::clamp_premult`] restores it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Pixel {
    /// Premultiplied red.
    pub r: u16,
    /// Premultiplied green.
    pub g: u16,
    /// Premultiplied blue.
    pub b: u16,
    /// Coverage.
    pub a: u16,
}

impl Pixel {
    /// All channels zero.
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Pixel = Pixel::new(0, 0, 0, 0xffff);
    /// Opaque white.
    pub const WHITE: Pixel = Pixel::new(0xffff, 0xffff, 0xffff, 0xffff);

    /// Build from 16-bit channels taken as-is.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels, replicating each byte into 16 bits. No premultiplication.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(expand8to16(r), expand8to16(g), expand8to16(b), expand8to16(a))
    }

    /// Build from a straight-alpha `0xAARRGGBB` word, premultiplying on the way in.
    pub fn from_argb32(argb: u32) -> Self {
        let a = expand8to16((argb >> 24) as u8);
        Self {
            r: mul_intens(expand8to16((argb >> 16) as u8), a),
            g: mul_intens(expand8to16((argb >> 8) as u8), a),
            b: mul_intens(expand8to16(argb as u8), a),
            a,
        }
    }

    /// Build from a `0xAAAA_RRRR_GGGG_BBBB` word that is already premultiplied.
    pub fn from_argb64(argb: u64) -> Self {
        Self {
            r: (argb >> 32) as u16,
            g: (argb >> 16) as u16,
            b: argb as u16,
            a: (argb >> 48) as u16,
        }
    }

    /// Inverse of [`Pixel::from_argb64`].
    pub fn to_argb64(self) -> u64 {
        (u64::from(self.a) << 48)
            | (u64::from(self.r) << 32)
            | (u64::from(self.g) << 16)
            | u64::from(self.b)
    }

    /// Gray pixel with every channel set to `v`.
    pub fn splat(v: u16) -> Self {
        Self::new(v, v, v, v)
    }

    /// `[r, g, b, a]`.
    pub fn channels(self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Inverse of [`Pixel::channels`].
    pub fn from_channels(c: [u16; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Interpolate towards `other`, `t` in `0..=65536`.
    pub fn lerp(self, other: Pixel, t: u32) -> Pixel {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    /// Clamp each color channel to at most alpha.
    pub fn clamp_premult(self) -> Pixel {
        Self {
            r: self.r.min(self.a),
            g: self.g.min(self.a),
            b: self.b.min(self.a),
            a: self.a,
        }
    }

    /// Replace alpha, color untouched.
    pub fn with_alpha(self, a: u16) -> Pixel {
        Self { a, ..self }
    }

    /// Replace alpha with an 8-bit value expanded by bit replication.
    pub fn with_alpha8(self, a: u8) -> Pixel {
        self.with_alpha(expand8to16(a))
    }

    fn zip(self, o: Pixel, f: impl Fn(u16, u16) -> u16) -> Pixel {
        Self {
            r: f(self.r, o.r),
            g: f(self.g, o.g),
            b: f(self.b, o.b),
            a: f(self.a, o.a),
        }
    }
}

impl Add for Pixel {
    type Output = Pixel;

    fn add(self, rhs: Pixel) -> Pixel {
        self.zip(rhs, u16::saturating_add)
    }
}

impl Sub for Pixel {
    type Output = Pixel;

    fn sub(self, rhs: Pixel) -> Pixel {
        self.zip(rhs, u16::saturating_sub)
    }
}

impl Mul for Pixel {
    type Output = Pixel;

    fn mul(self, rhs: Pixel) -> Pixel {
        self.zip(rhs, mul_intens)
    }
}

impl Mul<u16> for Pixel {
    type Output = Pixel;

    fn mul(self, s: u16) -> Pixel {
        self * Pixel::splat(s)
    }
}

impl Mul<Pixel> for u16 {
    type Output = Pixel;

    fn mul(self, p: Pixel) -> Pixel {
        p * self
    }
}

impl BitOr for Pixel {
    type Output = Pixel;

    fn bitor(self, rhs: Pixel) -> Pixel {
        self.zip(rhs, u16::max)
    }
}

impl BitAnd for Pixel {
    type Output = Pixel;

    fn bitand(self, rhs: Pixel) -> Pixel {
        self.zip(rhs, u16::min)
    }
}

impl Not for Pixel {
    type Output = Pixel;

    fn not(self) -> Pixel {
        Self::new(!self.r, !self.g, !self.b, !self.a)
    }
}

macro_rules! assign_op {
    ($tr:ident, $method:ident, $op:tt, $rhs:ty) => {
        impl $tr<$rhs> for Pixel {
            fn $method(&mut self, rhs: $rhs) {
                *self = *self $op rhs;
            }
        }
    };
}

assign_op!(AddAssign, add_assign, +, Pixel);
assign_op!(SubAssign, sub_assign, -, Pixel);
assign_op!(MulAssign, mul_assign, *, Pixel);
assign_op!(MulAssign, mul_assign, *, u16);
assign_op!(BitOrAssign, bitor_assign, |, Pixel);
assign_op!(BitAndAssign, bitand_assign, &, Pixel);

/// Saturating add.
pub fn composite_add(lhs: Pixel, rhs: Pixel) -> Pixel {
    lhs + rhs
}

/// Per-channel multiply.
pub fn composite_mul_c(lhs: Pixel, rhs: Pixel) -> Pixel {
    lhs * rhs
}

/// `rhs` drawn over `lhs`: `(1 - rhs.a) * lhs + rhs`.
pub fn composite_rover(lhs: Pixel, rhs: Pixel) -> Pixel {
    !rhs.a * lhs + rhs
}

/// Screen `rhs` onto `lhs` channel-wise, alpha included.
pub fn composite_screen(lhs: Pixel, rhs: Pixel) -> Pixel {
    lhs + rhs * !lhs
}

/// `lhs` drawn over `rhs`.
pub fn combine_over(lhs: Pixel, rhs: Pixel) -> Pixel {
    lhs + rhs * !lhs.a
}

/// Multiply blend; alpha is the union of both coverages.
pub fn combine_multiply(lhs: Pixel, rhs: Pixel) -> Pixel {
    let a = u32::from(lhs.a) + u32::from(rhs.a) - u32::from(mul_intens(lhs.a, rhs.a));
    ((lhs * rhs) + (!lhs.a * rhs) + (!rhs.a * lhs)).with_alpha(a as u16)
}

/// `rhs + lhs * (1 - rhs)`.
pub fn combine_screen(lhs: Pixel, rhs: Pixel) -> Pixel {
    rhs + lhs * !rhs
}

/// Keep the darker of the two colors where both overlap.
pub fn combine_darken(lhs: Pixel, rhs: Pixel) -> Pixel {
    ((lhs | rhs) - ((lhs * rhs.a) | (lhs.a * rhs)) + (lhs & rhs)).with_alpha(union_alpha(lhs, rhs))
}

/// Keep the lighter of the two colors where both overlap.
pub fn combine_lighten(lhs: Pixel, rhs: Pixel) -> Pixel {
    ((lhs & rhs) - ((lhs * rhs.a) & (lhs.a * rhs)) + (lhs | rhs)).with_alpha(union_alpha(lhs, rhs))
}

fn union_alpha(lhs: Pixel, rhs: Pixel) -> u16 {
    rhs.a.saturating_add(mul_intens(lhs.a, !rhs.a))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pixel.rs"]
mod tests;
