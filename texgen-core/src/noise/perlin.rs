//! Permutation-table noise basis shared by the noise generator.

use std::sync::OnceLock;

use crate::foundation::math::lerp_f32;
use crate::foundation::random::{Xoshiro, splitmix_seed};

/// Number of permutation entries. Lattice coordinates are masked to this range.
pub const TABLE_SIZE: usize = 4096;

/// Seed of the table returned by [`PerlinTable::shared`].
pub const DEFAULT_SEED: u32 = 0x9363_8245;

const GRADIENT_SIGNS: [(f32, f32); 8] = [
    (1.0, 2.0),
    (-1.0, 2.0),
    (1.0, -2.0),
    (-1.0, -2.0),
    (1.0, 2.0),
    (-1.0, 2.0),
    (1.0, -2.0),
    (-1.0, -2.0),
];

/// Seeded permutation of `0..4096`, read-only after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerlinTable {
    perm: Vec<u16>,
}

impl Default for PerlinTable {
    fn default() -> Self {
        Self::new(u64::from(DEFAULT_SEED))
    }
}

impl PerlinTable {
    /// Fisher-Yates shuffle of the identity permutation, driven by a seeded [`Xoshiro`].
    pub fn new(seed: u64) -> Self {
        let mut perm: Vec<u16> = (0..TABLE_SIZE as u16).collect();
        let s0 = splitmix_seed(seed);
        let mut rng = Xoshiro::new(s0, splitmix_seed(s0));
        for i in (1..TABLE_SIZE).rev() {
            let j = (rng.next_u64() % (i as u64 + 1)) as usize;
            perm.swap(i, j);
        }
        Self { perm }
    }

    /// Process-wide table built from [`DEFAULT_SEED`] on first use.
    pub fn shared() -> &'static PerlinTable {
        static SHARED: OnceLock<PerlinTable> = OnceLock::new();
        SHARED.get_or_init(PerlinTable::default)
    }

    /// The permutation as stored.
    pub fn as_slice(&self) -> &[u16] {
        &self.perm
    }

    /// Table lookup with the index wrapped into range.
    pub fn p(&self, i: i32) -> i32 {
        i32::from(self.perm[(i & (TABLE_SIZE as i32 - 1)) as usize])
    }

    /// Three nested lookups, hashing a 3-D lattice point.
    pub fn shuffle(&self, x: i32, y: i32, z: i32) -> i32 {
        self.p(self.p(self.p(x) + y) + z)
    }

    /// Smoothly interpolated lattice values at 16.16 position `(x, y)`, range `[-1, 1]`.
    ///
    /// The lattice repeats every `mask_x + 1` by `mask_y + 1` cells.
    pub fn noise2(&self, x: i32, y: i32, mask_x: i32, mask_y: i32, seed: i32) -> f32 {
        let (ix, iy) = (x >> 16, y >> 16);
        let u = smoothstep((x & 0xffff) as f32 * (1.0 / 65536.0));
        let v = smoothstep((y & 0xffff) as f32 * (1.0 / 65536.0));

        let mask_x = mask_x & (TABLE_SIZE as i32 - 1);
        let mask_y = mask_y & (TABLE_SIZE as i32 - 1);
        let (px0, px1) = (ix & mask_x, (ix + 1) & mask_x);
        let py0 = self.p(iy & mask_y);
        let py1 = self.p((iy + 1) & mask_y);

        let corner = |px: i32, py: i32| self.p(px + py + seed) as f32 / 2047.5 - 1.0;
        lerp_f32(
            lerp_f32(corner(px0, py0), corner(px1, py0), u),
            lerp_f32(corner(px0, py1), corner(px1, py1), u),
            v,
        )
    }

    /// Gradient noise: quartic-falloff kernels around the 2×2 lattice neighborhood.
    pub fn gnoise2(&self, x: i32, y: i32, mask_x: i32, mask_y: i32, seed: i32) -> f32 {
        let (i, j) = (x >> 16, y >> 16);
        let xp = (x & 0xffff) as f32 * (1.0 / 65536.0);
        let yp = (y & 0xffff) as f32 * (1.0 / 65536.0);

        let mut sum = 0.0f32;
        for oy in 0..=1 {
            for ox in 0..=1 {
                let xr = xp - ox as f32;
                let yr = yp - oy as f32;
                let t = 1.0 - (xr * xr + yr * yr);
                if t > 0.0 {
                    let t = t * t * t * t;
                    let hash = self.shuffle((i + ox) & mask_x, (j + oy) & mask_y, seed);
                    sum += t * gradient2(hash, xr, yr);
                }
            }
        }
        sum
    }
}

/// Quintic fade `x³(10 + x(6x − 15))`.
pub fn smoothstep(x: f32) -> f32 {
    x * x * x * (10.0 + x * (6.0 * x - 15.0))
}

/// Dot product with one of eight gradient directions picked by `hash`.
pub fn gradient2(hash: i32, x: f32, y: f32) -> f32 {
    let (sx, sy) = GRADIENT_SIGNS[(hash & 7) as usize];
    x * sx + y * sy
}

#[cfg(test)]
#[path = "../../tests/unit/noise/perlin.rs"]
mod tests;
