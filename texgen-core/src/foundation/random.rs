//! Deterministic pseudo-random numbers for table construction and center placement.
//!
//! Output must be identical on every platform, so nothing here depends on an external RNG.

/// Scramble a seed with the SplitMix64 finalizer.
pub fn splitmix_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z ^= z >> 30;
    z = z.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z ^= z >> 27;
    z = z.wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    z
}

/// Two-word xoshiro-style generator with a `**` output scrambler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xoshiro {
    state: [u64; 2],
}

impl Xoshiro {
    /// Build a generator from raw state words.
    pub fn new(s0: u64, s1: u64) -> Self {
        Self { state: [s0, s1] }
    }

    /// Standard seeding: `{ splitmix(seed), splitmix(splitmix(seed)) }`.
    pub fn from_seed(seed: u64) -> Self {
        let s0 = splitmix_seed(seed);
        Self::new(s0, splitmix_seed(s0))
    }

    /// Next 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_mul(5).rotate_left(7).wrapping_mul(9);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Split off an independent generator seeded from the next two outputs.
    pub fn fork(&mut self) -> Self {
        let s0 = self.next_u64();
        let s1 = self.next_u64();
        Self::new(s0, s1)
    }

    /// Uniform `f32` in `[0, 1)`: the 64-bit draw scaled by `2^-64`, kept strictly below one.
    pub fn next_unit_f32(&mut self) -> f32 {
        const TWO_POW_64: f32 = 18_446_744_073_709_551_616.0;
        let v = self.next_u64() as f32 / TWO_POW_64;
        if v >= 1.0 { 1.0 - f32::EPSILON / 2.0 } else { v }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;
