//! Multi-octave lattice noise mapped through a color ramp.

use rayon::prelude::*;

use crate::foundation::error::{TexgenError, TexgenResult};
use crate::noise::perlin::PerlinTable;
use crate::raster::sampling::sample_gradient;
use crate::raster::texture::Texture;

/// Which lattice function each octave evaluates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseBasis {
    /// Quartic-kernel gradient noise.
    #[default]
    Lattice,
    /// Smoothstep-interpolated value noise.
    Bandlimited,
}

/// Signed octaves center the result on 0.5; absolute octaves fold each one to `|n|` and start
/// the result at 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseShape {
    /// Octaves keep their sign around the midpoint.
    #[default]
    Signed,
    /// Octaves are folded to their magnitude.
    Absolute,
}

/// Amplitude policy across octaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseScale {
    /// The first octave has amplitude `min(1, 1 / fadeoff)`.
    #[default]
    Unnormalized,
    /// The geometric series of octave amplitudes sums to one.
    Normalized,
}

/// Basis, shape and scaling of a [`noise`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NoiseMode {
    /// Lattice function per octave.
    pub basis: NoiseBasis,
    /// Sign handling per octave.
    pub shape: NoiseShape,
    /// Amplitude policy across octaves.
    pub scale: NoiseScale,
}

impl NoiseMode {
    /// Combine the three mode axes.
    pub const fn new(basis: NoiseBasis, shape: NoiseShape, scale: NoiseScale) -> Self {
        Self { basis, shape, scale }
    }
}

/// Everything [`noise`] needs besides the destination and ramp.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NoiseParams {
    /// `log2` of the lattice cells across the texture in the first octave.
    pub freq_x: i32,
    /// Like `freq_x`, vertically.
    pub freq_y: i32,
    /// Number of octaves, at least one.
    pub octaves: i32,
    /// Amplitude ratio between consecutive octaves.
    pub fadeoff: f32,
    /// Selects the lattice through the permutation table.
    pub seed: i32,
    /// Basis, shape and scaling.
    pub mode: NoiseMode,
}

impl NoiseParams {
    fn validate(&self, dst: &Texture) -> TexgenResult<()> {
        if self.octaves < 1 {
            return Err(TexgenError::validation("noise needs at least one octave"));
        }
        if !self.fadeoff.is_finite() || self.fadeoff == 0.0 {
            return Err(TexgenError::validation("noise fadeoff must be finite and non-zero"));
        }
        if self.mode.scale == NoiseScale::Normalized && self.fadeoff == 1.0 {
            return Err(TexgenError::validation("normalized noise needs fadeoff != 1"));
        }
        for (freq, shift) in [(self.freq_x, dst.shift_x()), (self.freq_y, dst.shift_y())] {
            let step = 16 - shift as i32 + freq;
            if freq < 0 || !(1..=30).contains(&step) {
                return Err(TexgenError::validation(format!(
                    "noise frequency {freq} out of range for a 2^{shift} texture"
                )));
            }
        }
        Ok(())
    }

    fn amplitude(&self) -> (i32, f32) {
        let scaling = match self.mode.scale {
            NoiseScale::Normalized => {
                let f = f64::from(self.fadeoff);
                ((f - 1.0) / (f.powf(f64::from(self.octaves)) - 1.0)) as f32
            }
            NoiseScale::Unnormalized => 1.0f32.min(1.0 / self.fadeoff),
        };
        match self.mode.shape {
            NoiseShape::Absolute => (0, scaling * (1 << 24) as f32),
            NoiseShape::Signed => (1 << 23, scaling * (1 << 23) as f32),
        }
    }
}

/// Fill `dst` with `octaves` of noise, each at twice the frequency and `fadeoff` times the
/// amplitude of the previous one, and map the sum through `gradient`.
///
/// The pattern tiles across the texture edges.
#[tracing::instrument(skip(dst, gradient, perlin), fields(w = dst.width(), h = dst.height()))]
pub fn noise(
    dst: &mut Texture,
    gradient: &Texture,
    params: &NoiseParams,
    perlin: &PerlinTable,
) -> TexgenResult<()> {
    params.validate(dst)?;

    let seed = perlin.p(params.seed);
    let (offset, scaling) = params.amplitude();
    let step_x = 16 - dst.shift_x() as i32 + params.freq_x;
    let step_y = 16 - dst.shift_y() as i32 + params.freq_y;
    let offs_x = (1 << step_x) >> 1;
    let offs_y = (1 << step_y) >> 1;
    let width = dst.width() as usize;

    dst.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let py0 = ((y as i32) << step_y).wrapping_add(offs_y);
            for (x, out) in row.iter_mut().enumerate() {
                let mut px = ((x as i32) << step_x).wrapping_add(offs_x);
                let mut py = py0;
                let mut mx = (1i32 << params.freq_x) - 1;
                let mut my = (1i32 << params.freq_y) - 1;
                let mut n = offset;
                let mut s = scaling;

                for _ in 0..params.octaves {
                    let mut nv = match params.mode.basis {
                        NoiseBasis::Bandlimited => perlin.noise2(px, py, mx, my, seed),
                        NoiseBasis::Lattice => perlin.gnoise2(px, py, mx, my, seed),
                    };
                    if params.mode.shape == NoiseShape::Absolute {
                        nv = nv.abs();
                    }
                    n = (n as f32 + nv * s) as i32;
                    s *= params.fadeoff;

                    px = px.wrapping_add(px);
                    py = py.wrapping_add(py);
                    mx = mx.wrapping_add(mx).wrapping_add(1);
                    my = my.wrapping_add(my).wrapping_add(1);
                }

                *out = sample_gradient(gradient, n);
            }
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/generators/noise.rs"]
mod tests;
