//! The reference composition: a blue-gray bumpy tile with a rotated glow grid.
//!
//! It exercises almost every operator in the crate and is the regression target for the CLI,
//! the benchmark harness and the end-to-end tests.

use std::f32::consts::{SQRT_2, TAU};

use crate::combiners::bump::{BumpParams, Light, bump};
use crate::combiners::linear::{LinearInput, linear_combine};
use crate::combiners::paste::{CombineOp, paste_in_place};
use crate::filters::blur::{BlurParams, blur_in_place};
use crate::filters::coord::coord_matrix_transform;
use crate::filters::derive::{DeriveOp, derive};
use crate::foundation::error::TexgenResult;
use crate::foundation::matrix::Matrix44;
use crate::generators::glow::{GlowRectParams, glow_rect_in_place};
use crate::generators::gradient::linear_gradient;
use crate::generators::noise::{NoiseBasis, NoiseMode, NoiseParams, NoiseScale, NoiseShape, noise};
use crate::noise::perlin::PerlinTable;
use crate::procedural::{DEFAULT_VORONOI_SEED, colorize, random_voronoi};
use crate::raster::pixel::Pixel;
use crate::raster::placement::Parallelogram;
use crate::raster::sampling::{Filter, FilterMode};
use crate::raster::texture::Texture;

/// Edge length of every showcase texture.
pub const SHOWCASE_SIZE: u32 = 256;

const BANDLIMITED: NoiseMode =
    NoiseMode::new(NoiseBasis::Bandlimited, NoiseShape::Signed, NoiseScale::Normalized);

const VORONOI_LAYERS: [(u8, usize, f32); 4] =
    [(37, 90, 0.125), (42, 132, 0.063), (37, 240, 0.063), (37, 255, 0.063)];

/// Every intermediate texture of the composition, in build order.
#[derive(Clone, Debug)]
pub struct Showcase {
    /// Six-octave base noise.
    pub noise: Texture,
    /// The four random Voronoi layers.
    pub voronoi: [Texture; 4],
    /// Weighted sum of the Voronoi layers.
    pub base: Texture,
    /// `base` after a light blur.
    pub blurred: Texture,
    /// Dim high-frequency noise.
    pub noise_layer: Texture,
    /// `blurred` plus `noise_layer`.
    pub textured: Texture,
    /// `textured` mapped onto the blue-gray ramp.
    pub colorized: Texture,
    /// Dark glow rectangle for the bump grid.
    pub rect1: Texture,
    /// `rect1` warped into the grid.
    pub rect1x: Texture,
    /// Normals of `rect1x`.
    pub rect1n: Texture,
    /// `colorized` lit through `rect1n`.
    pub lit: Texture,
    /// Light glow rectangle for the shading grid.
    pub rect2: Texture,
    /// `rect2` warped into the grid.
    pub rect2x: Texture,
    /// `lit` multiplied by `rect2x`.
    pub output: Texture,
}

impl Showcase {
    /// `(name, texture)` for each stage; names are stable file stems.
    pub fn stages(&self) -> Vec<(&'static str, &Texture)> {
        let [v0, v1, v2, v3] = &self.voronoi;
        vec![
            ("noise", &self.noise),
            ("voronoi0", v0),
            ("voronoi1", v1),
            ("voronoi2", v2),
            ("voronoi3", v3),
            ("base", &self.base),
            ("blurred", &self.blurred),
            ("noise_layer", &self.noise_layer),
            ("textured", &self.textured),
            ("colorized", &self.colorized),
            ("rect1", &self.rect1),
            ("rect1x", &self.rect1x),
            ("rect1n", &self.rect1n),
            ("lit", &self.lit),
            ("rect2", &self.rect2),
            ("rect2x", &self.rect2x),
            ("final", &self.output),
        ]
    }
}

/// Turns the glow rectangle into a diagonal grid: scale by `3√2` and rotate by an eighth turn.
///
/// The product is grouped from the right, which fixes its `f32` rounding.
pub fn grid_matrix() -> Matrix44 {
    let scaled =
        Matrix44::scale(3.0 * SQRT_2, 3.0 * SQRT_2, 1.0) * Matrix44::translation(-0.5, -0.5, 0.0);
    let rotated = Matrix44::rotation_z(0.125 * TAU) * scaled;
    Matrix44::translation(0.5, 0.5, 0.0) * rotated
}

fn canvas() -> TexgenResult<Texture> {
    Texture::new(SHOWCASE_SIZE, SHOWCASE_SIZE)
}

/// Glow rectangle over a flat background, warped into the grid.
fn grid_layer(
    background: Pixel,
    ramp: &Texture,
    glow: &GlowRectParams,
) -> TexgenResult<(Texture, Texture)> {
    let mut rect = canvas()?;
    linear_combine(&mut rect, background, 1.0, &[])?;
    glow_rect_in_place(&mut rect, ramp, glow)?;

    let mut warped = canvas()?;
    coord_matrix_transform(&mut warped, &rect, &grid_matrix(), FilterMode::WRAP_BILINEAR)?;
    Ok((rect, warped))
}

/// Render every stage of the composition with `perlin`.
#[tracing::instrument(skip(perlin))]
pub fn render_showcase(perlin: &PerlinTable) -> TexgenResult<Showcase> {
    let black_to_white = linear_gradient(0xff00_0000, 0xffff_ffff)?;
    let white_to_black = linear_gradient(0xffff_ffff, 0xff00_0000)?;
    let white = linear_gradient(0xffff_ffff, 0xffff_ffff)?;

    let mut noise_tex = canvas()?;
    let params = NoiseParams {
        freq_x: 2,
        freq_y: 2,
        octaves: 6,
        fadeoff: 0.5,
        seed: 123,
        mode: BANDLIMITED,
    };
    noise(&mut noise_tex, &black_to_white, &params, perlin)?;

    let mut voronoi = [canvas()?, canvas()?, canvas()?, canvas()?];
    for (tex, (intensity, count, min_dist)) in voronoi.iter_mut().zip(VORONOI_LAYERS) {
        random_voronoi(tex, &white, intensity, count, min_dist, DEFAULT_VORONOI_SEED)?;
    }

    let mut base = canvas()?;
    let inputs: Vec<LinearInput<'_>> = voronoi
        .iter()
        .map(|tex| LinearInput::new(tex, 1.5))
        .collect();
    linear_combine(&mut base, Pixel::BLACK, 0.0, &inputs)?;
    tracing::debug!("base layer combined");

    let mut blurred = base.clone();
    blur_in_place(&mut blurred, &BlurParams::new(0.0074, 0.0074, 1))?;

    let mut noise_layer = canvas()?;
    let params = NoiseParams {
        freq_x: 4,
        freq_y: 4,
        octaves: 5,
        fadeoff: 0.995,
        seed: 3,
        mode: BANDLIMITED,
    };
    noise(&mut noise_layer, &linear_gradient(0xff00_0000, 0xff64_6464)?, &params, perlin)?;

    let mut textured = blurred.clone();
    paste_in_place(
        &mut textured,
        &noise_layer,
        &Parallelogram::FULL,
        CombineOp::Add,
        Filter::Nearest,
    )?;

    let mut colorized = textured.clone();
    colorize(&mut colorized, 0xff74_7d8e, 0xfff1_feff);

    let (rect1, rect1x) = grid_layer(
        Pixel::BLACK,
        &white_to_black,
        &GlowRectParams {
            area: Parallelogram::new([0.5, 0.5], [0.41, 0.0], [0.0, 0.25]),
            rect_u: 0.7805,
            rect_v: 0.64,
        },
    )?;
    let mut rect1n = canvas()?;
    derive(&mut rect1n, &rect1x, DeriveOp::Normals, 2.5)?;

    let mut lit = canvas()?;
    let light = BumpParams {
        light: Light::Directional {
            direction: [-2.518, 0.719, -3.10],
        },
        ambient: Pixel::from_argb32(0xff10_1010),
        diffuse: Pixel::WHITE,
    };
    bump(&mut lit, &colorized, &rect1n, None, None, &light)?;
    tracing::debug!("bump lighting applied");

    let (rect2, rect2x) = grid_layer(
        Pixel::WHITE,
        &black_to_white,
        &GlowRectParams {
            area: Parallelogram::new([0.5, 0.5], [0.36, 0.0], [0.0, 0.20]),
            rect_u: 0.8805,
            rect_v: 0.74,
        },
    )?;

    let mut output = lit.clone();
    paste_in_place(
        &mut output,
        &rect2x,
        &Parallelogram::FULL,
        CombineOp::Multiply,
        Filter::Nearest,
    )?;

    Ok(Showcase {
        noise: noise_tex,
        voronoi,
        base,
        blurred,
        noise_layer,
        textured,
        colorized,
        rect1,
        rect1x,
        rect1n,
        lit,
        rect2,
        rect2x,
        output,
    })
}
