//! Texgen is a procedural texture synthesis library.
//!
//! Textures are power-of-two rasters of premultiplied 16-bit ARGB pixels. Operators are free
//! functions that write into a caller-owned destination texture:
//!
//! 1. **Generators** create content from parameters: lattice [`noise`], Voronoi [`cells`],
//!    soft [`glow_rect_in_place`] shapes and two-texel [`linear_gradient`] ramps.
//! 2. **Filters** transform one texture: color and coordinate matrices, ramp remaps,
//!    displacement, derivatives ([`derive`]) and a fractional-width box [`blur`].
//! 3. **Combiners** merge several: [`ternary`] blends, [`paste`] into a parallelogram,
//!    N-way [`linear_combine`] and normal-mapped [`bump`] lighting.
//!
//! Texture coordinates are 1.7.24 fixed point (see [`fixed`]); all integer math is
//! deterministic, so a composition renders bit-identically on every platform and thread count.
//! [`render_showcase`] builds the reference composition from these pieces.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod combiners;
mod filters;
mod foundation;
mod generators;
mod noise;
mod procedural;
mod raster;
mod showcase;

pub use codec::{ImageFormat, decode, encode, from_rgba8, load, save, to_rgba8};
pub use combiners::bump::{BumpParams, Light, bump};
pub use combiners::linear::{LinearInput, MAX_LINEAR_INPUTS, linear_combine};
pub use combiners::paste::{CombineOp, paste, paste_in_place};
pub use combiners::ternary::{TernaryOp, ternary};
pub use filters::blur::{BlurParams, blur, blur_in_place};
pub use filters::color::{color_matrix_transform, color_matrix_transform_in_place, color_remap};
pub use filters::coord::{coord_matrix_transform, coord_remap};
pub use filters::derive::{DeriveOp, derive};
pub use foundation::error::{TexgenError, TexgenResult};
/// Fixed-point and intensity arithmetic helpers.
pub use foundation::math as fixed;
pub use foundation::matrix::Matrix44;
pub use foundation::random::{Xoshiro, splitmix_seed};
pub use generators::cells::{CellCenter, CellMode, MAX_CELL_CENTERS, cells};
pub use generators::glow::{GlowRectParams, glow_rect, glow_rect_in_place};
pub use generators::gradient::linear_gradient;
pub use generators::noise::{NoiseBasis, NoiseMode, NoiseParams, NoiseScale, NoiseShape, noise};
pub use noise::perlin::{
    DEFAULT_SEED as PERLIN_DEFAULT_SEED, PerlinTable, TABLE_SIZE as PERLIN_TABLE_SIZE, gradient2,
    smoothstep,
};
pub use procedural::{
    DEFAULT_VORONOI_SEED, MAX_VORONOI_CENTERS, colorize, colorize_matrix, random_voronoi,
};
pub use raster::pixel::{
    Pixel, combine_darken, combine_lighten, combine_multiply, combine_over, combine_screen,
    composite_add, composite_mul_c, composite_rover, composite_screen,
};
pub use raster::placement::Parallelogram;
pub use raster::sampling::{
    Filter, FilterMode, Wrap, sample_bilinear, sample_filtered, sample_gradient, sample_nearest,
};
pub use raster::texture::{MAX_DIMENSION, Texture};
pub use showcase::{SHOWCASE_SIZE, Showcase, grid_matrix, render_showcase};
