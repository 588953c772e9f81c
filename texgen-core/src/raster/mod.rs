pub mod pixel;
pub mod placement;
pub mod sampling;
pub mod texture;
