pub mod blur;
pub mod color;
pub mod coord;
pub mod derive;
