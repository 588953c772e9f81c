pub mod cells;
pub mod glow;
pub mod gradient;
pub mod noise;
