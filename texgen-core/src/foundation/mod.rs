pub mod error;
pub mod math;
pub mod matrix;
pub mod random;
