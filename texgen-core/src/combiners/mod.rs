pub mod bump;
pub mod linear;
pub mod paste;
pub mod ternary;
