pub mod bits;
pub mod sample;

pub use bits::*;
pub use sample::*;
