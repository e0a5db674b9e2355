//! Vector math and random sampling.

mod random;
mod vector;

pub use random::RandomField;
pub use vector::Vector3;
