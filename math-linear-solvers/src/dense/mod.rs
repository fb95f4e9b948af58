//! Dense containers
//!
//! - [`Vector`]: growable 1-D container with arithmetic and norms
//! - [`Matrix`]: row-major 2-D storage consumed by the dense factorizations

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
