//! Pure domain types with minimal dependencies
//!
//! Geometry and annotation state, free of rendering and I/O.

pub mod annotation;
pub mod geometry;

pub use annotation::*;
pub use geometry::*;
