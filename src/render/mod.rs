//! Annotation rendering module
//!
//! This module contains:
//! - Geometry shared by every flattening pass
//! - The compositing engine built on tiny-skia and image
//! - Caption text drawing

pub mod geometry;
pub mod image;
pub mod text;

pub use self::image::Compositor;
