//! Photo capture collaborator
//!
//! The editor only needs the decoded pixels and the device scale factor.

pub mod image;

pub use self::image::CapturedImage;
