//! Core data structures

/// Binarized image buffer
pub mod image;

pub use image::BinaryImage;
