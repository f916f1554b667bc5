//! Utility functions for image preprocessing
//!
//! - Grayscale conversion (RGB to luminance)
//! - Binarization (Otsu's method)

pub mod binarization;
pub mod grayscale;
