//! barscan - EAN-13 barcode reading for camera detection crops
//!
//! A pure Rust decoder that turns a cropped image believed to contain one
//! EAN-13 barcode into its 13-digit string. The crop is binarized with a
//! global Otsu threshold, scanned row by row from the middle outward, and
//! retried at 90/180/270 degrees when the horizontal pass finds nothing.
//! The most frequent decode across rows wins; an empty string means "not
//! decoded", which is a normal outcome, not an error.
//!
//! The decoder is synchronous and stateless between calls: safe to invoke
//! from multiple threads on independent crops.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// One-dimensional symbol decoding (run lengths, pattern matching, EAN-13)
pub mod decoder;
/// Env-gated debug tracing
pub mod debug;
/// Synthetic EAN-13 rendering for tests, benches and demos
pub mod encode;
/// Core data structures (BinaryImage)
pub mod models;
/// Row scan strategy and rotation retries
pub mod scanner;
/// Image preprocessing (grayscale, binarization)
pub mod utils;

pub use models::BinaryImage;
pub use scanner::{CandidateTally, Rotation};

use scanner::{ROTATION_ORDER, rotate, scan_rows};
use utils::binarization::otsu_binarize;
use utils::grayscale::{rgb_to_grayscale, rgb_to_grayscale_parallel};

/// Crop size above which grayscale conversion runs in parallel
const PARALLEL_PIXEL_THRESHOLD: usize = 640 * 480;

/// Decode an EAN-13 barcode from an RGB crop.
///
/// # Arguments
/// * `rgb` - Raw RGB bytes (3 bytes per pixel, row-major, top-to-bottom)
/// * `width` - Crop width in pixels
/// * `height` - Crop height in pixels
///
/// # Returns
/// The 13-digit string, or an empty string when nothing decodes.
///
/// # Panics
/// Panics if either dimension is zero (malformed input is a programming
/// error, not a decode failure).
pub fn decode(rgb: &[u8], width: usize, height: usize) -> String {
    assert!(width > 0 && height > 0, "image dimensions must be non-zero");

    let gray = if width * height >= PARALLEL_PIXEL_THRESHOLD {
        rgb_to_grayscale_parallel(rgb, width, height)
    } else {
        rgb_to_grayscale(rgb, width, height)
    };
    decode_from_gray(&gray, width, height)
}

/// Decode from a pre-computed grayscale crop (1 byte per pixel).
pub fn decode_from_gray(gray: &[u8], width: usize, height: usize) -> String {
    assert!(width > 0 && height > 0, "image dimensions must be non-zero");

    let binary = otsu_binarize(gray, width, height);
    decode_binary(&binary)
}

/// Decode from an already binarized crop, trying all four orientations.
///
/// Scans at 0 degrees first; on an empty candidate set retries at 90, 180
/// and 270 degrees, stopping at the first orientation that yields any
/// candidate. Returns the most frequent candidate of that orientation.
pub fn decode_binary(image: &BinaryImage) -> String {
    let tally = scan_rows(image);
    if !tally.is_empty() {
        if debug::debug_enabled() {
            eprintln!("DECODE: barcode found at 0 degrees");
        }
        return tally.most_frequent();
    }

    for rotation in ROTATION_ORDER {
        let rotated = rotate(image, rotation);
        let tally = scan_rows(&rotated);
        if !tally.is_empty() {
            if debug::debug_enabled() {
                eprintln!("DECODE: barcode found at {:?}", rotation);
            }
            return tally.most_frequent();
        }
    }

    String::new()
}

/// Decoder with configuration options.
pub struct Scanner {
    /// Retry at 90/180/270 degrees when the horizontal pass finds nothing
    try_rotations: bool,
}

impl Scanner {
    /// Create a scanner with default settings (rotation retries enabled)
    pub fn new() -> Self {
        Self {
            try_rotations: true,
        }
    }

    /// Create a scanner that only scans horizontally
    pub fn without_rotations() -> Self {
        Self {
            try_rotations: false,
        }
    }

    /// Decode an EAN-13 barcode from an RGB crop
    pub fn decode(&self, rgb: &[u8], width: usize, height: usize) -> String {
        assert!(width > 0 && height > 0, "image dimensions must be non-zero");

        let gray = if width * height >= PARALLEL_PIXEL_THRESHOLD {
            rgb_to_grayscale_parallel(rgb, width, height)
        } else {
            rgb_to_grayscale(rgb, width, height)
        };
        let binary = otsu_binarize(&gray, width, height);

        if self.try_rotations {
            decode_binary(&binary)
        } else {
            scan_rows(&binary).most_frequent()
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_blank_crop() {
        let white = vec![255u8; 10 * 10 * 3];
        assert_eq!(decode(&white, 10, 10), "");

        let black = vec![0u8; 10 * 10 * 3];
        assert_eq!(decode(&black, 10, 10), "");
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_decode_zero_width_panics() {
        let _ = decode(&[], 0, 10);
    }

    #[test]
    fn test_scanner_matches_free_function() {
        let (rgb, w, h) = encode::render_rgb("4006381333931", 2, 7, 12).unwrap();
        let scanner = Scanner::new();
        assert_eq!(scanner.decode(&rgb, w, h), decode(&rgb, w, h));
        assert_eq!(scanner.decode(&rgb, w, h), "4006381333931");
    }

    #[test]
    fn test_scanner_without_rotations_skips_rotated_crop() {
        let (rgb, w, h) = encode::render_rgb("4006381333931", 2, 7, 12).unwrap();
        let gray = utils::grayscale::rgb_to_grayscale(&rgb, w, h);
        let binary = utils::binarization::otsu_binarize(&gray, w, h);
        let rotated = scanner::rotate(&binary, Rotation::Deg90);

        // hand the rotated crop to both scanners via its raw rows
        let mut rgb_rot = Vec::new();
        for y in 0..rotated.height() {
            for &px in rotated.row(y) {
                rgb_rot.extend([px, px, px]);
            }
        }

        let full = Scanner::new();
        let flat = Scanner::without_rotations();
        assert_eq!(
            full.decode(&rgb_rot, rotated.width(), rotated.height()),
            "4006381333931"
        );
        assert_eq!(flat.decode(&rgb_rot, rotated.width(), rotated.height()), "");
    }
}
