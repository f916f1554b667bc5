//! RGB to grayscale conversion
//!
//! Y = 0.299*R + 0.587*G + 0.114*B, computed with fast integer arithmetic:
//! Y = (76*R + 150*G + 29*B) >> 8. Large crops go through the rayon-parallel
//! row variant.

use rayon::prelude::*;

const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8).min(255) as u8
}

/// Convert a packed RGB buffer (3 bytes per pixel) to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];
    for (i, out) in gray.iter_mut().enumerate() {
        let idx = i * 3;
        *out = luminance(rgb[idx], rgb[idx + 1], rgb[idx + 2]);
    }
    gray
}

/// Convert RGB to grayscale processing rows in parallel
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 3;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * 3;
            *out = luminance(rgb[idx], rgb[idx + 1], rgb[idx + 2]);
        }
    });
    gray
}
