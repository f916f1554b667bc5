//! Synthetic EAN-13 rendering
//!
//! Renders a 13-digit string into run widths and raster crops. Used by the
//! test suite, the benchmarks and the CLI demo. The digits are rendered
//! exactly as given; no check digit is computed or verified, matching the
//! permissive decoder.

use crate::decoder::ean13::{FIRST_DIGIT_ENCODINGS, L_AND_G_PATTERNS, L_PATTERNS};

/// Encode 13 digits into the 59 alternating bar/space run widths of one
/// symbol, in modules, starting with the first guard bar.
///
/// Returns `None` unless `digits` is exactly 13 ASCII digits. The left six
/// digits use the L or mirrored G table as dictated by the first digit's
/// parity encoding; the right six use plain L widths.
pub fn encode_runs(digits: &str) -> Option<Vec<u16>> {
    let bytes = digits.as_bytes();
    if bytes.len() != 13 || !bytes.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let first = (bytes[0] - b'0') as usize;
    let parity = FIRST_DIGIT_ENCODINGS[first];

    let mut runs: Vec<u16> = Vec::with_capacity(59);
    runs.extend([1, 1, 1]); // start guard

    for (i, &b) in bytes[1..7].iter().enumerate() {
        let digit = (b - b'0') as usize;
        let use_g = (parity >> (5 - i)) & 1 == 1;
        let widths = if use_g {
            &L_AND_G_PATTERNS[10 + digit]
        } else {
            &L_AND_G_PATTERNS[digit]
        };
        runs.extend_from_slice(widths);
    }

    runs.extend([1, 1, 1, 1, 1]); // middle guard

    for &b in &bytes[7..13] {
        let digit = (b - b'0') as usize;
        runs.extend_from_slice(&L_PATTERNS[digit]);
    }

    runs.extend([1, 1, 1]); // end guard
    Some(runs)
}

/// Rasterize symbol runs into grayscale pixels (first run is a bar).
///
/// `module_px` scales module widths to pixels; bars are 0, spaces 255.
pub fn rasterize_symbol(runs_modules: &[u16], module_px: usize) -> Vec<u8> {
    let mut pixels = Vec::new();
    let mut is_bar = true;
    for &run in runs_modules {
        let value = if is_bar { 0u8 } else { 255u8 };
        pixels.extend(std::iter::repeat(value).take(run as usize * module_px));
        is_bar = !is_bar;
    }
    pixels
}

/// Render one grayscale pixel row: quiet zone, symbol, quiet zone.
pub fn render_row(digits: &str, module_px: usize, quiet_modules: usize) -> Option<Vec<u8>> {
    let runs = encode_runs(digits)?;
    let quiet_px = quiet_modules * module_px;

    let mut row = vec![255u8; quiet_px];
    row.extend(rasterize_symbol(&runs, module_px));
    row.extend(std::iter::repeat(255u8).take(quiet_px));
    Some(row)
}

/// Render a grayscale crop of `rows` identical barcode rows.
///
/// Returns (pixels, width, height).
pub fn render_gray(
    digits: &str,
    module_px: usize,
    quiet_modules: usize,
    rows: usize,
) -> Option<(Vec<u8>, usize, usize)> {
    let row = render_row(digits, module_px, quiet_modules)?;
    let width = row.len();
    let mut pixels = Vec::with_capacity(width * rows);
    for _ in 0..rows {
        pixels.extend_from_slice(&row);
    }
    Some((pixels, width, rows))
}

/// Render an RGB crop (3 bytes per pixel) of the barcode.
pub fn render_rgb(
    digits: &str,
    module_px: usize,
    quiet_modules: usize,
    rows: usize,
) -> Option<(Vec<u8>, usize, usize)> {
    let (gray, width, height) = render_gray(digits, module_px, quiet_modules, rows)?;
    let mut rgb = Vec::with_capacity(gray.len() * 3);
    for px in gray {
        rgb.extend([px, px, px]);
    }
    Some((rgb, width, height))
}
