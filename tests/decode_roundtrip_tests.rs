//! Integration tests for EAN-13 decoding
//!
//! Round-trips synthetically rendered barcodes through the full pipeline and
//! pins down the decoder's contract: rotation invariance, quiet-zone
//! enforcement, noise tolerance and the (intentional) absence of check-digit
//! validation.

use barscan::encode::{encode_runs, rasterize_symbol, render_gray, render_rgb};
use barscan::scanner::{Rotation, rotate, scan_rows};
use barscan::{BinaryImage, decode, decode_binary, decode_from_gray};

const DIGITS: &str = "4006381333931";

/// Stack `rows` copies of a binarized pixel row into an image
fn image_of_rows(row: &[u8], rows: usize) -> BinaryImage {
    let mut data = Vec::with_capacity(row.len() * rows);
    for _ in 0..rows {
        data.extend_from_slice(row);
    }
    BinaryImage::from_raw(row.len(), rows, data)
}

#[test]
fn test_roundtrip_at_module_scales_1_to_4() {
    for digits in [DIGITS, "5901234123457"] {
        for scale in 1..=4 {
            let (gray, width, height) = render_gray(digits, scale, 7, 20).unwrap();
            assert_eq!(
                decode_from_gray(&gray, width, height),
                digits,
                "scale {scale}"
            );
        }
    }
}

#[test]
fn test_roundtrip_rgb_entry_point() {
    let (rgb, width, height) = render_rgb(DIGITS, 2, 7, 16).unwrap();
    assert_eq!(decode(&rgb, width, height), DIGITS);
}

#[test]
fn test_rotation_invariance() {
    let (gray, width, height) = render_gray(DIGITS, 2, 7, 30).unwrap();
    let upright = image_of_rows(&gray[..width], height);

    for rotation in [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
        let rotated = rotate(&upright, rotation);
        assert_eq!(decode_binary(&rotated), DIGITS, "{rotation:?}");
    }
}

#[test]
fn test_quiet_zone_boundary() {
    // A stray mark ahead of the quiet zone keeps the start guard off the row
    // boundary, so the quiet-zone width actually gets measured. At 20 px per
    // module, 5.9 modules (118 px) is below the 6*20-1 = 119 px minimum and
    // 6.0 modules (120 px) is above it.
    let module_px = 20usize;
    let runs = encode_runs(DIGITS).unwrap();

    let build = |quiet_px: usize| {
        let mut row = vec![0u8; module_px]; // stray mark
        row.extend(std::iter::repeat(255u8).take(quiet_px));
        row.extend(rasterize_symbol(&runs, module_px));
        row.extend(std::iter::repeat(255u8).take(10 * module_px));
        image_of_rows(&row, 10)
    };

    let narrow = build((5.9 * module_px as f64) as usize);
    assert_eq!(decode_binary(&narrow), "");

    let exact = build(6 * module_px);
    assert_eq!(decode_binary(&exact), DIGITS);
}

#[test]
fn test_noise_within_variance_budget_still_decodes() {
    // jitter every digit's internal run boundaries by one pixel (10% of the
    // module width) while keeping each digit's total width intact
    let module_px = 10u16;
    let mut runs_px: Vec<u16> = encode_runs(DIGITS)
        .unwrap()
        .iter()
        .map(|&r| r * module_px)
        .collect();

    let left_groups = (0..6).map(|d| 3 + 4 * d);
    let right_groups = (0..6).map(|d| 32 + 4 * d);
    for start in left_groups.chain(right_groups) {
        runs_px[start] += 1;
        runs_px[start + 1] -= 1;
        runs_px[start + 2] += 1;
        runs_px[start + 3] -= 1;
    }

    let mut row = vec![255u8; 7 * module_px as usize];
    row.extend(rasterize_symbol(&runs_px, 1));
    row.extend(std::iter::repeat(255u8).take(7 * module_px as usize));

    assert_eq!(decode_binary(&image_of_rows(&row, 10)), DIGITS);
}

#[test]
fn test_gross_corruption_never_yields_wrong_digits() {
    // blow one run of a left digit far past any tolerance: the decode must
    // either still be correct or reject the symbol, never a different string
    let module_px = 10u16;
    let mut runs_px: Vec<u16> = encode_runs(DIGITS)
        .unwrap()
        .iter()
        .map(|&r| r * module_px)
        .collect();
    runs_px[10] += 200;

    let mut row = vec![255u8; 7 * module_px as usize];
    row.extend(rasterize_symbol(&runs_px, 1));
    row.extend(std::iter::repeat(255u8).take(7 * module_px as usize));

    let result = decode_binary(&image_of_rows(&row, 10));
    assert!(
        result.is_empty() || result == DIGITS,
        "corrupted symbol produced {result:?}"
    );
}

#[test]
fn test_checksum_is_not_enforced() {
    // "1234567890123" has an invalid mod-10 check digit (it should end in 8);
    // the decoder reports it anyway
    let bogus = "1234567890123";
    let (gray, width, height) = render_gray(bogus, 2, 7, 16).unwrap();
    assert_eq!(decode_from_gray(&gray, width, height), bogus);
}

#[test]
fn test_blank_crops_decode_to_empty() {
    for value in [0u8, 255u8] {
        let gray = vec![value; 50 * 20];
        assert_eq!(decode_from_gray(&gray, 50, 20), "");
    }
}

#[test]
fn test_two_barcodes_in_one_row_both_found() {
    let module_px = 3usize;
    let first = encode_runs(DIGITS).unwrap();
    let second = encode_runs("9002490100070").unwrap();

    let mut row = vec![255u8; 10 * module_px];
    row.extend(rasterize_symbol(&first, module_px));
    row.extend(std::iter::repeat(255u8).take(10 * module_px));
    row.extend(rasterize_symbol(&second, module_px));
    row.extend(std::iter::repeat(255u8).take(10 * module_px));

    let tally = scan_rows(&image_of_rows(&row, 8));
    assert!(tally.contains(DIGITS));
    assert!(tally.contains("9002490100070"));
    assert_eq!(tally.len(), 2);
}

#[test]
#[should_panic(expected = "non-zero")]
fn test_zero_height_is_a_precondition_violation() {
    let _ = decode_from_gray(&[], 10, 0);
}
