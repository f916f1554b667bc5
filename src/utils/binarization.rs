//! Grayscale binarization using Otsu's global threshold

use crate::models::BinaryImage;

/// Binarize a grayscale buffer with Otsu's method.
///
/// Pixels below the threshold become 0 (bar), everything else 255
/// (background).
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BinaryImage {
    let threshold = otsu_threshold(gray);
    let data = gray
        .iter()
        .map(|&px| if px < threshold { 0 } else { 255 })
        .collect();
    BinaryImage::from_raw(width, height, data)
}

/// Otsu's optimal global threshold: maximizes between-class variance over
/// the intensity histogram.
fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u32; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as f64;
    let mut max_variance = 0.0;
    let mut optimal = 128u8;

    for threshold in 0..=255u32 {
        let mut dark_pixels = 0u64;
        let mut dark_sum = 0u64;
        let mut light_pixels = 0u64;
        let mut light_sum = 0u64;

        for intensity in 0..=255u32 {
            let count = histogram[intensity as usize] as u64;
            if intensity < threshold {
                dark_pixels += count;
                dark_sum += count * intensity as u64;
            } else {
                light_pixels += count;
                light_sum += count * intensity as u64;
            }
        }

        if dark_pixels == 0 || light_pixels == 0 {
            continue;
        }

        let dark_mean = dark_sum as f64 / dark_pixels as f64;
        let light_mean = light_sum as f64 / light_pixels as f64;
        let dark_weight = dark_pixels as f64 / total_pixels;
        let light_weight = light_pixels as f64 / total_pixels;

        let variance = dark_weight * light_weight * (dark_mean - light_mean).powi(2);
        if variance > max_variance {
            max_variance = variance;
            optimal = threshold as u8;
        }
    }

    optimal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otsu_separates_two_classes() {
        let mut gray = vec![50u8; 50];
        gray.extend(vec![200u8; 50]);

        let binary = otsu_binarize(&gray, 10, 10);
        assert_eq!(binary.get(0, 0), 0); // dark half
        assert_eq!(binary.get(0, 7), 255); // light half
    }

    #[test]
    fn test_otsu_uniform_images() {
        let binary = otsu_binarize(&vec![255u8; 16], 4, 4);
        assert!((0..4).all(|x| binary.get(x, 0) == 255));

        let binary = otsu_binarize(&vec![0u8; 16], 4, 4);
        assert!((0..4).all(|x| binary.get(x, 0) == 0));
    }

    #[test]
    fn test_otsu_preserves_prebinarized_input() {
        let gray = vec![0u8, 255, 255, 0];
        let binary = otsu_binarize(&gray, 2, 2);
        assert_eq!(binary.get(0, 0), 0);
        assert_eq!(binary.get(1, 0), 255);
        assert_eq!(binary.get(0, 1), 255);
        assert_eq!(binary.get(1, 1), 0);
    }
}
