//! Right-angle rotation of binarized crops
//!
//! A barcode crop that fails to scan horizontally is retried at 90, 180 and
//! 270 degrees. Rotation is a nearest-neighbor remap about the image center;
//! for right angles that reduces to an exact index mapping, so no pixel is
//! resampled and nothing maps outside the source.

use crate::models::BinaryImage;

/// Rotation angle applied to a crop before scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// 90 degrees clockwise
    Deg90,
    /// 180 degrees
    Deg180,
    /// 270 degrees clockwise
    Deg270,
}

/// Rotation retry order after the unrotated scan fails
pub const ROTATION_ORDER: [Rotation; 3] = [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270];

/// Produce a rotated copy of a binarized crop.
///
/// 90/270 degree results have swapped dimensions. The source is untouched;
/// the rotated buffer is independently owned.
pub fn rotate(image: &BinaryImage, rotation: Rotation) -> BinaryImage {
    let (w, h) = (image.width(), image.height());
    match rotation {
        Rotation::Deg90 => {
            let mut data = vec![255u8; w * h];
            for y in 0..h {
                for x in 0..w {
                    // (x, y) -> (h - 1 - y, x)
                    data[x * h + (h - 1 - y)] = image.get(x, y);
                }
            }
            BinaryImage::from_raw(h, w, data)
        }
        Rotation::Deg180 => {
            let mut data = vec![255u8; w * h];
            for y in 0..h {
                for x in 0..w {
                    data[(h - 1 - y) * w + (w - 1 - x)] = image.get(x, y);
                }
            }
            BinaryImage::from_raw(w, h, data)
        }
        Rotation::Deg270 => {
            let mut data = vec![255u8; w * h];
            for y in 0..h {
                for x in 0..w {
                    // (x, y) -> (y, w - 1 - x)
                    data[(w - 1 - x) * h + y] = image.get(x, y);
                }
            }
            BinaryImage::from_raw(h, w, data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_2x3() -> BinaryImage {
        // row-major 2 wide, 3 tall:
        //   a b
        //   c d
        //   e f
        BinaryImage::from_raw(2, 3, vec![1, 2, 3, 4, 5, 6])
    }

    #[test]
    fn test_rotate_90() {
        let rot = rotate(&image_2x3(), Rotation::Deg90);
        assert_eq!(rot.width(), 3);
        assert_eq!(rot.height(), 2);
        //   e c a
        //   f d b
        assert_eq!(rot.row(0), &[5, 3, 1]);
        assert_eq!(rot.row(1), &[6, 4, 2]);
    }

    #[test]
    fn test_rotate_180() {
        let rot = rotate(&image_2x3(), Rotation::Deg180);
        assert_eq!(rot.width(), 2);
        assert_eq!(rot.height(), 3);
        assert_eq!(rot.row(0), &[6, 5]);
        assert_eq!(rot.row(2), &[2, 1]);
    }

    #[test]
    fn test_rotate_270() {
        let rot = rotate(&image_2x3(), Rotation::Deg270);
        assert_eq!(rot.width(), 3);
        assert_eq!(rot.height(), 2);
        //   b d f
        //   a c e
        assert_eq!(rot.row(0), &[2, 4, 6]);
        assert_eq!(rot.row(1), &[1, 3, 5]);
    }

    #[test]
    fn test_rotations_compose_to_identity() {
        let img = image_2x3();
        let back = rotate(&rotate(&img, Rotation::Deg90), Rotation::Deg270);
        for y in 0..3 {
            assert_eq!(back.row(y), img.row(y));
        }
    }
}
