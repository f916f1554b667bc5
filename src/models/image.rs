/// Binarized single-channel image, row-major top-to-bottom.
///
/// Every pixel is either 0 (bar/black) or 255 (background/white). The buffer
/// is immutable once built; rotated copies are independent images.
#[derive(Debug, Clone)]
pub struct BinaryImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryImage {
    /// Wrap a raw binarized buffer.
    ///
    /// # Panics
    /// Panics if either dimension is zero or the buffer length does not
    /// match `width * height`. A malformed buffer is a programming error,
    /// not a decode failure.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert!(width > 0 && height > 0, "image dimensions must be non-zero");
        assert_eq!(data.len(), width * height, "buffer length mismatch");
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// One full pixel row
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Pixel value at (x, y); 0 = bar, 255 = background
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}
