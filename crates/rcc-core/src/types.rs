//! Core type definitions for the RCC data-loading layer.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of channels every image tensor carries (RGB).
pub const CHANNELS: usize = 3;

/// Image dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageDimensions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of channels (3 for RGB)
    pub channels: u32,
}

impl ImageDimensions {
    /// Creates new image dimensions
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Square RGB dimensions with the given side length
    pub fn square(side: u32) -> Self {
        Self::new(side, side, CHANNELS as u32)
    }

    /// Total number of values
    pub fn total_pixels(&self) -> u32 {
        self.width * self.height * self.channels
    }
}

/// A decoded RGB image as a CHW float tensor.
///
/// Values are stored channel-major: index `c * h * w + y * w + x`. Pixel
/// values are scaled to [0, 1] before any normalization is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl ImageTensor {
    /// Creates a tensor from CHW data, validating the buffer length.
    pub fn new(data: Vec<f32>, width: u32, height: u32) -> Result<Self> {
        let expected = CHANNELS * (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "Expected {} values for a {}x{} tensor, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a zero-filled tensor
    pub fn zeros(width: u32, height: u32) -> Self {
        Self {
            data: vec![0.0; CHANNELS * (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels (always 3)
    pub fn channels(&self) -> usize {
        CHANNELS
    }

    /// Whether width equals height
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Dimensions of this tensor
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height, CHANNELS as u32)
    }

    /// Value at channel `c`, column `x`, row `y`
    pub fn get(&self, c: usize, x: u32, y: u32) -> f32 {
        self.data[self.index(c, x, y)]
    }

    /// Sets the value at channel `c`, column `x`, row `y`
    pub fn set(&mut self, c: usize, x: u32, y: u32, value: f32) {
        let idx = self.index(c, x, y);
        self.data[idx] = value;
    }

    /// Raw CHW buffer
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the tensor, returning the raw CHW buffer
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    fn index(&self, c: usize, x: u32, y: u32) -> usize {
        let plane = (self.width as usize) * (self.height as usize);
        c * plane + (y as usize) * (self.width as usize) + (x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_dimensions() {
        let dims = ImageDimensions::square(224);
        assert_eq!(dims.width, 224);
        assert_eq!(dims.height, 224);
        assert_eq!(dims.channels, 3);
        assert_eq!(dims.total_pixels(), 224 * 224 * 3);
    }

    #[test]
    fn test_tensor_length_validation() {
        assert!(ImageTensor::new(vec![0.0; 3 * 4 * 2], 4, 2).is_ok());
        assert!(ImageTensor::new(vec![0.0; 7], 4, 2).is_err());
    }

    #[test]
    fn test_tensor_indexing() {
        let mut tensor = ImageTensor::zeros(4, 2);
        tensor.set(1, 3, 1, 0.5);

        assert_eq!(tensor.get(1, 3, 1), 0.5);
        assert_eq!(tensor.get(0, 3, 1), 0.0);
        // Channel plane 1 starts at 4*2, row 1 starts at 4.
        assert_eq!(tensor.data()[8 + 4 + 3], 0.5);
    }

    #[test]
    fn test_tensor_shape_accessors() {
        let tensor = ImageTensor::zeros(6, 4);
        assert_eq!(tensor.width(), 6);
        assert_eq!(tensor.height(), 4);
        assert_eq!(tensor.channels(), 3);
        assert!(!tensor.is_square());
        assert_eq!(tensor.dimensions().total_pixels(), 6 * 4 * 3);
    }
}
