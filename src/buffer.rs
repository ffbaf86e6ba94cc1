//! # Pixel Buffer
//!
//! A rectangular grid of fixed-width pixel tuples held in one contiguous,
//! row-major allocation.
//!
//! ## Two Views, One Allocation
//!
//! The same samples can be addressed two ways:
//!
//! ```text
//! Pixel-tuple view:   [row][col][channel]     pixel(row, col) -> &[T]
//! Flattened view:     [row][col * channels + channel]
//!                                             row(row) -> &[T]
//!
//! width = 3, channels = 3:
//!
//!   row 0:  [ 0  1  2 | 3  4  5 | 6  7  8 ]
//!             pixel 0   pixel 1   pixel 2
//!   row 1:  [ 9 10 11 |12 13 14 |15 16 17 ]
//! ```
//!
//! A row's stride is `width * channels` samples. Band shifts use the
//! tuple view (whole pixels move together); channel offsets use the flattened
//! view (one sample at a time).
//!
//! ## Example
//!
//! ```
//! use glitchbox::buffer::PixelBuffer;
//!
//! let samples: Vec<u8> = (0..12).collect();
//! let buf = PixelBuffer::new(2, 2, 3, samples.clone())?;
//!
//! assert_eq!(buf.pixel(1, 0), &[6, 7, 8]);
//! assert_eq!(buf.row(1), &[6, 7, 8, 9, 10, 11]);
//! assert_eq!(buf.into_samples(), samples);
//! # Ok::<(), glitchbox::GlitchError>(())
//! ```

use crate::error::GlitchError;

/// Rectangular grid of `width * height` pixel tuples, each `channels` wide.
///
/// Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<T> {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<T>,
}

impl<T: Copy> PixelBuffer<T> {
    /// Build a buffer from raw row-major samples.
    ///
    /// Fails with [`GlitchError::Shape`] when `samples.len()` is not
    /// `width * height * channels`, or when any dimension is zero.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<T>,
    ) -> Result<Self, GlitchError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(GlitchError::Shape {
                expected: usize::MAX,
                actual: samples.len(),
            })?;

        if expected == 0 || samples.len() != expected {
            return Err(GlitchError::Shape {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel tuple.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples per row (`width * channels`).
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * self.channels
    }

    /// `(width, height, channels)`
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.channels)
    }

    /// True when `other` has the same width, height and channel count.
    pub fn same_shape<U: Copy>(&self, other: &PixelBuffer<U>) -> bool {
        self.dims() == other.dims()
    }

    /// Like [`same_shape`](Self::same_shape), but fails with
    /// [`GlitchError::ShapeMismatch`] naming both sets of dimensions.
    pub fn check_same_shape<U: Copy>(&self, other: &PixelBuffer<U>) -> Result<(), GlitchError> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(GlitchError::ShapeMismatch {
                expected: self.dims(),
                actual: other.dims(),
            })
        }
    }

    /// One row in the flattened view.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let stride = self.stride();
        &self.samples[row * stride..(row + 1) * stride]
    }

    /// Mutable row in the flattened view.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let stride = self.stride();
        &mut self.samples[row * stride..(row + 1) * stride]
    }

    /// A single pixel tuple.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> &[T] {
        let start = row * self.stride() + col * self.channels;
        &self.samples[start..start + self.channels]
    }

    /// Iterate the pixel tuples of one row, left to right.
    pub fn pixels(&self, row: usize) -> impl Iterator<Item = &[T]> {
        self.row(row).chunks_exact(self.channels)
    }

    /// Sample at a flattened column (`col * channels + channel`).
    #[inline]
    pub fn sample(&self, row: usize, flat_col: usize) -> T {
        self.samples[row * self.stride() + flat_col]
    }

    /// Overwrite a sample at a flattened column.
    #[inline]
    pub fn set_sample(&mut self, row: usize, flat_col: usize, value: T) {
        let stride = self.stride();
        self.samples[row * stride + flat_col] = value;
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    /// Consume the buffer, returning its row-major samples for re-encoding.
    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize, channels: usize) -> PixelBuffer<u8> {
        let samples = (0..width * height * channels).map(|v| v as u8).collect();
        PixelBuffer::new(width, height, channels, samples).unwrap()
    }

    #[test]
    fn test_round_trip() {
        for &(w, h, c) in &[(1, 1, 1), (4, 4, 3), (7, 3, 4), (5, 2, 2)] {
            let samples: Vec<u8> = (0..w * h * c).map(|v| (v * 7) as u8).collect();
            let buf = PixelBuffer::new(w, h, c, samples.clone()).unwrap();
            assert_eq!(buf.into_samples(), samples, "round trip {}x{}x{}", w, h, c);
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let err = PixelBuffer::new(4, 4, 3, vec![0u8; 47]).unwrap_err();
        assert!(matches!(
            err,
            GlitchError::Shape {
                expected: 48,
                actual: 47
            }
        ));
    }

    #[test]
    fn test_same_count_different_shape() {
        let a = ramp(4, 3, 3);
        let b = ramp(3, 4, 3);
        assert_eq!(a.samples().len(), b.samples().len());
        assert!(!a.same_shape(&b));

        let err = a.check_same_shape(&b).unwrap_err();
        assert!(matches!(
            err,
            GlitchError::ShapeMismatch {
                expected: (4, 3, 3),
                actual: (3, 4, 3)
            }
        ));
        assert_eq!(err.to_string(), "Shape mismatch: expected 4x3x3, got 3x4x3");
        assert!(a.check_same_shape(&a.clone()).is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(PixelBuffer::<u8>::new(0, 4, 3, vec![]).is_err());
        assert!(PixelBuffer::<u8>::new(4, 0, 3, vec![]).is_err());
        assert!(PixelBuffer::<u8>::new(4, 4, 0, vec![]).is_err());
    }

    #[test]
    fn test_views_agree() {
        let buf = ramp(4, 3, 3);
        for row in 0..3 {
            for col in 0..4 {
                for ch in 0..3 {
                    assert_eq!(buf.pixel(row, col)[ch], buf.sample(row, col * 3 + ch));
                    assert_eq!(buf.pixel(row, col)[ch], buf.row(row)[col * 3 + ch]);
                }
            }
        }
    }

    #[test]
    fn test_pixels_iterator() {
        let buf = ramp(2, 2, 3);
        let tuples: Vec<&[u8]> = buf.pixels(1).collect();
        assert_eq!(tuples, vec![&[6u8, 7, 8][..], &[9, 10, 11][..]]);
    }

    #[test]
    fn test_set_sample() {
        let mut buf = ramp(2, 2, 2);
        buf.set_sample(1, 3, 99);
        assert_eq!(buf.pixel(1, 1), &[6, 99]);
        buf.row_mut(0).fill(0);
        assert_eq!(buf.row(0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_wide_samples() {
        let samples: Vec<u16> = vec![1000, 2000, 3000, 4000];
        let buf = PixelBuffer::new(2, 1, 2, samples).unwrap();
        assert_eq!(buf.pixel(0, 1), &[3000, 4000]);
        assert_eq!(buf.stride(), 4);
    }
}
