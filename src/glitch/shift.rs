//! # Band Shifts
//!
//! Displaces a horizontal band of rows left or right by whole pixels, wrapping
//! the pixels that fall off one edge back onto the other.
//!
//! ## Right Shift
//!
//! ```text
//! offset = 1, one row:
//!
//!   source       [ 0, 1, 2, 3 ]
//!   shifted      [ _, 0, 1, 2 ]   dest[offset..] = src[..width - offset]
//!   wrapped      [ 3, 0, 1, 2 ]   dest[..offset] = src[width - offset..]
//! ```
//!
//! ## Left Shift
//!
//! ```text
//!   source       [ 0, 1, 2, 3 ]
//!   shifted      [ 1, 2, 3, _ ]   dest[..width - offset] = src[offset..]
//!   wrapped      [ 1, 2, 3, 0 ]   dest[width - offset..] = src[..offset]
//! ```
//!
//! A draw of exactly `width` is a full revolution: the band is restored
//! from the source, which undoes any earlier shift on those rows. The
//! shifters themselves reject it; [`restore_band`] performs it.
//!
//! Reads come only from the frozen source and writes go only to the
//! destination, so every shift sees the original image regardless of what
//! earlier shifts wrote.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::buffer::PixelBuffer;
use crate::error::GlitchError;

/// Horizontal shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A contiguous strip of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// First row of the band
    pub start: usize,
    /// Number of rows (at least 1)
    pub height: usize,
}

impl Band {
    pub fn new(start: usize, height: usize) -> Self {
        Self { start, height }
    }

    /// One past the last row.
    pub fn end(&self) -> usize {
        self.start + self.height
    }

    /// Rows of the band that fall inside an image `image_height` rows tall.
    pub fn rows(&self, image_height: usize) -> Range<usize> {
        self.start.min(image_height)..self.end().min(image_height)
    }
}

/// Pick a random band for an image `height` rows tall.
///
/// `start` is uniform in `[0, height)` and the band height uniform in
/// `[1, max(1, height / 4)]`, clamped so the band never runs past the bottom.
pub fn select_band<R: Rng + ?Sized>(height: usize, rng: &mut R) -> Band {
    let start = rng.random_range(0..height);
    let max_band = (height / 4).max(1);
    let band_height = rng.random_range(1..=max_band).min(height - start);
    Band::new(start, band_height)
}

fn check_shift<T: Copy>(
    offset: usize,
    destination: &PixelBuffer<T>,
    source: &PixelBuffer<T>,
) -> Result<(), GlitchError> {
    source.check_same_shape(destination)?;
    let width = source.width();
    if offset == 0 || offset >= width {
        return Err(GlitchError::InvalidOffset { offset, width });
    }
    Ok(())
}

/// Shift an explicit band by `offset` pixels in `direction`.
///
/// Rows outside the band are left untouched. Rows of the band that fall
/// past the bottom of the image are ignored.
pub fn shift_band<T: Copy>(
    direction: Direction,
    offset: usize,
    band: Band,
    destination: &mut PixelBuffer<T>,
    source: &PixelBuffer<T>,
) -> Result<(), GlitchError> {
    check_shift(offset, destination, source)?;

    let stride = source.stride();
    let split = offset * source.channels();

    for r in band.rows(source.height()) {
        let src = source.row(r);
        let dst = destination.row_mut(r);
        match direction {
            Direction::Right => {
                dst[split..].copy_from_slice(&src[..stride - split]);
                dst[..split].copy_from_slice(&src[stride - split..]);
            }
            Direction::Left => {
                dst[..stride - split].copy_from_slice(&src[split..]);
                dst[stride - split..].copy_from_slice(&src[..split]);
            }
        }
    }

    Ok(())
}

/// Copy the rows of `band` from `source` back over `destination`.
pub fn restore_band<T: Copy>(
    band: Band,
    destination: &mut PixelBuffer<T>,
    source: &PixelBuffer<T>,
) -> Result<(), GlitchError> {
    source.check_same_shape(destination)?;
    for r in band.rows(source.height()) {
        destination.row_mut(r).copy_from_slice(source.row(r));
    }
    Ok(())
}

/// Shift a randomly selected band in `direction`.
///
/// The offset is validated before any randomness is consumed. Returns the
/// band that was shifted.
pub fn shift<T: Copy, R: Rng + ?Sized>(
    direction: Direction,
    offset: usize,
    destination: &mut PixelBuffer<T>,
    source: &PixelBuffer<T>,
    rng: &mut R,
) -> Result<Band, GlitchError> {
    check_shift(offset, destination, source)?;
    let band = select_band(source.height(), rng);
    shift_band(direction, offset, band, destination, source)?;
    Ok(band)
}

/// Shift a random band right, wrapping the rightmost `offset` pixels to the
/// left edge.
pub fn shift_right<T: Copy, R: Rng + ?Sized>(
    offset: usize,
    destination: &mut PixelBuffer<T>,
    source: &PixelBuffer<T>,
    rng: &mut R,
) -> Result<Band, GlitchError> {
    shift(Direction::Right, offset, destination, source, rng)
}

/// Shift a random band left, wrapping the leftmost `offset` pixels to the
/// right edge.
pub fn shift_left<T: Copy, R: Rng + ?Sized>(
    offset: usize,
    destination: &mut PixelBuffer<T>,
    source: &PixelBuffer<T>,
    rng: &mut R,
) -> Result<Band, GlitchError> {
    shift(Direction::Left, offset, destination, source, rng)
}
