//! # Channel Offset
//!
//! Copies one color channel from source to destination displaced by a whole
//! number of pixels, producing color fringing against the other channels.
//!
//! ## Addressing
//!
//! Works on the flattened view. For channel `c` of pixel `(row, col)`:
//!
//! ```text
//! source index  (row, col * channels + c)
//! dest index    ((row + offset_row) mod height,
//!                ((col + offset_col) mod width) * channels + c)
//! ```
//!
//! Both axes wrap (toroidal addressing). The modulo is Euclidean, so
//! `offset_col = -1` lands in the same place as `offset_col = width - 1`.
//!
//! ## Example
//!
//! ```text
//! RGB, 3 pixels wide, red (c = 0) moved right by one pixel:
//!
//!   source   [ R0 G0 B0 | R1 G1 B1 | R2 G2 B2 ]
//!   dest     [ R2 G0 B0 | R0 G1 B1 | R1 G2 B2 ]
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::GlitchError;

/// One channel displacement: which channel, and how far on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOffset {
    pub channel: usize,
    pub row: i64,
    pub col: i64,
}

impl ChannelOffset {
    pub fn new(channel: usize, row: i64, col: i64) -> Self {
        Self { channel, row, col }
    }

    /// See [`apply_channel_offset`].
    pub fn apply<T: Copy>(
        &self,
        destination: &mut PixelBuffer<T>,
        source: &PixelBuffer<T>,
    ) -> Result<(), GlitchError> {
        apply_channel_offset(self.row, self.col, self.channel, destination, source)
    }
}

/// Reduce a signed offset onto `[0, len)`.
#[inline]
fn wrap(offset: i64, len: usize) -> usize {
    offset.rem_euclid(len as i64) as usize
}

/// Copy `channel` from `source` into `destination`, displaced by
/// `(offset_row, offset_col)` pixels with wraparound on both axes.
///
/// Only samples of `channel` are written; the other channels of
/// `destination` keep whatever they already held.
pub fn apply_channel_offset<T: Copy>(
    offset_row: i64,
    offset_col: i64,
    channel: usize,
    destination: &mut PixelBuffer<T>,
    source: &PixelBuffer<T>,
) -> Result<(), GlitchError> {
    source.check_same_shape(destination)?;
    let channels = source.channels();
    if channel >= channels {
        return Err(GlitchError::InvalidChannel { channel, channels });
    }

    let width = source.width();
    let height = source.height();
    let dr = wrap(offset_row, height);
    let dc = wrap(offset_col, width);

    for row in 0..height {
        let src = source.row(row);
        let dst = destination.row_mut((row + dr) % height);
        for col in 0..width {
            let to = ((col + dc) % width) * channels + channel;
            dst[to] = src[col * channels + channel];
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize, channels: usize) -> PixelBuffer<u8> {
        let samples = (0..width * height * channels).map(|v| v as u8).collect();
        PixelBuffer::new(width, height, channels, samples).unwrap()
    }

    /// Every sample of `channel`, row-major.
    fn plane(buf: &PixelBuffer<u8>, channel: usize) -> Vec<u8> {
        (0..buf.height())
            .flat_map(|r| buf.pixels(r).map(move |p| p[channel]).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn test_identity_offset() {
        let src = grid(4, 3, 3);
        for channel in 0..3 {
            let mut dst = src.clone();
            apply_channel_offset(0, 0, channel, &mut dst, &src).unwrap();
            assert_eq!(dst, src, "channel {}", channel);
        }
    }

    #[test]
    fn test_full_cycle_wrap() {
        let src = grid(5, 4, 3);
        let mut base = src.clone();
        // Scramble the destination first so the comparison is meaningful.
        base.row_mut(0).fill(200);

        let mut zero = base.clone();
        apply_channel_offset(0, 0, 1, &mut zero, &src).unwrap();

        for (dr, dc) in [(4, 0), (0, 5), (4, 5), (-4, -5), (8, 10)] {
            let mut dst = base.clone();
            apply_channel_offset(dr, dc, 1, &mut dst, &src).unwrap();
            assert_eq!(dst, zero, "offset ({}, {})", dr, dc);
        }
    }

    #[test]
    fn test_negative_matches_positive() {
        let src = grid(6, 5, 4);
        let mut neg = src.clone();
        let mut pos = src.clone();
        apply_channel_offset(-2, -1, 2, &mut neg, &src).unwrap();
        apply_channel_offset(3, 5, 2, &mut pos, &src).unwrap();
        assert_eq!(neg, pos);
    }

    #[test]
    fn test_moves_one_pixel_right() {
        let src = grid(3, 1, 3);
        let mut dst = src.clone();
        apply_channel_offset(0, 1, 0, &mut dst, &src).unwrap();
        assert_eq!(dst.row(0), &[6, 1, 2, 0, 4, 5, 3, 7, 8]);
    }

    #[test]
    fn test_moves_rows_down() {
        let src = grid(2, 3, 1);
        let mut dst = src.clone();
        apply_channel_offset(1, 0, 0, &mut dst, &src).unwrap();
        assert_eq!(dst.samples(), &[4, 5, 0, 1, 2, 3]);
    }

    #[test]
    fn test_other_channels_untouched() {
        let src = grid(4, 4, 3);
        let mut dst = src.clone();
        apply_channel_offset(1, -2, 1, &mut dst, &src).unwrap();
        assert_eq!(plane(&dst, 0), plane(&src, 0));
        assert_eq!(plane(&dst, 2), plane(&src, 2));
        assert_ne!(plane(&dst, 1), plane(&src, 1));

        let mut sorted_src = plane(&src, 1);
        let mut sorted_dst = plane(&dst, 1);
        sorted_src.sort();
        sorted_dst.sort();
        assert_eq!(sorted_dst, sorted_src, "offset should permute the plane");
    }

    #[test]
    fn test_invalid_channel() {
        let src = grid(2, 2, 3);
        let mut dst = src.clone();
        assert!(matches!(
            apply_channel_offset(0, 0, 3, &mut dst, &src),
            Err(GlitchError::InvalidChannel {
                channel: 3,
                channels: 3
            })
        ));
    }

    #[test]
    fn test_struct_apply() {
        let src = grid(3, 1, 3);
        let mut a = src.clone();
        let mut b = src.clone();
        ChannelOffset::new(2, 0, -1).apply(&mut a, &src).unwrap();
        apply_channel_offset(0, 2, 2, &mut b, &src).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shape_mismatch_names_dimensions() {
        let src = grid(4, 3, 3);
        let mut dst = grid(3, 4, 3);
        let err = apply_channel_offset(1, 1, 0, &mut dst, &src).unwrap_err();
        assert!(matches!(
            err,
            GlitchError::ShapeMismatch {
                expected: (4, 3, 3),
                actual: (3, 4, 3)
            }
        ));
        assert_eq!(dst, grid(3, 4, 3));
    }
}
