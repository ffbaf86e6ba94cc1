//! # Glitch Report
//!
//! A record of the random draws behind one glitch run. Two runs with equal
//! reports produce identical output from the same source.

use serde::{Deserialize, Serialize};

use super::channel::ChannelOffset;
use super::intensity::Intensity;
use super::shift::{self, Band, Direction};
use crate::buffer::PixelBuffer;
use crate::error::GlitchError;

/// One applied band shift.
///
/// An `offset` equal to the image width is a full revolution and restores
/// the band from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    pub direction: Direction,
    pub offset: usize,
    pub band: Band,
}

impl ShiftRecord {
    /// Replay this shift onto `destination`.
    pub fn apply<T: Copy>(
        &self,
        destination: &mut PixelBuffer<T>,
        source: &PixelBuffer<T>,
    ) -> Result<(), GlitchError> {
        if self.offset == source.width() {
            shift::restore_band(self.band, destination, source)
        } else {
            shift::shift_band(self.direction, self.offset, self.band, destination, source)
        }
    }
}

/// Summary of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlitchReport {
    pub intensity: Intensity,
    pub max_offset: usize,
    /// Shifts in the order they were applied
    pub shifts: Vec<ShiftRecord>,
    /// Draws that landed on a zero offset and were skipped
    pub skipped: usize,
    pub channel_offset: ChannelOffset,
}

impl GlitchReport {
    /// Total band-shift draws, applied or skipped.
    pub fn passes(&self) -> usize {
        self.shifts.len() + self.skipped
    }

    /// Shifts that restored their band because the draw equalled `width`.
    pub fn restores(&self, width: usize) -> usize {
        self.shifts.iter().filter(|s| s.offset == width).count()
    }

    /// Number of applied shifts in `direction`.
    pub fn count(&self, direction: Direction) -> usize {
        self.shifts
            .iter()
            .filter(|s| s.direction == direction)
            .count()
    }
}
