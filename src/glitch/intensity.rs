//! # Intensity
//!
//! The single user-facing control. Intensity scales both how far bands move
//! and how many band shifts are attempted:
//!
//! ```text
//! max_offset     = floor(intensity² × width / 100)
//! shift passes   = 2 × intensity
//! channel offset ∈ [-2 × intensity, 2 × intensity]   (rows and columns)
//! ```
//!
//! | Intensity | max_offset (width 500) | Passes |
//! |-----------|------------------------|--------|
//! | 1         | 5                      | 2      |
//! | 5         | 125                    | 10     |
//! | 10        | 500                    | 20     |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GlitchError;

/// Validated glitch intensity in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Fails with [`GlitchError::InvalidIntensity`] outside `1..=10`.
    /// Out-of-range values are never clamped.
    pub fn new(value: i64) -> Result<Self, GlitchError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(GlitchError::InvalidIntensity(value))
        }
    }

    /// Largest band offset for an image `width` pixels wide.
    ///
    /// Integer arithmetic, so `floor(i² / 100 × width)` is exact.
    pub fn max_offset(self, width: usize) -> usize {
        let i = self.0 as usize;
        i * i * width / 100
    }

    /// Number of band shift draws.
    pub fn shift_passes(self) -> usize {
        2 * self.0 as usize
    }

    /// Inclusive bound for the channel offset on each axis.
    pub fn channel_offset_range(self) -> i64 {
        2 * self.0 as i64
    }
}

impl TryFrom<i64> for Intensity {
    type Error = GlitchError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert!(Intensity::new(1).is_ok());
        assert!(Intensity::new(10).is_ok());
        assert!(matches!(
            Intensity::new(0),
            Err(GlitchError::InvalidIntensity(0))
        ));
        assert!(matches!(
            Intensity::new(11),
            Err(GlitchError::InvalidIntensity(11))
        ));
        assert!(Intensity::new(-3).is_err());
    }

    #[test]
    fn test_max_offset() {
        let one = Intensity::new(1).unwrap();
        let five = Intensity::new(5).unwrap();
        let ten = Intensity::new(10).unwrap();
        assert_eq!(one.max_offset(500), 5);
        assert_eq!(five.max_offset(500), 125);
        assert_eq!(ten.max_offset(500), 500);
        // floor, not round
        assert_eq!(one.max_offset(99), 0);
        assert_eq!(Intensity::new(3).unwrap().max_offset(4), 0);
    }

    #[test]
    fn test_derived_counts() {
        let i = Intensity::new(4).unwrap();
        assert_eq!(i.shift_passes(), 8);
        assert_eq!(i.channel_offset_range(), 8);
    }

    #[test]
    fn test_serde() {
        let i: Intensity = serde_json::from_str("7").unwrap();
        assert_eq!(u8::from(i), 7);
        assert_eq!(serde_json::to_string(&i).unwrap(), "7");
        assert!(serde_json::from_str::<Intensity>("12").is_err());
    }
}
