//! # Error Types
//!
//! This module defines error types used throughout the glitchbox library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for glitchbox operations
#[derive(Debug, Error)]
pub enum GlitchError {
    /// Intensity outside the accepted 1..=10 range
    #[error("Invalid intensity {0}: must be in range 1 to 10, inclusive")]
    InvalidIntensity(i64),

    /// Source image path does not exist
    #[error("No image found at {}", .0.display())]
    MissingSource(PathBuf),

    /// Input could not be decoded, or uses a sample format we don't handle
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Directional shift called with an offset outside 1..width
    #[error("Invalid offset {offset}: must be in range 1 to {}", .width.saturating_sub(1))]
    InvalidOffset { offset: usize, width: usize },

    /// Channel index outside the pixel tuple
    #[error("Invalid channel {channel}: image has {channels} channels")]
    InvalidChannel { channel: usize, channels: usize },

    /// Sample count does not match the declared shape
    #[error("Shape error: expected {expected} samples, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// Destination and source buffers differ in width, height or channels
    #[error(
        "Shape mismatch: expected {}x{}x{}, got {}x{}x{}",
        .expected.0, .expected.1, .expected.2, .actual.0, .actual.1, .actual.2
    )]
    ShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    /// Image encoding / saving error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
