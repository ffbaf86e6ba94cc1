//! # Glitchbox - Glitch Art for Still Images
//!
//! Glitchbox displaces horizontal bands of pixels by random offsets (with
//! wraparound) and then mis-registers one color channel against the others,
//! producing a datamosh-style artifact. It provides:
//!
//! - **Pixel buffers**: one contiguous allocation with pixel-tuple and
//!   flattened views
//! - **Band shifts**: left/right displacement of row bands with wraparound
//! - **Channel offsets**: toroidal displacement of a single color channel
//! - **Engine**: intensity-driven orchestration with injectable randomness
//! - **Codec**: 8- and 16-bit L/LA/RGB/RGBA images via the `image` crate
//!
//! ## Quick Start
//!
//! ```no_run
//! use glitchbox::glitch::{self, GlitchOptions, Intensity};
//!
//! let options = GlitchOptions::new(Intensity::new(4)?);
//! let (image, report) = glitch::glitch_path("photo.png", options, &mut rand::rng())?;
//!
//! image
//!     .save("photo_glitched.png")
//!     .map_err(|e| glitchbox::GlitchError::Image(e.to_string()))?;
//! println!("{} band shifts", report.shifts.len());
//!
//! # Ok::<(), glitchbox::error::GlitchError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`buffer`] | Pixel buffer and its two views |
//! | [`glitch`] | Band shifts, channel offset, engine |
//! | [`codec`] | Image decode/encode |
//! | [`batch`] | Parallel independent frames |
//! | [`error`] | Error types |

pub mod batch;
pub mod buffer;
pub mod codec;
pub mod error;
pub mod glitch;

// Re-exports for convenience
pub use buffer::PixelBuffer;
pub use codec::DecodedImage;
pub use error::GlitchError;
pub use glitch::{GlitchEngine, GlitchOptions, Intensity};
