//! # Glitch Engine
//!
//! Drives the two glitch passes over a pixel buffer:
//!
//! 1. **Band shifts**: `2 × intensity` draws of an offset in
//!    `[0, max_offset]`. Each non-zero draw shifts one random band of rows,
//!    with wraparound. A draw equal to the width restores its band from
//!    the source. See [`shift`].
//! 2. **Channel offset**: one random channel is moved by up to
//!    `2 × intensity` pixels on each axis, with wraparound. See [`channel`].
//!
//! ```text
//! source ──clone──▶ destination
//!    │                  ▲  ▲
//!    ├── band shift ────┘  │      (reads source, writes destination)
//!    └── channel offset ───┘
//! ```
//!
//! The source is never written, so every pass reads the original image.
//! All randomness comes from the caller's [`rand::Rng`], which makes a run
//! reproducible from a seed.
//!
//! ## Example
//!
//! ```
//! use glitchbox::buffer::PixelBuffer;
//! use glitchbox::glitch::{GlitchEngine, GlitchOptions, Intensity};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let samples: Vec<u8> = (0..48).collect();
//! let source = PixelBuffer::new(4, 4, 3, samples)?;
//!
//! let engine = GlitchEngine::new(GlitchOptions::new(Intensity::new(3)?));
//! let (glitched, report) = engine.run(&source, &mut StdRng::seed_from_u64(42))?;
//!
//! assert_eq!(glitched.width(), 4);
//! assert_eq!(report.passes(), 6);
//! # Ok::<(), glitchbox::GlitchError>(())
//! ```

pub mod channel;
pub mod intensity;
pub mod report;
pub mod shift;

pub use channel::{ChannelOffset, apply_channel_offset};
pub use intensity::Intensity;
pub use report::{GlitchReport, ShiftRecord};
pub use shift::{Band, Direction, shift_band, shift_left, shift_right};

use clap::ValueEnum;
use image::DynamicImage;
use log::{debug, info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::codec::{DecodedImage, Raster};
use crate::error::GlitchError;

/// Which directions band shifts may take.
///
/// Offsets are always drawn non-negative. `RightOnly` never shifts left;
/// `Mixed` flips a fair coin per shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DirectionPolicy {
    #[default]
    #[serde(rename = "right")]
    #[value(name = "right")]
    RightOnly,
    #[serde(rename = "mixed")]
    #[value(name = "mixed")]
    Mixed,
}

impl DirectionPolicy {
    fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> Direction {
        match self {
            DirectionPolicy::RightOnly => Direction::Right,
            DirectionPolicy::Mixed => {
                if rng.random_bool(0.5) {
                    Direction::Right
                } else {
                    Direction::Left
                }
            }
        }
    }
}

/// Per-call glitch configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlitchOptions {
    pub intensity: Intensity,
    #[serde(default)]
    pub directions: DirectionPolicy,
}

impl GlitchOptions {
    pub fn new(intensity: Intensity) -> Self {
        Self {
            intensity,
            directions: DirectionPolicy::default(),
        }
    }

    pub fn directions(mut self, directions: DirectionPolicy) -> Self {
        self.directions = directions;
        self
    }
}

/// Orchestrates band shifts and the channel offset for one set of options.
///
/// Holds no per-image state; one engine can run any number of buffers,
/// including from several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct GlitchEngine {
    options: GlitchOptions,
}

impl GlitchEngine {
    pub fn new(options: GlitchOptions) -> Self {
        Self { options }
    }

    /// Glitch `source`, returning a new buffer and the record of what was done.
    pub fn run<T: Copy, R: Rng + ?Sized>(
        &self,
        source: &PixelBuffer<T>,
        rng: &mut R,
    ) -> Result<(PixelBuffer<T>, GlitchReport), GlitchError> {
        let intensity = self.options.intensity;
        let width = source.width();
        let max_offset = intensity.max_offset(width);

        let mut destination = source.clone();
        let mut shifts = Vec::with_capacity(intensity.shift_passes());
        let mut skipped = 0;

        for pass in 0..intensity.shift_passes() {
            let offset = rng.random_range(0..=max_offset);
            if offset == 0 {
                trace!("pass {}: zero offset, skipped", pass);
                skipped += 1;
                continue;
            }

            let direction = self.options.directions.pick(rng);
            let band = if offset == width {
                // Full revolution: the band lands back on the source rows.
                let band = shift::select_band(source.height(), rng);
                shift::restore_band(band, &mut destination, source)?;
                debug!("pass {}: restored rows {}..{}", pass, band.start, band.end());
                band
            } else {
                let band = shift::shift(direction, offset, &mut destination, source, rng)?;
                debug!(
                    "pass {}: shift {} by {} on rows {}..{}",
                    pass,
                    direction,
                    offset,
                    band.start,
                    band.end()
                );
                band
            };
            shifts.push(ShiftRecord {
                direction,
                offset,
                band,
            });
        }

        let channel = rng.random_range(0..source.channels());
        let range = intensity.channel_offset_range();
        let offset_row = rng.random_range(-range..=range);
        let offset_col = rng.random_range(-range..=range);
        let channel_offset = ChannelOffset::new(channel, offset_row, offset_col);
        channel_offset.apply(&mut destination, source)?;
        debug!("channel {} offset by ({}, {})", channel, offset_row, offset_col);

        info!(
            "glitched {}x{}x{} at intensity {}: {} shifts, {} skipped",
            width,
            source.height(),
            source.channels(),
            intensity,
            shifts.len(),
            skipped
        );

        let report = GlitchReport {
            intensity,
            max_offset,
            shifts,
            skipped,
            channel_offset,
        };
        Ok((destination, report))
    }

    /// Glitch a decoded image, keeping its mode and sample depth.
    pub fn run_decoded<R: Rng + ?Sized>(
        &self,
        image: &DecodedImage,
        rng: &mut R,
    ) -> Result<(DecodedImage, GlitchReport), GlitchError> {
        let (raster, report) = match image.raster() {
            Raster::Eight(buf) => {
                let (out, report) = self.run(buf, rng)?;
                (Raster::Eight(out), report)
            }
            Raster::Sixteen(buf) => {
                let (out, report) = self.run(buf, rng)?;
                (Raster::Sixteen(out), report)
            }
        };
        Ok((DecodedImage::new(image.mode(), raster)?, report))
    }
}

/// Glitch a raw buffer at `intensity`.
///
/// Intensity is checked before anything else; out of `1..=10` fails with
/// [`GlitchError::InvalidIntensity`].
pub fn glitch<T: Copy, R: Rng + ?Sized>(
    source: &PixelBuffer<T>,
    intensity: i64,
    rng: &mut R,
) -> Result<PixelBuffer<T>, GlitchError> {
    let options = GlitchOptions::new(Intensity::new(intensity)?);
    let (glitched, _) = GlitchEngine::new(options).run(source, rng)?;
    Ok(glitched)
}

/// Glitch an in-memory image. The output has the same size and color type.
pub fn glitch_image<R: Rng + ?Sized>(
    image: &DynamicImage,
    options: GlitchOptions,
    rng: &mut R,
) -> Result<(DynamicImage, GlitchReport), GlitchError> {
    let decoded = DecodedImage::from_dynamic(image)?;
    let (glitched, report) = GlitchEngine::new(options).run_decoded(&decoded, rng)?;
    Ok((glitched.encode()?, report))
}

/// Decode the image at `path` and glitch it.
pub fn glitch_path<R: Rng + ?Sized>(
    path: impl AsRef<Path>,
    options: GlitchOptions,
    rng: &mut R,
) -> Result<(DynamicImage, GlitchReport), GlitchError> {
    let decoded = DecodedImage::decode(path)?;
    let (glitched, report) = GlitchEngine::new(options).run_decoded(&decoded, rng)?;
    Ok((glitched.encode()?, report))
}
