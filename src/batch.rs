//! # Frame Batches
//!
//! Renders many independently glitched frames of one source in parallel.
//! Frames never share state, so each gets its own rng and runs on whichever
//! rayon worker picks it up.
//!
//! With a base seed, frame `i` is seeded with `seed + i` (wrapping), so a
//! seeded batch is reproducible regardless of scheduling and frame `i` equals
//! a single run seeded with `seed + i`.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::codec::DecodedImage;
use crate::error::GlitchError;
use crate::glitch::{GlitchEngine, GlitchOptions, GlitchReport};

fn frame_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_os_rng(),
    }
}

/// Glitch `count` copies of `source`. Results are in frame order.
pub fn glitch_frames<T: Copy + Send + Sync>(
    source: &PixelBuffer<T>,
    options: GlitchOptions,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<(PixelBuffer<T>, GlitchReport)>, GlitchError> {
    let engine = GlitchEngine::new(options);
    (0..count)
        .into_par_iter()
        .map(|i| engine.run(source, &mut frame_rng(seed, i)))
        .collect()
}

/// [`glitch_frames`] over a decoded image, keeping its mode.
pub fn glitch_decoded_frames(
    source: &DecodedImage,
    options: GlitchOptions,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<(DecodedImage, GlitchReport)>, GlitchError> {
    let engine = GlitchEngine::new(options);
    (0..count)
        .into_par_iter()
        .map(|i| engine.run_decoded(source, &mut frame_rng(seed, i)))
        .collect()
}
