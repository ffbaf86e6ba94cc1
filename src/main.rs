//! # Glitchbox CLI
//!
//! Command-line interface for glitching still images.
//!
//! ## Usage
//!
//! ```bash
//! # Glitch an image at intensity 4 (writes photo_glitched.png)
//! glitchbox glitch photo.jpg 4
//!
//! # Reproducible output, both shift directions, JSON report
//! glitchbox glitch photo.jpg 7 --seed 42 --directions mixed --report run.json
//!
//! # Render 24 independent frames into photo_frames/
//! glitchbox frames photo.jpg 3 --count 24
//!
//! # Show every band shift
//! RUST_LOG=debug glitchbox glitch photo.jpg 2
//! ```

use clap::{Parser, Subcommand};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};

use glitchbox::{
    DecodedImage, GlitchEngine, GlitchError, GlitchOptions, Intensity, batch,
    glitch::DirectionPolicy,
};

/// Glitchbox - band-shift and channel-offset glitch art
#[derive(Parser, Debug)]
#[command(name = "glitchbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every band shift (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Glitch a single image
    Glitch {
        /// Source image
        input: PathBuf,

        /// Glitch intensity, 1 to 10
        #[arg(allow_negative_numbers = true)]
        intensity: i64,

        /// Output file (defaults to <input stem>_glitched.png beside the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Shift directions: "right" or "mixed"
        #[arg(long, default_value = "right")]
        directions: DirectionPolicy,

        /// Write a JSON report of the random draws
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Render several independently glitched frames of one image
    Frames {
        /// Source image
        input: PathBuf,

        /// Glitch intensity, 1 to 10
        #[arg(allow_negative_numbers = true)]
        intensity: i64,

        /// Number of frames
        #[arg(long, default_value = "10")]
        count: usize,

        /// Output directory (defaults to <input stem>_frames beside the input)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Base seed; frame i uses seed + i
        #[arg(long)]
        seed: Option<u64>,

        /// Shift directions: "right" or "mixed"
        #[arg(long, default_value = "right")]
        directions: DirectionPolicy,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr as `[LEVEL file:line] message`. `RUST_LOG` overrides the
/// default level.
fn init_logger(verbose: bool) {
    use std::io::Write;

    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {}:{}] {}",
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn run(command: Commands) -> Result<(), GlitchError> {
    match command {
        Commands::Glitch {
            input,
            intensity,
            output,
            seed,
            directions,
            report,
        } => {
            // Intensity first: no decoding work for a bad request
            let options = GlitchOptions::new(Intensity::new(intensity)?).directions(directions);
            let source = DecodedImage::decode(&input)?;

            println!(
                "Glitching {} ({}x{} {}) at intensity {}...",
                input.display(),
                source.width(),
                source.height(),
                source.mode(),
                options.intensity
            );

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let (glitched, glitch_report) =
                GlitchEngine::new(options).run_decoded(&source, &mut rng)?;

            let output = output.unwrap_or_else(|| sibling(&input, "glitched.png"));
            glitched.save(&output)?;
            println!("Saved to {}", output.display());

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&glitch_report)
                    .map_err(|e| GlitchError::Io(e.into()))?;
                fs::write(&report_path, json)?;
                info!("report written to {}", report_path.display());
            }
        }

        Commands::Frames {
            input,
            intensity,
            count,
            out_dir,
            seed,
            directions,
        } => {
            let options = GlitchOptions::new(Intensity::new(intensity)?).directions(directions);
            let source = DecodedImage::decode(&input)?;

            let out_dir = out_dir.unwrap_or_else(|| sibling(&input, "frames"));
            fs::create_dir_all(&out_dir)?;

            println!(
                "Rendering {} frames of {} at intensity {}...",
                count,
                input.display(),
                options.intensity
            );

            let frames = batch::glitch_decoded_frames(&source, options, count, seed)?;
            for (i, (frame, _)) in frames.into_iter().enumerate() {
                frame.save(out_dir.join(format!("frame_{:03}.png", i)))?;
            }
            println!("Saved {} frames to {}", count, out_dir.display());
        }
    }

    Ok(())
}

/// `dir/photo.jpg` + `suffix` -> `dir/photo_suffix`
fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}_{}", stem, suffix))
}
