// pifit-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pifit: Video conversion for small Raspberry Pi displays",
    long_about = "Batch-converts videos for fixed-resolution Pi-attached panels \
                  (800x480 class) using ffmpeg: black-bar removal, smart scaling \
                  into the panel's width band, subtitle burn-in, and rotation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts video files from an input directory to an output directory
    Convert(ConvertArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RotateDirArg {
    Clockwise,
    Counterclockwise,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Directory containing input video files
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where converted files will be saved
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Optional: Directory for log files (defaults to OUTPUT_DIR/logs)
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    // --- Geometry Overrides ---
    /// Optional: Override the strict output height
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Optional: Override the minimum acceptable output width
    #[arg(long, value_name = "PIXELS")]
    pub width_min: Option<u32>,

    /// Optional: Override the maximum acceptable output width
    #[arg(long, value_name = "PIXELS")]
    pub width_max: Option<u32>,

    /// Optional: Override the preferred output width
    #[arg(long, value_name = "PIXELS")]
    pub width_preferred: Option<u32>,

    // --- Rotation ---
    /// Do not rotate the output (for landscape-mounted panels)
    #[arg(long, default_value_t = false)]
    pub no_rotate: bool,

    /// Rotation direction for sideways-mounted panels
    #[arg(long, value_enum, default_value_t = RotateDirArg::Counterclockwise)]
    pub rotate_dir: RotateDirArg,

    // --- Encoding ---
    /// Optional: Override the libx264 CRF quality (lower is higher quality)
    #[arg(long, value_name = "CRF", value_parser = clap::value_parser!(u8).range(0..=51))]
    pub crf: Option<u8>,

    /// Optional: Override the libx264 preset
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<String>,

    /// Optional: CPU threads handed to ffmpeg (default: half the cores)
    #[arg(long, value_name = "COUNT")]
    pub threads: Option<u32>,

    // --- Features ---
    /// Disable automatic black-bar crop detection
    #[arg(long)]
    pub disable_autocrop: bool,

    /// Do not burn in matching .srt subtitle files
    #[arg(long, default_value_t = false)]
    pub no_subtitles: bool,
}
