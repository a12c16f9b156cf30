//! Core library for converting videos for small fixed-resolution displays
//! using ffmpeg and ffprobe.
//!
//! This crate provides video file discovery, property probing, black-bar crop
//! detection, target geometry selection for an 800x480-class panel, subtitle
//! burn-in, and batch encode orchestration.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use pifit_core::{CoreConfig, process_videos, find_processable_files};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/path/to/input"),
//!     PathBuf::from("/path/to/output"),
//!     PathBuf::from("/path/to/logs"),
//! );
//! config.validate().unwrap();
//!
//! let files = find_processable_files(&config.input_dir).unwrap();
//! let results = process_videos(&config, &files).unwrap();
//! println!("encoded {} files", results.len());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod progress;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder, RotateDirection};
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use external::{get_video_properties, VideoProperties};
pub use processing::crop_detection::{detect_crop, CropRect};
pub use processing::geometry::{select_geometry, ScalePlan, TargetGeometry};
pub use processing::process_videos;
pub use utils::{calculate_size_reduction, format_bytes, format_duration, parse_ffmpeg_time};

use std::time::Duration;

/// Result of a single encode, returned by `process_videos` for each
/// successfully converted file.
#[derive(Debug, Clone)]
pub struct EncodeResult {
    pub filename: String,
    pub duration: Duration,
    pub input_size: u64,
    pub output_size: u64,
}
