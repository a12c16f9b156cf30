//! Core video processing logic and orchestration.
//!
//! Organizes the conversion pipeline steps into submodules and exposes the
//! primary entry point for batch processing.

/// Black bar detection and crop parameter generation
pub mod crop_detection;

/// Target geometry selection for the output panel
pub mod geometry;

/// Subtitle discovery and burn-in filter construction
pub mod subtitles;

/// Main batch conversion orchestration logic
pub mod video;

pub use crop_detection::{detect_crop, CropRect};
pub use geometry::{select_geometry, ScalePlan, TargetGeometry};
pub use subtitles::{build_subtitle_filter, find_subtitle_file};
pub use video::process_videos;
