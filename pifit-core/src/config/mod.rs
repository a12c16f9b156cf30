//! Configuration structures and constants for the pifit-core library.
//!
//! The configuration is an immutable value built once per batch run and
//! threaded through the heuristics and the batch driver; nothing reads
//! ambient mutable state.

mod builder;

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

// Default constants

/// Strict output height for the target panel.
pub const DEFAULT_TARGET_HEIGHT: u32 = 480;

/// Minimum acceptable output width.
pub const DEFAULT_WIDTH_MIN: u32 = 770;

/// Maximum acceptable output width (full panel width).
pub const DEFAULT_WIDTH_MAX: u32 = 800;

/// Preferred output width (accounts for the panel bezel covering the edges).
pub const DEFAULT_WIDTH_PREFERRED: u32 = 780;

/// Snap distance: natural widths within this many pixels of the preferred
/// width are snapped to it.
pub const DEFAULT_WIDTH_PREFERENCE_STRENGTH: u32 = 5;

/// Maximum allowed horizontal stretch factor.
pub const DEFAULT_MAX_STRETCH: f64 = 1.15;

/// Minimum allowed horizontal squeeze factor.
pub const DEFAULT_MIN_SQUEEZE: f64 = 0.85;

/// Distortion is only applied directly when the needed factor stays under
/// this bound; beyond it the scale-and-center-crop path is used instead.
pub const DEFAULT_PREFERRED_MAX_DISTORTION: f64 = 1.10;

/// Default CRF quality value for libx264.
pub const DEFAULT_CRF: u8 = 23;

/// Default libx264 encoder preset.
pub const DEFAULT_PRESET: &str = "veryslow";

/// Default audio bitrate in kbit/s.
pub const DEFAULT_AUDIO_BITRATE_KBPS: u32 = 256;

/// Subtitle defaults, sized for a 4-inch screen.
pub const DEFAULT_SUBTITLE_FONT_NAME: &str = "Arial";
pub const DEFAULT_SUBTITLE_FONT_SIZE: u32 = 18;
pub const DEFAULT_SUBTITLE_OUTLINE: u32 = 2;
pub const DEFAULT_SUBTITLE_MARGIN_V: u32 = 15;

/// Default crop mode for the main encode.
pub const DEFAULT_CROP_MODE: &str = "auto";

/// Rotation direction for displays mounted sideways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Clockwise,
    Counterclockwise,
}

impl RotateDirection {
    /// The ffmpeg transpose filter for this direction.
    #[must_use]
    pub fn transpose_filter(self) -> &'static str {
        match self {
            RotateDirection::Clockwise => "transpose=1",
            RotateDirection::Counterclockwise => "transpose=2",
        }
    }
}

/// Main configuration for a batch conversion run.
///
/// Typically created by the CLI via [`CoreConfigBuilder`] and passed to
/// `process_videos`. All fields besides the directories have defaults
/// matching the 800x480 panel the tool was written for.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing input video files to process
    pub input_dir: PathBuf,

    /// Directory where converted output files will be saved
    pub output_dir: PathBuf,

    /// Directory for log files
    pub log_dir: PathBuf,

    /// Strict output height in pixels
    pub target_height: u32,

    /// Minimum acceptable output width in pixels
    pub width_min: u32,

    /// Maximum acceptable output width in pixels
    pub width_max: u32,

    /// Preferred output width in pixels
    pub width_preferred: u32,

    /// Snap distance for the preferred width, in pixels
    pub width_preference_strength: u32,

    /// Maximum allowed stretch factor (>1.0)
    pub max_stretch: f64,

    /// Minimum allowed squeeze factor (<1.0)
    pub min_squeeze: f64,

    /// Upper bound on distortion applied via direct scaling
    pub preferred_max_distortion: f64,

    /// Whether to rotate the output 90 degrees for a sideways-mounted panel
    pub rotate: bool,

    /// Direction of rotation when `rotate` is set
    pub rotate_direction: RotateDirection,

    /// Whether to burn in a matching .srt subtitle file when one exists
    pub burn_subtitles: bool,

    /// Subtitle font name
    pub subtitle_font_name: String,

    /// Subtitle font size in pixels
    pub subtitle_font_size: u32,

    /// Subtitle outline width in pixels
    pub subtitle_outline: u32,

    /// Subtitle bottom margin in pixels
    pub subtitle_margin_v: u32,

    /// CRF quality for libx264 (lower is higher quality)
    pub crf: u8,

    /// libx264 preset name
    pub preset: String,

    /// Number of CPU threads handed to ffmpeg (pass-through only)
    pub threads: u32,

    /// Audio bitrate in kbit/s
    pub audio_bitrate_kbps: u32,

    /// Crop mode for the main encode ("auto" or "off")
    pub crop_mode: String,
}

impl CoreConfig {
    /// Creates a configuration with default parameters for the given directories.
    #[must_use]
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, log_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            log_dir,
            ..Self::default()
        }
    }

    /// Validates internal consistency of the width band and tolerance bounds.
    pub fn validate(&self) -> CoreResult<()> {
        if self.width_min > self.width_max {
            return Err(CoreError::Config(format!(
                "width_min ({}) must not exceed width_max ({})",
                self.width_min, self.width_max
            )));
        }
        if self.width_preferred < self.width_min || self.width_preferred > self.width_max {
            return Err(CoreError::Config(format!(
                "width_preferred ({}) must lie in [{}, {}]",
                self.width_preferred, self.width_min, self.width_max
            )));
        }
        if self.target_height == 0 {
            return Err(CoreError::Config("target_height must be non-zero".into()));
        }
        if !(self.max_stretch >= 1.0) || !(self.min_squeeze <= 1.0) || self.min_squeeze <= 0.0 {
            return Err(CoreError::Config(format!(
                "invalid stretch/squeeze bounds: [{}, {}]",
                self.min_squeeze, self.max_stretch
            )));
        }
        if self.crop_mode != "auto" && self.crop_mode != "off" {
            return Err(CoreError::Config(format!(
                "crop_mode must be \"auto\" or \"off\", got \"{}\"",
                self.crop_mode
            )));
        }
        Ok(())
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            log_dir: PathBuf::from("."),
            target_height: DEFAULT_TARGET_HEIGHT,
            width_min: DEFAULT_WIDTH_MIN,
            width_max: DEFAULT_WIDTH_MAX,
            width_preferred: DEFAULT_WIDTH_PREFERRED,
            width_preference_strength: DEFAULT_WIDTH_PREFERENCE_STRENGTH,
            max_stretch: DEFAULT_MAX_STRETCH,
            min_squeeze: DEFAULT_MIN_SQUEEZE,
            preferred_max_distortion: DEFAULT_PREFERRED_MAX_DISTORTION,
            rotate: true,
            rotate_direction: RotateDirection::Counterclockwise,
            burn_subtitles: true,
            subtitle_font_name: DEFAULT_SUBTITLE_FONT_NAME.to_string(),
            subtitle_font_size: DEFAULT_SUBTITLE_FONT_SIZE,
            subtitle_outline: DEFAULT_SUBTITLE_OUTLINE,
            subtitle_margin_v: DEFAULT_SUBTITLE_MARGIN_V,
            crf: DEFAULT_CRF,
            preset: DEFAULT_PRESET.to_string(),
            threads: default_thread_count(),
            audio_bitrate_kbps: DEFAULT_AUDIO_BITRATE_KBPS,
            crop_mode: DEFAULT_CROP_MODE.to_string(),
        }
    }
}

/// Half the logical CPUs, minimum one. The encoder parallelism is entirely
/// ffmpeg's; this value is only passed through.
#[must_use]
pub fn default_thread_count() -> u32 {
    ((num_cpus::get() + 1) / 2).max(1) as u32
}
