//! Builder pattern for [`CoreConfig`].
//!
//! Provides a fluent API for assembling a configuration from CLI arguments,
//! starting from the panel defaults and overriding only what the caller sets.

use std::path::PathBuf;

use super::{CoreConfig, RotateDirection};

/// Builder for creating `CoreConfig` instances.
///
/// # Examples
///
/// ```rust
/// use pifit_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/input"))
///     .output_dir(PathBuf::from("/path/to/output"))
///     .log_dir(PathBuf::from("/path/to/logs"))
///     .crf(26)
///     .preset("fast")
///     .rotate(false)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder seeded with the panel defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CoreConfig::default(),
        }
    }

    #[must_use]
    pub fn input_dir(mut self, dir: PathBuf) -> Self {
        self.config.input_dir = dir;
        self
    }

    #[must_use]
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.config.output_dir = dir;
        self
    }

    #[must_use]
    pub fn log_dir(mut self, dir: PathBuf) -> Self {
        self.config.log_dir = dir;
        self
    }

    #[must_use]
    pub fn target_height(mut self, height: u32) -> Self {
        self.config.target_height = height;
        self
    }

    #[must_use]
    pub fn width_band(mut self, min: u32, max: u32, preferred: u32) -> Self {
        self.config.width_min = min;
        self.config.width_max = max;
        self.config.width_preferred = preferred;
        self
    }

    #[must_use]
    pub fn rotate(mut self, rotate: bool) -> Self {
        self.config.rotate = rotate;
        self
    }

    #[must_use]
    pub fn rotate_direction(mut self, direction: RotateDirection) -> Self {
        self.config.rotate_direction = direction;
        self
    }

    #[must_use]
    pub fn burn_subtitles(mut self, burn: bool) -> Self {
        self.config.burn_subtitles = burn;
        self
    }

    #[must_use]
    pub fn crf(mut self, crf: u8) -> Self {
        self.config.crf = crf;
        self
    }

    #[must_use]
    pub fn preset(mut self, preset: &str) -> Self {
        self.config.preset = preset.to_string();
        self
    }

    #[must_use]
    pub fn threads(mut self, threads: u32) -> Self {
        self.config.threads = threads;
        self
    }

    #[must_use]
    pub fn audio_bitrate_kbps(mut self, kbps: u32) -> Self {
        self.config.audio_bitrate_kbps = kbps;
        self
    }

    #[must_use]
    pub fn crop_mode(mut self, mode: &str) -> Self {
        self.config.crop_mode = mode.to_string();
        self
    }

    /// Builds the final `CoreConfig`.
    #[must_use]
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

impl Default for CoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
