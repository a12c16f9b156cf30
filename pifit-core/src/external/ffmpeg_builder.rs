//! Builders for ffmpeg commands and video filter chains.

use ffmpeg_sidecar::command::FfmpegCommand;

/// Builder for creating `FFmpeg` commands with common options.
pub struct FfmpegCommandBuilder {
    cmd: FfmpegCommand,
    hide_banner: bool,
}

impl Default for FfmpegCommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegCommandBuilder {
    /// Creates a new `FFmpeg` command builder with sensible defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cmd: FfmpegCommand::new(),
            hide_banner: true,
        }
    }

    /// Sets whether to hide the `FFmpeg` banner.
    #[must_use]
    pub fn with_hide_banner(mut self, hide: bool) -> Self {
        self.hide_banner = hide;
        self
    }

    /// Builds the `FFmpeg` command with all configured options.
    #[must_use]
    pub fn build(mut self) -> FfmpegCommand {
        if self.hide_banner {
            self.cmd.arg("-hide_banner");
        }
        self.cmd
    }
}

/// Builder for a video filter chain.
///
/// Conversion filters always run in the fixed order crop, scale, aspect
/// correction, subtitles, transpose; callers add filters in that order and
/// empty entries are dropped.
#[derive(Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    /// Creates a new empty filter chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a crop filter to the chain.
    #[must_use]
    pub fn add_crop(mut self, crop: &str) -> Self {
        if !crop.is_empty() {
            self.filters.push(crop.to_string());
        }
        self
    }

    /// Adds a scale filter to the chain.
    #[must_use]
    pub fn add_scale(mut self, width: u32, height: u32) -> Self {
        self.filters.push(format!("scale={width}:{height}"));
        self
    }

    /// Resets the sample aspect ratio after a distorting scale.
    #[must_use]
    pub fn add_setsar(mut self) -> Self {
        self.filters.push("setsar=1".to_string());
        self
    }

    /// Adds a subtitles burn-in filter to the chain.
    #[must_use]
    pub fn add_subtitles(mut self, filter: &str) -> Self {
        if !filter.is_empty() {
            self.filters.push(filter.to_string());
        }
        self
    }

    /// Adds a transpose (rotation) filter to the chain.
    #[must_use]
    pub fn add_transpose(mut self, transpose: &str) -> Self {
        if !transpose.is_empty() {
            self.filters.push(transpose.to_string());
        }
        self
    }

    /// Adds an arbitrary filter expression to the chain.
    #[must_use]
    pub fn add_filter(mut self, filter: String) -> Self {
        if !filter.is_empty() {
            self.filters.push(filter);
        }
        self
    }

    /// Builds the filter chain into a single filter string.
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_filter_chain_empty() {
        let chain = VideoFilterChain::new();
        assert_eq!(chain.build(), None);
    }

    #[test]
    fn test_video_filter_chain_single_filter() {
        let chain = VideoFilterChain::new().add_crop("crop=1920:800:0:140");
        assert_eq!(chain.build(), Some("crop=1920:800:0:140".to_string()));
    }

    #[test]
    fn test_video_filter_chain_preserves_order() {
        let chain = VideoFilterChain::new()
            .add_crop("crop=1904:1044:8:18")
            .add_scale(800, 480)
            .add_setsar()
            .add_subtitles("subtitles='movie.srt'")
            .add_transpose("transpose=2");
        assert_eq!(
            chain.build(),
            Some(
                "crop=1904:1044:8:18,scale=800:480,setsar=1,\
                 subtitles='movie.srt',transpose=2"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_video_filter_chain_skips_empty_entries() {
        let chain = VideoFilterChain::new()
            .add_crop("")
            .add_scale(780, 480)
            .add_subtitles("")
            .add_transpose("");
        assert_eq!(chain.build(), Some("scale=780:480".to_string()));
    }
}
