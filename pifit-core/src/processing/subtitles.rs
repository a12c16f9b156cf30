//! Subtitle discovery and burn-in filter construction.
//!
//! Subtitles follow a same-base-name convention: `movie.srt` next to
//! `movie.mp4`. A missing subtitle file is not an error; the conversion just
//! proceeds without burn-in. The filter is applied before rotation so the
//! text rotates with the content.

use crate::config::CoreConfig;
use std::path::{Path, PathBuf};

/// Finds a matching .srt subtitle file for a video, if one exists.
#[must_use]
pub fn find_subtitle_file(video_path: &Path) -> Option<PathBuf> {
    let srt_path = video_path.with_extension("srt");
    srt_path.exists().then_some(srt_path)
}

/// Builds the subtitles burn-in filter with styling for a small screen.
#[must_use]
pub fn build_subtitle_filter(subtitle_path: &Path, config: &CoreConfig) -> String {
    let escaped_path = escape_filter_path(&subtitle_path.to_string_lossy());

    format!(
        "subtitles='{escaped_path}':force_style='FontName={font},FontSize={size},\
         OutlineColour=&H80000000,Outline={outline},MarginV={margin}'",
        font = config.subtitle_font_name,
        size = config.subtitle_font_size,
        outline = config.subtitle_outline,
        margin = config.subtitle_margin_v,
    )
}

/// Escapes a path for use inside an ffmpeg filter expression.
fn escape_filter_path(path: &str) -> String {
    path.replace('\\', "\\\\").replace(':', "\\:")
}
