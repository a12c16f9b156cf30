//! File discovery module for finding video files to process.
//!
//! Scans the top level of the input directory for common video container
//! extensions (case-insensitive) and returns the matches sorted by lowercase
//! file name, so batches always run in a stable alphabetical order.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Container extensions accepted as conversion input.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "mov", "avi", "flv", "wmv", "webm", "mpeg"];

/// Returns true when the path has one of the accepted video extensions.
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// Finds video files eligible for processing in the specified directory.
///
/// Only the top level of `input_dir` is scanned. Results are sorted by
/// lowercase file name.
///
/// # Errors
///
/// * `CoreError::Io` - if the directory cannot be read
/// * `CoreError::NoFilesFound` - if no video files are found
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if path.is_file() && is_video_file(&path) {
                Some(path)
            } else {
                None
            }
        })
        .collect();

    files.sort_by_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("movie.mp4")));
        assert!(is_video_file(Path::new("movie.MKV")));
        assert!(is_video_file(Path::new("movie.WebM")));
        assert!(is_video_file(Path::new("clip.mpeg")));
        assert!(!is_video_file(Path::new("movie.srt")));
        assert!(!is_video_file(Path::new("movie.txt")));
        assert!(!is_video_file(Path::new("movie")));
    }
}
