//! `FFmpeg` progress handling.
//!
//! Consumes ffmpeg-sidecar events during an encode and renders a progress bar
//! with percentage, elapsed time, and ETA. Stderr output is accumulated so a
//! failed encode can report what ffmpeg actually said.

use crate::utils::{format_duration, parse_ffmpeg_time};
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel as FfmpegLogLevel};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Handler for `FFmpeg` progress events during a single encode.
pub struct FfmpegProgressHandler {
    duration: Option<f64>,
    start_time: Instant,
    bar: ProgressBar,
    stderr_buffer: String,
}

impl FfmpegProgressHandler {
    /// Creates a handler; `duration` is the source duration in seconds when
    /// known, which enables percentage and ETA reporting.
    #[must_use]
    pub fn new(duration: Option<f64>) -> Self {
        let bar = match duration {
            Some(_) => {
                let bar = ProgressBar::new(100);
                bar.set_style(
                    ProgressStyle::with_template(
                        "  [{bar:40}] {pos:>3}% | {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
                );
                bar
            }
            None => ProgressBar::hidden(),
        };

        Self {
            duration,
            start_time: Instant::now(),
            bar,
            stderr_buffer: String::new(),
        }
    }

    /// Handles one `FFmpeg` event.
    pub fn handle_event(&mut self, event: FfmpegEvent) {
        match event {
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, message) => self.handle_log(level, &message),
            FfmpegEvent::Error(error) => self.handle_error(&error),
            _ => {}
        }
    }

    /// Finishes and clears the progress bar.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// The accumulated stderr output.
    #[must_use]
    pub fn stderr_buffer(&self) -> &str {
        &self.stderr_buffer
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        let Some(total) = self.duration.filter(|&d| d > 0.0) else {
            return;
        };

        let current_secs = parse_ffmpeg_time(&progress.time).unwrap_or(0.0);
        let percent = (current_secs / total * 100.0).min(100.0);

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let eta = if progress.speed > 0.01 && total > current_secs {
            (total - current_secs) / f64::from(progress.speed)
        } else {
            0.0
        };

        self.bar.set_position(percent as u64);
        self.bar.set_message(format!(
            "{} / {} | elapsed {} | eta {}",
            format_duration(current_secs),
            format_duration(total),
            format_duration(elapsed),
            format_duration(eta),
        ));
    }

    fn handle_log(&mut self, level: FfmpegLogLevel, message: &str) {
        match map_ffmpeg_log_level(&level) {
            log::Level::Error => log::warn!(target: "ffmpeg_log", "{message}"),
            log::Level::Warn => log::debug!(target: "ffmpeg_log", "{message}"),
            _ => log::trace!(target: "ffmpeg_log", "{message}"),
        }
    }

    fn handle_error(&mut self, error: &str) {
        if is_non_critical_ffmpeg_error(error) {
            log::debug!("ffmpeg non-critical message: {error}");
        } else {
            log::error!("ffmpeg stderr: {error}");
        }
        self.stderr_buffer.push_str(error);
        self.stderr_buffer.push('\n');
    }
}

/// Maps an `FFmpeg` log level to a Rust log level.
fn map_ffmpeg_log_level(level: &FfmpegLogLevel) -> log::Level {
    match level {
        FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => log::Level::Error,
        FfmpegLogLevel::Warning => log::Level::Warn,
        FfmpegLogLevel::Info => log::Level::Info,
        _ => log::Level::Trace,
    }
}

/// `FFmpeg` stderr messages that do not indicate actual problems.
fn is_non_critical_ffmpeg_error(error: &str) -> bool {
    error.contains("deprecated pixel format")
        || error.contains("No accelerated colorspace conversion")
        || error.contains("automatically inserted filter")
        || error.contains("Timestamps are unset")
        || error.contains("Queue input is backward")
        || error.contains("first frame is no keyframe")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_critical_error_detection() {
        assert!(is_non_critical_ffmpeg_error(
            "deprecated pixel format used, make sure you did set range correctly"
        ));
        assert!(!is_non_critical_ffmpeg_error("No such file or directory"));
    }

    #[test]
    fn test_stderr_accumulates_critical_errors() {
        let mut handler = FfmpegProgressHandler::new(None);
        handler.handle_event(FfmpegEvent::Error("boom".to_string()));
        handler.handle_event(FfmpegEvent::Error("again".to_string()));
        assert_eq!(handler.stderr_buffer(), "boom\nagain\n");
    }
}
