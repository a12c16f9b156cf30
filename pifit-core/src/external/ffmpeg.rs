//! FFmpeg command building and execution for video conversion.
//!
//! Builds the fixed libx264/aac command line used for every output (the
//! target device only plays H.264 baseline-class mp4 reliably) and runs it
//! with progress reporting via ffmpeg-sidecar events.

use crate::error::{command_failed_error, command_start_error, command_wait_error, CoreResult};
use crate::progress::FfmpegProgressHandler;

use ffmpeg_sidecar::command::FfmpegCommand;
use log::{debug, info};

use std::path::PathBuf;

/// Parameters for a single `FFmpeg` encode operation.
#[derive(Debug, Clone)]
pub struct EncodeParams {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Complete video filter chain, already ordered
    pub filter_chain: Option<String>,
    pub crf: u8,
    pub preset: String,
    /// CPU thread count handed to ffmpeg
    pub threads: u32,
    pub audio_bitrate_kbps: u32,
    /// Source duration in seconds, used for progress percentages
    pub duration: f64,
}

/// Builds the `FFmpeg` command for one conversion.
///
/// Output parameters are fixed apart from CRF, preset, and thread count:
/// libx264 main profile level 3.0, aac audio, yuv420p, faststart mp4.
#[must_use]
pub fn build_ffmpeg_command(params: &EncodeParams) -> FfmpegCommand {
    let mut cmd = crate::external::FfmpegCommandBuilder::new().build();

    cmd.input(params.input_path.to_string_lossy().as_ref());

    if let Some(ref filters) = params.filter_chain {
        cmd.args(["-vf", filters]);
    }

    cmd.args(["-c:v", "libx264"]);
    cmd.args(["-profile:v", "main"]);
    cmd.args(["-level", "3.0"]);
    cmd.args(["-preset", &params.preset]);
    cmd.args(["-crf", &params.crf.to_string()]);
    cmd.args(["-threads", &params.threads.to_string()]);
    cmd.args(["-c:a", "aac"]);
    cmd.args(["-b:a", &format!("{}k", params.audio_bitrate_kbps)]);
    cmd.args(["-pix_fmt", "yuv420p"]);
    cmd.args(["-movflags", "+faststart"]);

    cmd.output(params.output_path.to_string_lossy().as_ref());
    cmd
}

/// Executes one `FFmpeg` encode, reporting progress as events arrive.
///
/// Returns `Ok(())` only when ffmpeg exits successfully; the caller owns the
/// temporary-path/rename lifecycle around this.
pub fn run_ffmpeg_encode(params: &EncodeParams) -> CoreResult<()> {
    info!(
        "Starting encode: {} -> {}",
        params.input_path.display(),
        params.output_path.display()
    );
    debug!("Encode parameters: {params:?}");

    let mut cmd = build_ffmpeg_command(params);
    debug!("FFmpeg command: {cmd:?}");

    let mut child = cmd
        .spawn()
        .map_err(|e| command_start_error("ffmpeg", e))?;

    let duration = (params.duration > 0.0).then_some(params.duration);
    let mut progress_handler = FfmpegProgressHandler::new(duration);

    let events = child.iter().map_err(|e| {
        command_failed_error(
            "ffmpeg",
            std::process::ExitStatus::default(),
            format!("Failed to get event iterator: {e}"),
        )
    })?;
    for event in events {
        progress_handler.handle_event(event);
    }

    let status = child
        .wait()
        .map_err(|e| command_wait_error("ffmpeg", e))?;
    progress_handler.finish();

    if status.success() {
        info!(
            "Encode finished successfully for {}",
            params.input_path.display()
        );
        Ok(())
    } else {
        Err(command_failed_error(
            "ffmpeg",
            status,
            progress_handler.stderr_buffer().trim().to_string(),
        ))
    }
}
