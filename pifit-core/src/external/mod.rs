//! Interactions with external CLI tools.
//!
//! Everything that shells out lives here: ffprobe metadata probing, ffmpeg
//! command construction, and encode execution. The rest of the crate only
//! sees typed results, which keeps the single non-portable dependency behind
//! one boundary.

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

/// ffmpeg argument building and encode execution
pub mod ffmpeg;

/// Builders for ffmpeg commands and video filter chains
pub mod ffmpeg_builder;

/// ffprobe execution and metadata extraction
pub mod ffprobe_executor;

pub use ffmpeg::{run_ffmpeg_encode, EncodeParams};
pub use ffmpeg_builder::{FfmpegCommandBuilder, VideoFilterChain};
pub use ffprobe_executor::{get_video_properties, VideoProperties};

/// Checks that a required external command is available and executable.
///
/// Runs `<cmd> -version` and discards the output; only the ability to start
/// the process matters.
pub(crate) fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check for '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Gets the size of the file at the given path in bytes.
pub fn get_file_size(path: &std::path::Path) -> CoreResult<u64> {
    Ok(std::fs::metadata(path)?.len())
}
