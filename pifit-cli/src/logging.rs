// pifit-cli/src/logging.rs
//
// Logging setup for the CLI: fern dispatch to stdout plus a timestamped log
// file in the log directory. ffmpeg's own log lines are kept out of the
// console below warning level.

use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Initializes logging. Returns the path of the created log file.
pub fn setup(log_dir: &Path, verbose: bool) -> Result<PathBuf, fern::InitError> {
    let log_path = log_dir.join(format!("pifit_convert_run_{}.log", get_timestamp()));

    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(console_level)
        .level_for("ffmpeg_log", LevelFilter::Warn)
        .chain(std::io::stdout())
        .chain(fern::log_file(&log_path)?)
        .apply()?;

    Ok(log_path)
}
