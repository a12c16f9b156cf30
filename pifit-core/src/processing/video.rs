//! Main batch conversion orchestration.
//!
//! Iterates the discovered files sequentially: skip existing outputs, probe,
//! detect black bars, select target geometry, assemble the filter chain, and
//! hand the encode to ffmpeg. A single file's failure is logged and the batch
//! moves on; output is written to a temporary path and renamed into place on
//! success, so no partial file is ever left behind.

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::ffmpeg::{run_ffmpeg_encode, EncodeParams};
use crate::external::{check_dependency, get_file_size, get_video_properties, VideoFilterChain};
use crate::processing::crop_detection::{detect_crop, CropRect};
use crate::processing::geometry::{select_geometry, ScalePlan, TargetGeometry};
use crate::processing::subtitles::{build_subtitle_filter, find_subtitle_file};
use crate::temp_files::create_temp_file_path;
use crate::utils::{format_bytes, format_duration, get_filename_safe};
use crate::EncodeResult;

use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Processes a list of video files according to the provided configuration.
///
/// Returns one [`EncodeResult`] per successfully converted file. Per-file
/// failures (unreadable source, encoder exit) are logged and skipped; only
/// missing external tools or an unusable output directory abort the batch.
pub fn process_videos(
    config: &CoreConfig,
    files_to_process: &[PathBuf],
) -> CoreResult<Vec<EncodeResult>> {
    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;
    debug!("External dependency check passed.");

    std::fs::create_dir_all(&config.output_dir)?;

    let total = files_to_process.len();
    info!(
        "Found {} videos. Target: {}h x {}-{}w (prefer {}w), rotate: {}",
        total,
        config.target_height,
        config.width_min,
        config.width_max,
        config.width_preferred,
        config.rotate
    );

    let mut results: Vec<EncodeResult> = Vec::new();

    for (index, input_path) in files_to_process.iter().enumerate() {
        let filename = match get_filename_safe(input_path) {
            Ok(name) => name,
            Err(e) => {
                warn!("Skipping unprocessable path: {e}");
                continue;
            }
        };

        info!("({}/{}) {}", index + 1, total, filename);

        let Some(output_path) = output_path_for(input_path, &config.output_dir) else {
            warn!("Skipping '{filename}': no file stem");
            continue;
        };

        // Idempotence: an existing output means this file is already done.
        if output_path.exists() {
            debug!(
                "Skipping '{}', output exists at {}",
                filename,
                output_path.display()
            );
            continue;
        }

        match process_one(config, input_path, &output_path, &filename) {
            Ok(result) => {
                info!(
                    "Done '{}' in {} ({} -> {})",
                    filename,
                    format_duration(result.duration.as_secs_f64()),
                    format_bytes(result.input_size),
                    format_bytes(result.output_size)
                );
                results.push(result);
            }
            Err(e) => {
                warn!("Failed to convert '{filename}': {e}. Continuing with next file.");
            }
        }
    }

    Ok(results)
}

/// Computes the output path for an input file: same stem, .mp4 container,
/// in the output directory. Dots in the stem stay intact
/// ("movie.2024.mkv" -> "movie.2024.mp4").
#[must_use]
pub fn output_path_for(input_path: &Path, output_dir: &Path) -> Option<PathBuf> {
    let stem = input_path.file_stem()?;
    Some(output_dir.join(format!("{}.mp4", stem.to_string_lossy())))
}

/// Converts a single file. Any error here is per-file and non-fatal to the
/// batch.
fn process_one(
    config: &CoreConfig,
    input_path: &Path,
    output_path: &Path,
    filename: &str,
) -> CoreResult<EncodeResult> {
    let start_time = Instant::now();

    let video_props = get_video_properties(input_path)?;
    info!(
        "  Source: {}x{}, duration {}",
        video_props.width,
        video_props.height,
        format_duration(video_props.duration_secs)
    );

    // Probe-dependent steps degrade gracefully: crop detection failure means
    // no crop.
    let disable_crop = config.crop_mode == "off";
    let crop = match detect_crop(input_path, &video_props, disable_crop) {
        Ok(crop) => crop,
        Err(e) => {
            warn!("Crop detection failed for '{filename}': {e}. Proceeding without crop.");
            None
        }
    };

    let (content_w, content_h) = match &crop {
        Some(rect) => (rect.width, rect.height),
        None => (video_props.width, video_props.height),
    };

    let geometry = select_geometry(content_w, content_h, config);
    info!(
        "  Target: {}x{} ({:.3}x distortion)",
        geometry.width, geometry.height, geometry.distortion
    );
    if geometry.over_tolerance {
        warn!(
            "  Required distortion {:.3} exceeds tolerance [{:.2}, {:.2}] for '{}'; \
             using scale and centered crop",
            geometry.distortion, config.min_squeeze, config.max_stretch, filename
        );
    }

    let subtitle_path = if config.burn_subtitles {
        let found = find_subtitle_file(input_path);
        if let Some(ref path) = found {
            info!("  Burning in subtitles: {}", path.display());
        }
        found
    } else {
        None
    };

    let filter_chain = build_filter_chain(crop.as_ref(), &geometry, subtitle_path.as_deref(), config);
    if let Some(ref filters) = filter_chain {
        info!("  Filters: {filters}");
    }

    // Encode to a temporary path; rename on success so interrupted or failed
    // runs leave nothing behind.
    let temp_output = create_temp_file_path(&config.output_dir, "pifit", "mp4");
    let params = EncodeParams {
        input_path: input_path.to_path_buf(),
        output_path: temp_output.clone(),
        filter_chain,
        crf: config.crf,
        preset: config.preset.clone(),
        threads: config.threads,
        audio_bitrate_kbps: config.audio_bitrate_kbps,
        duration: video_props.duration_secs,
    };

    match run_ffmpeg_encode(&params) {
        Ok(()) => {
            std::fs::rename(&temp_output, output_path)?;
        }
        Err(e) => {
            if temp_output.exists() {
                if let Err(remove_err) = std::fs::remove_file(&temp_output) {
                    warn!(
                        "Failed to remove temporary output {}: {remove_err}",
                        temp_output.display()
                    );
                }
            }
            return Err(e);
        }
    }

    let input_size = get_file_size(input_path).unwrap_or(0);
    let output_size = get_file_size(output_path)?;

    Ok(EncodeResult {
        filename: filename.to_string(),
        duration: start_time.elapsed(),
        input_size,
        output_size,
    })
}

/// Assembles the ordered filter chain: crop, scale, aspect correction,
/// subtitles, transpose.
fn build_filter_chain(
    crop: Option<&CropRect>,
    geometry: &TargetGeometry,
    subtitle_path: Option<&Path>,
    config: &CoreConfig,
) -> Option<String> {
    let mut chain = VideoFilterChain::new();

    if let Some(rect) = crop {
        chain = chain.add_crop(&rect.to_filter());
    }

    chain = match geometry.plan {
        ScalePlan::Distort => chain.add_scale(geometry.width, geometry.height).add_setsar(),
        ScalePlan::ScaleCrop {
            scale_w,
            scale_h,
            crop_x,
            crop_y,
        } => chain.add_scale(scale_w, scale_h).add_filter(format!(
            "crop={}:{}:{}:{}",
            geometry.width, geometry.height, crop_x, crop_y
        )),
    };

    if let Some(path) = subtitle_path {
        chain = chain.add_subtitles(&build_subtitle_filter(path, config));
    }

    if config.rotate {
        chain = chain.add_transpose(config.rotate_direction.transpose_filter());
    }

    chain.build()
}
