//! Black bar detection and crop parameter generation.
//!
//! Samples ffmpeg's cropdetect filter at three points in the video (10%, 50%,
//! and 90% of the duration), takes the most common crop rectangle, and keeps
//! it only when the removed margin is significant. Detection failures are
//! never fatal: the caller proceeds with the unmodified source dimensions.

use crate::error::{command_start_error, CoreResult};
use crate::external::VideoProperties;

use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Fraction of a dimension a margin must exceed before cropping is worth it.
const MIN_CROP_FRACTION: f64 = 0.02;

/// Seconds of video analyzed at each sample point.
const SAMPLE_SECONDS: u32 = 3;

/// Relative positions sampled within the video.
const SAMPLE_POSITIONS: [f64; 3] = [0.1, 0.5, 0.9];

/// A crop rectangle detected from letterboxing bars, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl CropRect {
    /// Renders the ffmpeg crop filter expression for this rectangle.
    #[must_use]
    pub fn to_filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }
}

/// Detects black bars in the given video.
///
/// Returns `Ok(None)` when detection is disabled, the duration is unusable,
/// no bars are found, or the detected margin is below the 2% threshold.
/// Sampling failures are swallowed; a corrupt file simply yields no crop.
pub fn detect_crop(
    input_file: &Path,
    video_props: &VideoProperties,
    disable_crop: bool,
) -> CoreResult<Option<CropRect>> {
    if disable_crop {
        log::debug!("Crop detection disabled for {}", input_file.display());
        return Ok(None);
    }

    if !video_props.duration_secs.is_finite() || video_props.duration_secs < 2.0 {
        log::debug!(
            "Duration too short for crop detection on {}",
            input_file.display()
        );
        return Ok(None);
    }

    // Sample the three positions in parallel; each failure counts as an
    // empty sample.
    let crops: Vec<CropRect> = SAMPLE_POSITIONS
        .par_iter()
        .flat_map(|&position| {
            let start_time = video_props.duration_secs * position;
            sample_crop_at_position(input_file, start_time).unwrap_or_default()
        })
        .collect();

    let selected = select_crop(&crops, video_props);
    match &selected {
        Some(crop) => log::info!(
            "Black bars detected in {}: {} (source {}x{})",
            input_file.display(),
            crop.to_filter(),
            video_props.width,
            video_props.height
        ),
        None => log::debug!("No significant black bars in {}", input_file.display()),
    }

    Ok(selected)
}

/// Picks the most common crop and applies the 2% significance threshold.
fn select_crop(crops: &[CropRect], video_props: &VideoProperties) -> Option<CropRect> {
    let mut counts: HashMap<CropRect, usize> = HashMap::new();
    for crop in crops {
        *counts.entry(*crop).or_insert(0) += 1;
    }

    // Equal votes resolve to the earliest-seen rectangle, so repeated runs
    // over the same file always pick the same crop.
    let (best, _) = crops
        .iter()
        .map(|crop| (*crop, counts[crop]))
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })?;

    if best.width == 0
        || best.height == 0
        || best.width > video_props.width
        || best.height > video_props.height
    {
        return None;
    }

    let width_cut = f64::from(video_props.width - best.width);
    let height_cut = f64::from(video_props.height - best.height);
    let significant = width_cut > f64::from(video_props.width) * MIN_CROP_FRACTION
        || height_cut > f64::from(video_props.height) * MIN_CROP_FRACTION;

    significant.then_some(best)
}

/// Runs cropdetect for a few seconds at one position in the video.
fn sample_crop_at_position(input_file: &Path, start_time: f64) -> CoreResult<Vec<CropRect>> {
    log::trace!("Sampling cropdetect at {start_time:.1}s");

    let mut cmd = crate::external::FfmpegCommandBuilder::new().build();
    cmd.args(["-ss", &format!("{start_time:.2}")]);
    cmd.input(input_file.to_string_lossy());
    cmd.args([
        "-t",
        &SAMPLE_SECONDS.to_string(),
        "-vf",
        "cropdetect=24:16:0",
        "-f",
        "null",
        "-",
    ]);

    let mut child = cmd
        .spawn()
        .map_err(|e| command_start_error("ffmpeg (cropdetect)", e))?;

    let mut crops = Vec::new();
    if let Ok(events) = child.iter() {
        for event in events {
            if let ffmpeg_sidecar::event::FfmpegEvent::Log(_, line) = event {
                if let Some(crop) = parse_crop_line(&line) {
                    crops.push(crop);
                }
            }
        }
    }
    let _ = child.wait();

    Ok(crops)
}

/// Parses a `crop=W:H:X:Y` value out of a cropdetect log line.
fn parse_crop_line(line: &str) -> Option<CropRect> {
    let crop_pos = line.find("crop=")?;
    let crop_part = &line[crop_pos + 5..];
    let end_pos = crop_part
        .find(|c: char| c.is_whitespace())
        .unwrap_or(crop_part.len());
    parse_crop_value(&crop_part[..end_pos])
}

/// Parses the `W:H:X:Y` payload of a crop expression.
fn parse_crop_value(value: &str) -> Option<CropRect> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 4 {
        return None;
    }

    let numbers: Vec<u32> = parts
        .iter()
        .map(|part| part.parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;

    Some(CropRect {
        width: numbers[0],
        height: numbers[1],
        x: numbers[2],
        y: numbers[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(width: u32, height: u32) -> VideoProperties {
        VideoProperties {
            width,
            height,
            duration_secs: 600.0,
        }
    }

    #[test]
    fn test_parse_crop_line() {
        let line = "[Parsed_cropdetect_0 @ 0x7f8] x1:0 x2:1919 y1:140 y2:939 \
                    w:1920 h:800 x:0 y:140 pts:0 t:0.000000 crop=1920:800:0:140";
        assert_eq!(
            parse_crop_line(line),
            Some(CropRect {
                width: 1920,
                height: 800,
                x: 0,
                y: 140
            })
        );

        // Crop value at end of line without trailing text
        assert_eq!(
            parse_crop_line("crop=1920:800:0:140"),
            Some(CropRect {
                width: 1920,
                height: 800,
                x: 0,
                y: 140
            })
        );

        // Lines without a parsable crop
        assert_eq!(parse_crop_line("x1:0 x2:1919 y1:0 y2:1079"), None);
        assert_eq!(parse_crop_line("crop=invalid:format"), None);
        assert_eq!(parse_crop_line("crop=1920:1080:0"), None);
        assert_eq!(parse_crop_line("crop=1920:1080:0:-10"), None);
        assert_eq!(parse_crop_line(""), None);
    }

    #[test]
    fn test_select_crop_most_common_wins() {
        let a = CropRect {
            width: 1920,
            height: 800,
            x: 0,
            y: 140,
        };
        let b = CropRect {
            width: 1920,
            height: 1080,
            x: 0,
            y: 0,
        };
        let crops = vec![a, a, b, a];
        assert_eq!(select_crop(&crops, &props(1920, 1080)), Some(a));
    }

    #[test]
    fn test_select_crop_tie_goes_to_first_seen() {
        let first = CropRect {
            width: 1920,
            height: 800,
            x: 0,
            y: 140,
        };
        let second = CropRect {
            width: 1920,
            height: 816,
            x: 0,
            y: 132,
        };
        // Two rectangles with equal votes: the earlier sample wins, every run.
        let crops = vec![first, second, second, first];
        assert_eq!(select_crop(&crops, &props(1920, 1080)), Some(first));
        let crops = vec![second, first, first, second];
        assert_eq!(select_crop(&crops, &props(1920, 1080)), Some(second));
    }

    #[test]
    fn test_select_crop_significant_margin() {
        // 8% margin on top and bottom of a 1080p source: 86 px each side.
        let crop = CropRect {
            width: 1920,
            height: 908,
            x: 0,
            y: 86,
        };
        assert_eq!(select_crop(&[crop], &props(1920, 1080)), Some(crop));
    }

    #[test]
    fn test_select_crop_below_threshold_is_ignored() {
        // 16 rows out of 1080 is about 1.5%, under the 2% threshold.
        let crop = CropRect {
            width: 1920,
            height: 1064,
            x: 0,
            y: 8,
        };
        assert_eq!(select_crop(&[crop], &props(1920, 1080)), None);
    }

    #[test]
    fn test_select_crop_full_frame_is_no_crop() {
        let crop = CropRect {
            width: 1920,
            height: 1080,
            x: 0,
            y: 0,
        };
        assert_eq!(select_crop(&[crop], &props(1920, 1080)), None);
    }

    #[test]
    fn test_select_crop_rejects_bogus_rectangles() {
        let too_big = CropRect {
            width: 4000,
            height: 1080,
            x: 0,
            y: 0,
        };
        let degenerate = CropRect {
            width: 0,
            height: 0,
            x: 0,
            y: 0,
        };
        assert_eq!(select_crop(&[too_big], &props(1920, 1080)), None);
        assert_eq!(select_crop(&[degenerate], &props(1920, 1080)), None);
    }

    #[test]
    fn test_select_crop_empty_samples() {
        assert_eq!(select_crop(&[], &props(1920, 1080)), None);
    }

    #[test]
    fn test_crop_rect_to_filter() {
        let crop = CropRect {
            width: 1920,
            height: 800,
            x: 0,
            y: 140,
        };
        assert_eq!(crop.to_filter(), "crop=1920:800:0:140");
    }
}
