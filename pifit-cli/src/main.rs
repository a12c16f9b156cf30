// pifit-cli/src/main.rs
//
// Command-line interface for the pifit video conversion tool.
//
// Responsibilities:
// - Parsing CLI arguments (`Cli`, `Commands`, `ConvertArgs`).
// - Setting up logging to console and a log file.
// - Building the core configuration from arguments and defaults.
// - Invoking `pifit_core::process_videos` and summarizing the results.
// - Mapping success/failure to the process exit code.

mod cli;
mod logging;

use clap::Parser;
use cli::{Cli, Commands, ConvertArgs, RotateDirArg};
use owo_colors::OwoColorize;
use pifit_core::{
    calculate_size_reduction, find_processable_files, format_bytes, format_duration,
    process_videos, CoreConfigBuilder, CoreError, EncodeResult, RotateDirection,
};
use std::error::Error;
use std::fs;
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => run_convert(args, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run_convert(args: ConvertArgs, verbose: bool) -> Result<(), Box<dyn Error>> {
    let total_start_time = Instant::now();

    // --- Determine Paths ---
    let input_dir = args
        .input_dir
        .canonicalize()
        .map_err(|e| format!("Invalid input path '{}': {e}", args.input_dir.display()))?;
    if !input_dir.is_dir() {
        return Err(format!("Input path '{}' is not a directory.", input_dir.display()).into());
    }
    let output_dir = args.output_dir;
    let log_dir = args.log_dir.unwrap_or_else(|| output_dir.join("logs"));

    fs::create_dir_all(&output_dir)?;
    fs::create_dir_all(&log_dir)?;

    let log_path = logging::setup(&log_dir, verbose)?;

    // --- Build Configuration ---
    let mut builder = CoreConfigBuilder::new()
        .input_dir(input_dir.clone())
        .output_dir(output_dir.clone())
        .log_dir(log_dir)
        .rotate(!args.no_rotate)
        .rotate_direction(match args.rotate_dir {
            RotateDirArg::Clockwise => RotateDirection::Clockwise,
            RotateDirArg::Counterclockwise => RotateDirection::Counterclockwise,
        })
        .burn_subtitles(!args.no_subtitles)
        .crop_mode(if args.disable_autocrop { "off" } else { "auto" });

    if let Some(height) = args.height {
        builder = builder.target_height(height);
    }
    if args.width_min.is_some() || args.width_max.is_some() || args.width_preferred.is_some() {
        let defaults = pifit_core::CoreConfig::default();
        builder = builder.width_band(
            args.width_min.unwrap_or(defaults.width_min),
            args.width_max.unwrap_or(defaults.width_max),
            args.width_preferred.unwrap_or(defaults.width_preferred),
        );
    }
    if let Some(crf) = args.crf {
        builder = builder.crf(crf);
    }
    if let Some(ref preset) = args.preset {
        builder = builder.preset(preset);
    }
    if let Some(threads) = args.threads {
        builder = builder.threads(threads);
    }

    let config = builder.build();
    config.validate()?;

    // --- Discover Files ---
    let files = match find_processable_files(&config.input_dir) {
        Ok(files) => files,
        Err(CoreError::NoFilesFound) => {
            println!(
                "No video files found in '{}'. Nothing to do.",
                input_dir.display()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // --- Run Header ---
    println!("{}", "pifit batch conversion".bold());
    println!("  Input:    {}", input_dir.display());
    println!("  Output:   {}", output_dir.display());
    println!("  Log file: {}", log_path.display());
    println!(
        "  Target:   {}h x {}-{}w (prefer {}w), rotate: {}",
        config.target_height,
        config.width_min,
        config.width_max,
        config.width_preferred,
        if config.rotate { "yes" } else { "no" }
    );
    println!(
        "  Encoder:  libx264 crf {} preset {} | {} of {} threads",
        config.crf,
        config.preset,
        config.threads,
        num_cpus::get()
    );
    println!(
        "  Options:  autocrop {}, subtitles {}",
        if config.crop_mode == "auto" { "on" } else { "off" },
        if config.burn_subtitles { "on" } else { "off" }
    );
    println!("  Files:    {}", files.len());
    println!();

    // --- Process ---
    let total = files.len();
    let results = process_videos(&config, &files)?;

    // --- Summary ---
    print_summary(&results, total, total_start_time.elapsed().as_secs_f64());
    Ok(())
}

fn print_summary(results: &[EncodeResult], total: usize, elapsed_secs: f64) {
    let processed = results.len();
    let skipped = total - processed;

    println!();
    println!("{}", "Conversion summary".bold());
    println!(
        "  {} processed, {} skipped or failed (of {total})",
        processed.to_string().green().bold(),
        skipped.to_string().yellow()
    );

    for result in results {
        println!(
            "  {} {} ({} -> {}, {})",
            "[done]".green(),
            result.filename,
            format_bytes(result.input_size),
            format_bytes(result.output_size),
            format_duration(result.duration.as_secs_f64())
        );
    }

    let total_input: u64 = results.iter().map(|r| r.input_size).sum();
    let total_output: u64 = results.iter().map(|r| r.output_size).sum();
    if processed > 0 {
        println!(
            "  Total size: {} -> {} ({}% reduction)",
            format_bytes(total_input),
            format_bytes(total_output),
            calculate_size_reduction(total_input, total_output)
        );
    }
    println!("  Total time: {}", format_duration(elapsed_secs));
}
