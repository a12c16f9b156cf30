// pifit-core/tests/discovery_tests.rs

use pifit_core::discovery::find_processable_files;
use pifit_core::error::CoreError;
use std::fs::{self, File};
use tempfile::tempdir;

#[test]
fn test_find_processable_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("video1.mp4"))?;
    File::create(input_dir.join("video2.MKV"))?; // Case insensitivity
    File::create(input_dir.join("clip.webm"))?;
    File::create(input_dir.join("document.txt"))?;
    File::create(input_dir.join("subs.srt"))?;
    fs::create_dir(input_dir.join("subdir"))?;
    File::create(input_dir.join("subdir").join("nested.mp4"))?; // Top level only

    let files = find_processable_files(input_dir)?;

    assert_eq!(files.len(), 3);
    assert_eq!(files[0].file_name().unwrap(), "clip.webm");
    assert_eq!(files[1].file_name().unwrap(), "video1.mp4");
    assert_eq!(files[2].file_name().unwrap(), "video2.MKV");

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_processable_files_sorted_case_insensitively() -> Result<(), Box<dyn std::error::Error>>
{
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("Bravo.mp4"))?;
    File::create(input_dir.join("alpha.mp4"))?;
    File::create(input_dir.join("Charlie.mkv"))?;

    let files = find_processable_files(input_dir)?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["alpha.mp4", "Bravo.mp4", "Charlie.mkv"]);

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_processable_files_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("document.txt"))?;
    fs::create_dir(input_dir.join("subdir"))?;

    let result = find_processable_files(input_dir);
    assert!(matches!(result, Err(CoreError::NoFilesFound)));

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_processable_files_nonexistent_dir() {
    let result = find_processable_files(std::path::Path::new(
        "surely_this_does_not_exist_42_integration",
    ));
    assert!(matches!(result, Err(CoreError::Io(_))));
}
