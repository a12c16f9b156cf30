//! Temporary file helpers for the encode-then-rename step.
//!
//! Encodes are written to a temporary path in the output directory and only
//! renamed into place on success, so a failed run never leaves a partial
//! output behind.

use std::path::{Path, PathBuf};

/// Returns a temporary file path with a random suffix. Does not create the file.
pub fn create_temp_file_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    use rand::distributions::Alphanumeric;
    use rand::{Rng, thread_rng};

    let random_suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    let filename = format!(".{prefix}_{random_suffix}.{extension}");
    dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_shape() {
        let path = create_temp_file_path(Path::new("/tmp"), "encode", "mp4");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(".encode_"));
        assert!(name.ends_with(".mp4"));
        assert_eq!(path.parent().unwrap(), Path::new("/tmp"));
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let a = create_temp_file_path(Path::new("/tmp"), "encode", "mp4");
        let b = create_temp_file_path(Path::new("/tmp"), "encode", "mp4");
        assert_ne!(a, b);
    }
}
