//! Path validation run before any bytes are read or written.
//!
//! Both checks fail fast so that a bad input or output location never
//! leaves a partial file behind.

use crate::error::{AigcError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Validate that the input exists, is a regular file and can be opened.
pub fn validate_input_readable(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| AigcError::missing_input(path, e))?;
    if metadata.is_dir() {
        return Err(AigcError::missing_input(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
        ));
    }

    // Opening is enough to prove readability; the handle is dropped unread
    File::open(path).map_err(|e| AigcError::missing_input(path, e))?;
    Ok(())
}

/// Validate that the directory containing `output` exists and is not
/// read-only by its permission bits.
///
/// Returns that directory. A bare file name resolves to the current
/// directory. Permission bits cannot tell whether this process may create
/// files there (ownership, ACLs), so the tagger confirms it by creating its
/// temp file before any input is read.
pub fn validate_output_writable(output: &Path) -> Result<PathBuf> {
    let dir = output_dir(output);

    let metadata = fs::metadata(&dir)
        .map_err(|e| AigcError::unwritable(&dir, format!("directory unavailable: {e}")))?;
    if !metadata.is_dir() {
        return Err(AigcError::unwritable(&dir, "not a directory"));
    }
    if metadata.permissions().readonly() {
        return Err(AigcError::unwritable(&dir, "directory is read-only"));
    }

    Ok(dir)
}

/// Directory an output file will be created in
pub fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_readable_valid() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("in.wav");
        fs::write(&file_path, b"RIFF").unwrap();

        assert!(validate_input_readable(&file_path).is_ok());
    }

    #[test]
    fn test_validate_input_readable_missing() {
        let path = Path::new("/this/path/does/not/exist/hopefully/12345.wav");
        let result = validate_input_readable(path);
        assert!(matches!(result, Err(AigcError::MissingInput { .. })));
        assert!(result.unwrap_err().to_string().contains("12345.wav"));
    }

    #[test]
    fn test_validate_input_readable_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_input_readable(temp_dir.path());
        assert!(matches!(result, Err(AigcError::MissingInput { .. })));
    }

    #[test]
    fn test_validate_output_writable() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.wav");

        let dir = validate_output_writable(&output).unwrap();
        assert_eq!(dir, temp_dir.path());
    }

    #[test]
    fn test_validate_output_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("missing").join("out.wav");

        let result = validate_output_writable(&output);
        assert!(matches!(result, Err(AigcError::UnwritablePath { .. })));
    }

    #[test]
    fn test_output_dir_of_bare_file_name() {
        assert_eq!(output_dir(Path::new("out.wav")), PathBuf::from("."));
        assert_eq!(output_dir(Path::new("a/out.wav")), PathBuf::from("a"));
    }
}
