//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Get the output folder for a username under the base download directory.
pub fn user_folder(base_dir: &Path, username: &str) -> PathBuf {
    base_dir.join(username)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Generate the sequentially numbered filename for a downloaded image.
///
/// Sequence numbers are session-local; there is no collision check against
/// files left over from earlier runs.
pub fn numbered_filename(username: &str, sequence: usize) -> String {
    format!("{}_{:04}.jpg", username, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_folder() {
        let path = user_folder(Path::new("downloads"), "somebody");
        assert_eq!(path, PathBuf::from("downloads/somebody"));
    }

    #[test]
    fn test_numbered_filename() {
        assert_eq!(numbered_filename("somebody", 1), "somebody_0001.jpg");
        assert_eq!(numbered_filename("somebody", 42), "somebody_0042.jpg");
        assert_eq!(numbered_filename("somebody", 12345), "somebody_12345.jpg");
    }

    #[test]
    fn test_ensure_dir_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("a").join("b");

        ensure_dir(&target).unwrap();
        assert!(target.is_dir());

        // Second call on an existing directory is a no-op
        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
    }
}
