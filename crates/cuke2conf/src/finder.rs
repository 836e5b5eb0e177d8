//! Feature file discovery.

use std::fs;
use std::path::{Path, PathBuf};

/// Extension identifying feature files.
const FEATURE_EXTENSION: &str = "feature";

/// Error while locating feature files.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FinderError {
    /// Input path does not exist.
    #[error("input path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error while walking the directory tree.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Locates `.feature` files under an input path.
///
/// A single file is returned as-is; a directory is walked recursively.
/// Matches are sorted so batch output order is deterministic.
pub(crate) struct FeatureFinder {
    input: PathBuf,
}

impl FeatureFinder {
    pub(crate) fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub(crate) fn find_features(&self) -> Result<Vec<PathBuf>, FinderError> {
        if !self.input.exists() {
            return Err(FinderError::NotFound(self.input.clone()));
        }
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }
        let mut features = Vec::new();
        collect(&self.input, &mut features)?;
        features.sort();
        Ok(features)
    }
}

/// Collect feature files under `dir`, skipping hidden entries.
fn collect(dir: &Path, features: &mut Vec<PathBuf>) -> Result<(), FinderError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            collect(&path, features)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext == FEATURE_EXTENSION)
        {
            features.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, "Feature: stub\n").unwrap();
    }

    #[test]
    fn test_single_file_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("login.feature");
        touch(&file);
        let features = FeatureFinder::new(&file).find_features().unwrap();
        assert_eq!(features, vec![file]);
    }

    #[test]
    fn test_directory_walk_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("b.feature"));
        touch(&dir.path().join("nested/a.feature"));
        touch(&dir.path().join("notes.txt"));

        let features = FeatureFinder::new(dir.path()).find_features().unwrap();
        assert_eq!(
            features,
            vec![
                dir.path().join("b.feature"),
                dir.path().join("nested/a.feature"),
            ]
        );
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".hidden.feature"));
        touch(&dir.path().join("shown.feature"));
        let features = FeatureFinder::new(dir.path()).find_features().unwrap();
        assert_eq!(features, vec![dir.path().join("shown.feature")]);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let result = FeatureFinder::new("/nonexistent/path").find_features();
        assert!(matches!(result, Err(FinderError::NotFound(_))));
    }
}
