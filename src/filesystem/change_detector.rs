use std::path::Path;

use derive_more::Display;
use tracing::debug;

use crate::ext::BestEffortPathExt;
use crate::filesystem::FileOperations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChangeReason {
    #[display("length differs")]
    LengthMismatch,
    #[display("content differs")]
    ContentMismatch,
    #[display("existing file could not be read")]
    Unreadable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChange {
    Unchanged,
    Changed(ChangeReason),
}

impl ContentChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, ContentChange::Changed(_))
    }
}

/// Compares `candidate` with the bytes currently stored at `path`.
///
/// Any failure to inspect the existing file counts as a change, so the caller
/// rewrites it instead of serving bytes it could not verify.
pub fn detect_change(
    candidate: &[u8],
    path: &Path,
    file_operations: &dyn FileOperations,
) -> ContentChange {
    let existing_len = match file_operations.size(path) {
        Ok(len) => len,
        Err(err) => {
            debug!("Cannot stat {}: {err}", path.best_effort_path_display());
            return ContentChange::Changed(ChangeReason::Unreadable);
        }
    };

    if existing_len != candidate.len() as u64 {
        return ContentChange::Changed(ChangeReason::LengthMismatch);
    }

    match file_operations.read(path) {
        Ok(existing) if existing == candidate => ContentChange::Unchanged,
        Ok(_) => ContentChange::Changed(ChangeReason::ContentMismatch),
        Err(err) => {
            debug!("Cannot read {}: {err}", path.best_effort_path_display());
            ContentChange::Changed(ChangeReason::Unreadable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::LocalFileOperations;
    use crate::filesystem::test_support::RecordingFileOperations;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    #[case("hello", "hello", ContentChange::Unchanged)]
    #[case("hello", "hello!", ContentChange::Changed(ChangeReason::LengthMismatch))]
    #[case("hello", "world", ContentChange::Changed(ChangeReason::ContentMismatch))]
    #[case("", "", ContentChange::Unchanged)]
    #[case("special chars: äöü🚀", "special chars: äöü🚀", ContentChange::Unchanged)]
    fn detects_changes_against_existing_file(
        #[case] existing: &str,
        #[case] candidate: &str,
        #[case] expected: ContentChange,
    ) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("existing.txt");
        fs::write(&path, existing).expect("Failed to seed file");

        let change = detect_change(candidate.as_bytes(), &path, &LocalFileOperations);

        assert_eq!(change, expected);
    }

    #[test]
    fn missing_file_counts_as_changed() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing.txt");

        let change = detect_change(b"hello", &path, &LocalFileOperations);

        assert_eq!(change, ContentChange::Changed(ChangeReason::Unreadable));
    }

    #[test]
    fn read_failure_with_equal_length_counts_as_changed() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("locked.txt");
        fs::write(&path, "hello").expect("Failed to seed file");

        let file_operations = RecordingFileOperations::unreadable();
        let change = detect_change(b"hello", &path, &file_operations);

        assert!(change.is_changed());
        assert_eq!(change, ContentChange::Changed(ChangeReason::Unreadable));
    }

    #[test]
    fn length_mismatch_skips_reading() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("big.txt");
        fs::write(&path, "x".repeat(1024)).expect("Failed to seed file");

        let file_operations = RecordingFileOperations::unreadable();
        let change = detect_change(b"x", &path, &file_operations);

        assert_eq!(change, ContentChange::Changed(ChangeReason::LengthMismatch));
        assert_eq!(file_operations.read_attempts(), 0);
    }
}
