//! Typed failures returned by the engine and repository.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result alias used throughout the store.
pub type StoreResult<T> = Result<T, StoreError>;

/// Every way a store operation can fail.
///
/// None of these leave the backing file in a partially written state:
/// a failed mutation either never reached `save`, or `save` failed
/// before the atomic replace and the previous snapshot is still on disk.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Supplied fields violate an entity constraint (e.g. an empty title).
    #[error("invalid task: {0}")]
    InvalidTask(String),

    /// No task with the given id exists.
    #[error("task not found: {0}")]
    NotFound(String),

    /// The backing file exists but does not hold a valid snapshot.
    #[error("corrupt task store {}: {reason}", path.display())]
    Corrupt {
        /// Backing file that failed to decode.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The id generator produced an id that is already held by a live task.
    #[error("generated task id already in use: {0}")]
    DuplicateId(String),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub(crate) fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::Corrupt { path: path.to_path_buf(), reason: reason.into() }
    }

    /// Returns `true` for failures caused by the caller's input rather than
    /// by the store itself (invalid fields or an unknown id).
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidTask(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = StoreError::NotFound("abc".into());
        assert_eq!(err.to_string(), "task not found: abc");

        let err = StoreError::corrupt(Path::new("/data/db.json"), "expected an array");
        assert_eq!(err.to_string(), "corrupt task store /data/db.json: expected an array");
    }

    #[test]
    fn io_error_keeps_its_source() {
        let err = StoreError::io(
            Path::new("/data/db.json"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let source = std::error::Error::source(&err).expect("io error should carry a source");
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn only_input_failures_are_caller_errors() {
        assert!(StoreError::InvalidTask("empty".into()).is_caller_error());
        assert!(StoreError::NotFound("x".into()).is_caller_error());
        assert!(!StoreError::corrupt(Path::new("a"), "b").is_caller_error());
        assert!(!StoreError::DuplicateId("x".into()).is_caller_error());
    }
}
