//! Filesystem port used by the file engine.

use std::io;
use std::path::Path;

/// The handful of file operations the engine needs for whole-file
/// snapshots and atomic replacement.
pub trait FileSystem: Send + Sync {
    /// Reads a whole file as raw bytes. Decoding is up to the caller.
    ///
    /// Returns `Ok(None)` when the file does not exist. Reading never
    /// creates anything.
    ///
    /// # Errors
    ///
    /// Returns any other I/O failure.
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>>;

    /// Creates or truncates `path`, writes `contents`, and flushes the data
    /// to stable storage before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created, written or synced.
    fn write_synced(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Atomically replaces `to` with `from`.
    ///
    /// Both paths are in the same directory, so readers observe either the
    /// old or the new file, never a mix.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails; `to` is unchanged in that case.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Deletes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Creates a directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}
