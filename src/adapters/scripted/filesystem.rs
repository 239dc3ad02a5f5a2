//! In-memory filesystem with fault injection.

use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::FileSystem;

/// Operation that [`MemoryFileSystem`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    /// `read` fails.
    Read,
    /// `write_synced` writes half of the contents, then fails.
    Write,
    /// `rename` fails without touching either path.
    Rename,
    /// `remove_file` fails and the file stays.
    Remove,
}

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    faults: HashSet<Fault>,
}

/// Keeps files in a map instead of on disk.
#[derive(Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a file in place directly, bypassing any faults.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.lock().files.insert(path.into(), contents.into());
    }

    /// Returns the contents of a file as text, if present. Invalid UTF-8
    /// is replaced rather than rejected.
    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.lock().files.get(path).map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Lists every file path, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    /// Makes every later call of the given kind fail until [`heal`](Self::heal).
    pub fn inject(&self, fault: Fault) {
        self.lock().faults.insert(fault);
    }

    /// Clears all injected faults.
    pub fn heal(&self) {
        self.lock().faults.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("memory filesystem lock poisoned")
    }
}

fn injected(fault: Fault) -> io::Error {
    io::Error::other(format!("injected {fault:?} fault"))
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        let state = self.lock();
        if state.faults.contains(&Fault::Read) {
            return Err(injected(Fault::Read));
        }
        Ok(state.files.get(path).cloned())
    }

    fn write_synced(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut state = self.lock();
        if state.faults.contains(&Fault::Write) {
            let torn: String = contents.chars().take(contents.chars().count() / 2).collect();
            state.files.insert(path.to_path_buf(), torn.into_bytes());
            return Err(injected(Fault::Write));
        }
        state.files.insert(path.to_path_buf(), contents.as_bytes().to_vec());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if state.faults.contains(&Fault::Rename) {
            return Err(injected(Fault::Rename));
        }
        let contents = state
            .files
            .remove(from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, from.display().to_string()))?;
        state.files.insert(to.to_path_buf(), contents);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if state.faults.contains(&Fault::Remove) {
            return Err(injected(Fault::Remove));
        }
        state
            .files
            .remove(path)
            .map(drop)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}
