//! `std::fs`-backed filesystem with durable writes.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Real disk I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write_synced(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)?;
        sync_parent(to);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}

// Persists the directory entry after a rename. Best effort: the rename has
// already happened and some platforms cannot open directories.
#[cfg(unix)]
fn sync_parent(path: &Path) {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("taskfile_disk_fs_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_reads_as_none_without_creating_it() {
        let dir = scratch_dir("missing");
        let path = dir.join("absent.json");

        assert!(DiskFileSystem.read(&path).unwrap().is_none());
        assert!(!path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rename_replaces_existing_target() {
        let dir = scratch_dir("rename");
        let target = dir.join("db.json");
        let staged = dir.join(".db.json.tmp");

        DiskFileSystem.write_synced(&target, "old").unwrap();
        DiskFileSystem.write_synced(&staged, "new").unwrap();
        DiskFileSystem.rename(&staged, &target).unwrap();

        assert_eq!(DiskFileSystem.read(&target).unwrap().as_deref(), Some(&b"new"[..]));
        assert!(!staged.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
