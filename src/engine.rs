//! Raw file engine: whole-snapshot load and atomic save.
//!
//! The backing file is a single JSON array of task objects. `save` never
//! writes the target in place. It stages the full document in a sibling
//! temp file, flushes it, then renames it over the target, so any reader
//! sees either the previous snapshot or the new one.
//!
//! The engine does no locking. Serializing writers is the repository's job.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::ports::FileSystem;
use crate::snapshot::Snapshot;
use crate::task::Task;

/// Loads and saves the whole store at one path.
pub struct JsonFileEngine {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl JsonFileEngine {
    /// Creates an engine for `path`. Nothing is touched until the first call.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self { path: path.into(), fs }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current snapshot.
    ///
    /// A missing file is an empty store, and is not created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read and
    /// [`StoreError::Corrupt`] if it does not decode to a valid snapshot.
    pub fn load(&self) -> StoreResult<Snapshot> {
        let Some(contents) = self.fs.read(&self.path).map_err(|e| StoreError::io(&self.path, e))?
        else {
            debug!(path = %self.path.display(), "no store file yet, starting empty");
            return Ok(Snapshot::new());
        };

        // Bytes, not a string: bad UTF-8 is malformed content, not an I/O fault.
        let tasks: Vec<Task> = serde_json::from_slice(&contents).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "store file does not parse");
            StoreError::corrupt(&self.path, e.to_string())
        })?;
        let snapshot = Snapshot::from_tasks(tasks).map_err(|reason| {
            warn!(path = %self.path.display(), %reason, "store file breaks task invariants");
            StoreError::corrupt(&self.path, reason)
        })?;

        debug!(path = %self.path.display(), tasks = snapshot.len(), "loaded store");
        Ok(snapshot)
    }

    /// Replaces the backing file with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] on any failure. The previous file is left
    /// as it was and the staged temp file is removed.
    pub fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let document = serde_json::to_string_pretty(snapshot)
            .map_err(|e| StoreError::io(&self.path, std::io::Error::other(e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let staged = self.staging_path();
        let written = self
            .fs
            .write_synced(&staged, &document)
            .and_then(|()| self.fs.rename(&staged, &self.path));
        if let Err(e) = written {
            if let Err(cleanup) = self.fs.remove_file(&staged) {
                debug!(
                    staged = %staged.display(),
                    error = %cleanup,
                    "could not remove staging file"
                );
            }
            warn!(path = %self.path.display(), error = %e, "store save failed, previous snapshot kept");
            return Err(StoreError::io(&self.path, e));
        }

        debug!(path = %self.path.display(), tasks = snapshot.len(), "saved store");
        Ok(())
    }

    // Same directory as the target so the rename cannot cross filesystems.
    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "tasks".to_string(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::{Fault, MemoryFileSystem};
    use chrono::{DateTime, Utc};

    const DB: &str = "/data/database.json";

    fn task(id: &str, title: &str) -> Task {
        let at: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        Task {
            id: id.into(),
            title: title.into(),
            description: Some("Test Description".into()),
            due_date: None,
            is_completed: false,
            created_at: at,
            updated_at: at,
        }
    }

    fn engine() -> (Arc<MemoryFileSystem>, JsonFileEngine) {
        let fs = Arc::new(MemoryFileSystem::new());
        let engine = JsonFileEngine::new(DB, Arc::clone(&fs) as Arc<dyn FileSystem>);
        (fs, engine)
    }

    #[test]
    fn missing_file_loads_empty_and_is_not_created() {
        let (fs, engine) = engine();
        assert!(engine.load().unwrap().is_empty());
        assert!(fs.paths().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let (fs, engine) = engine();
        let snapshot =
            Snapshot::from_tasks(vec![task("b", "Second"), task("a", "First")]).unwrap();

        engine.save(&snapshot).unwrap();

        assert_eq!(fs.paths(), vec![PathBuf::from(DB)]);
        assert_eq!(engine.load().unwrap(), snapshot);
    }

    #[test]
    fn saving_a_loaded_file_keeps_its_content() {
        let (fs, engine) = engine();
        fs.insert(
            DB,
            r#"[{"id":"task-1","title":"Test Task","description":null,"dueDate":"2024-12-31",
                "isCompleted":false,"createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]"#,
        );
        let before: serde_json::Value =
            serde_json::from_str(&fs.contents(Path::new(DB)).unwrap()).unwrap();

        let snapshot = engine.load().unwrap();
        engine.save(&snapshot).unwrap();

        let after: serde_json::Value =
            serde_json::from_str(&fs.contents(Path::new(DB)).unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn malformed_json_is_corrupt() {
        let (fs, engine) = engine();
        fs.insert(DB, "{ not json");
        assert!(matches!(engine.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn empty_file_is_corrupt() {
        let (fs, engine) = engine();
        fs.insert(DB, "");
        assert!(matches!(engine.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn invalid_utf8_is_corrupt() {
        let (fs, engine) = engine();
        fs.insert(DB, vec![0x5b, 0xff, 0xfe, 0x5d]);
        assert!(matches!(engine.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn timestamp_without_offset_is_corrupt() {
        let (fs, engine) = engine();
        fs.insert(
            DB,
            r#"[{"id":"a","title":"t","isCompleted":false,
                "createdAt":"2024-01-01T00:00:00","updatedAt":"2024-01-01T00:00:00"}]"#,
        );
        assert!(matches!(engine.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn object_instead_of_array_is_corrupt() {
        let (fs, engine) = engine();
        fs.insert(DB, "{}");
        assert!(matches!(engine.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn duplicate_ids_are_corrupt() {
        let (fs, engine) = engine();
        let doc = serde_json::to_string(&vec![task("a", "One"), task("a", "Two")]).unwrap();
        fs.insert(DB, doc);
        let err = engine.load().unwrap_err();
        assert!(err.to_string().contains("duplicate task id a"));
    }

    #[test]
    fn read_failure_is_io_error() {
        let (fs, engine) = engine();
        fs.inject(Fault::Read);
        assert!(matches!(engine.load(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn failed_write_keeps_previous_file_and_cleans_up() {
        let (fs, engine) = engine();
        let original = Snapshot::from_tasks(vec![task("a", "Original")]).unwrap();
        engine.save(&original).unwrap();

        fs.inject(Fault::Write);
        let next = Snapshot::from_tasks(vec![task("a", "Original"), task("b", "New")]).unwrap();
        assert!(matches!(engine.save(&next), Err(StoreError::Io { .. })));

        fs.heal();
        assert_eq!(fs.paths(), vec![PathBuf::from(DB)]);
        assert_eq!(engine.load().unwrap(), original);
    }

    #[test]
    fn failed_rename_keeps_previous_file_and_cleans_up() {
        let (fs, engine) = engine();
        let original = Snapshot::from_tasks(vec![task("a", "Original")]).unwrap();
        engine.save(&original).unwrap();

        fs.inject(Fault::Rename);
        assert!(engine.save(&Snapshot::new()).is_err());

        fs.heal();
        assert_eq!(fs.paths(), vec![PathBuf::from(DB)]);
        assert_eq!(engine.load().unwrap(), original);
    }

    #[test]
    fn failed_cleanup_still_reports_the_write_error() {
        let (fs, engine) = engine();
        let original = Snapshot::from_tasks(vec![task("a", "Original")]).unwrap();
        engine.save(&original).unwrap();

        fs.inject(Fault::Write);
        fs.inject(Fault::Remove);
        let err = engine.save(&Snapshot::new()).unwrap_err();
        assert!(err.to_string().contains("injected Write fault"));

        fs.heal();
        assert_eq!(fs.paths().len(), 2);
        assert_eq!(engine.load().unwrap(), original);
    }

    #[test]
    fn staging_file_sits_next_to_target() {
        let (_fs, engine) = engine();
        let staged = engine.staging_path();
        assert_eq!(staged.parent(), Some(Path::new("/data")));
        let name = staged.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".database.json."));
        assert!(name.ends_with(".tmp"));
    }
}
