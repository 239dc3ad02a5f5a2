//! Task repository: entity CRUD over the file engine.
//!
//! Every mutation runs load, transform and save as one critical section
//! guarded by a single async mutex. The guard is moved into the blocking
//! task that does the file work, so it is held until the file work ends
//! (even if the caller's future is dropped) and released on every exit
//! path, including a failed save.
//!
//! Reads take no lock. Saves replace the file with an atomic rename, so a
//! read always decodes a complete, committed snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::context::StoreContext;
use crate::engine::JsonFileEngine;
use crate::error::{StoreError, StoreResult};
use crate::ports::{Clock, IdGenerator};
use crate::snapshot::Snapshot;
use crate::task::{NewTask, Task, TaskPatch};

/// File-backed task store safe to share between concurrent callers.
///
/// Wrap it in an `Arc` to share it across spawned tasks.
pub struct TaskRepository {
    engine: Arc<JsonFileEngine>,
    clock: Arc<dyn Clock>,
    id_gen: Arc<dyn IdGenerator>,
    write_lock: Arc<Mutex<()>>,
}

impl TaskRepository {
    /// Creates a repository over the file at `path`, using the context's
    /// clock, filesystem and id policy.
    #[must_use]
    pub fn new(ctx: &StoreContext, path: impl Into<PathBuf>) -> Self {
        Self {
            engine: Arc::new(JsonFileEngine::new(path, Arc::clone(&ctx.fs))),
            clock: Arc::clone(&ctx.clock),
            id_gen: Arc::clone(&ctx.id_gen),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.engine.path()
    }

    /// Creates a task with a fresh id, `isCompleted = false` and
    /// `createdAt == updatedAt == now`.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidTask`] for a blank title,
    /// [`StoreError::DuplicateId`] if the generator returns a live id, or
    /// any load/save failure.
    pub async fn create(&self, input: NewTask) -> StoreResult<Task> {
        input.validate()?;
        let clock = Arc::clone(&self.clock);
        let id_gen = Arc::clone(&self.id_gen);

        let task = self
            .mutate(move |snapshot| {
                let now = clock.now();
                let task = Task {
                    id: id_gen.generate_id(),
                    title: input.title,
                    description: input.description,
                    due_date: input.due_date,
                    is_completed: false,
                    created_at: now,
                    updated_at: now,
                };
                snapshot.insert(task.clone())?;
                Ok(task)
            })
            .await?;

        info!(id = %task.id, "created task");
        Ok(task)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no task has this id, or any load failure.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Task> {
        let snapshot = self.read().await?;
        snapshot.get(id).cloned().ok_or_else(|| not_found(id))
    }

    /// Every task in insertion order. An empty store yields an empty list.
    ///
    /// # Errors
    ///
    /// Any load failure.
    pub async fn list_all(&self) -> StoreResult<Vec<Task>> {
        Ok(self.read().await?.into_tasks())
    }

    /// Applies the supplied fields of `patch` and bumps `updatedAt`, even
    /// when no value actually changes.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidTask`] for a blank replacement title,
    /// [`StoreError::NotFound`] if no task has this id, or any load/save
    /// failure.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> StoreResult<Task> {
        patch.validate()?;
        let clock = Arc::clone(&self.clock);
        let target = id.to_string();

        let task = self
            .mutate(move |snapshot| {
                let task = snapshot.get_mut(&target).ok_or_else(|| not_found(&target))?;
                patch.apply_to(task);
                task.updated_at = clock.now().max(task.created_at);
                Ok(task.clone())
            })
            .await?;

        info!(id = %task.id, "updated task");
        Ok(task)
    }

    /// Removes a task. Its id is never handed out again.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no task has this id, or any load/save
    /// failure.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let target = id.to_string();
        self.mutate(move |snapshot| {
            snapshot.remove(&target).map(drop).ok_or_else(|| not_found(&target))
        })
        .await?;

        info!(%id, "deleted task");
        Ok(())
    }

    /// Runs `op` against the current snapshot inside the write critical
    /// section and saves the result if `op` succeeds.
    async fn mutate<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Snapshot) -> StoreResult<T> + Send + 'static,
    {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let engine = Arc::clone(&self.engine);

        self.on_blocking_pool(move || {
            let _guard = guard;
            let mut snapshot = engine.load()?;
            let output = op(&mut snapshot)?;
            engine.save(&snapshot)?;
            Ok(output)
        })
        .await
    }

    async fn read(&self) -> StoreResult<Snapshot> {
        let engine = Arc::clone(&self.engine);
        self.on_blocking_pool(move || engine.load()).await
    }

    async fn on_blocking_pool<T, F>(&self, work: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce() -> StoreResult<T> + Send + 'static,
    {
        match tokio::task::spawn_blocking(work).await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(StoreError::io(self.path(), std::io::Error::other(e))),
        }
    }
}

fn not_found(id: &str) -> StoreError {
    warn!(%id, "task not found");
    StoreError::NotFound(id.to_string())
}
