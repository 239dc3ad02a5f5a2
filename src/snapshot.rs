//! In-memory image of the whole store.

use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::task::Task;

/// Every task in the store, keyed by id and kept in insertion order.
///
/// Serializes as a plain JSON array, which is exactly the on-disk format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    tasks: Vec<Task>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from decoded records, rejecting duplicate ids and
    /// records that break entity invariants.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending record.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, String> {
        let mut snapshot = Self { tasks: Vec::with_capacity(tasks.len()) };
        for task in tasks {
            task.check()?;
            if snapshot.contains(&task.id) {
                return Err(format!("duplicate task id {}", task.id));
            }
            snapshot.tasks.push(task);
        }
        Ok(snapshot)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Returns `true` if a task with this id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Appends a task at the end of the insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the id is already present;
    /// the snapshot is left unchanged.
    pub fn insert(&mut self, task: Task) -> StoreResult<()> {
        if self.contains(&task.id) {
            return Err(StoreError::DuplicateId(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Removes and returns the task with this id, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Consumes the snapshot, yielding tasks in insertion order.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
