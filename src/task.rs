//! Task entity and the inputs used to create and patch it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{StoreError, StoreResult};

/// A single task record as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique identifier, assigned once at creation.
    pub id: String,
    /// Short summary; never empty.
    pub title: String,
    /// Longer free-form explanation.
    #[serde(default)]
    pub description: Option<String>,
    /// Date the task should be completed by.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Completion flag.
    pub is_completed: bool,
    /// When the task was created. Never changes.
    pub created_at: DateTime<Utc>,
    /// When the task was last mutated. Always `>= created_at`.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Checks the invariants a persisted record must satisfy.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("task with empty id".to_string());
        }
        if self.title.trim().is_empty() {
            return Err(format!("task {} has an empty title", self.id));
        }
        if self.updated_at < self.created_at {
            return Err(format!("task {} was updated before it was created", self.id));
        }
        Ok(())
    }
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Required title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Creates an input with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), description: None, due_date: None }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub(crate) fn validate(&self) -> StoreResult<()> {
        validate_title(&self.title)
    }
}

/// A partial update. Only fields that are `Some` are applied.
///
/// `description` and `due_date` are doubly optional so that "omitted"
/// (`None`) is distinct from "explicitly cleared" (`Some(None)`). When
/// deserialized from JSON, a key with a `null` value clears the field and
/// a missing key leaves it alone. Keys for immutable fields such as `id`
/// and `createdAt` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement or cleared description.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// Replacement or cleared due date.
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement completion flag.
    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// Sets a new title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    pub(crate) fn validate(&self) -> StoreResult<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Merges the supplied fields into `task`. Timestamps are left to the caller.
    pub(crate) fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(is_completed) = self.is_completed {
            task.is_completed = is_completed;
        }
    }
}

fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::InvalidTask("title must not be empty".to_string()));
    }
    Ok(())
}

// A present key always yields `Some`, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
