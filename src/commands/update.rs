//! `taskfile update` command.

use std::io::Write;

use chrono::NaiveDate;

use super::print_json;
use crate::repository::TaskRepository;
use crate::task::TaskPatch;

/// Builds a patch from command-line flags. Flags left off stay omitted.
#[must_use]
pub fn patch(
    title: Option<&str>,
    description: Option<&str>,
    clear_description: bool,
    due: Option<NaiveDate>,
    clear_due: bool,
    completed: Option<bool>,
) -> TaskPatch {
    let mut patch = TaskPatch::default();
    if let Some(title) = title {
        patch = patch.title(title);
    }
    if let Some(description) = description {
        patch = patch.description(description);
    } else if clear_description {
        patch = patch.clear_description();
    }
    if let Some(due) = due {
        patch = patch.due_date(due);
    } else if clear_due {
        patch = patch.clear_due_date();
    }
    if let Some(completed) = completed {
        patch = patch.completed(completed);
    }
    patch
}

/// Applies a patch and prints the updated task.
///
/// # Errors
///
/// Returns an error string if the task does not exist, the patch is
/// invalid, or the store cannot be updated.
pub async fn run(
    repo: &TaskRepository,
    out: &mut dyn Write,
    id: &str,
    patch: TaskPatch,
) -> Result<(), String> {
    let task = repo.update(id, patch).await.map_err(super::report)?;
    print_json(out, &task)
}
