//! `taskfile delete` command.

use crate::repository::TaskRepository;

/// Deletes a task. Prints nothing on success.
///
/// # Errors
///
/// Returns an error string if the task does not exist or the store cannot be updated.
pub async fn run(repo: &TaskRepository, id: &str) -> Result<(), String> {
    repo.delete(id).await.map_err(super::report)
}
