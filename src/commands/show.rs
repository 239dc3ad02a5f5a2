//! `taskfile show` command.

use std::io::Write;

use super::print_json;
use crate::repository::TaskRepository;

/// Prints one task.
///
/// # Errors
///
/// Returns an error string if the task does not exist or the store cannot be read.
pub async fn run(repo: &TaskRepository, out: &mut dyn Write, id: &str) -> Result<(), String> {
    let task = repo.get_by_id(id).await.map_err(super::report)?;
    print_json(out, &task)
}
