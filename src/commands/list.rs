//! `taskfile list` command.

use std::io::Write;

use super::print_json;
use crate::repository::TaskRepository;

/// Prints every task as a JSON array, oldest first.
///
/// # Errors
///
/// Returns an error string if the store cannot be read.
pub async fn run(repo: &TaskRepository, out: &mut dyn Write) -> Result<(), String> {
    let tasks = repo.list_all().await.map_err(super::report)?;
    print_json(out, &tasks)
}
