//! `taskfile add` command.

use std::io::Write;

use chrono::NaiveDate;

use super::print_json;
use crate::repository::TaskRepository;
use crate::task::NewTask;

/// Creates a task and prints it.
///
/// # Errors
///
/// Returns an error string if the title is blank or the store cannot be updated.
pub async fn run(
    repo: &TaskRepository,
    out: &mut dyn Write,
    title: &str,
    description: Option<&str>,
    due: Option<NaiveDate>,
) -> Result<(), String> {
    let mut input = NewTask::new(title);
    if let Some(description) = description {
        input = input.with_description(description);
    }
    if let Some(due) = due {
        input = input.with_due_date(due);
    }

    let task = repo.create(input).await.map_err(super::report)?;
    print_json(out, &task)
}
