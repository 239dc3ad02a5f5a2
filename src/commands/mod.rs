//! Command dispatch and handlers.

pub mod add;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

use std::io::Write;

use serde::Serialize;
use tracing::error;

use crate::cli::{Cli, Command};
use crate::config::StoreConfig;
use crate::context::StoreContext;
use crate::error::StoreError;
use crate::repository::TaskRepository;

/// Dispatch a parsed command against the live store.
///
/// The store path comes from `--store`, else from the environment.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli, out: &mut dyn Write) -> Result<(), String> {
    let config = cli.store.clone().map_or_else(StoreConfig::from_env, StoreConfig::new);
    dispatch_with_context(&cli.command, &StoreContext::live(), &config, out)
}

/// Dispatch a command with the given context and configuration.
///
/// # Errors
///
/// Returns an error string if the runtime cannot start or the handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &StoreContext,
    config: &StoreConfig,
    out: &mut dyn Write,
) -> Result<(), String> {
    let repo = TaskRepository::new(ctx, config.path.clone());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime.block_on(async {
        match command {
            Command::Add { title, description, due } => {
                add::run(&repo, out, title, description.as_deref(), *due).await
            }
            Command::List => list::run(&repo, out).await,
            Command::Show { id } => show::run(&repo, out, id).await,
            Command::Update {
                id,
                title,
                description,
                clear_description,
                due,
                clear_due,
                completed,
            } => {
                let patch = update::patch(
                    title.as_deref(),
                    description.as_deref(),
                    *clear_description,
                    *due,
                    *clear_due,
                    *completed,
                );
                update::run(&repo, out, id, patch).await
            }
            Command::Delete { id } => delete::run(&repo, id).await,
        }
    })
}

/// Turns a store error into the message shown to the user.
///
/// Mistakes in the request are reported as-is. Faults in the store itself
/// are logged and say that nothing was written, since no operation applies
/// a partial effect.
fn report(err: StoreError) -> String {
    if err.is_caller_error() {
        return err.to_string();
    }
    error!(error = %err, "store operation failed");
    format!("{err} (store left unchanged)")
}

/// Writes `value` as pretty JSON followed by a newline.
fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode output: {e}"))?;
    writeln!(out, "{json}").map_err(|e| format!("Failed to write output: {e}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::scripted::{MemoryFileSystem, ScriptedClock, SequentialIdGenerator};
    use crate::ports::FileSystem;
    use crate::task::Task;

    fn context(clock: ScriptedClock) -> StoreContext {
        StoreContext::live()
            .with_fs(Arc::new(MemoryFileSystem::new()) as Arc<dyn FileSystem>)
            .with_clock(clock)
            .with_id_gen(SequentialIdGenerator::new("task"))
    }

    fn execute(ctx: &StoreContext, command: &Command) -> Result<String, String> {
        let mut out = Vec::new();
        dispatch_with_context(command, ctx, &StoreConfig::new("/db.json"), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn buy_milk_walkthrough() {
        let ctx = context(ScriptedClock::from_rfc3339(&[
            "2025-01-01T09:00:00Z",
            "2025-01-01T09:05:00Z",
        ]));

        let added = execute(
            &ctx,
            &Command::Add { title: "Buy milk".into(), description: None, due: None },
        )
        .unwrap();
        let task: Task = serde_json::from_str(&added).unwrap();
        assert_eq!(task.id, "task-1");
        assert!(!task.is_completed);

        let updated = execute(
            &ctx,
            &Command::Update {
                id: "task-1".into(),
                title: None,
                description: None,
                clear_description: false,
                due: None,
                clear_due: false,
                completed: Some(true),
            },
        )
        .unwrap();
        let task: Task = serde_json::from_str(&updated).unwrap();
        assert!(task.is_completed);
        assert_eq!(task.title, "Buy milk");

        assert_eq!(execute(&ctx, &Command::Delete { id: "task-1".into() }).unwrap(), "");

        let err = execute(&ctx, &Command::Show { id: "task-1".into() }).unwrap_err();
        assert!(err.contains("not found"));

        let listed = execute(&ctx, &Command::List).unwrap();
        let tasks: Vec<Task> = serde_json::from_str(&listed).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn store_faults_are_flagged_but_caller_errors_are_not() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("/db.json", "{ broken");
        let ctx = context(ScriptedClock::new([])).with_fs(Arc::clone(&fs) as Arc<dyn FileSystem>);

        let err = execute(&ctx, &Command::List).unwrap_err();
        assert!(err.starts_with("corrupt task store /db.json"));
        assert!(err.ends_with("(store left unchanged)"));

        fs.insert("/db.json", "[]");
        let err = execute(&ctx, &Command::Show { id: "nope".into() }).unwrap_err();
        assert_eq!(err, "task not found: nope");
    }

    #[test]
    fn add_with_blank_title_fails() {
        let ctx = context(ScriptedClock::new([]));
        let err = execute(&ctx, &Command::Add { title: " ".into(), description: None, due: None })
            .unwrap_err();
        assert!(err.contains("title must not be empty"));
    }
}
