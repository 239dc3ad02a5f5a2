//! Task records persisted to a single JSON file.
//!
//! [`JsonFileEngine`] owns the on-disk document and replaces it atomically.
//! [`TaskRepository`] layers entity rules and a serialized
//! load-modify-save cycle on top, so concurrent callers never lose an
//! update or observe a half-written file.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod ports;
pub mod repository;
pub mod snapshot;
pub mod task;

pub use config::StoreConfig;
pub use context::StoreContext;
pub use engine::JsonFileEngine;
pub use error::{StoreError, StoreResult};
pub use repository::TaskRepository;
pub use snapshot::Snapshot;
pub use task::{NewTask, Task, TaskPatch};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli, &mut std::io::stdout().lock())
}
