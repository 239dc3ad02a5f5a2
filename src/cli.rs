//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI parser for `taskfile`.
#[derive(Debug, Parser)]
#[command(name = "taskfile", version, about = "Manage tasks stored in a JSON file")]
pub struct Cli {
    /// Backing JSON file. Defaults to `$TASKFILE_PATH`, then `data/database.json`.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a task and print it.
    Add {
        /// Task title.
        title: String,
        /// Longer description.
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        due: Option<NaiveDate>,
    },
    /// Print every task.
    List,
    /// Print one task.
    Show {
        /// Task id.
        id: String,
    },
    /// Change some fields of a task and print it.
    Update {
        /// Task id.
        id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description.
        #[arg(long)]
        clear_description: bool,
        /// New due date (YYYY-MM-DD).
        #[arg(long, value_name = "DATE", conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date.
        #[arg(long)]
        clear_due: bool,
        /// Mark complete (`true`) or incomplete (`false`).
        #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
        completed: Option<bool>,
    },
    /// Delete a task.
    Delete {
        /// Task id.
        id: String,
    },
}
