//! CLI entry point for tasklist.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use tasklist_core::{MemoryStore, TaskListStore};
use tasklist_store_file::FileStore;

mod commands;
mod config;
mod tui;

/// A single to-do list kept in a local store.
#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    version,
    about = "tasklist: one to-do list, saved after every change"
)]
struct Cli {
    /// Directory holding the stored list (overrides the config file).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a task to the end of the list.
    Add {
        /// Task text; multiple words are joined with spaces.
        #[arg(required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show the list.
    Ls {
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
        /// Only tasks that are still open.
        #[arg(long, conflicts_with = "completed")]
        pending: bool,
        /// Only completed tasks.
        #[arg(long)]
        completed: bool,
    },

    /// Replace the text of a task, keeping its completion state.
    Edit {
        /// Task number as shown by `ls`.
        index: usize,
        /// New text; multiple words are joined with spaces.
        #[arg(required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Mark a task complete, or reopen it.
    Toggle {
        /// Task number as shown by `ls`.
        index: usize,
    },

    /// Delete a task.
    Rm {
        /// Task number as shown by `ls`.
        index: usize,
    },

    /// Delete every task.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Launch interactive terminal UI.
    Tui {
        /// Keep the list in memory only; nothing is read or written.
        #[arg(long)]
        ephemeral: bool,
    },

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a configuration file with the default settings.
    Init {
        /// Destination (defaults to the platform config directory).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite without asking.
        #[arg(long)]
        force: bool,
    },
}

/// Output format for `ls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LsFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let Cli {
        data_dir,
        config,
        cmd,
    } = Cli::parse();

    if should_install_tracing(&cmd) {
        install_tracing();
    }

    execute_command(data_dir, config, cmd)
}

fn execute_command(data_dir: Option<PathBuf>, config_path: Option<PathBuf>, command: Command) -> Result<()> {
    if let Command::Config {
        cmd: ConfigCommand::Init { output, force },
    } = command
    {
        let stdin = io::stdin();
        return config::init_config(output.as_deref(), force, &mut stdin.lock(), &mut io::stdout());
    }

    let config = config::load_config(config_path.as_deref())?;
    match command {
        Command::Tui { ephemeral: true } => {
            let store = TaskListStore::open(MemoryStore::new());
            tui::run(store, config.tui.keybindings)
        }

        Command::Tui { ephemeral: false } => {
            let store = TaskListStore::open(open_file_store(&config, data_dir)?);
            tui::run(store, config.tui.keybindings)
        }

        other => {
            let mut store = TaskListStore::open(open_file_store(&config, data_dir)?);
            let stdin = io::stdin();
            commands::run(other, &mut store, &mut stdin.lock(), &mut io::stdout())
        }
    }
}

fn open_file_store(config: &config::Config, data_dir: Option<PathBuf>) -> Result<FileStore> {
    let dir = config.resolve_data_dir(data_dir)?;
    FileStore::open(&dir).with_context(|| format!("Failed to open data directory {}", dir.display()))
}

const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Tui { .. })
}

fn install_tracing() {
    // RUST_LOG overrides the default; keep stdout for command output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}
