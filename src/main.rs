//! # todo - File-backed to-do list CLI
//!
//! A small, single-user task manager. Tasks (title, description, category,
//! completion flag) live in one JSON file that is rewritten in full after
//! every change, so disk is never more than one completed operation behind
//! memory.
//!
//! ## Quick start
//!
//! ```bash
//! # Add tasks
//! todo add "Buy milk" --category Errand
//! todo add "Write report" --desc "Quarterly numbers" --category Work
//!
//! # List, search, filter
//! todo list
//! todo list --search report --category Work
//!
//! # Toggle / delete by the position `list` printed
//! todo toggle 1 --search report
//! todo delete 2
//!
//! # Interactive UI
//! todo ui
//! ```
//!
//! Data is stored in `~/.todo/tasks.json` unless `--db` points elsewhere.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod store;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use error::Error;
use store::TaskStore;
use view::TaskView;

fn main() {
    let cli = Cli::parse();

    // Completions never touch the task file.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let db_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_dir = PathBuf::from(home).join(".todo");
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
            std::process::exit(1);
        }
        data_dir.join("tasks.json")
    });

    let store = match TaskStore::load(&db_path) {
        Ok(store) => store,
        Err(e @ Error::CorruptState { .. }) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Fix or move the file to recover its contents, or delete it to start with an empty list."
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let mut view = TaskView::new(store);

    match cli.command {
        Commands::Completions { .. } => unreachable!("handled above"),

        Commands::Ui => cmd_ui(view),

        Commands::Add { title, desc, category } => cmd_add(&mut view, title, desc, category),

        Commands::List { search, category } => cmd_list(&mut view, search, category),

        Commands::View { position, search, category } =>
            cmd_view(&mut view, position, search, category),

        Commands::Toggle { position, search, category } =>
            cmd_toggle(&mut view, position, search, category),

        Commands::Delete { position, search, category } =>
            cmd_delete(&mut view, position, search, category),

        Commands::Categories => cmd_categories(&view),
    }
}
