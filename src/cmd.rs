//! Command implementations for the CLI interface.
//!
//! Every mutating command goes through [`TaskView`]: positions on the
//! command line are the 1-based positions `list` prints for the same
//! `--search`/`--category` criteria, and the view resolves them to
//! absolute store positions before anything is deleted or toggled.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::collections::BTreeMap;

use crate::error::Error;
use crate::view::{CategoryFilter, TaskView};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI.
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task. Must be non-empty.
        title: String,
        /// Optional longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Category label. Defaults to "General".
        #[arg(long, default_value = "")]
        category: String,
    },

    /// List tasks, optionally narrowed by search text and category.
    List {
        /// Case-insensitive text matched against title or description.
        #[arg(long, default_value = "")]
        search: String,
        /// Show only this exact category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Show full details for one task.
    View {
        /// Position in the printed list (1-based).
        position: usize,
        /// Search text the position was read against.
        #[arg(long, default_value = "")]
        search: String,
        /// Category the position was read against.
        #[arg(long)]
        category: Option<String>,
    },

    /// Toggle the completion flag on a task.
    Toggle {
        /// Position in the printed list (1-based).
        position: usize,
        /// Search text the position was read against.
        #[arg(long, default_value = "")]
        search: String,
        /// Category the position was read against.
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a task.
    Delete {
        /// Position in the printed list (1-based).
        position: usize,
        /// Search text the position was read against.
        #[arg(long, default_value = "")]
        search: String,
        /// Category the position was read against.
        #[arg(long)]
        category: Option<String>,
    },

    /// List distinct categories with usage counts.
    Categories,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn category_filter(category: Option<String>) -> CategoryFilter {
    category.map_or(CategoryFilter::All, |c| CategoryFilter::from_selector(&c))
}

/// Convert a 1-based CLI position into a 0-based view index.
fn view_index(position: usize, view: &TaskView) -> usize {
    match position.checked_sub(1) {
        Some(i) if i < view.len() => i,
        _ => {
            eprintln!(
                "Error: {}",
                Error::SelectionOutOfRange {
                    index: position,
                    len: view.len(),
                }
            );
            std::process::exit(1);
        }
    }
}

/// Add a new task.
pub fn cmd_add(view: &mut TaskView, title: String, desc: String, category: String) {
    if title.trim().is_empty() {
        eprintln!("Error: {}", Error::TitleRequired);
        std::process::exit(1);
    }
    if let Err(e) = view.add(&title, &desc, &category) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    println!("Added '{}' ({} tasks total)", title, view.store().len());
}

/// Print the filtered task list with 1-based positions.
pub fn cmd_list(view: &mut TaskView, search: String, category: Option<String>) {
    view.set_criteria(&search, category_filter(category));

    if view.is_empty() {
        if view.is_unfiltered() {
            println!("No tasks.");
        } else {
            println!("No tasks match the current filter.");
        }
        return;
    }
    for (i, task) in view.tasks().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        println!("{}. [{}] {} ({})", i + 1, mark, task.title, task.category);
    }
    if !view.is_unfiltered() {
        println!("({} of {} tasks shown)", view.len(), view.store().len());
    }
}

/// View detailed information about one task.
pub fn cmd_view(view: &mut TaskView, position: usize, search: String, category: Option<String>) {
    view.set_criteria(&search, category_filter(category));
    let index = view_index(position, view);
    // In range per view_index; resolve only for display of the task.
    let Some(task) = view.get(index) else {
        unreachable!("view index validated above");
    };
    println!("Title:        {}", task.title);
    println!("Category:     {}", task.category);
    println!("Completed:    {}", if task.completed { "Yes" } else { "No" });
    println!(
        "Description:  {}",
        if task.description.is_empty() {
            "-"
        } else {
            &task.description
        }
    );
}

/// Toggle the completion flag on the task at `position`.
pub fn cmd_toggle(view: &mut TaskView, position: usize, search: String, category: Option<String>) {
    view.set_criteria(&search, category_filter(category));
    let index = view_index(position, view);
    let title = view.get(index).map(|t| t.title.clone()).unwrap_or_default();
    match view.request_toggle(index) {
        Ok(()) => println!("Toggled '{}'", title),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Delete the task at `position`.
pub fn cmd_delete(view: &mut TaskView, position: usize, search: String, category: Option<String>) {
    view.set_criteria(&search, category_filter(category));
    let index = view_index(position, view);
    let title = view.get(index).map(|t| t.title.clone()).unwrap_or_default();
    match view.request_delete(index) {
        Ok(()) => println!("Deleted '{}' ({} tasks left)", title, view.store().len()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// List all distinct categories with their usage counts.
pub fn cmd_categories(view: &TaskView) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for task in view.store().tasks() {
        *counts.entry(task.category.as_str()).or_default() += 1;
    }
    println!("{:<16} {}", "Category", "Count");
    for (category, count) in counts {
        println!("{:<16} {}", category, count);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Launch the terminal user interface.
pub fn cmd_ui(view: TaskView) {
    if let Err(e) = crate::tui::run::run_tui(view) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}
