//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header and status bar accent.
pub const ACCENT: Color = Color::Rgb(0, 80, 0);
/// Background for the delete confirmation dialog.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Completed tasks are rendered dimmed.
pub const DONE_GRAY: Color = Color::DarkGray;
