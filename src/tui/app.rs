//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, renders the interface, and coordinates between the
//! task list, detail view, add form, and dialogs. The app only ever tracks
//! positions within the filtered view; translating those to store
//! positions is the view controller's job.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::tui::{
    colors::{ACCENT, DARK_RED, DONE_GRAY},
    enums::AppState,
    task_form::{TaskForm, CATEGORY_FIELD, DESCRIPTION_FIELD, TITLE_FIELD},
    utils::centered_rect,
};
use crate::view::{CategoryFilter, TaskView};

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    view: TaskView,
    list_state: TableState,
    form: TaskForm,
    search_active: bool,
    status_message: String,
    detail_index: Option<usize>,
    pending_delete: Option<usize>,
}

impl App {
    /// Create a new App around a loaded view controller.
    pub fn new(view: TaskView) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            view,
            list_state: TableState::default(),
            form: TaskForm::new(),
            search_active: false,
            status_message: String::new(),
            detail_index: None,
            pending_delete: None,
        };
        app.clamp_selection();
        app
    }

    /// Keep the selected row inside the current view after a recompute.
    fn clamp_selection(&mut self) {
        if self.view.is_empty() {
            self.list_state.select(None);
        } else {
            let selected = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(selected.min(self.view.len() - 1)));
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Re-apply the current criteria with new search text.
    fn apply_search(&mut self, search: String) {
        let category = self.view.category().clone();
        self.view.set_criteria(&search, category);
        self.clamp_selection();
    }

    /// Step the category filter through the selector list.
    fn cycle_category(&mut self) {
        let categories = self.view.available_categories();
        let current = self.view.category().as_selector().to_string();
        let at = categories.iter().position(|c| *c == current).unwrap_or(0);
        let next = &categories[(at + 1) % categories.len()];
        let search = self.view.search().to_string();
        self.view
            .set_criteria(&search, CategoryFilter::from_selector(next));
        self.clamp_selection();
        self.set_status_message(format!("Category: {}", next));
    }

    /// Drop both criteria and show the full list again.
    fn clear_filters(&mut self) {
        self.view.set_criteria("", CategoryFilter::All);
        self.search_active = false;
        self.clamp_selection();
    }

    /// Submit the add form. Returns false if validation failed.
    fn submit_form(&mut self) -> bool {
        if self.form.title.value.trim().is_empty() {
            self.set_status_message("Title is required".to_string());
            return false;
        }
        let result = self.view.add(
            &self.form.title.value,
            &self.form.description.value,
            &self.form.category.value,
        );
        match result {
            Ok(()) => {
                self.clamp_selection();
                self.set_status_message("Task added".to_string());
                true
            }
            Err(e) => {
                self.set_status_message(format!("Error: {}", e));
                false
            }
        }
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.search_active {
            match key {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.apply_search(String::new());
                }
                KeyCode::Enter => {
                    self.search_active = false;
                    self.set_status_message(format!(
                        "Search: '{}' ({} tasks)",
                        self.view.search(),
                        self.view.len()
                    ));
                }
                KeyCode::Backspace => {
                    let mut search = self.view.search().to_string();
                    if search.pop().is_some() {
                        self.apply_search(search);
                    }
                }
                KeyCode::Char(c) => {
                    let mut search = self.view.search().to_string();
                    search.push(c);
                    self.apply_search(search);
                }
                _ => {}
            }
            return false;
        }

        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc => {
                if !self.view.is_unfiltered() {
                    self.clear_filters();
                } else {
                    return true;
                }
            }
            KeyCode::Up => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                } else if !self.view.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.list_state.selected() {
                    if selected + 1 < self.view.len() {
                        self.list_state.select(Some(selected + 1));
                    }
                } else if !self.view.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Enter => {
                if let Some(selected) = self.list_state.selected() {
                    if selected < self.view.len() {
                        self.detail_index = Some(selected);
                        self.state = AppState::TaskDetail;
                    }
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('t') => {
                if let Some(selected) = self.list_state.selected() {
                    match self.view.request_toggle(selected) {
                        Ok(()) => self.clamp_selection(),
                        Err(e) => self.set_status_message(format!("Error: {}", e)),
                    }
                } else {
                    self.set_status_message("No task selected".to_string());
                }
            }
            KeyCode::Char('d') => {
                if let Some(selected) = self.list_state.selected() {
                    self.pending_delete = Some(selected);
                    self.state = AppState::Confirm;
                } else {
                    self.set_status_message("No task selected".to_string());
                }
            }
            KeyCode::Char('a') => {
                self.form = TaskForm::new();
                self.state = AppState::AddTask;
            }
            KeyCode::Char('/') => {
                self.search_active = true;
            }
            KeyCode::Char('c') => {
                self.cycle_category();
            }
            KeyCode::Char('x') => {
                self.clear_filters();
                self.set_status_message("Filters cleared".to_string());
            }
            KeyCode::Char('h') => {
                self.state = AppState::Help;
            }
            _ => {}
        }
        false
    }

    /// Handle keyboard input in the task detail view.
    fn handle_detail_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.detail_index = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    /// Handle keyboard input in the add-task form.
    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Char(c) => self.form.handle_char(c),
            KeyCode::Enter => {
                if self.submit_form() {
                    self.state = AppState::TaskList;
                }
            }
            _ => {}
        }
    }

    /// Handle keyboard input in the delete confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(index) = self.pending_delete.take() {
                    match self.view.request_delete(index) {
                        Ok(()) => {
                            self.clamp_selection();
                            self.set_status_message("Task deleted".to_string());
                        }
                        Err(e) => self.set_status_message(format!("Error: {}", e)),
                    }
                }
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.clear_status_message();

                let should_quit = match self.state {
                    AppState::TaskList => self.handle_task_list_input(key.code, key.modifiers),
                    AppState::TaskDetail => {
                        self.handle_detail_input(key.code);
                        false
                    }
                    AppState::AddTask => {
                        self.handle_form_input(key.code);
                        false
                    }
                    AppState::Help => {
                        self.state = AppState::TaskList;
                        false
                    }
                    AppState::Confirm => {
                        self.handle_confirm_input(key.code);
                        false
                    }
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Render the main task list with the header and filter summary.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let filter_summary = if self.view.is_unfiltered() {
            "All tasks".to_string()
        } else {
            format!(
                "Search: '{}'  Category: {}",
                self.view.search(),
                self.view.category().as_selector()
            )
        };
        let header_text = vec![Line::from(vec![
            Span::styled("TO-DO LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                filter_summary,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        let header_cells = ["#", "Done", "Title", "Category"].iter().map(|h| {
            ratatui::widgets::Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))
        });
        let header = Row::new(header_cells)
            .style(Style::default().bg(ACCENT).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .view
            .tasks()
            .enumerate()
            .map(|(i, task)| {
                let style = if task.completed {
                    Style::default().fg(DONE_GRAY)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    ratatui::widgets::Cell::from((i + 1).to_string()),
                    ratatui::widgets::Cell::from(if task.completed { "[x]" } else { "[ ]" }),
                    ratatui::widgets::Cell::from(task.title.clone()),
                    ratatui::widgets::Cell::from(task.category.clone()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Min(25),
            Constraint::Length(16),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - Press 'h' for help",
                self.view.len(),
                self.view.store().len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.list_state);
    }

    /// Render the detailed view of a single task.
    fn render_task_detail(&mut self, f: &mut Frame, area: Rect) {
        let Some(task) = self.detail_index.and_then(|i| self.view.get(i)).cloned() else {
            self.state = AppState::TaskList;
            return;
        };

        let text = vec![
            Line::from(vec![
                Span::styled("Title:       ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.title.clone()),
            ]),
            Line::from(vec![
                Span::styled("Category:    ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.category.clone()),
            ]),
            Line::from(vec![
                Span::styled("Completed:   ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(if task.completed { "Yes" } else { "No" }),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Description:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(if task.description.is_empty() {
                "-".to_string()
            } else {
                task.description.clone()
            }),
        ];

        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Task Details"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    /// Render the add-task form with the active field highlighted.
    fn render_task_form(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let fields = [
            (TITLE_FIELD, "Title (required)", &self.form.title),
            (DESCRIPTION_FIELD, "Description", &self.form.description),
            (CATEGORY_FIELD, "Category (blank = General)", &self.form.category),
        ];
        for (index, label, field) in fields {
            let style = if self.form.current_field == index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let widget = Paragraph::new(field.value.clone())
                .style(style)
                .block(Block::default().borders(Borders::ALL).title(label));
            f.render_widget(widget, chunks[index]);
            if self.form.current_field == index {
                let column = field.value[..field.cursor].chars().count() as u16;
                f.set_cursor_position((chunks[index].x + column + 1, chunks[index].y + 1));
            }
        }

        let hint = Paragraph::new("Tab/Up/Down: switch field | Enter: save | Esc: cancel")
            .alignment(Alignment::Center);
        f.render_widget(hint, chunks[3]);
    }

    /// Render the help screen.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("  Up/Down     Move selection"),
            Line::from("  Enter       View task details"),
            Line::from("  a           Add a task"),
            Line::from("  Space / t   Toggle completed"),
            Line::from("  d           Delete (with confirmation)"),
            Line::from("  /           Type to search title/description"),
            Line::from("  c           Cycle category filter"),
            Line::from("  x           Clear search and category filter"),
            Line::from("  q / Esc     Quit (Esc clears filters first)"),
            Line::from(""),
            Line::from("  Press any key to return."),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(paragraph, area);
    }

    /// Render the delete confirmation dialog over the task list.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let title = self
            .pending_delete
            .and_then(|i| self.view.get(i))
            .map(|t| t.title.clone())
            .unwrap_or_default();

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Delete this task?",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(title),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.search_active {
            format!(
                "Search: {} (Esc to clear, Enter to confirm)",
                self.view.search()
            )
        } else {
            match self.state {
                AppState::TaskList => format!(
                    "Tasks: {}/{} | Press 'h' for help",
                    self.view.len(),
                    self.view.store().len()
                ),
                AppState::TaskDetail => "Task Details".to_string(),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Delete".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(ACCENT).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the appropriate view.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::TaskDetail => self.render_task_detail(f, chunks[0]),
            AppState::AddTask => self.render_task_form(f, chunks[0]),
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
