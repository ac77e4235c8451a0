//! Add-task form for the terminal user interface.

use crate::tui::input::InputField;

/// Index of the title field.
pub const TITLE_FIELD: usize = 0;
/// Index of the description field.
pub const DESCRIPTION_FIELD: usize = 1;
/// Index of the category field.
pub const CATEGORY_FIELD: usize = 2;

const FIELD_COUNT: usize = 3;

/// The three text fields of the add-task form plus the active field index.
#[derive(Clone, Default)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub category: InputField,
    pub current_field: usize,
}

impl TaskForm {
    /// Create an empty form with the title field active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next field, wrapping around.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    /// Move to the previous field, wrapping around.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    fn active_mut(&mut self) -> &mut InputField {
        match self.current_field {
            TITLE_FIELD => &mut self.title,
            DESCRIPTION_FIELD => &mut self.description,
            _ => &mut self.category,
        }
    }

    /// Type a character into the active field.
    pub fn handle_char(&mut self, c: char) {
        self.active_mut().handle_char(c);
    }

    /// Backspace in the active field.
    pub fn handle_backspace(&mut self) {
        self.active_mut().handle_backspace();
    }

    /// Cursor movement in the active field.
    pub fn handle_left_right(&mut self, right: bool) {
        if right {
            self.active_mut().move_cursor_right();
        } else {
            self.active_mut().move_cursor_left();
        }
    }
}
