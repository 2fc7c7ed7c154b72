//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental interaction concepts.

use std::time::{Duration, Instant};

use super::entry::Entry;

/// Interaction mode; decides where keystrokes are routed
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    /// File list navigation (initial state)
    Normal,
    /// Collecting one line for a pending file operation
    Input(InputKind),
    /// One-shot command line, output shown under the file list
    Command,
    /// Full-screen embedded shell
    Terminal,
    /// Static key binding overlay
    Help,
}

/// The file operation an input line is collected for
///
/// Rename and delete capture their target when the prompt opens, so a reload
/// in the meantime cannot redirect the operation to another entry.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    NewFile,
    NewDirectory,
    Rename { target: Entry },
    Delete { target: Entry },
}

impl InputKind {
    pub fn prompt(&self) -> String {
        match self {
            InputKind::NewFile => "New file name:".to_string(),
            InputKind::NewDirectory => "New directory name:".to_string(),
            InputKind::Rename { .. } => "New name:".to_string(),
            InputKind::Delete { target } => format!("Delete {}? (y/n):", target.name),
        }
    }
}

/// Single-line text buffer with a character cursor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    /// Cursor position in characters, `0..=len`
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the contents and put the cursor at the end
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take the contents, leaving the buffer empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Text before the cursor (for placing the terminal cursor)
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }
}

/// One command run in the embedded shell
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalEntry {
    pub number: u64,
    /// Directory shown in the browser when the command was submitted
    pub path: String,
    pub command: String,
    pub output: String,
    pub error: Option<String>,
    /// Still waiting for the command to finish
    pub pending: bool,
}

/// Last left click, for double-click detection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickRecord {
    pub at: Instant,
    pub row: u16,
}

/// Tunable interaction parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub show_preview: bool,
    /// Maximum gap between the two clicks of a double-click
    pub double_click_window: Duration,
    /// Rough number of display lines per terminal history entry, used to
    /// bound scrolling
    pub history_lines_per_entry: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_preview: true,
            double_click_window: Duration::from_millis(500),
            history_lines_per_entry: 3,
        }
    }
}
