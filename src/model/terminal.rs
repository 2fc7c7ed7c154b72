//! Terminal Model
//!
//! Append-only history of the embedded shell plus its scroll position.

use super::types::TerminalEntry;

#[derive(Clone, Debug, Default)]
pub struct TerminalModel {
    /// Every command of the session, oldest first
    pub history: Vec<TerminalEntry>,

    /// Number given to the next command
    pub counter: u64,

    /// Lines scrolled up from the bottom (0 = newest output visible)
    pub scroll: usize,
}

impl TerminalModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending entry and return its sequence number
    pub fn push(&mut self, path: &str, command: &str) -> u64 {
        let number = self.counter;
        self.history.push(TerminalEntry {
            number,
            path: path.to_string(),
            command: command.to_string(),
            output: String::new(),
            error: None,
            pending: true,
        });
        self.counter += 1;
        number
    }

    /// Fill in the result of command `number`
    ///
    /// Returns `false` if no such entry exists.
    pub fn complete(&mut self, number: u64, output: String, error: Option<String>) -> bool {
        match self.history.iter_mut().find(|e| e.number == number) {
            Some(entry) => {
                entry.output = output;
                entry.error = error;
                entry.pending = false;
                true
            }
            None => false,
        }
    }

    /// Scroll up by `lines`, bounded by the history size estimate
    pub fn scroll_up(&mut self, lines: usize, lines_per_entry: usize) {
        let max = self.history.len() * lines_per_entry;
        self.scroll = (self.scroll + lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}
