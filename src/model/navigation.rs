//! Navigation Model
//!
//! This sub-model contains all state related to navigation:
//! current directory, its entries, and cursor/scroll position.

use super::entry::Entry;

/// Navigation state (directory, entries, cursor)
#[derive(Clone, Debug)]
pub struct NavigationModel {
    /// Absolute path of the listed directory
    pub current_path: String,

    /// Name of the directory just left via "back", consumed by the next load
    pub previous_dir: Option<String>,

    /// Entries of `current_path`, replaced wholesale on reload
    pub entries: Vec<Entry>,

    /// Selected entry index
    pub cursor: usize,

    /// First entry shown in the list window
    pub offset: usize,
}

impl NavigationModel {
    /// Start at the root with nothing loaded
    pub fn new() -> Self {
        Self {
            current_path: "/".to_string(),
            previous_dir: None,
            entries: Vec::new(),
            cursor: 0,
            offset: 0,
        }
    }

    pub fn current_entry(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    /// Reset cursor and scroll to the top
    pub fn reset_position(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }
}

impl Default for NavigationModel {
    fn default() -> Self {
        Self::new()
    }
}
