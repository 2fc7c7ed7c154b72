//! Navigation orchestration methods
//!
//! Methods for traversing the directory hierarchy:
//! - Entering directories and going back to the parent
//! - Moving the cursor up/down/page/jump
//! - Applying directory load results

use crate::logic::{self, file::PreviewClass};
use crate::messages::Task;
use crate::model::{Entry, Model};

impl Model {
    /// Task that reloads the current directory
    pub fn reload(&self) -> Task {
        Task::LoadDirectory {
            path: self.navigation.current_path.clone(),
        }
    }

    /// Move the cursor by `delta` and refresh the preview
    pub fn move_cursor(&mut self, delta: isize) -> Vec<Task> {
        let (cursor, offset) = logic::navigation::move_cursor(
            self.navigation.cursor,
            self.navigation.offset,
            delta,
            self.navigation.entries.len(),
            self.visible_lines(),
        );
        self.navigation.cursor = cursor;
        self.navigation.offset = offset;
        self.refresh_preview().into_iter().collect()
    }

    /// Select an entry by index (ignored when out of range)
    pub fn select(&mut self, index: usize) -> Vec<Task> {
        if index >= self.navigation.entries.len() {
            return Vec::new();
        }
        self.navigation.cursor = index;
        self.navigation.offset =
            logic::navigation::scroll_to(index, self.navigation.offset, self.visible_lines());
        self.refresh_preview().into_iter().collect()
    }

    /// Enter the directory under the cursor
    ///
    /// On a file this only sets a status message.
    pub fn enter_directory(&mut self) -> Vec<Task> {
        let Some(entry) = self.current_entry() else {
            return Vec::new();
        };

        if !entry.is_dir {
            let message = format!("Cannot open file: {}", entry.name);
            self.ui.set_status(message);
            return Vec::new();
        }

        let path = entry.path.clone();
        tracing::debug!(path = %path, "entering directory");

        self.navigation.current_path = path;
        self.navigation.previous_dir = None;
        self.navigation.reset_position();
        self.preview.invalidate();
        vec![self.reload()]
    }

    /// Go to the parent directory, remembering where we came from
    pub fn go_back(&mut self) -> Vec<Task> {
        let current = self.navigation.current_path.clone();
        if current == "/" {
            return Vec::new();
        }

        self.navigation.previous_dir = Some(logic::path::base_name(&current));
        self.navigation.current_path = logic::path::parent(&current);
        self.navigation.reset_position();
        self.preview.invalidate();

        tracing::debug!(from = %current, to = %self.navigation.current_path, "going back");
        vec![self.reload()]
    }

    /// Replace the entry list with a fresh listing
    ///
    /// Results for a directory other than the current one are stale and
    /// dropped. After "back", the cursor lands on the directory we left.
    pub fn apply_directory(&mut self, path: &str, entries: Vec<Entry>) -> Vec<Task> {
        if path != self.navigation.current_path {
            tracing::debug!(
                path = %path,
                current = %self.navigation.current_path,
                "discarding stale directory listing"
            );
            return Vec::new();
        }

        self.navigation.entries = entries;
        self.ui.error = None;

        let visible = self.visible_lines();
        if let Some(name) = self.navigation.previous_dir.take() {
            if let Some(index) = self.navigation.entries.iter().position(|e| e.name == name) {
                self.navigation.cursor = index;
                self.navigation.offset =
                    logic::navigation::scroll_to(index, self.navigation.offset, visible);
            }
        }

        let (cursor, offset) = logic::navigation::clamp_position(
            self.navigation.cursor,
            self.navigation.offset,
            self.navigation.entries.len(),
            visible,
        );
        self.navigation.cursor = cursor;
        self.navigation.offset = offset;

        self.refresh_preview().into_iter().collect()
    }

    /// Record a failed listing; the current entries stay as they are
    pub fn directory_failed(&mut self, path: &str, error: &str) {
        if path != self.navigation.current_path {
            return;
        }
        tracing::warn!(path = %path, error = %error, "directory load failed");
        self.ui.set_error(format!("Failed to load directory: {}", error));
    }

    /// Adopt a new terminal size, keeping the cursor visible
    ///
    /// Image previews are scaled to the pane, so a selected image is
    /// requested again for the new size.
    pub fn resize(&mut self, width: u16, height: u16) -> Vec<Task> {
        let changed = (width, height) != (self.ui.width, self.ui.height);
        self.ui.width = width;
        self.ui.height = height;
        let (cursor, offset) = logic::navigation::clamp_position(
            self.navigation.cursor,
            self.navigation.offset,
            self.navigation.entries.len(),
            self.visible_lines(),
        );
        self.navigation.cursor = cursor;
        self.navigation.offset = offset;

        let image_selected = self.current_entry().map_or(false, |entry| {
            !entry.is_dir && logic::file::classify(&entry.path) == PreviewClass::Image
        });
        if changed && image_selected {
            self.refresh_preview().into_iter().collect()
        } else {
            Vec::new()
        }
    }
}
