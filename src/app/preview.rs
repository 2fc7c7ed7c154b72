//! Preview orchestration methods
//!
//! Issues preview requests tagged with a fresh generation and applies
//! results only when their generation is still live.

use crate::messages::Task;
use crate::model::{Model, Preview};

impl Model {
    /// Request a preview of the entry under the cursor
    ///
    /// Every call starts a new generation, so anything still in flight is
    /// stale from here on. Nothing to fetch (no entry, or a directory)
    /// is applied immediately as an empty preview.
    pub fn refresh_preview(&mut self) -> Option<Task> {
        if !self.preview.visible {
            return None;
        }

        let generation = self.preview.next_generation();

        match self.current_entry() {
            Some(entry) if !entry.is_dir => {
                let path = entry.path.clone();
                let (width, height) = self.preview_viewport();
                Some(Task::GeneratePreview {
                    generation,
                    path,
                    width,
                    height,
                })
            }
            _ => {
                self.preview.apply(generation, Ok(Preview::Empty));
                None
            }
        }
    }

    /// Apply a finished preview if it is still current
    pub fn apply_preview(&mut self, generation: u64, result: Result<Preview, String>) {
        if !self.preview.apply(generation, result) {
            tracing::debug!(
                generation,
                current = self.preview.generation,
                "discarding stale preview"
            );
        }
    }

    /// Show or hide the preview pane; showing it refreshes the content
    pub fn toggle_preview(&mut self) -> Vec<Task> {
        self.preview.visible = !self.preview.visible;
        if self.preview.visible {
            self.refresh_preview().into_iter().collect()
        } else {
            self.preview.invalidate();
            Vec::new()
        }
    }
}
