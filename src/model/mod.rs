//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models for maintainability:
//!
//! - **NavigationModel**: Current directory, entries, cursor and scroll
//! - **PreviewModel**: Preview pane content and its generation guard
//! - **TerminalModel**: Embedded shell history
//! - **UiModel**: Mode, input line, messages, clipboard, viewport
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state in tests
//! - No services: All I/O runs in detached tasks (see `services`)
//! - Only the update step mutates the model

pub mod entry;
pub mod navigation;
pub mod preview;
pub mod terminal;
pub mod types;
pub mod ui;

pub use entry::Entry;
pub use navigation::NavigationModel;
pub use preview::{Preview, PreviewModel};
pub use terminal::TerminalModel;
pub use types::*;
pub use ui::UiModel;

use crate::logic;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    /// Directory, entries, cursor
    pub navigation: NavigationModel,

    /// Preview pane
    pub preview: PreviewModel,

    /// Embedded shell history
    pub terminal: TerminalModel,

    /// Mode, input and messages
    pub ui: UiModel,
}

impl Model {
    /// Create initial model at the root directory
    pub fn new(settings: Settings) -> Self {
        Self {
            navigation: NavigationModel::new(),
            preview: PreviewModel::new(settings.show_preview),
            terminal: TerminalModel::new(),
            ui: UiModel::new(settings),
        }
    }

    /// Entry under the cursor (if any)
    pub fn current_entry(&self) -> Option<&Entry> {
        self.navigation.current_entry()
    }

    /// Rows available to the file list
    pub fn visible_lines(&self) -> usize {
        logic::navigation::visible_lines(self.ui.height)
    }

    /// Cell area handed to the preview pipeline, `(0, 0)` before the first resize
    pub fn preview_viewport(&self) -> (u16, u16) {
        if self.ui.width == 0 || self.ui.height == 0 {
            return (0, 0);
        }
        let cols = (self.ui.width / 2).saturating_sub(2).max(1);
        let rows = (self.visible_lines() as u16).saturating_sub(8).max(1);
        (cols, rows)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
