//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! mode, the input line, messages, clipboard and viewport.

use super::types::{ClickRecord, InputBuffer, Mode, Settings};

/// UI state and preferences
#[derive(Clone, Debug)]
pub struct UiModel {
    /// Current interaction mode
    pub mode: Mode,

    /// Shared line editor for input, command and terminal modes
    pub input: InputBuffer,

    /// Informational status message
    pub status: Option<String>,

    /// Error message (shown instead of the status)
    pub error: Option<String>,

    /// Output of the last command-mode command
    pub command_output: Option<String>,

    /// Single-slot clipboard holding one path
    pub clipboard: Option<String>,

    /// Terminal width in cells
    pub width: u16,

    /// Terminal height in cells
    pub height: u16,

    /// Last left click (for double-click detection)
    pub last_click: Option<ClickRecord>,

    pub settings: Settings,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(settings: Settings) -> Self {
        Self {
            mode: Mode::Normal,
            input: InputBuffer::new(),
            status: None,
            error: None,
            command_output: None,
            clipboard: None,
            width: 0,
            height: 0,
            last_click: None,
            settings,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_messages(&mut self) {
        self.status = None;
        self.error = None;
    }
}
