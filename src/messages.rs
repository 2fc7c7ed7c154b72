//! Message types for the Elm Architecture pattern
//!
//! This module defines all events that flow into the update loop and all
//! detached work the update loop can request.
//!
//! Message sources:
//! - User input (keyboard, mouse, resize) from the input thread
//! - Task completions from the task runner
//!
//! Every [`Task`] completes with exactly one [`Msg`].

use crossterm::event::{KeyEvent, MouseEvent};
use std::time::Instant;

use crate::model::{Entry, Preview};

/// Unified message type for all application events
#[derive(Debug, Clone)]
pub enum Msg {
    // ============================================
    // USER INPUT
    // ============================================
    /// User pressed a key
    Key(KeyEvent),

    /// Mouse event, stamped on arrival for double-click detection
    Mouse { event: MouseEvent, at: Instant },

    /// Terminal resized
    Resize { width: u16, height: u16 },

    // ============================================
    // TASK COMPLETIONS
    // ============================================
    /// Directory listing finished for `path`
    DirectoryLoaded { path: String, entries: Vec<Entry> },

    /// Directory listing failed for `path`
    DirectoryFailed { path: String, error: String },

    /// Preview finished for the given generation
    PreviewLoaded {
        generation: u64,
        result: Result<Preview, String>,
    },

    /// Shell command finished
    CommandExecuted {
        origin: CommandOrigin,
        outcome: CommandOutcome,
    },

    /// A file operation succeeded; the directory should be reloaded
    MutationApplied { status: String },

    /// A file operation failed
    OperationFailed(String),
}

/// Where a shell command was submitted from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOrigin {
    /// Terminal mode, with the history entry number to fill in
    Terminal { sequence: u64 },
    /// Command mode prompt under the file list
    Prompt,
}

/// Captured result of a shell command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    pub output: String,
    pub exit_code: i32,
    pub error: Option<String>,
}

/// Detached work requested by the update step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    LoadDirectory {
        path: String,
    },
    GeneratePreview {
        generation: u64,
        path: String,
        width: u16,
        height: u16,
    },
    CreateFile {
        path: String,
    },
    CreateDirectory {
        path: String,
    },
    /// Files only; directories are rejected when run
    Rename {
        source: String,
        destination: String,
        is_dir: bool,
    },
    Delete {
        path: String,
        is_dir: bool,
    },
    Execute {
        line: String,
        origin: CommandOrigin,
    },
}

impl Task {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Task::LoadDirectory { .. } => "load_directory",
            Task::GeneratePreview { .. } => "generate_preview",
            Task::CreateFile { .. } => "create_file",
            Task::CreateDirectory { .. } => "create_directory",
            Task::Rename { .. } => "rename",
            Task::Delete { .. } => "delete",
            Task::Execute { .. } => "execute",
        }
    }
}
