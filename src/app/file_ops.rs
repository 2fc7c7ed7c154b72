//! File operation methods
//!
//! User actions that mutate the tree or talk to the shell:
//! - Prompting for new files, directories, renames and deletions
//! - Submitting or cancelling the input line
//! - Command mode
//! - Copying paths to the clipboard

use crate::logic;
use crate::messages::{CommandOrigin, Task};
use crate::model::{InputKind, Mode, Model};

impl Model {
    /// Open the input line for a file operation
    ///
    /// Rename and delete need an entry under the cursor; rename starts
    /// prefilled with the current name.
    pub fn start_input(&mut self, kind: InputKind) {
        self.ui.clear_messages();
        match &kind {
            InputKind::Rename { target } => self.ui.input.set(&target.name),
            _ => self.ui.input.clear(),
        }
        self.ui.mode = Mode::Input(kind);
    }

    /// Prompt for a rename of the entry under the cursor
    pub fn start_rename(&mut self) {
        if let Some(target) = self.current_entry().cloned() {
            self.start_input(InputKind::Rename { target });
        }
    }

    /// Prompt for deletion of the entry under the cursor
    pub fn start_delete(&mut self) {
        if let Some(target) = self.current_entry().cloned() {
            self.start_input(InputKind::Delete { target });
        }
    }

    /// Enter command mode with an empty command line
    pub fn enter_command_mode(&mut self) {
        self.ui.clear_messages();
        self.ui.command_output = None;
        self.ui.input.clear();
        self.ui.mode = Mode::Command;
    }

    /// Leave input or command mode without doing anything
    pub fn cancel_input(&mut self) {
        self.ui.input.clear();
        self.ui.mode = Mode::Normal;
    }

    /// Act on the input line for the current mode
    pub fn submit_input(&mut self) -> Vec<Task> {
        let kind = match &self.ui.mode {
            Mode::Command => return self.submit_command(),
            Mode::Input(kind) => kind.clone(),
            _ => return Vec::new(),
        };

        let value = self.ui.input.take().trim().to_string();
        self.ui.mode = Mode::Normal;

        if value.is_empty() {
            return Vec::new();
        }

        let current = self.navigation.current_path.clone();
        match kind {
            InputKind::NewFile => vec![Task::CreateFile {
                path: logic::path::child(&current, &value),
            }],
            InputKind::NewDirectory => vec![Task::CreateDirectory {
                path: logic::path::child(&current, &value),
            }],
            InputKind::Rename { target } => {
                if value == target.name {
                    return Vec::new();
                }
                vec![Task::Rename {
                    source: target.path,
                    destination: logic::path::child(&current, &value),
                    is_dir: target.is_dir,
                }]
            }
            InputKind::Delete { target } => {
                if !logic::command::is_affirmative(&value) {
                    return Vec::new();
                }
                vec![Task::Delete {
                    path: target.path,
                    is_dir: target.is_dir,
                }]
            }
        }
    }

    /// Run the command line; command mode stays open for the next one
    fn submit_command(&mut self) -> Vec<Task> {
        let line = self.ui.input.take().trim().to_string();
        if line.is_empty() {
            return Vec::new();
        }

        tracing::debug!(command = %line, "command mode");
        vec![Task::Execute {
            line,
            origin: CommandOrigin::Prompt,
        }]
    }

    /// Put the path of the entry under the cursor in the clipboard
    pub fn copy_path(&mut self) {
        let Some(entry) = self.current_entry() else {
            return;
        };
        let (path, name) = (entry.path.clone(), entry.name.clone());
        self.ui.clipboard = Some(path);
        self.ui.set_status(format!("Copied: {}", name));
    }

    /// Show the clipboard content as a status message
    pub fn show_clipboard(&mut self) {
        match self.ui.clipboard.clone() {
            Some(path) => self.ui.set_status(format!("Clipboard: {}", path)),
            None => self.ui.set_status("Clipboard is empty"),
        }
    }

    /// A file operation finished; report it and reload the listing
    pub fn mutation_applied(&mut self, status: String) -> Vec<Task> {
        self.ui.error = None;
        self.ui.set_status(status);
        vec![self.reload()]
    }

    pub fn operation_failed(&mut self, error: String) {
        tracing::warn!(error = %error, "file operation failed");
        self.ui.set_error(error);
    }
}
