//! Embedded shell methods
//!
//! Entering and leaving terminal mode, submitting commands and filling
//! in their results as they complete.

use crate::messages::{CommandOrigin, CommandOutcome, Task};
use crate::model::{Mode, Model};

impl Model {
    pub fn enter_terminal(&mut self) {
        self.ui.input.clear();
        self.ui.clear_messages();
        self.terminal.scroll = 0;
        self.ui.mode = Mode::Terminal;
    }

    pub fn exit_terminal(&mut self) {
        self.ui.input.clear();
        self.ui.mode = Mode::Normal;
    }

    /// Record the command line in the history and run it
    ///
    /// Commands run concurrently; each result lands in its own entry no
    /// matter the completion order.
    pub fn submit_terminal(&mut self) -> Vec<Task> {
        let line = self.ui.input.take().trim().to_string();
        if line.is_empty() {
            return Vec::new();
        }

        let sequence = self
            .terminal
            .push(&self.navigation.current_path, &line);
        self.terminal.scroll = 0;

        tracing::debug!(sequence, command = %line, "terminal command");
        vec![Task::Execute {
            line,
            origin: CommandOrigin::Terminal { sequence },
        }]
    }

    pub fn scroll_terminal_up(&mut self, lines: usize) {
        let per_entry = self.ui.settings.history_lines_per_entry;
        self.terminal.scroll_up(lines, per_entry);
    }

    pub fn scroll_terminal_down(&mut self, lines: usize) {
        self.terminal.scroll_down(lines);
    }

    /// Store a finished command and reload, since it may have changed the tree
    pub fn apply_command(&mut self, origin: CommandOrigin, outcome: CommandOutcome) -> Vec<Task> {
        match origin {
            CommandOrigin::Terminal { sequence } => {
                if !self
                    .terminal
                    .complete(sequence, outcome.output, outcome.error)
                {
                    tracing::warn!(sequence, "result for unknown terminal entry");
                }
            }
            CommandOrigin::Prompt => {
                self.ui.command_output = Some(outcome.output);
                match outcome.error {
                    Some(error) => {
                        self.ui.status = None;
                        self.ui.set_error(error);
                    }
                    None => {
                        self.ui.error = None;
                        self.ui.set_status("Command executed");
                    }
                }
            }
        }
        vec![self.reload()]
    }
}
