//! Command Adapter
//!
//! Runs one command line against the store and captures its text output,
//! exit status and error.

use crate::logic;
use crate::messages::CommandOutcome;
use crate::vfs::{Storage, VfsError};

/// Tokenize `line` and run it
///
/// An empty line succeeds with no output. A storage error keeps the status
/// it carries (exit code 1 when it has none) and its text; a non-zero exit
/// without an error gets a generic one so callers can always show something.
pub fn execute(storage: &dyn Storage, line: &str) -> CommandOutcome {
    let args = logic::command::tokenize(line);
    if args.is_empty() {
        return CommandOutcome::default();
    }

    let mut output = String::new();
    let result = storage.execute(&args, &mut output);
    if let Err(e) = &result {
        tracing::debug!(command = %line, error = %e, "command failed");
    }
    outcome(result, output)
}

fn outcome(result: Result<i32, VfsError>, output: String) -> CommandOutcome {
    match result {
        Ok(0) => CommandOutcome {
            output,
            exit_code: 0,
            error: None,
        },
        Ok(code) => CommandOutcome {
            output,
            exit_code: code,
            error: Some(format!("command exited with code {}", code)),
        },
        Err(e) => CommandOutcome {
            output,
            exit_code: e.exit_code().unwrap_or(1),
            error: Some(e.to_string()),
        },
    }
}
