//! Event Handlers
//!
//! The update step of the Elm loop. Every [`Msg`] goes through [`update`],
//! which mutates the model and returns the [`Task`]s to dispatch:
//! - keyboard: key presses routed by mode
//! - mouse: list selection, double-click, wheel
//! - task completions: applied directly below
//!
//! [`update_queued`] is what the run loop calls: one received message plus
//! anything already waiting behind it.

pub mod keyboard;
pub mod mouse;

pub use keyboard::handle_key;
pub use mouse::handle_mouse;

use tokio::sync::mpsc;

use crate::messages::{Msg, Task};
use crate::model::Model;

/// Tasks to run on startup
pub fn init(model: &Model) -> Vec<Task> {
    vec![model.reload()]
}

/// Apply one message to the model
pub fn update(model: &mut Model, msg: Msg) -> Vec<Task> {
    match msg {
        Msg::Key(key) => handle_key(model, key),
        Msg::Mouse { event, at } => handle_mouse(model, event, at),
        Msg::Resize { width, height } => model.resize(width, height),
        Msg::DirectoryLoaded { path, entries } => model.apply_directory(&path, entries),
        Msg::DirectoryFailed { path, error } => {
            model.directory_failed(&path, &error);
            Vec::new()
        }
        Msg::PreviewLoaded { generation, result } => {
            model.apply_preview(generation, result);
            Vec::new()
        }
        Msg::CommandExecuted { origin, outcome } => model.apply_command(origin, outcome),
        Msg::MutationApplied { status } => model.mutation_applied(status),
        Msg::OperationFailed(error) => {
            model.operation_failed(error);
            Vec::new()
        }
    }
}

/// Apply `first` and whatever is already queued behind it
///
/// Stops at a quit: later messages stay in the queue and start no work.
/// Tasks requested before the quit are still returned.
pub fn update_queued(
    model: &mut Model,
    first: Msg,
    rx: &mut mpsc::UnboundedReceiver<Msg>,
) -> Vec<Task> {
    let mut tasks = update(model, first);
    while !model.ui.should_quit {
        match rx.try_recv() {
            Ok(msg) => tasks.extend(update(model, msg)),
            Err(_) => break,
        }
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{CommandOrigin, CommandOutcome};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_init_loads_root() {
        let model = Model::default();
        assert_eq!(init(&model), vec![Task::LoadDirectory { path: "/".into() }]);
    }

    #[test]
    fn test_directory_failure_keeps_entries() {
        let mut model = Model::default();
        update(
            &mut model,
            Msg::DirectoryFailed {
                path: "/".into(),
                error: "permission denied".into(),
            },
        );
        assert_eq!(
            model.ui.error.as_deref(),
            Some("Failed to load directory: permission denied")
        );
        assert!(model.navigation.entries.is_empty());
    }

    #[test]
    fn test_mutation_reloads() {
        let mut model = Model::default();
        model.ui.set_error("old");
        let tasks = update(
            &mut model,
            Msg::MutationApplied {
                status: "Created file: a".into(),
            },
        );
        assert_eq!(tasks, vec![Task::LoadDirectory { path: "/".into() }]);
        assert!(model.ui.error.is_none());
        assert_eq!(model.ui.status.as_deref(), Some("Created file: a"));
    }

    #[test]
    fn test_prompt_command_error() {
        let mut model = Model::default();
        update(
            &mut model,
            Msg::CommandExecuted {
                origin: CommandOrigin::Prompt,
                outcome: CommandOutcome {
                    output: String::new(),
                    exit_code: 1,
                    error: Some("not found: /x".into()),
                },
            },
        );
        assert_eq!(model.ui.error.as_deref(), Some("not found: /x"));
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut model = Model::default();
        update(&mut model, Msg::Resize { width: 80, height: 24 });
        assert_eq!((model.ui.width, model.ui.height), (80, 24));
    }

    fn key(c: char) -> Msg {
        Msg::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_queued_messages_stop_at_quit() {
        let mut model = Model::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(key('q')).unwrap();
        tx.send(Msg::MutationApplied {
            status: "Created file: late".into(),
        })
        .unwrap();

        // The reload before the quit is kept, the one after it never runs
        let tasks = update_queued(
            &mut model,
            Msg::MutationApplied {
                status: "Created file: a".into(),
            },
            &mut rx,
        );
        assert!(model.ui.should_quit);
        assert_eq!(tasks, vec![Task::LoadDirectory { path: "/".into() }]);
        assert_eq!(model.ui.status.as_deref(), Some("Created file: a"));
        assert!(matches!(rx.try_recv(), Ok(Msg::MutationApplied { .. })));
    }

    #[test]
    fn test_queued_messages_applied_in_order() {
        let mut model = Model::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(key('?')).unwrap();
        tx.send(key('q')).unwrap();

        let tasks = update_queued(&mut model, key('p'), &mut rx);
        assert!(tasks.is_empty());
        assert!(!model.preview.visible);
        // `?` opened help and `q` closed it again
        assert!(!model.ui.should_quit);
        assert!(rx.try_recv().is_err());
    }
}
