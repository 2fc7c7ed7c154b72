//! Embedded shell and command mode
//!
//! Commands are submitted from two places: the full-screen terminal, where
//! every command gets a numbered history entry that is filled in when it
//! finishes, and the `:` prompt, whose output replaces the preview pane.
//! Both reload the listing afterwards because commands can change the tree.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;

use vfsh::handlers;
use vfsh::messages::{CommandOrigin, Msg, Task};
use vfsh::model::{Mode, Model};
use vfsh::services::command::execute;
use vfsh::services::{run_task, PreviewOptions};
use vfsh::vfs::{Storage, Vfs};

fn settle(model: &mut Model, vfs: &Vfs, tasks: Vec<Task>) {
    let mut queue: VecDeque<Task> = tasks.into();
    while let Some(task) = queue.pop_front() {
        let msg = run_task(vfs, task, PreviewOptions::default());
        queue.extend(handlers::update(model, msg));
    }
}

fn press(model: &mut Model, code: KeyCode) -> Vec<Task> {
    handlers::update(model, Msg::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn type_line(model: &mut Model, line: &str) {
    for c in line.chars() {
        assert!(press(model, KeyCode::Char(c)).is_empty());
    }
}

fn started(vfs: &Vfs) -> Model {
    let mut model = Model::default();
    model.resize(100, 30);
    let tasks = handlers::init(&model);
    settle(&mut model, vfs, tasks);
    model
}

#[test]
fn test_adapter_captures_output_and_status() {
    let vfs = Vfs::in_memory();

    let ok = execute(&vfs, "mkdir /docs");
    assert_eq!(ok.exit_code, 0);
    assert!(ok.error.is_none());
    assert!(vfs.stat("/docs").unwrap().is_dir());

    let missing = execute(&vfs, "frobnicate now");
    assert_eq!(missing.exit_code, 127);
    assert_eq!(missing.output, "frobnicate: command not found\n");
    assert_eq!(missing.error.as_deref(), Some("command exited with code 127"));

    let failed = execute(&vfs, "cat /nothing");
    assert_eq!(failed.exit_code, 1);
    assert!(failed.error.is_some());
}

#[test]
fn test_terminal_session() {
    let vfs = Vfs::in_memory();
    let mut model = started(&vfs);

    assert!(press(&mut model, KeyCode::Char('#')).is_empty());
    assert_eq!(model.ui.mode, Mode::Terminal);

    // Letters that are keys in normal mode go to the input line here
    type_line(&mut model, "touch /jq.txt");
    let tasks = press(&mut model, KeyCode::Enter);
    assert_eq!(
        tasks,
        vec![Task::Execute {
            line: "touch /jq.txt".into(),
            origin: CommandOrigin::Terminal { sequence: 1 },
        }]
    );

    let entry = &model.terminal.history[0];
    assert_eq!(entry.number, 1);
    assert_eq!(entry.path, "/");
    assert!(entry.pending);

    settle(&mut model, &vfs, tasks);

    let entry = &model.terminal.history[0];
    assert!(!entry.pending);
    assert!(entry.error.is_none());
    assert_eq!(model.ui.mode, Mode::Terminal);
    // The listing behind the terminal picked up the new file
    assert_eq!(model.navigation.entries.len(), 1);
    assert_eq!(model.navigation.entries[0].name, "jq.txt");

    assert!(press(&mut model, KeyCode::Esc).is_empty());
    assert_eq!(model.ui.mode, Mode::Normal);
}

#[test]
fn test_terminal_results_out_of_order() {
    let vfs = Vfs::in_memory();
    let mut model = started(&vfs);
    press(&mut model, KeyCode::Char('#'));

    type_line(&mut model, "echo first");
    let first = press(&mut model, KeyCode::Enter);
    type_line(&mut model, "echo second");
    let second = press(&mut model, KeyCode::Enter);

    settle(&mut model, &vfs, second);
    assert!(model.terminal.history[0].pending);
    assert_eq!(model.terminal.history[1].output, "second\n");

    settle(&mut model, &vfs, first);
    assert_eq!(model.terminal.history[0].output, "first\n");
    assert_eq!(model.terminal.counter, 2);
}

#[test]
fn test_terminal_error_recorded_on_entry() {
    let vfs = Vfs::in_memory();
    let mut model = started(&vfs);
    press(&mut model, KeyCode::Char('#'));

    type_line(&mut model, "rm /nope");
    let tasks = press(&mut model, KeyCode::Enter);
    settle(&mut model, &vfs, tasks);

    let entry = &model.terminal.history[0];
    assert!(entry.error.is_some());
    assert!(model.ui.error.is_none());
}

#[test]
fn test_blank_terminal_line_is_ignored() {
    let vfs = Vfs::in_memory();
    let mut model = started(&vfs);
    press(&mut model, KeyCode::Char('#'));

    type_line(&mut model, "   ");
    assert!(press(&mut model, KeyCode::Enter).is_empty());
    assert!(model.terminal.history.is_empty());
}

#[test]
fn test_command_mode_output_and_reload() {
    let vfs = Vfs::in_memory();
    let mut model = started(&vfs);

    press(&mut model, KeyCode::Char(':'));
    assert_eq!(model.ui.mode, Mode::Command);

    type_line(&mut model, "write /hello.txt hi there");
    let tasks = press(&mut model, KeyCode::Enter);
    settle(&mut model, &vfs, tasks);

    assert_eq!(model.ui.mode, Mode::Command);
    assert_eq!(model.ui.status.as_deref(), Some("Command executed"));
    assert!(model.ui.command_output.is_some());
    assert_eq!(model.navigation.entries[0].name, "hello.txt");

    type_line(&mut model, "cat /hello.txt");
    let tasks = press(&mut model, KeyCode::Enter);
    settle(&mut model, &vfs, tasks);
    assert_eq!(model.ui.command_output.as_deref(), Some("hi there\n"));

    // Leave the prompt, then Esc again clears the output
    press(&mut model, KeyCode::Esc);
    assert_eq!(model.ui.mode, Mode::Normal);
    assert!(model.ui.command_output.is_some());
    press(&mut model, KeyCode::Esc);
    assert!(model.ui.command_output.is_none());
}

#[test]
fn test_command_mode_failure_sets_error() {
    let vfs = Vfs::in_memory();
    let mut model = started(&vfs);

    press(&mut model, KeyCode::Char(':'));
    type_line(&mut model, "bogus");
    let tasks = press(&mut model, KeyCode::Enter);
    settle(&mut model, &vfs, tasks);

    assert_eq!(
        model.ui.error.as_deref(),
        Some("command exited with code 127")
    );
    assert_eq!(
        model.ui.command_output.as_deref(),
        Some("bogus: command not found\n")
    );
    assert!(model.ui.status.is_none());
}
