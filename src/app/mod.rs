//! Model Orchestration Methods
//!
//! This module contains `impl Model` action methods grouped by domain.
//! Each method mutates the model and returns the detached work
//! ([`Task`](crate::messages::Task)s) the change calls for. No method
//! performs I/O itself.
//!
//! Methods are kept as `impl Model` but organized by functional domain
//! for better discoverability and maintainability.

pub(crate) mod file_ops;
pub(crate) mod navigation;
pub(crate) mod preview;
pub(crate) mod terminal;

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::messages::{CommandOrigin, CommandOutcome, Task};
    use crate::model::{Entry, InputKind, Mode, Model, Preview};
    use crate::vfs::FileMode;

    fn entry(dir: &str, name: &str, is_dir: bool) -> Entry {
        let path = crate::logic::path::child(dir, name);
        Entry {
            name: name.to_string(),
            path,
            size: if is_dir { 0 } else { 12 },
            mode: if is_dir {
                FileMode::directory(0o755)
            } else {
                FileMode::file(0o644)
            },
            modified: Utc::now(),
            is_dir,
            content_type: String::new(),
        }
    }

    fn loaded_model() -> Model {
        let mut model = Model::default();
        model.resize(120, 40);
        let entries = vec![
            entry("/", "docs", true),
            entry("/", "a.txt", false),
            entry("/", "b.txt", false),
        ];
        model.apply_directory("/", entries);
        model
    }

    #[test]
    fn test_directory_load_requests_preview_for_files_only() {
        let mut model = Model::default();
        model.resize(120, 40);
        let tasks = model.apply_directory("/", vec![entry("/", "docs", true)]);
        assert!(tasks.is_empty());
        assert_eq!(model.preview.content, Some(Preview::Empty));

        let tasks = model.apply_directory("/", vec![entry("/", "a.txt", false)]);
        assert!(matches!(
            tasks.as_slice(),
            [Task::GeneratePreview { path, width: 58, height: 24, .. }] if path == "/a.txt"
        ));
    }

    #[test]
    fn test_stale_directory_listing_dropped() {
        let mut model = loaded_model();
        let tasks = model.apply_directory("/elsewhere", vec![]);
        assert!(tasks.is_empty());
        assert_eq!(model.navigation.entries.len(), 3);
    }

    #[test]
    fn test_enter_and_back_restores_cursor() {
        let mut model = loaded_model();
        let tasks = model.enter_directory();
        assert_eq!(tasks, vec![Task::LoadDirectory { path: "/docs".into() }]);
        assert_eq!(model.navigation.current_path, "/docs");
        assert_eq!(model.navigation.cursor, 0);

        let tasks = model.go_back();
        assert_eq!(tasks, vec![Task::LoadDirectory { path: "/".into() }]);

        let entries = vec![
            entry("/", "a", true),
            entry("/", "docs", true),
            entry("/", "z.txt", false),
        ];
        model.apply_directory("/", entries);
        assert_eq!(model.navigation.cursor, 1);
        assert!(model.navigation.previous_dir.is_none());
    }

    #[test]
    fn test_enter_file_sets_status() {
        let mut model = loaded_model();
        model.move_cursor(1);
        assert!(model.enter_directory().is_empty());
        assert_eq!(model.ui.status.as_deref(), Some("Cannot open file: a.txt"));
    }

    #[test]
    fn test_back_at_root_is_noop() {
        let mut model = loaded_model();
        assert!(model.go_back().is_empty());
        assert_eq!(model.navigation.current_path, "/");
    }

    #[test]
    fn test_cursor_move_bumps_generation() {
        let mut model = loaded_model();
        let before = model.preview.generation;
        let tasks = model.move_cursor(1);
        assert!(model.preview.generation > before);
        let generation = model.preview.generation;
        assert!(matches!(
            tasks.as_slice(),
            [Task::GeneratePreview { generation: g, .. }] if *g == generation
        ));
    }

    #[test]
    fn test_stale_preview_is_ignored() {
        let mut model = loaded_model();
        let first = match model.move_cursor(1).pop() {
            Some(Task::GeneratePreview { generation, .. }) => generation,
            other => panic!("unexpected task {:?}", other),
        };
        let second = match model.move_cursor(1).pop() {
            Some(Task::GeneratePreview { generation, .. }) => generation,
            other => panic!("unexpected task {:?}", other),
        };

        model.apply_preview(second, Ok(Preview::Text("b".into())));
        model.apply_preview(first, Ok(Preview::Text("a".into())));
        assert_eq!(model.preview.content, Some(Preview::Text("b".into())));
    }

    #[test]
    fn test_resize_requests_image_again() {
        let mut model = Model::default();
        model.resize(120, 40);
        model.apply_directory("/", vec![entry("/", "cat.png", false)]);

        let tasks = model.resize(80, 30);
        let generation = model.preview.generation;
        assert!(matches!(
            tasks.as_slice(),
            [Task::GeneratePreview { generation: g, path, width: 38, .. }]
                if *g == generation && path == "/cat.png"
        ));

        // Same size again changes nothing
        assert!(model.resize(80, 30).is_empty());
    }

    #[test]
    fn test_resize_keeps_text_preview() {
        let mut model = loaded_model();
        model.move_cursor(1);
        let generation = model.preview.generation;
        assert!(model.resize(80, 30).is_empty());
        assert_eq!(model.preview.generation, generation);
    }

    #[test]
    fn test_hidden_preview_issues_nothing() {
        let mut model = loaded_model();
        assert!(model.toggle_preview().is_empty());
        assert!(model.move_cursor(1).is_empty());
        assert!(!model.toggle_preview().is_empty());
    }

    #[test]
    fn test_new_file_submit() {
        let mut model = loaded_model();
        model.start_input(InputKind::NewFile);
        for c in " notes.md ".chars() {
            model.ui.input.insert(c);
        }
        let tasks = model.submit_input();
        assert_eq!(tasks, vec![Task::CreateFile { path: "/notes.md".into() }]);
        assert_eq!(model.ui.mode, Mode::Normal);
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut model = loaded_model();
        model.start_input(InputKind::NewDirectory);
        assert!(model.submit_input().is_empty());
        assert_eq!(model.ui.mode, Mode::Normal);
    }

    #[test]
    fn test_rename_prefill_and_same_name() {
        let mut model = loaded_model();
        model.move_cursor(1);
        model.start_rename();
        assert_eq!(model.ui.input.value(), "a.txt");
        assert!(model.submit_input().is_empty());

        model.start_rename();
        model.ui.input.set("c.txt");
        assert_eq!(
            model.submit_input(),
            vec![Task::Rename {
                source: "/a.txt".into(),
                destination: "/c.txt".into(),
                is_dir: false,
            }]
        );
    }

    #[test]
    fn test_delete_requires_yes() {
        let mut model = loaded_model();
        model.start_delete();
        model.ui.input.set("n");
        assert!(model.submit_input().is_empty());

        model.start_delete();
        model.ui.input.set("Y");
        assert_eq!(
            model.submit_input(),
            vec![Task::Delete {
                path: "/docs".into(),
                is_dir: true,
            }]
        );
    }

    #[test]
    fn test_command_mode_stays_open() {
        let mut model = loaded_model();
        model.enter_command_mode();
        model.ui.input.set("ls");
        let tasks = model.submit_input();
        assert_eq!(
            tasks,
            vec![Task::Execute {
                line: "ls".into(),
                origin: CommandOrigin::Prompt,
            }]
        );
        assert_eq!(model.ui.mode, Mode::Command);

        let tasks = model.apply_command(
            CommandOrigin::Prompt,
            CommandOutcome {
                output: "listing".into(),
                ..CommandOutcome::default()
            },
        );
        assert_eq!(tasks, vec![Task::LoadDirectory { path: "/".into() }]);
        assert_eq!(model.ui.command_output.as_deref(), Some("listing"));
        assert_eq!(model.ui.status.as_deref(), Some("Command executed"));
    }

    #[test]
    fn test_terminal_results_fill_their_own_entries() {
        let mut model = loaded_model();
        model.enter_terminal();
        model.ui.input.set("first");
        let first = model.submit_terminal();
        model.ui.input.set("second");
        model.submit_terminal();
        assert_eq!(model.terminal.history.len(), 2);

        let sequence = match first.as_slice() {
            [Task::Execute {
                origin: CommandOrigin::Terminal { sequence },
                ..
            }] => *sequence,
            other => panic!("unexpected tasks {:?}", other),
        };
        model.apply_command(
            CommandOrigin::Terminal { sequence: 1 },
            CommandOutcome {
                output: "two".into(),
                ..CommandOutcome::default()
            },
        );
        model.apply_command(
            CommandOrigin::Terminal { sequence },
            CommandOutcome {
                output: "one".into(),
                ..CommandOutcome::default()
            },
        );
        assert_eq!(model.terminal.history[0].output, "one");
        assert_eq!(model.terminal.history[1].output, "two");
    }

    #[test]
    fn test_copy_path() {
        let mut model = loaded_model();
        model.copy_path();
        assert_eq!(model.ui.clipboard.as_deref(), Some("/docs"));
        assert_eq!(model.ui.status.as_deref(), Some("Copied: docs"));
    }
}
