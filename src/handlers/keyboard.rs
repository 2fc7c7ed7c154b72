//! Keyboard Input Handler
//!
//! Routes key presses by mode. Each mode owns its key map; keys a mode does
//! not know are ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::logic::navigation::PAGE_STEP;
use crate::messages::Task;
use crate::model::{InputBuffer, InputKind, Mode, Model};

const PAGE: isize = PAGE_STEP as isize;

/// Handle one key press
pub fn handle_key(model: &mut Model, key: KeyEvent) -> Vec<Task> {
    match model.ui.mode {
        Mode::Normal => handle_normal(model, key),
        Mode::Input(_) | Mode::Command => handle_input(model, key),
        Mode::Terminal => handle_terminal(model, key),
        Mode::Help => {
            handle_help(model, key);
            Vec::new()
        }
    }
}

fn handle_normal(model: &mut Model, key: KeyEvent) -> Vec<Task> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => {
                model.ui.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('u') => model.move_cursor(-PAGE),
            KeyCode::Char('d') => model.move_cursor(PAGE),
            KeyCode::Char('r') => vec![model.reload()],
            _ => Vec::new(),
        };
    }

    match key.code {
        KeyCode::Esc => {
            model.ui.command_output = None;
            model.ui.clear_messages();
            Vec::new()
        }
        KeyCode::Char('q') => {
            model.ui.should_quit = true;
            Vec::new()
        }
        KeyCode::Char('?') => {
            model.ui.mode = Mode::Help;
            Vec::new()
        }

        // Cursor movement
        KeyCode::Up | KeyCode::Char('k') => model.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => model.move_cursor(1),
        KeyCode::PageUp => model.move_cursor(-PAGE),
        KeyCode::PageDown => model.move_cursor(PAGE),
        KeyCode::Home | KeyCode::Char('g') => model.move_cursor(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => model.move_cursor(isize::MAX),

        // Hierarchy
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => model.enter_directory(),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => model.go_back(),

        // File operations
        KeyCode::Char('n') => {
            model.start_input(InputKind::NewFile);
            Vec::new()
        }
        KeyCode::Char('N') => {
            model.start_input(InputKind::NewDirectory);
            Vec::new()
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            model.start_delete();
            Vec::new()
        }
        KeyCode::Char('r') => {
            model.start_rename();
            Vec::new()
        }
        KeyCode::Char('y') => {
            model.copy_path();
            Vec::new()
        }
        KeyCode::Char('Y') => {
            model.show_clipboard();
            Vec::new()
        }

        KeyCode::Char('p') => model.toggle_preview(),
        KeyCode::Char('R') | KeyCode::F(5) => vec![model.reload()],
        KeyCode::Char('#') => {
            model.enter_terminal();
            Vec::new()
        }
        KeyCode::Char(':') => {
            model.enter_command_mode();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_input(model: &mut Model, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Esc => {
            model.cancel_input();
            Vec::new()
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            model.cancel_input();
            Vec::new()
        }
        KeyCode::Enter => model.submit_input(),
        _ => {
            edit_line(&mut model.ui.input, key);
            Vec::new()
        }
    }
}

fn handle_terminal(model: &mut Model, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('#') => {
            model.exit_terminal();
            Vec::new()
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            model.exit_terminal();
            Vec::new()
        }
        KeyCode::Up => {
            model.scroll_terminal_up(1);
            Vec::new()
        }
        KeyCode::Down => {
            model.scroll_terminal_down(1);
            Vec::new()
        }
        KeyCode::PageUp => {
            model.scroll_terminal_up(PAGE_STEP as usize);
            Vec::new()
        }
        KeyCode::PageDown => {
            model.scroll_terminal_down(PAGE_STEP as usize);
            Vec::new()
        }
        KeyCode::Enter => model.submit_terminal(),
        _ => {
            edit_line(&mut model.ui.input, key);
            Vec::new()
        }
    }
}

fn handle_help(model: &mut Model, key: KeyEvent) {
    let close = match key.code {
        KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    };
    if close {
        model.ui.mode = Mode::Normal;
    }
}

/// Apply a line-editing key to the buffer
fn edit_line(input: &mut InputBuffer, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => input.move_home(),
            KeyCode::Char('e') => input.move_end(),
            KeyCode::Char('u') => input.clear(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(model: &mut Model, text: &str) {
        for c in text.chars() {
            handle_key(model, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_quit_from_normal() {
        let mut model = Model::default();
        handle_key(&mut model, press(KeyCode::Char('q')));
        assert!(model.ui.should_quit);

        let mut model = Model::default();
        handle_key(&mut model, ctrl('c'));
        assert!(model.ui.should_quit);
    }

    #[test]
    fn test_help_toggle() {
        let mut model = Model::default();
        handle_key(&mut model, press(KeyCode::Char('?')));
        assert_eq!(model.ui.mode, Mode::Help);

        // Other keys are ignored, including the terminal toggle
        handle_key(&mut model, press(KeyCode::Char('#')));
        handle_key(&mut model, press(KeyCode::Char('j')));
        assert_eq!(model.ui.mode, Mode::Help);

        handle_key(&mut model, press(KeyCode::Esc));
        assert_eq!(model.ui.mode, Mode::Normal);

        handle_key(&mut model, press(KeyCode::Char('?')));
        handle_key(&mut model, press(KeyCode::Char('q')));
        assert_eq!(model.ui.mode, Mode::Normal);
        assert!(!model.ui.should_quit);
    }

    #[test]
    fn test_terminal_toggle() {
        let mut model = Model::default();
        handle_key(&mut model, press(KeyCode::Char('#')));
        assert_eq!(model.ui.mode, Mode::Terminal);

        // Typed text goes to the line, not to normal-mode bindings
        type_text(&mut model, "q");
        assert_eq!(model.ui.input.value(), "q");
        assert!(!model.ui.should_quit);

        handle_key(&mut model, press(KeyCode::Char('#')));
        assert_eq!(model.ui.mode, Mode::Normal);
        assert_eq!(model.ui.input.value(), "");
    }

    #[test]
    fn test_terminal_submit_and_scroll() {
        let mut model = Model::default();
        handle_key(&mut model, press(KeyCode::Char('#')));
        type_text(&mut model, "ls /");
        let tasks = handle_key(&mut model, press(KeyCode::Enter));
        assert_eq!(tasks.len(), 1);
        assert_eq!(model.terminal.history.len(), 1);
        assert!(model.terminal.history[0].pending);

        handle_key(&mut model, press(KeyCode::PageUp));
        assert_eq!(model.terminal.scroll, 3);
        handle_key(&mut model, press(KeyCode::Down));
        assert_eq!(model.terminal.scroll, 2);
        handle_key(&mut model, press(KeyCode::PageDown));
        assert_eq!(model.terminal.scroll, 0);
    }

    #[test]
    fn test_input_escape_cancels() {
        let mut model = Model::default();
        handle_key(&mut model, press(KeyCode::Char('n')));
        assert_eq!(model.ui.mode, Mode::Input(InputKind::NewFile));
        type_text(&mut model, "draft");
        handle_key(&mut model, press(KeyCode::Esc));
        assert_eq!(model.ui.mode, Mode::Normal);
        assert_eq!(model.ui.input.value(), "");
    }

    #[test]
    fn test_input_editing_keys() {
        let mut model = Model::default();
        handle_key(&mut model, press(KeyCode::Char(':')));
        type_text(&mut model, "cta");
        handle_key(&mut model, press(KeyCode::Left));
        handle_key(&mut model, press(KeyCode::Backspace));
        handle_key(&mut model, press(KeyCode::End));
        type_text(&mut model, "t x");
        assert_eq!(model.ui.input.value(), "cat x");

        let tasks = handle_key(&mut model, press(KeyCode::Enter));
        assert_eq!(tasks.len(), 1);
        assert_eq!(model.ui.mode, Mode::Command);
        assert_eq!(model.ui.input.value(), "");
    }

    #[test]
    fn test_delete_without_entry_stays_normal() {
        let mut model = Model::default();
        handle_key(&mut model, press(KeyCode::Char('d')));
        assert_eq!(model.ui.mode, Mode::Normal);
    }
}
