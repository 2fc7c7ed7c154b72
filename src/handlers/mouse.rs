//! Mouse Input Handler
//!
//! Wheel scrolling, click selection, double-click to open and right click to
//! go back. Mouse input only applies to the file list in Normal mode.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use std::time::Instant;

use crate::logic;
use crate::messages::Task;
use crate::model::{ClickRecord, Mode, Model};

/// Handle one mouse event received at `at`
pub fn handle_mouse(model: &mut Model, event: MouseEvent, at: Instant) -> Vec<Task> {
    if model.ui.mode != Mode::Normal {
        return Vec::new();
    }

    match event.kind {
        MouseEventKind::ScrollUp => model.move_cursor(-1),
        MouseEventKind::ScrollDown => model.move_cursor(1),
        MouseEventKind::Down(MouseButton::Left) => handle_left_click(model, event.row, at),
        MouseEventKind::Down(MouseButton::Right) => model.go_back(),
        _ => Vec::new(),
    }
}

fn handle_left_click(model: &mut Model, row: u16, at: Instant) -> Vec<Task> {
    let index = logic::navigation::click_index(
        row,
        model.navigation.offset,
        model.navigation.entries.len(),
    );

    let previous = model.ui.last_click.replace(ClickRecord { at, row });

    let Some(index) = index else {
        return Vec::new();
    };

    let is_double = previous.map_or(false, |click| {
        click.row == row
            && at.saturating_duration_since(click.at) <= model.ui.settings.double_click_window
            && index == model.navigation.cursor
    });

    if is_double {
        model.ui.last_click = None;
        model.enter_directory()
    } else {
        model.select(index)
    }
}
