use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::{Mode, Model};

/// Left side of the status bar: cursor position and entry count
pub fn position_text(cursor: usize, len: usize) -> String {
    if len == 0 {
        "0 items".to_string()
    } else {
        format!("{}/{} items", cursor + 1, len)
    }
}

/// Render the status bar: position on the left, error or status on the right
pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model) {
    let left = position_text(model.navigation.cursor, model.navigation.entries.len());

    let right = match (&model.ui.error, &model.ui.status) {
        (Some(error), _) => Span::styled(error.clone(), Style::default().fg(Color::Red)),
        (None, Some(status)) => Span::styled(status.clone(), Style::default().fg(Color::Green)),
        (None, None) => Span::raw(""),
    };

    let used = UnicodeWidthStr::width(left.as_str()) + UnicodeWidthStr::width(right.content.as_ref());
    let spacing = (area.width as usize).saturating_sub(used + 2);

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(left, Style::default().fg(Color::Yellow)),
        Span::raw(" ".repeat(spacing)),
        right,
    ]);

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::Black).fg(Color::Gray)),
        area,
    );
}

/// Render the prompt line for input and command modes
///
/// Returns the screen position of the text cursor, if one should be shown.
pub fn render_input(f: &mut Frame, area: Rect, model: &Model) -> Option<(u16, u16)> {
    let prompt = match &model.ui.mode {
        Mode::Input(kind) => format!("{} ", kind.prompt()),
        Mode::Command => ": ".to_string(),
        _ => return None,
    };

    let input = &model.ui.input;
    let line = Line::from(vec![
        Span::styled(prompt.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(input.value().to_string()),
    ]);
    f.render_widget(Paragraph::new(line), area);

    let x = UnicodeWidthStr::width(prompt.as_str()) + UnicodeWidthStr::width(input.before_cursor());
    let x = (area.x as usize + x).min(area.right().saturating_sub(1) as usize) as u16;
    Some((x, area.y))
}
