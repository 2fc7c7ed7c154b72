//! Full-screen embedded shell view

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::logic::navigation::terminal_window;
use crate::model::{InputBuffer, TerminalModel};

fn prompt_spans(number: u64, path: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("[{}] ", number), Style::default().fg(Color::DarkGray)),
        Span::styled(path.to_string(), Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Span::raw(" > "),
    ]
}

/// Every history line followed by the live input line
pub fn history_lines(
    terminal: &TerminalModel,
    current_path: &str,
    input: &InputBuffer,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for entry in &terminal.history {
        let mut prompt = prompt_spans(entry.number, &entry.path);
        prompt.push(Span::raw(entry.command.clone()));
        lines.push(Line::from(prompt));

        if entry.pending {
            lines.push(Line::styled("...", Style::default().fg(Color::DarkGray)));
        }

        if !entry.output.is_empty() {
            for output_line in entry.output.trim_end_matches('\n').split('\n') {
                lines.push(Line::raw(output_line.to_string()));
            }
        }

        if let Some(error) = &entry.error {
            lines.push(Line::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            ));
        }

        lines.push(Line::raw(""));
    }

    let mut current = prompt_spans(terminal.counter, current_path);
    current.push(Span::raw(input.value().to_string()));
    lines.push(Line::from(current));

    lines
}

/// Render the history pane
///
/// Returns the screen position of the text cursor when the input line is
/// in view.
pub fn render_terminal(
    f: &mut Frame,
    area: Rect,
    terminal: &TerminalModel,
    current_path: &str,
    input: &InputBuffer,
) -> Option<(u16, u16)> {
    let lines = history_lines(terminal, current_path, input);
    let available = area.height.saturating_sub(2) as usize;
    let (start, end) = terminal_window(lines.len(), available, terminal.scroll);
    let input_visible = end == lines.len();

    let visible: Vec<Line> = lines[start..end].to_vec();
    let rows = visible.len();

    f.render_widget(
        Paragraph::new(visible).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );

    if !input_visible || rows == 0 {
        return None;
    }

    let prefix = format!("[{}] {} > ", terminal.counter, current_path);
    let x = UnicodeWidthStr::width(prefix.as_str()) + UnicodeWidthStr::width(input.before_cursor());
    let x = (area.x as usize + 1 + x).min(area.right().saturating_sub(2) as usize) as u16;
    let y = area.y + rows as u16;
    Some((x, y))
}
