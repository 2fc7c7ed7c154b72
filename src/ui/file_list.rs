use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::icons::IconRenderer;
use crate::model::{Entry, NavigationModel};

/// Width of the size column
const SIZE_WIDTH: usize = 10;

/// Fit `text` into exactly `width` display columns
///
/// Longer text is cut and ends in `...`; shorter text is padded with spaces.
/// Wide characters are never split.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    if current <= width {
        return format!("{}{}", text, " ".repeat(width - current));
    }

    if width <= 3 {
        return ".".repeat(width);
    }

    let budget = width - 3;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out.push_str(&" ".repeat(width - used - 3));
    out
}

/// One list row: `icon name size`
fn entry_line(
    entry: &Entry,
    selected: bool,
    name_width: usize,
    icons: &IconRenderer,
) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if entry.is_dir {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut icon = icons.for_category(entry.category());
    if selected {
        icon.style = style;
    }

    Line::from(vec![
        icon,
        Span::styled(" ", style),
        Span::styled(fit_to_width(&entry.display_name(), name_width), style),
        Span::styled(
            format!(" {:>width$}", entry.display_size(), width = SIZE_WIDTH),
            style,
        ),
    ])
}

/// Render the file list panel
pub fn render_file_list(
    f: &mut Frame,
    area: Rect,
    navigation: &NavigationModel,
    visible_lines: usize,
    icons: &IconRenderer,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if navigation.entries.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "(empty directory)",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Borders, icon column and size column
    let inner_width = area.width.saturating_sub(2) as usize;
    let name_width = inner_width.saturating_sub(SIZE_WIDTH + 4).max(8);

    let lines: Vec<Line> = navigation
        .entries
        .iter()
        .enumerate()
        .skip(navigation.offset)
        .take(visible_lines)
        .map(|(i, entry)| entry_line(entry, i == navigation.cursor, name_width, icons))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_short_names() {
        assert_eq!(fit_to_width("abc", 6), "abc   ");
    }

    #[test]
    fn test_fit_truncates_long_names() {
        assert_eq!(fit_to_width("documents/", 8), "docum...");
        assert_eq!(UnicodeWidthStr::width(fit_to_width("documents/", 8).as_str()), 8);
    }

    #[test]
    fn test_fit_keeps_wide_chars_whole() {
        // Each CJK char is two columns; four columns of budget fit two chars
        let fitted = fit_to_width("日本語のファイル", 7);
        assert_eq!(fitted, "日本...");
        assert_eq!(UnicodeWidthStr::width(fitted.as_str()), 7);
    }

    #[test]
    fn test_fit_tiny_width() {
        assert_eq!(fit_to_width("abcdef", 2), "..");
    }
}
