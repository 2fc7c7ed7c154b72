use ansi_to_tui::IntoText;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::model::{Entry, Preview, PreviewModel};

/// Lines taken by the file header above the preview body
const HEADER_LINES: usize = 6;

fn label_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}:", label), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {}", value)),
    ])
}

/// Convert preview content to styled text, decoding ANSI colours for images
fn body_text(preview: &Preview) -> Text<'static> {
    let rendered = preview.rendered();
    if preview.is_image() {
        match rendered.as_bytes().into_text() {
            Ok(text) => return text,
            Err(e) => tracing::warn!(error = %e, "failed to parse image escape sequences"),
        }
    }
    Text::raw(rendered)
}

/// Keep at most `max` lines, marking the cut with `...`
fn limit_lines(mut text: Text<'static>, max: usize) -> Text<'static> {
    if text.lines.len() > max {
        text.lines.truncate(max);
        text.lines.push(Line::from("..."));
    }
    text
}

/// Build the preview pane content for `entry`
pub fn preview_text(entry: Option<&Entry>, preview: &PreviewModel, max_lines: usize) -> Text<'static> {
    let Some(entry) = entry else {
        return Text::styled("No file selected", Style::default().fg(Color::DarkGray));
    };

    if entry.is_dir {
        let kind = if entry.is_mount() { "Mount point" } else { "Directory" };
        return Text::from(vec![
            Line::styled(
                format!("{}: {}", kind, entry.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            label_line("Path", entry.path.clone()),
            label_line("Modified", entry.display_mod_time()),
            label_line("Permissions", entry.display_mode()),
        ]);
    }

    if let Some(error) = &preview.error {
        return Text::styled(format!("Error: {}", error), Style::default().fg(Color::Red));
    }

    if preview.shown_generation != preview.generation {
        return Text::styled("Loading preview...", Style::default().fg(Color::DarkGray));
    }

    let content = match &preview.content {
        Some(content) if !content.is_empty() => content,
        _ => return Text::styled("(empty file)", Style::default().fg(Color::DarkGray)),
    };

    let mut text = Text::from(vec![
        label_line("File", entry.name.clone()),
        label_line("Size", entry.display_size()),
        label_line("Modified", entry.display_mod_time()),
        Line::from(""),
        Line::styled("--- Preview ---", Style::default().fg(Color::DarkGray)),
    ]);

    let body = limit_lines(body_text(content), max_lines.saturating_sub(HEADER_LINES).max(1));
    text.lines.extend(body.lines);
    text
}

/// Render the preview pane
pub fn render_preview(
    f: &mut Frame,
    area: Rect,
    entry: Option<&Entry>,
    preview: &PreviewModel,
    visible_lines: usize,
) {
    let text = preview_text(entry, preview, visible_lines);
    let is_image = preview.content.as_ref().map_or(false, Preview::is_image);

    let mut paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Preview")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    // Wrapping would break the pixel grid of image art
    if !is_image {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }

    f.render_widget(paragraph, area);
}

/// Render the output of the last command-mode command in place of the preview
pub fn render_command_output(f: &mut Frame, area: Rect, output: &str) {
    let text = if output.is_empty() {
        Text::styled("(no output)", Style::default().fg(Color::DarkGray))
    } else {
        Text::raw(output.to_string())
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Command Output (Esc to close)")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
