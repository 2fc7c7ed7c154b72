use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::Mode;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("↑/k", "Move up"),
            ("↓/j", "Move down"),
            ("PgUp/Ctrl+U", "Page up"),
            ("PgDn/Ctrl+D", "Page down"),
            ("Home/g", "Go to top"),
            ("End/G", "Go to bottom"),
            ("Enter/l", "Enter directory"),
            ("Backspace/h", "Go to parent directory"),
            ("Mouse", "Click to select, double-click to open, right-click to go back"),
        ],
    ),
    (
        "File Operations",
        &[
            ("n", "Create new file"),
            ("N", "Create new directory"),
            ("d/Del", "Delete selected item"),
            ("r", "Rename selected item"),
            ("y", "Copy path to clipboard"),
            ("Y", "Show clipboard"),
        ],
    ),
    (
        "View",
        &[
            ("p", "Toggle preview pane"),
            ("Ctrl+R/R", "Refresh current directory"),
            (":", "Run a command"),
        ],
    ),
    (
        "Terminal",
        &[
            ("#", "Toggle terminal window"),
            ("↑/↓ PgUp/PgDn", "Scroll history"),
            ("Esc", "Return to navigation"),
        ],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("q/Ctrl+C", "Quit")],
    ),
];

/// All lines of the help screen
pub fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Yellow);

    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        lines.push(Line::styled(format!("{}:", title), heading));
        for (keys, action) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", keys), key),
                Span::raw(*action),
            ]));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "Press ? or q to return",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

pub fn render_help(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(help_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

/// Short key legend for the bottom line, by mode
pub fn legend_spans(mode: &Mode) -> Vec<Span<'static>> {
    let pairs: &[(&str, &str)] = match mode {
        Mode::Normal => &[
            ("↑↓", "Nav"),
            ("Enter", "Open"),
            ("⌫", "Back"),
            ("n/N", "New"),
            ("d", "Delete"),
            ("r", "Rename"),
            (":", "Command"),
            ("#", "Terminal"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        Mode::Input(_) => &[("Enter", "Confirm"), ("Esc", "Cancel")],
        Mode::Command => &[("Enter", "Run"), ("Esc", "Close")],
        Mode::Terminal => &[
            ("Enter", "Run"),
            ("↑↓/PgUp/PgDn", "Scroll"),
            ("#/Esc", "Back to files"),
        ],
        Mode::Help => &[("?/q/Esc", "Close help")],
    };

    let mut spans = Vec::new();
    for (key, action) in pairs {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(":{}  ", action)));
    }
    spans
}
