use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for the browser view
pub struct LayoutInfo {
    /// Title line with the current path
    pub title_area: Rect,
    /// File list, borders included
    pub list_area: Rect,
    /// Right-hand pane (preview or command output), if shown
    pub side_area: Option<Rect>,
    /// Item count and messages
    pub status_area: Rect,
    /// Prompt line for input and command modes
    pub input_area: Rect,
    /// One-line key legend
    pub legend_area: Rect,
}

/// Calculate the screen layout for the browser view
///
/// The list block is `visible_lines + 2` rows tall and starts right below
/// the title, so its first entry sits on row
/// [`LIST_TOP`](crate::logic::navigation::LIST_TOP). Mouse clicks are mapped
/// to entries with that assumption.
pub fn calculate_layout(terminal_size: Rect, visible_lines: usize, split: bool) -> LayoutInfo {
    let list_height = (visible_lines as u16).saturating_add(2);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Title
            Constraint::Length(list_height), // File list + preview
            Constraint::Length(1),           // Status
            Constraint::Length(1),           // Input prompt
            Constraint::Length(1),           // Legend
            Constraint::Min(0),              // Slack
        ])
        .split(terminal_size);

    let (list_area, side_area) = if split {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[1]);
        (content[0], Some(content[1]))
    } else {
        (main_chunks[1], None)
    };

    LayoutInfo {
        title_area: main_chunks[0],
        list_area,
        side_area,
        status_area: main_chunks[2],
        input_area: main_chunks[3],
        legend_area: main_chunks[4],
    }
}

/// Title, history pane and legend for the terminal view
pub fn terminal_layout(terminal_size: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(terminal_size);
    (chunks[0], chunks[1], chunks[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::navigation::{visible_lines, LIST_TOP};

    #[test]
    fn test_list_starts_at_click_origin() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = calculate_layout(area, visible_lines(area.height), true);
        // First entry row = block top + border
        assert_eq!(layout.list_area.y + 1, LIST_TOP);
        assert_eq!(layout.list_area.height, 34);
        assert!(layout.side_area.is_some());
        assert!(layout.legend_area.bottom() <= area.height);
    }

    #[test]
    fn test_no_split_uses_full_width() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = calculate_layout(area, visible_lines(area.height), false);
        assert_eq!(layout.list_area.width, 80);
        assert!(layout.side_area.is_none());
    }
}
