use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{file_list, help, icons::IconRenderer, layout, preview, status_bar, terminal};
use crate::model::{Mode, Model};

fn title_line(title: String) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
}

/// Main render function - draws the view for the current mode
///
/// Reads the model only; nothing here changes state.
pub fn render(f: &mut Frame, model: &Model, icons: &IconRenderer) {
    match model.ui.mode {
        Mode::Help => render_help_view(f),
        Mode::Terminal => render_terminal_view(f, model),
        _ => render_browser(f, model, icons),
    }
}

fn render_browser(f: &mut Frame, model: &Model, icons: &IconRenderer) {
    let size = f.area();
    let visible_lines = model.visible_lines();
    let command_output = model.ui.command_output.as_deref();
    let split = model.preview.visible || command_output.is_some();

    let layout_info = layout::calculate_layout(size, visible_lines, split);

    f.render_widget(
        title_line(format!("VFS File Manager - {}", model.navigation.current_path)),
        layout_info.title_area,
    );

    file_list::render_file_list(
        f,
        layout_info.list_area,
        &model.navigation,
        visible_lines,
        icons,
    );

    if let Some(side_area) = layout_info.side_area {
        match command_output {
            Some(output) => preview::render_command_output(f, side_area, output),
            None => preview::render_preview(
                f,
                side_area,
                model.current_entry(),
                &model.preview,
                visible_lines,
            ),
        }
    }

    status_bar::render_status_bar(f, layout_info.status_area, model);

    if let Some(position) = status_bar::render_input(f, layout_info.input_area, model) {
        f.set_cursor_position(position);
    }

    f.render_widget(
        Paragraph::new(Line::from(help::legend_spans(&model.ui.mode))),
        layout_info.legend_area,
    );
}

fn render_terminal_view(f: &mut Frame, model: &Model) {
    let (title_area, body_area, legend_area) = layout::terminal_layout(f.area());

    f.render_widget(
        title_line("VFS Terminal - Press # to return to Navigation".to_string()),
        title_area,
    );

    let cursor = terminal::render_terminal(
        f,
        body_area,
        &model.terminal,
        &model.navigation.current_path,
        &model.ui.input,
    );
    if let Some(position) = cursor {
        f.set_cursor_position(position);
    }

    f.render_widget(
        Paragraph::new(Line::from(help::legend_spans(&Mode::Terminal))),
        legend_area,
    );
}

fn render_help_view(f: &mut Frame) {
    let (title_area, body_area, legend_area) = layout::terminal_layout(f.area());
    f.render_widget(title_line("VFS File Manager - Help".to_string()), title_area);
    help::render_help(f, body_area);
    f.render_widget(
        Paragraph::new(Line::from(help::legend_spans(&Mode::Help))),
        legend_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn draw(model: &Model) -> Buffer {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let icons = IconRenderer::default();
        terminal.draw(|f| render(f, model, &icons)).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_browser_title_and_status() {
        let mut model = Model::default();
        model.resize(80, 24);
        let buffer = draw(&model);
        assert!(row_text(&buffer, 0).starts_with("VFS File Manager - /"));
        assert!(row_text(&buffer, 2).contains("(empty directory)"));
        let status_row = 2 + model.visible_lines() as u16 + 1;
        assert!(row_text(&buffer, status_row).contains("0 items"));
    }

    #[test]
    fn test_terminal_and_help_titles() {
        let mut model = Model::default();
        model.resize(80, 24);

        model.enter_terminal();
        assert!(row_text(&draw(&model), 0).starts_with("VFS Terminal - Press # to return"));

        model.exit_terminal();
        model.ui.mode = Mode::Help;
        assert!(row_text(&draw(&model), 0).starts_with("VFS File Manager - Help"));
    }
}
