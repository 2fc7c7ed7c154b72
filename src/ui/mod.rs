// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - icons: Icon rendering (emoji, Nerd Fonts, ASCII) with themes
// - layout: Calculates screen layout (title, list, side pane, status lines)
// - render: Main orchestration function, one view per mode
// - file_list: Renders the directory listing
// - preview: Renders the preview pane and command output
// - status_bar: Renders the item count, messages and the input prompt
// - terminal: Renders the embedded shell history
// - help: Renders the help screen and the key legend

pub mod file_list;
pub mod help;
pub mod icons;
pub mod layout;
pub mod preview;
pub mod render;
pub mod status_bar;
pub mod terminal;

// Re-export main render function for convenience
pub use render::render;
