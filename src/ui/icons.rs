use ratatui::{
    style::{Color, Style},
    text::Span,
};
use serde::{Deserialize, Serialize};

use crate::logic::file::FileCategory;

/// Icon display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconMode {
    #[default]
    Emoji, // Standard emoji icons (📂, 📄, etc.)
    NerdFont, // Nerd Fonts icons (U+F07C, etc.)
    Ascii,    // Plain brackets for terminals without either
}

/// Icon theme using terminal colors (respects user's terminal theme)
#[derive(Debug, Clone)]
pub struct IconTheme {
    pub mount_color: Color,
    pub folder_color: Color,
    pub text_color: Color,
    pub image_color: Color,
    pub video_color: Color,
    pub archive_color: Color,
    pub code_color: Color,
    pub file_color: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            mount_color: Color::Magenta,
            folder_color: Color::Blue,
            text_color: Color::White,
            image_color: Color::Green,
            video_color: Color::LightMagenta,
            archive_color: Color::Red,
            code_color: Color::Yellow,
            file_color: Color::Cyan,
        }
    }
}

/// Icon renderer that handles emoji, Nerd Font and ASCII modes
#[derive(Debug, Clone)]
pub struct IconRenderer {
    mode: IconMode,
    theme: IconTheme,
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::new(IconMode::default(), IconTheme::default())
    }
}

impl IconRenderer {
    pub fn new(mode: IconMode, theme: IconTheme) -> Self {
        Self { mode, theme }
    }

    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Icon for an entry of the given category
    pub fn for_category(&self, category: FileCategory) -> Span<'static> {
        let (emoji, nerd, ascii, color) = match category {
            FileCategory::Mount => ("🗃️", "\u{F1C0}", "[M]", self.theme.mount_color),
            FileCategory::Directory => ("📂", "\u{F07C}", "[D]", self.theme.folder_color),
            FileCategory::Text => ("📑", "\u{F15C}", "[T]", self.theme.text_color),
            FileCategory::Image => ("🖼️", "\u{F1C5}", "[I]", self.theme.image_color),
            FileCategory::Video => ("🎞️", "\u{F1C8}", "[V]", self.theme.video_color),
            FileCategory::Archive => ("📦", "\u{F1C6}", "[A]", self.theme.archive_color),
            FileCategory::Code => ("📇", "\u{F1C9}", "[C]", self.theme.code_color),
            FileCategory::Default => ("📄", "\u{F15B}", "[F]", self.theme.file_color),
        };

        let icon = match self.mode {
            IconMode::Emoji => emoji,
            IconMode::NerdFont => nerd,
            IconMode::Ascii => ascii,
        };

        Span::styled(icon, Style::default().fg(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_icons() {
        let renderer = IconRenderer::new(IconMode::Ascii, IconTheme::default());
        assert_eq!(renderer.for_category(FileCategory::Mount).content, "[M]");
        assert_eq!(renderer.for_category(FileCategory::Directory).content, "[D]");
    }

    #[test]
    fn test_emoji_is_default() {
        let renderer = IconRenderer::default();
        assert_eq!(renderer.mode(), IconMode::Emoji);
        assert_eq!(renderer.for_category(FileCategory::Directory).content, "📂");
        assert_eq!(renderer.for_category(FileCategory::Default).content, "📄");
    }

    #[test]
    fn test_icon_mode_names() {
        let mode: IconMode = serde_yaml::from_str("nerdfont").unwrap();
        assert_eq!(mode, IconMode::NerdFont);
        let mode: IconMode = serde_yaml::from_str("ascii").unwrap();
        assert_eq!(mode, IconMode::Ascii);
    }
}
