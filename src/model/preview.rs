//! Preview Model
//!
//! The preview pane content and the generation counter that guards it
//! against stale asynchronous results.

/// Rendered preview of one file
#[derive(Clone, Debug, PartialEq)]
pub enum Preview {
    /// Directory, empty file or nothing selected
    Empty,
    /// Text excerpt from the start of the file
    Text(String),
    /// Downscaled image drawn with ANSI colour escapes
    Image {
        format: String,
        width: u32,
        height: u32,
        art: String,
    },
    /// Header plus hex dump
    Binary(String),
    /// Informational message shown instead of content
    Notice(String),
}

impl Preview {
    /// Full text for the preview pane, ANSI escapes included for images
    pub fn rendered(&self) -> String {
        match self {
            Preview::Empty => String::new(),
            Preview::Text(text) | Preview::Binary(text) | Preview::Notice(text) => text.clone(),
            Preview::Image {
                format,
                width,
                height,
                art,
            } => format!(
                "Image: {} format, {}x{} pixels\n\n{}",
                format, width, height, art
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Preview::Empty => true,
            Preview::Text(text) | Preview::Binary(text) | Preview::Notice(text) => text.is_empty(),
            Preview::Image { .. } => false,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Preview::Image { .. })
    }
}

#[derive(Clone, Debug)]
pub struct PreviewModel {
    /// Whether the preview pane is shown
    pub visible: bool,

    /// Bumped for every preview request, cursor move and navigation
    pub generation: u64,

    /// Content produced by `shown_generation`
    pub content: Option<Preview>,

    /// Error produced by `shown_generation`
    pub error: Option<String>,

    /// Generation whose result is currently displayed
    pub shown_generation: u64,
}

impl PreviewModel {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            generation: 0,
            content: None,
            error: None,
            shown_generation: 0,
        }
    }

    /// Start a new generation, returning its number
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Store a result if it belongs to the live generation
    ///
    /// Returns `false` (and changes nothing) for stale results.
    pub fn apply(&mut self, generation: u64, result: Result<Preview, String>) -> bool {
        if generation != self.generation {
            return false;
        }

        match result {
            Ok(preview) => {
                self.content = Some(preview);
                self.error = None;
            }
            Err(error) => {
                self.content = None;
                self.error = Some(error);
            }
        }
        self.shown_generation = generation;
        true
    }

    /// Drop whatever is shown and invalidate in-flight results
    pub fn invalidate(&mut self) {
        self.next_generation();
        self.content = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_live_generation() {
        let mut model = PreviewModel::new(true);
        let g1 = model.next_generation();
        let g2 = model.next_generation();

        assert!(!model.apply(g1, Ok(Preview::Text("old".into()))));
        assert!(model.content.is_none());

        assert!(model.apply(g2, Ok(Preview::Text("new".into()))));
        assert_eq!(model.content, Some(Preview::Text("new".into())));
        assert_eq!(model.shown_generation, g2);
    }

    #[test]
    fn test_apply_error_clears_content() {
        let mut model = PreviewModel::new(true);
        let g = model.next_generation();
        model.apply(g, Ok(Preview::Text("x".into())));
        let g = model.next_generation();
        model.apply(g, Err("boom".into()));
        assert!(model.content.is_none());
        assert_eq!(model.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_invalidate_discards_in_flight() {
        let mut model = PreviewModel::new(true);
        let g = model.next_generation();
        model.invalidate();
        assert!(!model.apply(g, Ok(Preview::Empty)));
    }

    #[test]
    fn test_image_rendered_header() {
        let preview = Preview::Image {
            format: "png".into(),
            width: 640,
            height: 480,
            art: "ART".into(),
        };
        assert_eq!(preview.rendered(), "Image: png format, 640x480 pixels\n\nART");
        assert!(preview.is_image());
        assert!(!preview.is_empty());
    }
}
