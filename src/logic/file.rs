//! File type detection and utilities
//!
//! Pure functions for classifying files by name and content. Classification
//! is extension driven and never fails, even for names without an extension.

use crate::vfs::FileMode;

/// Default share of control characters above which content is not text
pub const DEFAULT_CONTROL_THRESHOLD: f64 = 0.05;

/// Icon category of an entry, used for the file list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Mount,
    Directory,
    Text,
    Image,
    Video,
    Archive,
    Code,
    Default,
}

/// How the preview pipeline should render a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewClass {
    Text,
    Image,
    Binary,
    /// Recognised but not renderable; carries a short description
    Unsupported(&'static str),
}

/// Lower-cased extension of a file name, without the dot
///
/// A leading dot alone (`.env`) counts as an extension, matching how dotfiles
/// are usually classified.
///
/// # Examples
/// ```
/// use vfsh::logic::file::extension;
///
/// assert_eq!(extension("photo.JPG"), Some("jpg".to_string()));
/// assert_eq!(extension("archive.tar.gz"), Some("gz".to_string()));
/// assert_eq!(extension(".gitignore"), Some("gitignore".to_string()));
/// assert_eq!(extension("Makefile"), None);
/// assert_eq!(extension("trailing."), None);
/// ```
pub fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Icon category for an entry
///
/// # Arguments
/// * `name` - Leaf name of the entry
/// * `mode` - Mode bits; mount points and directories are checked first
///
/// # Examples
/// ```
/// use vfsh::logic::file::{category_for, FileCategory};
/// use vfsh::vfs::FileMode;
///
/// assert_eq!(category_for("notes.txt", FileMode::file(0o644)), FileCategory::Text);
/// assert_eq!(category_for("main.rs", FileMode::file(0o644)), FileCategory::Code);
/// assert_eq!(category_for("data", FileMode::directory(0o755)), FileCategory::Directory);
/// assert_eq!(category_for("README", FileMode::file(0o644)), FileCategory::Default);
/// ```
pub fn category_for(name: &str, mode: FileMode) -> FileCategory {
    if mode.is_mount() {
        return FileCategory::Mount;
    }
    if mode.is_dir() {
        return FileCategory::Directory;
    }

    let Some(ext) = extension(name) else {
        return FileCategory::Default;
    };

    match ext.as_str() {
        "txt" | "md" | "log" | "conf" | "cfg" | "ini" => FileCategory::Text,
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" => FileCategory::Image,
        "mp4" | "mkv" | "avi" | "mov" | "webm" => FileCategory::Video,
        "zip" | "tar" | "gz" | "bz2" | "7z" | "rar" | "xz" => FileCategory::Archive,
        "go" | "js" | "ts" | "py" | "java" | "c" | "cpp" | "h" | "rs" | "rb" | "php" | "sh" => {
            FileCategory::Code
        }
        _ => FileCategory::Default,
    }
}

/// Decide which preview handler a file goes to
///
/// Unknown extensions and names without one are text candidates; the text
/// handler validates the content before showing it.
///
/// # Examples
/// ```
/// use vfsh::logic::file::{classify, PreviewClass};
///
/// assert_eq!(classify("/docs/readme.md"), PreviewClass::Text);
/// assert_eq!(classify("/pics/cat.PNG"), PreviewClass::Image);
/// assert_eq!(classify("/bin/tool.exe"), PreviewClass::Binary);
/// assert_eq!(classify("/Makefile"), PreviewClass::Text);
/// assert_eq!(classify("/weird.xyz"), PreviewClass::Text);
/// ```
pub fn classify(path: &str) -> PreviewClass {
    let name = path.rsplit('/').next().unwrap_or(path);
    let Some(ext) = extension(name) else {
        return PreviewClass::Text;
    };

    match ext.as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" => PreviewClass::Image,
        "svg" => PreviewClass::Unsupported("SVG image"),
        "zip" | "gz" | "tar" | "bz2" | "7z" | "rar" | "xz" | "exe" | "dll" | "so" | "dylib"
        | "bin" | "dat" | "db" | "sqlite" | "pdf" | "doc" | "docx" | "xls" | "xlsx" | "ppt"
        | "pptx" | "mp3" | "mp4" | "avi" | "mkv" | "wav" | "flac" | "ogg" => PreviewClass::Binary,
        _ => PreviewClass::Text,
    }
}

/// Score a byte prefix as text
///
/// The bytes must be well-formed UTF-8 (a character cut off at the very end
/// of the buffer is tolerated since previews read a fixed-size prefix) and
/// the share of control characters other than tab, newline and carriage
/// return must stay below `threshold`.
///
/// # Examples
/// ```
/// use vfsh::logic::file::looks_like_text;
///
/// assert!(looks_like_text(b"hello\nworld\t!\r\n", 0.05));
/// assert!(looks_like_text(b"", 0.05));
/// assert!(!looks_like_text(b"\x00\x01\x02\x03binary", 0.05));
/// assert!(!looks_like_text(b"\xff\xfe", 0.05));
/// ```
pub fn looks_like_text(bytes: &[u8], threshold: f64) -> bool {
    let valid = match std::str::from_utf8(bytes) {
        Ok(_) => bytes,
        Err(e) if e.error_len().is_none() => &bytes[..e.valid_up_to()],
        Err(_) => return false,
    };

    if valid.is_empty() {
        return true;
    }

    let control = valid
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r')
        .count();

    (control as f64) / (valid.len() as f64) < threshold
}
