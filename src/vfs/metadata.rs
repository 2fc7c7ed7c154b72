//! Raw metadata records handed out by the storage layer

use chrono::{DateTime, Utc};
use std::fmt;

/// Permission and type bits of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    pub const DIR: u32 = 1 << 31;
    pub const MOUNT: u32 = 1 << 30;
    pub const PERM_MASK: u32 = 0o777;

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Regular file with the given permission bits
    pub fn file(perm: u32) -> Self {
        Self(perm & Self::PERM_MASK)
    }

    /// Directory with the given permission bits
    pub fn directory(perm: u32) -> Self {
        Self(Self::DIR | (perm & Self::PERM_MASK))
    }

    /// Directory that is the root of a mounted backend
    pub fn mount_point(perm: u32) -> Self {
        Self(Self::DIR | Self::MOUNT | (perm & Self::PERM_MASK))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn perm(self) -> u32 {
        self.0 & Self::PERM_MASK
    }

    pub fn is_dir(self) -> bool {
        self.0 & Self::DIR != 0
    }

    pub fn is_mount(self) -> bool {
        self.0 & Self::MOUNT != 0
    }

    pub fn with_mount(self) -> Self {
        Self(self.0 | Self::DIR | Self::MOUNT)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::logic::formatting::format_permissions(*self))
    }
}

/// One node as reported by a backend
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Leaf name relative to the listed directory
    pub key: String,
    pub size: u64,
    pub mode: FileMode,
    pub modified: DateTime<Utc>,
    pub content_type: String,
}

impl Metadata {
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }
}

/// Advisory MIME type derived from a file name
pub fn content_type_for(name: &str, is_dir: bool) -> &'static str {
    if is_dir {
        return "inode/directory";
    }

    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "log" | "conf" | "cfg" | "ini" => "text/plain",
        "md" => "text/markdown",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "html" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
