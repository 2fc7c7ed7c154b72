//! Entry snapshot
//!
//! An [`Entry`] is a display-ready copy of one node as it looked when its
//! directory was listed. Entries are never mutated; a reload replaces the
//! whole list.

use chrono::{DateTime, Local, Utc};

use crate::logic::{self, file::FileCategory};
use crate::vfs::{FileMode, Metadata};

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub name: String,
    pub path: String,
    /// Bytes; meaningful only for files
    pub size: u64,
    pub mode: FileMode,
    pub modified: DateTime<Utc>,
    pub is_dir: bool,
    pub content_type: String,
}

impl Entry {
    /// Build an entry for `meta`, listed inside directory `dir`
    pub fn from_metadata(dir: &str, meta: Metadata) -> Self {
        let path = logic::path::child(dir, &meta.key);
        Self {
            is_dir: meta.mode.is_dir(),
            name: meta.key,
            path,
            size: meta.size,
            mode: meta.mode,
            modified: meta.modified,
            content_type: meta.content_type,
        }
    }

    pub fn is_mount(&self) -> bool {
        self.mode.is_mount()
    }

    /// Name with a trailing `/` for directories
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Size column: `<MNT>`, `<DIR>` or a scaled byte count
    pub fn display_size(&self) -> String {
        logic::formatting::format_size(self.size, self.mode)
    }

    pub fn display_mode(&self) -> String {
        logic::formatting::format_permissions(self.mode)
    }

    /// Modification time in local time
    pub fn display_mod_time(&self) -> String {
        self.modified
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    pub fn category(&self) -> FileCategory {
        logic::file::category_for(&self.name, self.mode)
    }
}
