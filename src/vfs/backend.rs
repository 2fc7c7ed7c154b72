//! Backend contract for a single mount
//!
//! Backends see paths relative to their own mount point, always in canonical
//! absolute form (`/` is the mount root). The mount table in [`super::Vfs`]
//! does the translation.

use super::{Metadata, VfsError};

pub trait Backend: Send + Sync {
    /// Short name shown by the `mounts` command
    fn kind(&self) -> &'static str;

    fn stat(&self, path: &str) -> Result<Metadata, VfsError>;

    /// Children of a directory, in no particular order
    fn list(&self, path: &str) -> Result<Vec<Metadata>, VfsError>;

    /// Whole contents of a file
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError>;

    /// Up to `len` bytes starting at `offset`
    fn read_range(&self, path: &str, offset: u64, len: usize) -> Result<Vec<u8>, VfsError> {
        let data = self.read(path)?;
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(data.len());
        let end = start.saturating_add(len).min(data.len());
        Ok(data[start..end].to_vec())
    }

    /// Make sure a file exists at `path`
    ///
    /// `exclusive` fails with `AlreadyExists` when anything is already there;
    /// `truncate` empties an existing file.
    fn create(&self, path: &str, exclusive: bool, truncate: bool) -> Result<(), VfsError>;

    /// Replace the contents of an existing file
    fn write(&self, path: &str, data: &[u8]) -> Result<(), VfsError>;

    fn mkdir(&self, path: &str) -> Result<(), VfsError>;

    fn remove_file(&self, path: &str) -> Result<(), VfsError>;

    fn remove_dir(&self, path: &str, recursive: bool) -> Result<(), VfsError>;

    /// Flush and release resources; called once at shutdown
    fn close(&self) -> Result<(), VfsError>;
}
