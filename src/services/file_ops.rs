//! File mutations
//!
//! Blocking operations behind the new-file, new-directory, rename and
//! delete prompts.

use std::io;

use crate::vfs::{OpenOptions, Storage, VfsError};

/// Create an empty file; fails if anything already exists at `path`
pub fn create_file(storage: &dyn Storage, path: &str) -> Result<(), VfsError> {
    storage.open_for_write(path, OpenOptions::create_new())?.close()
}

pub fn create_directory(storage: &dyn Storage, path: &str) -> Result<(), VfsError> {
    storage.create_directory(path)
}

/// Copy the file `source` to a new file `destination`
///
/// Together with [`remove_source`] this is how files are renamed.
pub fn copy_file(storage: &dyn Storage, source: &str, destination: &str) -> Result<(), VfsError> {
    let mut reader = storage.open_for_read(source)?;
    let mut writer = storage.open_for_write(destination, OpenOptions::create_new())?;
    io::copy(&mut reader, &mut writer)?;
    writer.close()
}

pub fn remove_source(storage: &dyn Storage, source: &str) -> Result<(), VfsError> {
    storage.remove_file(source)
}

/// Remove a file, or a directory with everything below it
pub fn delete(storage: &dyn Storage, path: &str, is_dir: bool) -> Result<(), VfsError> {
    if is_dir {
        storage.remove_directory(path, true)
    } else {
        storage.remove_file(path)
    }
}
