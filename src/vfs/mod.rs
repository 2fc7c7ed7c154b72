//! Storage collaborator
//!
//! A small virtual filesystem built from a mount table. Each mount point is
//! served by one [`Backend`]; the [`Vfs`] translates absolute paths into
//! backend-relative ones and exposes the whole tree through the [`Storage`]
//! contract the browser is written against.

mod backend;
pub mod commands;
pub mod demo;
mod error;
mod memory;
mod metadata;
mod sqlite;

pub use backend::Backend;
pub use error::VfsError;
pub use memory::MemoryBackend;
pub use metadata::{content_type_for, FileMode, Metadata};
pub use sqlite::SqliteBackend;

use std::io::{Cursor, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::logic::path;

/// Flags for [`Storage::open_for_write`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    pub create: bool,
    pub truncate: bool,
    pub exclusive: bool,
}

impl OpenOptions {
    /// Create a brand new file, failing if anything exists at the path
    pub fn create_new() -> Self {
        Self {
            create: true,
            truncate: false,
            exclusive: true,
        }
    }

    /// Create or truncate
    pub fn create_truncate() -> Self {
        Self {
            create: true,
            truncate: true,
            exclusive: false,
        }
    }
}

/// Writable handle returned by [`Storage::open_for_write`]
///
/// Writes are buffered; nothing reaches the backend until `close` is called.
pub trait WriteHandle: Write + Send {
    fn close(self: Box<Self>) -> Result<(), VfsError>;
}

/// The contract the browser and its detached tasks use to reach the store
pub trait Storage: Send + Sync {
    /// Children of a directory, directories first then by name
    fn list_directory(&self, path: &str) -> Result<Vec<Metadata>, VfsError>;

    fn stat(&self, path: &str) -> Result<Metadata, VfsError>;

    /// Up to `len` bytes starting at `offset`
    fn read_file(&self, path: &str, offset: u64, len: usize) -> Result<Vec<u8>, VfsError>;

    fn open_for_write(
        &self,
        path: &str,
        options: OpenOptions,
    ) -> Result<Box<dyn WriteHandle>, VfsError>;

    fn open_for_read(&self, path: &str) -> Result<Box<dyn Read + Send>, VfsError>;

    fn create_directory(&self, path: &str) -> Result<(), VfsError>;

    fn remove_file(&self, path: &str) -> Result<(), VfsError>;

    fn remove_directory(&self, path: &str, recursive: bool) -> Result<(), VfsError>;

    /// Run a tokenized shell command, appending its text output to `out`
    fn execute(&self, args: &[String], out: &mut String) -> Result<i32, VfsError>;

    /// Flush and close every backend. Must be called exactly once.
    fn shutdown(&self) -> Result<(), VfsError>;
}

struct Mount {
    point: String,
    backend: Arc<dyn Backend>,
}

/// Mount-table filesystem
pub struct Vfs {
    mounts: RwLock<Vec<Mount>>,
    shut_down: AtomicBool,
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs {
    /// An empty mount table; mount something at `/` before use
    pub fn new() -> Self {
        Self {
            mounts: RwLock::new(Vec::new()),
            shut_down: AtomicBool::new(false),
        }
    }

    /// A filesystem with a single in-memory backend at `/`
    pub fn in_memory() -> Self {
        let vfs = Self::new();
        vfs.mounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Mount {
                point: "/".to_string(),
                backend: Arc::new(MemoryBackend::new()),
            });
        vfs
    }

    /// Attach a backend at `point`
    ///
    /// The root mount can be attached anywhere; other mount points must sit
    /// in an existing directory of their parent mount.
    pub fn mount(&self, point: &str, backend: Arc<dyn Backend>) -> Result<(), VfsError> {
        let point = path::normalize(point);

        {
            let mounts = self.mounts.read().map_err(|_| VfsError::poisoned("mount table"))?;
            if mounts.iter().any(|m| m.point == point) {
                return Err(VfsError::AlreadyExists(point));
            }
        }

        if point != "/" {
            let parent = path::parent(&point);
            let meta = self.stat(&parent)?;
            if !meta.is_dir() {
                return Err(VfsError::NotADirectory(parent));
            }
        }

        tracing::info!(point = %point, kind = backend.kind(), "mounted backend");

        let mut mounts = self.mounts.write().map_err(|_| VfsError::poisoned("mount table"))?;
        mounts.push(Mount { point, backend });
        Ok(())
    }

    /// Mount points with their backend kind, sorted by path
    pub fn mounts(&self) -> Result<Vec<(String, &'static str)>, VfsError> {
        let mounts = self.mounts.read().map_err(|_| VfsError::poisoned("mount table"))?;
        let mut table: Vec<(String, &'static str)> = mounts
            .iter()
            .map(|m| (m.point.clone(), m.backend.kind()))
            .collect();
        table.sort();
        Ok(table)
    }

    fn is_mount_point(&self, path: &str) -> Result<bool, VfsError> {
        let mounts = self.mounts.read().map_err(|_| VfsError::poisoned("mount table"))?;
        Ok(mounts.iter().any(|m| m.point == path))
    }

    /// Find the backend owning `path` and the path relative to its mount
    fn resolve(&self, path: &str) -> Result<(Arc<dyn Backend>, String), VfsError> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(VfsError::Io(std::io::Error::other("storage is shut down")));
        }

        let path = path::normalize(path);
        let mounts = self.mounts.read().map_err(|_| VfsError::poisoned("mount table"))?;

        let best = mounts
            .iter()
            .filter(|m| m.point == path || path::is_descendant(&path, &m.point))
            .max_by_key(|m| m.point.len())
            .ok_or_else(|| VfsError::NotFound(path.clone()))?;

        let relative = if best.point == "/" {
            path.clone()
        } else {
            path::normalize(&path[best.point.len()..])
        };

        Ok((Arc::clone(&best.backend), relative))
    }

    /// Mount points that appear directly inside `dir`
    fn child_mounts(&self, dir: &str) -> Result<Vec<String>, VfsError> {
        let mounts = self.mounts.read().map_err(|_| VfsError::poisoned("mount table"))?;
        Ok(mounts
            .iter()
            .filter(|m| m.point != dir && m.point != "/" && path::parent(&m.point) == dir)
            .map(|m| m.point.clone())
            .collect())
    }

    fn has_mount_below(&self, dir: &str) -> Result<bool, VfsError> {
        let mounts = self.mounts.read().map_err(|_| VfsError::poisoned("mount table"))?;
        Ok(mounts.iter().any(|m| path::is_descendant(&m.point, dir)))
    }

    fn guard_mount(&self, path: &str) -> Result<(), VfsError> {
        if path == "/" || self.is_mount_point(path)? {
            return Err(VfsError::PermissionDenied(path.to_string()));
        }
        Ok(())
    }
}

/// Directories first, then by name
pub fn sort_listing(entries: &mut [Metadata]) {
    entries.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.key.cmp(&b.key))
    });
}

impl Storage for Vfs {
    fn list_directory(&self, dir: &str) -> Result<Vec<Metadata>, VfsError> {
        let dir = path::normalize(dir);
        let (backend, relative) = self.resolve(&dir)?;
        let mut entries = backend.list(&relative)?;

        for point in self.child_mounts(&dir)? {
            let name = path::base_name(&point);
            let (mounted, _) = self.resolve(&point)?;
            let mut meta = mounted.stat("/")?;
            meta.key = name.clone();
            meta.mode = meta.mode.with_mount();
            entries.retain(|e| e.key != name);
            entries.push(meta);
        }

        sort_listing(&mut entries);
        Ok(entries)
    }

    fn stat(&self, target: &str) -> Result<Metadata, VfsError> {
        let target = path::normalize(target);
        let (backend, relative) = self.resolve(&target)?;
        let mut meta = backend.stat(&relative)?;
        meta.key = path::base_name(&target);
        if target != "/" && self.is_mount_point(&target)? {
            meta.mode = meta.mode.with_mount();
        }
        Ok(meta)
    }

    fn read_file(&self, target: &str, offset: u64, len: usize) -> Result<Vec<u8>, VfsError> {
        let (backend, relative) = self.resolve(target)?;
        if backend.stat(&relative)?.is_dir() {
            return Err(VfsError::IsDirectory(path::normalize(target)));
        }
        backend.read_range(&relative, offset, len)
    }

    fn open_for_write(
        &self,
        target: &str,
        options: OpenOptions,
    ) -> Result<Box<dyn WriteHandle>, VfsError> {
        let target = path::normalize(target);
        if target == "/" || self.is_mount_point(&target)? {
            return Err(VfsError::IsDirectory(target));
        }

        let (backend, relative) = self.resolve(&target)?;

        let existing = match backend.stat(&relative) {
            Ok(meta) => Some(meta),
            Err(VfsError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let seed = match existing {
            Some(meta) if meta.is_dir() => return Err(VfsError::IsDirectory(target)),
            Some(_) if options.create && options.exclusive => {
                return Err(VfsError::AlreadyExists(target))
            }
            Some(_) if options.truncate => {
                backend.create(&relative, false, true)?;
                Vec::new()
            }
            Some(_) => backend.read(&relative)?,
            None if !options.create => return Err(VfsError::NotFound(target)),
            None => {
                backend.create(&relative, options.exclusive, options.truncate)?;
                Vec::new()
            }
        };

        Ok(Box::new(BufferedWriter {
            backend,
            path: relative,
            buffer: Cursor::new(seed),
        }))
    }

    fn open_for_read(&self, target: &str) -> Result<Box<dyn Read + Send>, VfsError> {
        let (backend, relative) = self.resolve(target)?;
        if backend.stat(&relative)?.is_dir() {
            return Err(VfsError::IsDirectory(path::normalize(target)));
        }
        let data = backend.read(&relative)?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn create_directory(&self, target: &str) -> Result<(), VfsError> {
        let target = path::normalize(target);
        if target == "/" || self.is_mount_point(&target)? {
            return Err(VfsError::AlreadyExists(target));
        }
        let (backend, relative) = self.resolve(&target)?;
        backend.mkdir(&relative)
    }

    fn remove_file(&self, target: &str) -> Result<(), VfsError> {
        let target = path::normalize(target);
        self.guard_mount(&target)?;
        let (backend, relative) = self.resolve(&target)?;
        backend.remove_file(&relative)
    }

    fn remove_directory(&self, target: &str, recursive: bool) -> Result<(), VfsError> {
        let target = path::normalize(target);
        self.guard_mount(&target)?;
        if recursive && self.has_mount_below(&target)? {
            return Err(VfsError::PermissionDenied(target));
        }
        let (backend, relative) = self.resolve(&target)?;
        backend.remove_dir(&relative, recursive)
    }

    fn execute(&self, args: &[String], out: &mut String) -> Result<i32, VfsError> {
        commands::execute(self, args, out)
    }

    fn shutdown(&self) -> Result<(), VfsError> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return Err(VfsError::Validation("storage already shut down".to_string()));
        }

        let mounts = self.mounts.read().map_err(|_| VfsError::poisoned("mount table"))?;
        let mut first_error = None;
        for mount in mounts.iter() {
            if let Err(e) = mount.backend.close() {
                tracing::error!(point = %mount.point, error = %e, "failed to close backend");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Write handle that commits its buffer to the backend on close
struct BufferedWriter {
    backend: Arc<dyn Backend>,
    path: String,
    buffer: Cursor<Vec<u8>>,
}

impl Write for BufferedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl WriteHandle for BufferedWriter {
    fn close(self: Box<Self>) -> Result<(), VfsError> {
        let data = self.buffer.into_inner();
        self.backend.write(&self.path, &data)
    }
}
