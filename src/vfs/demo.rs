//! Sample content for `--demo`

use std::io::Write;
use std::sync::Arc;

use super::{MemoryBackend, OpenOptions, Storage, Vfs, VfsError};

pub const DEMO_MOUNT: &str = "/demo";

const DIRECTORIES: &[&str] = &[
    "/demo/documents",
    "/demo/downloads",
    "/demo/logs",
    "/demo/config",
];

const FILES: &[(&str, &str)] = &[
    ("/demo/readme.txt", "Welcome to the VFS demo!"),
    ("/demo/documents/notes.txt", "This is a sample document"),
    ("/demo/downloads/file1.dat", "Download One"),
    ("/demo/downloads/file2.dat", "Download Two"),
    ("/demo/config/config.conf", "# Configuration file\nenabled = true"),
    (
        "/demo/logs/system.log",
        "System log entry 1\nSystem log entry 2\nSystem log entry 3",
    ),
];

/// Mount a fresh in-memory backend at `/demo` and fill it with sample files
pub fn seed(vfs: &Vfs) -> Result<(), VfsError> {
    vfs.mount(DEMO_MOUNT, Arc::new(MemoryBackend::new()))?;

    for dir in DIRECTORIES {
        vfs.create_directory(dir)?;
    }

    for (path, content) in FILES {
        let mut handle = vfs.open_for_write(path, OpenOptions::create_new())?;
        handle.write_all(content.as_bytes())?;
        handle.close()?;
    }

    tracing::info!(
        directories = DIRECTORIES.len(),
        files = FILES.len(),
        "seeded demo mount"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_creates_tree() {
        let vfs = Vfs::in_memory();
        seed(&vfs).unwrap();

        let root: Vec<String> = vfs
            .list_directory("/demo")
            .unwrap()
            .into_iter()
            .map(|m| m.key)
            .collect();
        assert_eq!(root, vec!["config", "documents", "downloads", "logs", "readme.txt"]);

        let data = vfs.read_file("/demo/logs/system.log", 0, 1024).unwrap();
        assert!(String::from_utf8(data).unwrap().starts_with("System log entry 1"));
    }

    #[test]
    fn test_seed_twice_fails() {
        let vfs = Vfs::in_memory();
        seed(&vfs).unwrap();
        assert!(matches!(seed(&vfs), Err(VfsError::AlreadyExists(_))));
    }
}
