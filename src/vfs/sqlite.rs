//! Persistent backend stored in a single SQLite database

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use super::{content_type_for, Backend, FileMode, Metadata, VfsError};
use crate::logic::path;

pub struct SqliteBackend {
    conn: Mutex<Option<Connection>>,
}

struct Row {
    is_dir: bool,
    size: u64,
    mode: u32,
    modified: i64,
}

impl SqliteBackend {
    /// Open (or create) the database file at `db_path`
    pub fn open(db_path: &Path) -> Result<Self, VfsError> {
        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, VfsError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, VfsError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS nodes (
                path TEXT PRIMARY KEY,
                parent TEXT,
                is_dir INTEGER NOT NULL,
                data BLOB NOT NULL DEFAULT x'',
                mode INTEGER NOT NULL,
                modified INTEGER NOT NULL
            ) WITHOUT ROWID;

            CREATE INDEX IF NOT EXISTS nodes_parent ON nodes(parent);
            ",
        )?;

        conn.execute(
            "INSERT OR IGNORE INTO nodes (path, parent, is_dir, mode, modified)
             VALUES ('/', NULL, 1, ?1, ?2)",
            params![FileMode::directory(0o755).bits(), Utc::now().timestamp_millis()],
        )?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, VfsError>,
    ) -> Result<T, VfsError> {
        let guard = self.conn.lock().map_err(|_| VfsError::poisoned("sqlite backend"))?;
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(VfsError::Io(std::io::Error::other("database is closed"))),
        }
    }
}

fn lookup(conn: &Connection, target: &str) -> Result<Option<Row>, VfsError> {
    let row = conn
        .query_row(
            "SELECT is_dir, length(data), mode, modified FROM nodes WHERE path = ?1",
            params![target],
            |row| {
                Ok(Row {
                    is_dir: row.get::<_, i64>(0)? != 0,
                    size: row.get::<_, i64>(1)? as u64,
                    mode: row.get(2)?,
                    modified: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

fn to_metadata(target: &str, row: &Row) -> Metadata {
    let key = path::base_name(target);
    Metadata {
        content_type: content_type_for(&key, row.is_dir).to_string(),
        key,
        size: row.size,
        mode: FileMode::from_bits(row.mode),
        modified: DateTime::from_timestamp_millis(row.modified).unwrap_or_default(),
    }
}

fn require_parent_dir(conn: &Connection, target: &str) -> Result<String, VfsError> {
    let parent = path::parent(target);
    match lookup(conn, &parent)? {
        Some(row) if row.is_dir => Ok(parent),
        Some(_) => Err(VfsError::NotADirectory(parent)),
        None => Err(VfsError::NotFound(parent)),
    }
}

fn insert_node(conn: &Connection, target: &str, parent: &str, mode: FileMode) -> Result<(), VfsError> {
    conn.execute(
        "INSERT INTO nodes (path, parent, is_dir, mode, modified) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            target,
            parent,
            mode.is_dir() as i64,
            mode.bits(),
            Utc::now().timestamp_millis()
        ],
    )?;
    Ok(())
}

impl Backend for SqliteBackend {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    fn stat(&self, target: &str) -> Result<Metadata, VfsError> {
        self.with_conn(|conn| match lookup(conn, target)? {
            Some(row) => Ok(to_metadata(target, &row)),
            None => Err(VfsError::NotFound(target.to_string())),
        })
    }

    fn list(&self, dir: &str) -> Result<Vec<Metadata>, VfsError> {
        self.with_conn(|conn| {
            match lookup(conn, dir)? {
                Some(row) if row.is_dir => {}
                Some(_) => return Err(VfsError::NotADirectory(dir.to_string())),
                None => return Err(VfsError::NotFound(dir.to_string())),
            }

            let mut stmt = conn.prepare(
                "SELECT path, is_dir, length(data), mode, modified FROM nodes WHERE parent = ?1",
            )?;
            let rows = stmt.query_map(params![dir], |row| {
                let node_path: String = row.get(0)?;
                Ok((
                    node_path,
                    Row {
                        is_dir: row.get::<_, i64>(1)? != 0,
                        size: row.get::<_, i64>(2)? as u64,
                        mode: row.get(3)?,
                        modified: row.get(4)?,
                    },
                ))
            })?;

            let mut entries = Vec::new();
            for row in rows {
                let (node_path, row) = row?;
                entries.push(to_metadata(&node_path, &row));
            }
            Ok(entries)
        })
    }

    fn read(&self, target: &str) -> Result<Vec<u8>, VfsError> {
        self.read_range(target, 0, usize::MAX)
    }

    fn read_range(&self, target: &str, offset: u64, len: usize) -> Result<Vec<u8>, VfsError> {
        self.with_conn(|conn| {
            match lookup(conn, target)? {
                Some(row) if row.is_dir => return Err(VfsError::IsDirectory(target.to_string())),
                Some(_) => {}
                None => return Err(VfsError::NotFound(target.to_string())),
            }

            let start = i64::try_from(offset).unwrap_or(i64::MAX).saturating_add(1);
            let len = i64::try_from(len).unwrap_or(i64::MAX);
            let data: Vec<u8> = conn.query_row(
                "SELECT substr(data, ?2, ?3) FROM nodes WHERE path = ?1",
                params![target, start, len],
                |row| row.get(0),
            )?;
            Ok(data)
        })
    }

    fn create(&self, target: &str, exclusive: bool, truncate: bool) -> Result<(), VfsError> {
        self.with_conn(|conn| {
            let parent = require_parent_dir(conn, target)?;
            match lookup(conn, target)? {
                Some(row) if row.is_dir => Err(VfsError::IsDirectory(target.to_string())),
                Some(_) if exclusive => Err(VfsError::AlreadyExists(target.to_string())),
                Some(_) => {
                    if truncate {
                        conn.execute(
                            "UPDATE nodes SET data = x'', modified = ?2 WHERE path = ?1",
                            params![target, Utc::now().timestamp_millis()],
                        )?;
                    }
                    Ok(())
                }
                None => insert_node(conn, target, &parent, FileMode::file(0o644)),
            }
        })
    }

    fn write(&self, target: &str, data: &[u8]) -> Result<(), VfsError> {
        self.with_conn(|conn| {
            match lookup(conn, target)? {
                Some(row) if row.is_dir => return Err(VfsError::IsDirectory(target.to_string())),
                Some(_) => {}
                None => return Err(VfsError::NotFound(target.to_string())),
            }
            conn.execute(
                "UPDATE nodes SET data = ?2, modified = ?3 WHERE path = ?1",
                params![target, data, Utc::now().timestamp_millis()],
            )?;
            Ok(())
        })
    }

    fn mkdir(&self, target: &str) -> Result<(), VfsError> {
        self.with_conn(|conn| {
            if lookup(conn, target)?.is_some() {
                return Err(VfsError::AlreadyExists(target.to_string()));
            }
            let parent = require_parent_dir(conn, target)?;
            insert_node(conn, target, &parent, FileMode::directory(0o755))
        })
    }

    fn remove_file(&self, target: &str) -> Result<(), VfsError> {
        self.with_conn(|conn| {
            match lookup(conn, target)? {
                Some(row) if row.is_dir => Err(VfsError::IsDirectory(target.to_string())),
                Some(_) => {
                    conn.execute("DELETE FROM nodes WHERE path = ?1", params![target])?;
                    Ok(())
                }
                None => Err(VfsError::NotFound(target.to_string())),
            }
        })
    }

    fn remove_dir(&self, target: &str, recursive: bool) -> Result<(), VfsError> {
        if target == "/" {
            return Err(VfsError::PermissionDenied(target.to_string()));
        }

        self.with_conn(|conn| {
            match lookup(conn, target)? {
                Some(row) if !row.is_dir => {
                    return Err(VfsError::NotADirectory(target.to_string()))
                }
                Some(_) => {}
                None => return Err(VfsError::NotFound(target.to_string())),
            }

            let children: i64 = conn.query_row(
                "SELECT COUNT(*) FROM nodes WHERE parent = ?1",
                params![target],
                |row| row.get(0),
            )?;

            if children > 0 && !recursive {
                return Err(VfsError::NotEmpty(target.to_string()));
            }

            // substr keeps `_` and `%` in names from acting as wildcards
            let prefix = format!("{}/", target);
            conn.execute(
                "DELETE FROM nodes WHERE path = ?1 OR substr(path, 1, length(?2)) = ?2",
                params![target, prefix],
            )?;
            Ok(())
        })
    }

    fn close(&self) -> Result<(), VfsError> {
        let mut guard = self.conn.lock().map_err(|_| VfsError::poisoned("sqlite backend"))?;
        match guard.take() {
            Some(conn) => conn.close().map_err(|(_, e)| VfsError::from(e)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_exists() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        assert!(backend.stat("/").unwrap().is_dir());
    }

    #[test]
    fn test_file_roundtrip_and_range() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        backend.create("/notes.txt", true, false).unwrap();
        backend.write("/notes.txt", b"hello world").unwrap();
        assert_eq!(backend.read("/notes.txt").unwrap(), b"hello world");
        assert_eq!(backend.read_range("/notes.txt", 6, 5).unwrap(), b"world");
        assert_eq!(backend.stat("/notes.txt").unwrap().size, 11);
    }

    #[test]
    fn test_recursive_delete_with_wildcard_names() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        backend.mkdir("/a_b").unwrap();
        backend.mkdir("/axb").unwrap();
        backend.create("/a_b/f", true, false).unwrap();
        backend.create("/axb/f", true, false).unwrap();

        backend.remove_dir("/a_b", true).unwrap();
        assert!(backend.stat("/a_b/f").is_err());
        assert!(backend.stat("/axb/f").is_ok());
    }

    #[test]
    fn test_closed_backend_rejects_operations() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        backend.close().unwrap();
        assert!(backend.stat("/").is_err());
    }
}
