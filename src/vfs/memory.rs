//! Volatile backend kept entirely in memory

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{content_type_for, Backend, FileMode, Metadata, VfsError};
use crate::logic::path;

#[derive(Debug, Clone)]
struct MemNode {
    is_dir: bool,
    data: Vec<u8>,
    mode: FileMode,
    modified: DateTime<Utc>,
}

impl MemNode {
    fn directory() -> Self {
        Self {
            is_dir: true,
            data: Vec::new(),
            mode: FileMode::directory(0o755),
            modified: Utc::now(),
        }
    }

    fn file() -> Self {
        Self {
            is_dir: false,
            data: Vec::new(),
            mode: FileMode::file(0o644),
            modified: Utc::now(),
        }
    }

    fn metadata(&self, path: &str) -> Metadata {
        let key = path::base_name(path);
        Metadata {
            content_type: content_type_for(&key, self.is_dir).to_string(),
            key,
            size: self.data.len() as u64,
            mode: self.mode,
            modified: self.modified,
        }
    }
}

/// Nodes keyed by their absolute path within the mount
pub struct MemoryBackend {
    nodes: RwLock<BTreeMap<String, MemNode>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), MemNode::directory());
        Self {
            nodes: RwLock::new(nodes),
        }
    }
}

fn child_prefix(dir: &str) -> String {
    if dir == "/" {
        "/".to_string()
    } else {
        format!("{}/", dir)
    }
}

fn require_parent_dir(nodes: &BTreeMap<String, MemNode>, target: &str) -> Result<(), VfsError> {
    let parent = path::parent(target);
    match nodes.get(&parent) {
        Some(node) if node.is_dir => Ok(()),
        Some(_) => Err(VfsError::NotADirectory(parent)),
        None => Err(VfsError::NotFound(parent)),
    }
}

fn has_children(nodes: &BTreeMap<String, MemNode>, dir: &str) -> bool {
    let prefix = child_prefix(dir);
    nodes
        .range(prefix.clone()..)
        .take_while(|(key, _)| key.starts_with(&prefix))
        .any(|(key, _)| key.len() > prefix.len())
}

impl Backend for MemoryBackend {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn stat(&self, target: &str) -> Result<Metadata, VfsError> {
        let nodes = self.nodes.read().map_err(|_| VfsError::poisoned("memory backend"))?;
        nodes
            .get(target)
            .map(|node| node.metadata(target))
            .ok_or_else(|| VfsError::NotFound(target.to_string()))
    }

    fn list(&self, dir: &str) -> Result<Vec<Metadata>, VfsError> {
        let nodes = self.nodes.read().map_err(|_| VfsError::poisoned("memory backend"))?;
        match nodes.get(dir) {
            Some(node) if node.is_dir => {}
            Some(_) => return Err(VfsError::NotADirectory(dir.to_string())),
            None => return Err(VfsError::NotFound(dir.to_string())),
        }

        let prefix = child_prefix(dir);
        Ok(nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter(|(key, _)| {
                let rest = &key[prefix.len()..];
                !rest.is_empty() && !rest.contains('/')
            })
            .map(|(key, node)| node.metadata(key))
            .collect())
    }

    fn read(&self, target: &str) -> Result<Vec<u8>, VfsError> {
        let nodes = self.nodes.read().map_err(|_| VfsError::poisoned("memory backend"))?;
        match nodes.get(target) {
            Some(node) if node.is_dir => Err(VfsError::IsDirectory(target.to_string())),
            Some(node) => Ok(node.data.clone()),
            None => Err(VfsError::NotFound(target.to_string())),
        }
    }

    fn create(&self, target: &str, exclusive: bool, truncate: bool) -> Result<(), VfsError> {
        let mut nodes = self.nodes.write().map_err(|_| VfsError::poisoned("memory backend"))?;
        require_parent_dir(&nodes, target)?;

        match nodes.get_mut(target) {
            Some(node) if node.is_dir => Err(VfsError::IsDirectory(target.to_string())),
            Some(_) if exclusive => Err(VfsError::AlreadyExists(target.to_string())),
            Some(node) => {
                if truncate {
                    node.data.clear();
                    node.modified = Utc::now();
                }
                Ok(())
            }
            None => {
                nodes.insert(target.to_string(), MemNode::file());
                Ok(())
            }
        }
    }

    fn write(&self, target: &str, data: &[u8]) -> Result<(), VfsError> {
        let mut nodes = self.nodes.write().map_err(|_| VfsError::poisoned("memory backend"))?;
        match nodes.get_mut(target) {
            Some(node) if node.is_dir => Err(VfsError::IsDirectory(target.to_string())),
            Some(node) => {
                node.data = data.to_vec();
                node.modified = Utc::now();
                Ok(())
            }
            None => Err(VfsError::NotFound(target.to_string())),
        }
    }

    fn mkdir(&self, target: &str) -> Result<(), VfsError> {
        let mut nodes = self.nodes.write().map_err(|_| VfsError::poisoned("memory backend"))?;
        if nodes.contains_key(target) {
            return Err(VfsError::AlreadyExists(target.to_string()));
        }
        require_parent_dir(&nodes, target)?;
        nodes.insert(target.to_string(), MemNode::directory());
        Ok(())
    }

    fn remove_file(&self, target: &str) -> Result<(), VfsError> {
        let mut nodes = self.nodes.write().map_err(|_| VfsError::poisoned("memory backend"))?;
        match nodes.get(target) {
            Some(node) if node.is_dir => Err(VfsError::IsDirectory(target.to_string())),
            Some(_) => {
                nodes.remove(target);
                Ok(())
            }
            None => Err(VfsError::NotFound(target.to_string())),
        }
    }

    fn remove_dir(&self, target: &str, recursive: bool) -> Result<(), VfsError> {
        if target == "/" {
            return Err(VfsError::PermissionDenied(target.to_string()));
        }

        let mut nodes = self.nodes.write().map_err(|_| VfsError::poisoned("memory backend"))?;
        match nodes.get(target) {
            Some(node) if !node.is_dir => return Err(VfsError::NotADirectory(target.to_string())),
            Some(_) => {}
            None => return Err(VfsError::NotFound(target.to_string())),
        }

        if has_children(&nodes, target) {
            if !recursive {
                return Err(VfsError::NotEmpty(target.to_string()));
            }
            let prefix = child_prefix(target);
            nodes.retain(|key, _| !key.starts_with(&prefix));
        }

        nodes.remove(target);
        Ok(())
    }

    fn close(&self) -> Result<(), VfsError> {
        Ok(())
    }
}
