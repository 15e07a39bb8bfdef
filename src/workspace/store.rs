//! Storage backends.
//!
//! A [`Store`] is the flat, byte-level face of a hierarchical storage
//! backend. All backends must behave identically for the same
//! [`ResourcePath`]; anything path-shaped is normalized before it gets
//! here. The host-IDE virtual-file wrapper lives outside the core,
//! behind this same trait.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;
use smol_str::SmolStr;

use super::path::ResourcePath;

/// Byte-level storage backend.
pub trait Store: Send + Sync {
    fn open_read(&self, path: &ResourcePath) -> io::Result<Box<dyn Read + Send>>;

    /// Opens a writer, creating missing intermediate containers.
    fn open_write(&self, path: &ResourcePath) -> io::Result<Box<dyn Write + Send>>;

    /// Recursive delete. Deleting an absent path is a no-op.
    fn delete(&self, path: &ResourcePath) -> io::Result<()>;

    /// Sorted child names of a container; empty for leaves and absences.
    fn children(&self, path: &ResourcePath) -> io::Result<Vec<SmolStr>>;

    fn exists(&self, path: &ResourcePath) -> bool;

    fn is_container(&self, path: &ResourcePath) -> bool;

    fn last_modified(&self, path: &ResourcePath) -> io::Result<SystemTime>;
}

// ============================================================================
// FILESYSTEM BACKEND
// ============================================================================

/// Store rooted at a local directory.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn os_path(&self, path: &ResourcePath) -> PathBuf {
        let mut os = self.root.clone();
        for segment in path.segments() {
            os.push(segment.as_str());
        }
        os
    }
}

impl Store for FsStore {
    fn open_read(&self, path: &ResourcePath) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(std::fs::File::open(self.os_path(path))?))
    }

    fn open_write(&self, path: &ResourcePath) -> io::Result<Box<dyn Write + Send>> {
        let os = self.os_path(path);
        if let Some(parent) = os.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Box::new(std::fs::File::create(os)?))
    }

    fn delete(&self, path: &ResourcePath) -> io::Result<()> {
        let os = self.os_path(path);
        match std::fs::metadata(&os) {
            Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(os),
            Ok(_) => std::fs::remove_file(os),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn children(&self, path: &ResourcePath) -> io::Result<Vec<SmolStr>> {
        let os = self.os_path(path);
        if !os.is_dir() {
            return Ok(Vec::new());
        }
        let mut names: Vec<SmolStr> = std::fs::read_dir(os)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .map(SmolStr::new)
            .collect();
        names.sort();
        Ok(names)
    }

    fn exists(&self, path: &ResourcePath) -> bool {
        self.os_path(path).exists()
    }

    fn is_container(&self, path: &ResourcePath) -> bool {
        self.os_path(path).is_dir()
    }

    fn last_modified(&self, path: &ResourcePath) -> io::Result<SystemTime> {
        std::fs::metadata(self.os_path(path))?.modified()
    }
}

// ============================================================================
// IN-MEMORY BACKEND
// ============================================================================

#[derive(Clone)]
struct MemEntry {
    data: Arc<Vec<u8>>,
    modified: SystemTime,
}

/// In-memory store keyed by path, for tests and headless embedding.
/// Containers are implicit: a path is a container when entries exist
/// below it.
#[derive(Clone, Default)]
pub struct MemStore {
    entries: Arc<RwLock<BTreeMap<ResourcePath, MemEntry>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Writer that commits its buffer to the map on drop.
struct MemWriter {
    entries: Arc<RwLock<BTreeMap<ResourcePath, MemEntry>>>,
    path: ResourcePath,
    buffer: Vec<u8>,
}

impl Write for MemWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MemWriter {
    fn drop(&mut self) {
        let entry = MemEntry {
            data: Arc::new(std::mem::take(&mut self.buffer)),
            modified: SystemTime::now(),
        };
        self.entries.write().insert(self.path.clone(), entry);
    }
}

impl Store for MemStore {
    fn open_read(&self, path: &ResourcePath) -> io::Result<Box<dyn Read + Send>> {
        let entries = self.entries.read();
        let entry = entries
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no entry '{path}'")))?;
        let data = Arc::clone(&entry.data);
        Ok(Box::new(io::Cursor::new(data.as_ref().clone())))
    }

    fn open_write(&self, path: &ResourcePath) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(MemWriter {
            entries: Arc::clone(&self.entries),
            path: path.clone(),
            buffer: Vec::new(),
        }))
    }

    fn delete(&self, path: &ResourcePath) -> io::Result<()> {
        let mut entries = self.entries.write();
        entries.retain(|key, _| !(key == path || key.starts_with(path)));
        Ok(())
    }

    fn children(&self, path: &ResourcePath) -> io::Result<Vec<SmolStr>> {
        let entries = self.entries.read();
        let mut names: Vec<SmolStr> = Vec::new();
        for key in entries.keys() {
            if let Some(first) = key.strip_prefix(path).and_then(|rest| rest.first()) {
                // BTreeMap iterates sorted, so children arrive in order.
                if names.last() != Some(first) {
                    names.push(first.clone());
                }
            }
        }
        Ok(names)
    }

    fn exists(&self, path: &ResourcePath) -> bool {
        if path.is_root() {
            return true;
        }
        let entries = self.entries.read();
        entries.contains_key(path) || entries.keys().any(|key| key != path && key.starts_with(path))
    }

    fn is_container(&self, path: &ResourcePath) -> bool {
        let entries = self.entries.read();
        entries
            .keys()
            .any(|key| key != path && key.starts_with(path))
    }

    fn last_modified(&self, path: &ResourcePath) -> io::Result<SystemTime> {
        let entries = self.entries.read();
        entries
            .get(path)
            .map(|entry| entry.modified)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no entry '{path}'")))
    }
}
