//! Addressable nodes of a workspace.
//!
//! A [`Resource`] pairs a shared [`Store`] with a normalized path.
//! Handles are cheap to clone and make no existence claim: `select` is
//! pure navigation, and only the read/write/delete operations touch the
//! backend.

use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::SystemTime;

use super::path::ResourcePath;
use super::pattern::Pattern;
use super::store::Store;

/// One addressable node in a hierarchical store.
#[derive(Clone)]
pub struct Resource {
    store: Arc<dyn Store>,
    path: ResourcePath,
}

impl Resource {
    /// The root resource of a store.
    pub fn root(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            path: ResourcePath::root(),
        }
    }

    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// Path relative to the workspace root.
    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    pub fn parent(&self) -> Option<Resource> {
        Some(Self {
            store: Arc::clone(&self.store),
            path: self.path.parent()?,
        })
    }

    /// Pure navigation; the target need not exist.
    pub fn select(&self, relative: &str) -> Resource {
        Self {
            store: Arc::clone(&self.store),
            path: self.path.join(relative),
        }
    }

    /// Navigates to an absolute workspace path.
    pub fn at(&self, path: &ResourcePath) -> Resource {
        Self {
            store: Arc::clone(&self.store),
            path: path.clone(),
        }
    }

    pub fn exists(&self) -> bool {
        self.store.exists(&self.path)
    }

    pub fn is_container(&self) -> bool {
        self.store.is_container(&self.path)
    }

    pub fn children(&self) -> io::Result<Vec<Resource>> {
        let names = self.store.children(&self.path)?;
        Ok(names
            .into_iter()
            .map(|name| Self {
                store: Arc::clone(&self.store),
                path: self.path.child(&name),
            })
            .collect())
    }

    /// All paths under this resource matching `pattern`, sorted. The
    /// pattern's base is resolved relative to this resource; an absent
    /// base yields an empty set.
    pub fn matching(&self, pattern: &Pattern) -> io::Result<Vec<ResourcePath>> {
        let base = self.path.join(&pattern.base().to_string());
        let mut matches = Vec::new();
        self.collect_matching(&base, pattern, &mut matches)?;
        matches.sort();
        Ok(matches)
    }

    fn collect_matching(
        &self,
        at: &ResourcePath,
        pattern: &Pattern,
        matches: &mut Vec<ResourcePath>,
    ) -> io::Result<()> {
        if !self.store.exists(at) {
            return Ok(());
        }
        if self.store.is_container(at) {
            for name in self.store.children(at)? {
                self.collect_matching(&at.child(&name), pattern, matches)?;
            }
        } else if let Some(relative) = at.strip_prefix(&self.path) {
            let relative = ResourcePath::parse(
                &relative
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join("/"),
            );
            if pattern.matches(&relative) {
                matches.push(relative);
            }
        }
        Ok(())
    }

    pub fn open_read(&self) -> io::Result<Box<dyn Read + Send>> {
        self.store.open_read(&self.path)
    }

    /// Opens a writer, creating missing intermediate containers.
    pub fn open_write(&self) -> io::Result<Box<dyn Write + Send>> {
        self.store.open_write(&self.path)
    }

    pub fn read_to_string(&self) -> io::Result<String> {
        let mut out = String::new();
        self.open_read()?.read_to_string(&mut out)?;
        Ok(out)
    }

    pub fn write_str(&self, content: &str) -> io::Result<()> {
        let mut writer = self.open_write()?;
        writer.write_all(content.as_bytes())?;
        writer.flush()
    }

    /// Recursive delete; absent targets are a no-op.
    pub fn delete(&self) -> io::Result<()> {
        self.store.delete(&self.path)
    }

    pub fn last_modified(&self) -> io::Result<SystemTime> {
        self.store.last_modified(&self.path)
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Resource({})", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::store::MemStore;

    fn root_with(paths: &[&str]) -> Resource {
        let store = MemStore::new();
        let root = Resource::root(Arc::new(store));
        for path in paths {
            root.select(path).write_str("content").unwrap();
        }
        root
    }

    #[test]
    fn select_is_pure_and_normalizing() {
        let root = root_with(&[]);
        let node = root.select("a/./b/../c");
        assert_eq!(node.path().to_string(), "a/c");
        assert!(!node.exists());
    }

    #[test]
    fn matching_walks_recursively_and_sorts() {
        let root = root_with(&[
            "src/main/stakeholders/b/Second.owner",
            "src/main/stakeholders/First.owner",
            "src/main/stakeholders/Third.user",
        ]);
        let pattern = Pattern::parse("src/main/stakeholders/**/*.owner").unwrap();
        let matches = root.matching(&pattern).unwrap();
        let rendered: Vec<String> = matches.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            rendered,
            [
                "src/main/stakeholders/First.owner",
                "src/main/stakeholders/b/Second.owner"
            ]
        );
    }

    #[test]
    fn matching_an_absent_base_is_empty() {
        let root = root_with(&[]);
        let pattern = Pattern::parse("src/main/stakeholders/**/*.owner").unwrap();
        assert!(root.matching(&pattern).unwrap().is_empty());
    }
}
