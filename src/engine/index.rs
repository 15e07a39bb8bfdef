//! Persisted pattern-membership index.
//!
//! One newline-delimited path list per pattern identity, UTF-8, no
//! header, under the reserved `build/index` subtree. A missing or empty
//! file is a valid empty set. Keeping the sets persisted makes later
//! membership updates proportional to the changed path, not to the
//! workspace size.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::io;

use rustc_hash::{FxHashMap, FxHasher};
use tracing::trace;

use crate::workspace::{Resource, ResourcePath};

/// In-memory mirror of the persisted per-pattern path sets.
pub struct PatternIndex {
    root: Resource,
    sets: FxHashMap<String, BTreeSet<ResourcePath>>,
}

impl PatternIndex {
    /// Opens the index below `index_root`, starting with nothing cached.
    pub fn open(index_root: Resource) -> Self {
        Self {
            root: index_root,
            sets: FxHashMap::default(),
        }
    }

    /// Index file for one pattern identity: a readable slug plus a hash
    /// suffix for uniqueness.
    fn file_name(identity: &str) -> String {
        let slug: String = identity
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        let mut hasher = FxHasher::default();
        identity.hash(&mut hasher);
        format!("{slug}-{:016x}.paths", hasher.finish())
    }

    fn read_set(&self, identity: &str) -> io::Result<BTreeSet<ResourcePath>> {
        let file = self.root.select(&Self::file_name(identity));
        if !file.exists() {
            return Ok(BTreeSet::new());
        }
        let content = file.read_to_string()?;
        Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(ResourcePath::parse)
            .collect())
    }

    fn persist(root: &Resource, identity: &str, set: &BTreeSet<ResourcePath>) -> io::Result<()> {
        let mut content = String::new();
        for path in set {
            content.push_str(&path.to_string());
            content.push('\n');
        }
        trace!(identity, paths = set.len(), "persisting pattern set");
        root.select(&Self::file_name(identity)).write_str(&content)
    }

    /// The cached set for one identity; loads from the store on first
    /// use.
    pub fn paths(&mut self, identity: &str) -> io::Result<&BTreeSet<ResourcePath>> {
        if !self.sets.contains_key(identity) {
            let set = self.read_set(identity)?;
            self.sets.insert(identity.to_string(), set);
        }
        Ok(&self.sets[identity])
    }

    /// Replaces one identity's set wholesale and persists it.
    pub fn replace(
        &mut self,
        identity: &str,
        set: BTreeSet<ResourcePath>,
    ) -> io::Result<()> {
        Self::persist(&self.root, identity, &set)?;
        self.sets.insert(identity.to_string(), set);
        Ok(())
    }

    /// Adds `path` to one identity's set. Idempotent; persists only
    /// when the set actually changed.
    pub fn insert(&mut self, identity: &str, path: &ResourcePath) -> io::Result<bool> {
        self.paths(identity)?;
        let mut changed = false;
        if let Some(set) = self.sets.get_mut(identity) {
            changed = set.insert(path.clone());
            if changed {
                Self::persist(&self.root, identity, set)?;
            }
        }
        Ok(changed)
    }

    /// Removes `path` from every cached set that contains it, persisting
    /// the sets that changed. Returns the identities touched.
    pub fn remove(&mut self, path: &ResourcePath) -> io::Result<Vec<String>> {
        let mut touched = Vec::new();
        for (identity, set) in &mut self.sets {
            if set.remove(path) {
                Self::persist(&self.root, identity, set)?;
                touched.push(identity.clone());
            }
        }
        touched.sort();
        Ok(touched)
    }
}
