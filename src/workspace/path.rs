//! Workspace-relative paths.
//!
//! All backends address resources through [`ResourcePath`], so path
//! normalization (`.`, `..`, repeated and leading separators) lives here
//! once instead of in every store. A `..` that would climb above the
//! workspace root clamps at the root.

use std::fmt;

use smol_str::SmolStr;

/// Normalized path relative to a workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourcePath {
    segments: Vec<SmolStr>,
}

impl ResourcePath {
    /// The workspace root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses and normalizes a slash-separated path.
    pub fn parse(path: &str) -> Self {
        let mut segments: Vec<SmolStr> = Vec::new();
        for raw in path.split('/') {
            match raw {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                segment => segments.push(SmolStr::new(segment)),
            }
        }
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// The last segment, or `""` for the root.
    pub fn name(&self) -> &str {
        self.segments.last().map(SmolStr::as_str).unwrap_or("")
    }

    /// The last segment without its extension.
    pub fn base_name(&self) -> &str {
        let name = self.name();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }

    /// The extension of the last segment, without the dot.
    pub fn extension(&self) -> Option<&str> {
        match self.name().rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<ResourcePath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Joins a relative path onto this one, re-normalizing. Pure: never
    /// touches any store.
    pub fn join(&self, relative: &str) -> ResourcePath {
        let mut segments = self.segments.clone();
        for raw in relative.split('/') {
            match raw {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                segment => segments.push(SmolStr::new(segment)),
            }
        }
        Self { segments }
    }

    pub fn child(&self, name: &str) -> ResourcePath {
        debug_assert!(!name.contains('/'));
        let mut segments = self.segments.clone();
        segments.push(SmolStr::new(name));
        Self { segments }
    }

    /// Prefix test against another path.
    pub fn starts_with(&self, prefix: &ResourcePath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// The remaining segments after stripping `prefix`, if it applies.
    pub fn strip_prefix(&self, prefix: &ResourcePath) -> Option<&[SmolStr]> {
        if self.starts_with(prefix) {
            Some(&self.segments[prefix.segments.len()..])
        } else {
            None
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}
