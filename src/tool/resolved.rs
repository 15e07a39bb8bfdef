//! Resolved tool inputs.
//!
//! Input name → the artifacts parsed from every file currently matching
//! that input's pattern, in declaration order, sorted by source path.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::artifact::ArtifactHandle;
use crate::workspace::ResourcePath;

/// One parsed artifact together with the path it came from.
#[derive(Clone)]
pub struct ResolvedArtifact {
    pub path: ResourcePath,
    pub artifact: ArtifactHandle,
}

/// Input name → resolved artifact list.
#[derive(Clone, Default)]
pub struct ResolvedInputs {
    inputs: IndexMap<SmolStr, Vec<ResolvedArtifact>>,
}

impl ResolvedInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an input slot, even when nothing matched its pattern.
    pub fn declare(&mut self, name: &str) {
        self.inputs.entry(SmolStr::new(name)).or_default();
    }

    pub fn push(&mut self, name: &str, path: ResourcePath, artifact: ArtifactHandle) {
        self.inputs
            .entry(SmolStr::new(name))
            .or_default()
            .push(ResolvedArtifact { path, artifact });
    }

    /// All resolved entries of one input; empty for undeclared names.
    pub fn entries(&self, name: &str) -> &[ResolvedArtifact] {
        self.inputs.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The artifacts of one input, without their source paths.
    pub fn artifacts(&self, name: &str) -> Vec<ArtifactHandle> {
        self.entries(name)
            .iter()
            .map(|entry| entry.artifact.clone())
            .collect()
    }

    /// Downcast view of one input's artifacts, with source paths.
    pub fn typed<T: 'static>(&self, name: &str) -> Vec<(&ResourcePath, &T)> {
        self.entries(name)
            .iter()
            .filter_map(|entry| {
                entry
                    .artifact
                    .as_any()
                    .downcast_ref::<T>()
                    .map(|typed| (&entry.path, typed))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.values().all(Vec::is_empty)
    }
}
