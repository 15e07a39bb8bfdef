//! Artifact-type bindings.
//!
//! An [`ArtifactBinding`] ties a pattern to the format that parses the
//! matching files and the conversion producing the typed artifact. One
//! binding exists per declared tool input; the registry is populated at
//! startup and immutable thereafter.

use std::sync::Arc;

use crate::artifact::ArtifactType;
use crate::format::{ConvertFn, Format};

use super::path::ResourcePath;
use super::pattern::Pattern;

/// Pattern → (format, artifact type, conversion) registration.
#[derive(Clone)]
pub struct ArtifactBinding {
    pub artifact_type: ArtifactType,
    pub pattern: Pattern,
    pub format: Arc<dyn Format>,
    pub convert: ConvertFn,
}

impl ArtifactBinding {
    pub fn new(
        artifact_type: ArtifactType,
        pattern: Pattern,
        format: Arc<dyn Format>,
        convert: ConvertFn,
    ) -> Self {
        Self {
            artifact_type,
            pattern,
            format,
            convert,
        }
    }
}

/// All registered bindings, in registration order.
#[derive(Default)]
pub struct BindingRegistry {
    bindings: Vec<ArtifactBinding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, binding: ArtifactBinding) {
        self.bindings.push(binding);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtifactBinding> {
        self.bindings.iter()
    }

    /// The most specific binding matching `path`: longest base path
    /// first, then longest extension; earliest registration breaks
    /// remaining ties. `None` means the path is silently ignored.
    pub fn binding_for(&self, path: &ResourcePath) -> Option<&ArtifactBinding> {
        let mut best: Option<(&ArtifactBinding, usize, usize)> = None;
        for binding in &self.bindings {
            if !binding.pattern.matches(path) {
                continue;
            }
            let base_len = binding.pattern.base().segments().len();
            let ext_len = binding.pattern.extension().map(str::len).unwrap_or(0);
            let more_specific = match best {
                None => true,
                Some((_, best_base, best_ext)) => {
                    base_len > best_base || (base_len == best_base && ext_len > best_ext)
                }
            };
            if more_specific {
                best = Some((binding, base_len, ext_len));
            }
        }
        best.map(|(binding, _, _)| binding)
    }
}
