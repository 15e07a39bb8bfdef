//! Typed artifact model.
//!
//! An [`Artifact`] is a typed, named domain object parsed from one source
//! document. Artifacts are fully re-created on every file change and
//! replace the prior instance for that path; they are never patched.
//!
//! Identity is the [`FullyQualifiedName`]: two artifacts with equal
//! qualified names denote the same object regardless of field content.

mod constraint;
mod diagnostics;
mod link;

pub use constraint::ConstraintViolation;
pub use diagnostics::{Diagnostic, Diagnostics, Severity, Suggestion};
pub use link::{DanglingLink, Link};

use std::any::Any;
use std::sync::Arc;

use crate::base::{FullyQualifiedName, Location};

/// Descriptor of one artifact type. Compared by type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactType {
    name: &'static str,
}

impl ArtifactType {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Default file extension: the lower-cased simple type name.
    pub fn default_extension(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// A typed, named domain object parsed from one source document.
pub trait Artifact: Send + Sync {
    fn qualified_name(&self) -> &FullyQualifiedName;

    fn artifact_type(&self) -> ArtifactType;

    /// Diagnostic anchor of the whole artifact: package segments, type
    /// name, simple name.
    fn location(&self) -> Location {
        let fqn = self.qualified_name();
        let mut segments: Vec<&str> = Vec::new();
        let package = fqn.package();
        if let Some(package) = &package {
            segments.extend(package.segments().iter().map(|s| s.as_str()));
        }
        segments.push(self.artifact_type().name());
        segments.push(fqn.name());
        Location::new(segments)
    }

    /// Declared field constraints, checked by the workspace after
    /// conversion. Programmatic constructors raise the same violations
    /// immediately instead.
    fn constraints(&self) -> Vec<ConstraintViolation> {
        Vec::new()
    }

    /// Custom structural validation, invoked after the constraint pass.
    fn validate(&self, _location: &Location, _diagnostics: &mut Diagnostics) {}

    /// Downcast support for tools that know their concrete input types.
    fn as_any(&self) -> &dyn Any;
}

/// Shared, immutable handle to a parsed artifact.
pub type ArtifactHandle = Arc<dyn Artifact>;

/// Identity test: artifacts are equal by name + package.
pub fn same_identity(a: &dyn Artifact, b: &dyn Artifact) -> bool {
    a.qualified_name() == b.qualified_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(FullyQualifiedName);

    impl Artifact for Probe {
        fn qualified_name(&self) -> &FullyQualifiedName {
            &self.0
        }
        fn artifact_type(&self) -> ArtifactType {
            ArtifactType::new("Probe")
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn location_is_package_type_name() {
        let probe = Probe("acme.shop.Jane".parse().unwrap());
        assert_eq!(probe.location().to_string(), "acme.shop.Probe.Jane");
    }

    #[test]
    fn default_extension_is_lowercased_type_name() {
        assert_eq!(ArtifactType::new("Owner").default_extension(), "owner");
    }

    #[test]
    fn identity_by_qualified_name() {
        let a = Probe("p.Jane".parse().unwrap());
        let b = Probe("p.Jane".parse().unwrap());
        let c = Probe("q.Jane".parse().unwrap());
        assert!(same_identity(&a, &b));
        assert!(!same_identity(&a, &c));
    }
}
