//! Typed and untyped cross-document references.
//!
//! A [`Link`] resolves against a candidate collection by id. A typed link
//! filters candidates to its declared artifact type first and fails when
//! nothing matches; an untyped link resolves against all candidates and
//! simply yields `None` when nothing matches.

use smol_str::SmolStr;
use thiserror::Error;

use super::{ArtifactHandle, ArtifactType};

/// A typed link with no matching candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no {target_type} named '{id}'")]
pub struct DanglingLink {
    pub target_type: ArtifactType,
    pub id: SmolStr,
}

/// Reference from one artifact to another, resolved by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub target_type: Option<ArtifactType>,
    pub id: SmolStr,
}

impl Link {
    pub fn typed(target_type: ArtifactType, id: &str) -> Self {
        Self {
            target_type: Some(target_type),
            id: SmolStr::new(id),
        }
    }

    pub fn untyped(id: &str) -> Self {
        Self {
            target_type: None,
            id: SmolStr::new(id),
        }
    }

    /// Resolves against `candidates`. A candidate matches when its
    /// qualified name renders equal to the id, or its simple name equals
    /// the id.
    pub fn resolve(&self, candidates: &[ArtifactHandle]) -> Result<Option<ArtifactHandle>, DanglingLink> {
        let found = candidates
            .iter()
            .filter(|c| match self.target_type {
                Some(ty) => c.artifact_type() == ty,
                None => true,
            })
            .find(|c| {
                let fqn = c.qualified_name();
                fqn.to_string() == self.id || fqn.name() == self.id
            })
            .cloned();

        match (found, self.target_type) {
            (Some(artifact), _) => Ok(Some(artifact)),
            (None, Some(target_type)) => Err(DanglingLink {
                target_type,
                id: self.id.clone(),
            }),
            (None, None) => Ok(None),
        }
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target_type {
            Some(ty) => write!(f, "@{}:{}", ty.default_extension(), self.id),
            None => write!(f, "@{}", self.id),
        }
    }
}
