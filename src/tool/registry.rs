//! Static tool inventory.
//!
//! The registry is populated once at process startup and immutable
//! thereafter. It enforces the single-targeting-tool premise the
//! orchestrator's propagation step relies on: at most one tool may
//! declare any artifact type as a primary input.

use std::sync::Arc;

use thiserror::Error;

use crate::artifact::ArtifactType;
use crate::workspace::Pattern;

use super::Tool;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("tools '{first}' and '{second}' both target artifact type '{artifact_type}'")]
    DuplicateTarget {
        artifact_type: ArtifactType,
        first: &'static str,
        second: &'static str,
    },
}

/// Inventory of installed tools and the types they declare.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self, RegistryError> {
        let registry = Self { tools };
        registry.check_single_targets()?;
        Ok(registry)
    }

    fn check_single_targets(&self) -> Result<(), RegistryError> {
        let mut targets: Vec<(ArtifactType, &'static str)> = Vec::new();
        for tool in &self.tools {
            for input in tool.inputs() {
                if !input.primary {
                    continue;
                }
                if let Some((_, first)) = targets
                    .iter()
                    .find(|(ty, name)| *ty == input.artifact_type && *name != tool.name())
                {
                    return Err(RegistryError::DuplicateTarget {
                        artifact_type: input.artifact_type,
                        first,
                        second: tool.name(),
                    });
                }
                targets.push((input.artifact_type, tool.name()));
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    /// The single tool, if any, declaring `artifact_type` as a primary
    /// input.
    pub fn target_of(&self, artifact_type: ArtifactType) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| {
            tool.inputs()
                .iter()
                .any(|input| input.primary && input.artifact_type == artifact_type)
        })
    }

    /// Every tool declaring `artifact_type` as any input, excluding the
    /// targeting tool.
    pub fn dependents_of(&self, artifact_type: ArtifactType) -> Vec<Arc<dyn Tool>> {
        let target = self.target_of(artifact_type).map(|tool| tool.name());
        self.tools
            .iter()
            .filter(|tool| Some(tool.name()) != target)
            .filter(|tool| {
                tool.inputs()
                    .iter()
                    .any(|input| input.artifact_type == artifact_type)
            })
            .cloned()
            .collect()
    }

    /// Every distinct input pattern across all tools, by identity.
    pub fn distinct_patterns(&self) -> Vec<Pattern> {
        let mut patterns: Vec<Pattern> = Vec::new();
        for tool in &self.tools {
            for input in tool.inputs() {
                if !patterns
                    .iter()
                    .any(|p| p.identity() == input.pattern.identity())
                {
                    patterns.push(input.pattern.clone());
                }
            }
        }
        patterns
    }
}
