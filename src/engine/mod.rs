//! The orchestrator.
//!
//! Wires workspace change events through the tool registry into a
//! validate/build/propagate cycle. One logical thread of control: a
//! change notification is processed to completion before the next one
//! begins, and propagation is exactly one hop of immediate dependents,
//! never a transitive closure.

mod index;
mod state;

pub use index::PatternIndex;
pub use state::DocState;

use std::io;
use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::artifact::Diagnostics;
use crate::base::constants::{INDEX_ROOT, REPORT_ROOT};
use crate::tool::{RegistryError, ResolvedInputs, Tool, ToolRegistry};
use crate::workspace::{
    ArtifactBinding, ParseStatus, PatternError, Resource, ResourcePath, Workspace,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("no tool named '{0}' is installed")]
    UnknownTool(String),
}

/// One tool's part of a change cycle.
pub struct ToolRun {
    pub tool: &'static str,
    /// Whether `validate` ran (only the targeting tool validates).
    pub validated: bool,
    pub built: bool,
    pub diagnostics: Diagnostics,
}

/// Everything one change notification caused.
pub struct CycleReport {
    pub path: ResourcePath,
    pub state: DocState,
    /// Diagnostics from parsing the changed file itself.
    pub diagnostics: Diagnostics,
    pub tool_runs: Vec<ToolRun>,
}

/// Orchestrator over one workspace and one immutable tool registry.
pub struct Engine {
    workspace: Workspace,
    registry: ToolRegistry,
    index: PatternIndex,
    states: FxHashMap<ResourcePath, DocState>,
}

impl Engine {
    /// Startup: registers every tool input as an artifact binding and
    /// eagerly computes and persists the matching-path set of every
    /// distinct pattern.
    pub fn new(mut workspace: Workspace, registry: ToolRegistry) -> Result<Self, EngineError> {
        let mut registered: Vec<(String, &'static str)> = Vec::new();
        for tool in registry.iter() {
            for input in tool.inputs() {
                let key = (input.pattern.identity().to_string(), input.artifact_type.name());
                if registered.contains(&key) {
                    continue;
                }
                registered.push(key);
                workspace.register_binding(ArtifactBinding::new(
                    input.artifact_type,
                    input.pattern.clone(),
                    Arc::clone(&input.format),
                    input.convert,
                ));
            }
        }

        let mut index = PatternIndex::open(workspace.root().select(INDEX_ROOT));
        for pattern in registry.distinct_patterns() {
            let matches = workspace.root().matching(&pattern)?;
            debug!(pattern = pattern.identity(), matches = matches.len(), "indexed pattern");
            index.replace(pattern.identity(), matches.into_iter().collect())?;
        }

        Ok(Self {
            workspace,
            registry,
            index,
            states: FxHashMap::default(),
        })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn state_of(&self, path: &ResourcePath) -> DocState {
        self.states.get(path).copied().unwrap_or_default()
    }

    /// One coalesced edit: updates the pattern index, re-parses the
    /// path, runs the targeting tool's validate/build, then one hop of
    /// dependent builds.
    pub fn file_changed(&mut self, path: &ResourcePath) -> Result<CycleReport, EngineError> {
        info!(path = %path, "change cycle started");

        // Step 1: membership, idempotently.
        for pattern in self.registry.distinct_patterns() {
            if pattern.matches(path) {
                self.index.insert(pattern.identity(), path)?;
            }
        }

        // Step 2: re-parse the changed file.
        let outcome = self.workspace.changed(path)?;
        let mut report = CycleReport {
            path: path.clone(),
            state: match outcome.status {
                ParseStatus::Unbound | ParseStatus::Placeholder => DocState::Unparsed,
                ParseStatus::Syntax | ParseStatus::Invalid => DocState::Invalid,
                ParseStatus::Parsed if outcome.diagnostics.has_errors() => DocState::Invalid,
                ParseStatus::Parsed => DocState::Valid,
            },
            diagnostics: outcome.diagnostics.clone(),
            tool_runs: Vec::new(),
        };
        let Some(artifact_type) = outcome.artifact_type() else {
            self.states.insert(path.clone(), report.state);
            return Ok(report);
        };

        // Step 3: the single targeting tool validates, then builds when
        // the whole resolution validated clean.
        let target = self.registry.target_of(artifact_type).cloned();
        let mut target_clean = true;
        if let Some(tool) = &target {
            let (inputs, mut diagnostics) = self.resolve_inputs(tool.as_ref())?;
            tool.validate(&inputs, &mut diagnostics);
            target_clean = !diagnostics.has_errors();
            let mut built = false;
            if target_clean {
                let output = self.report_root(tool.as_ref());
                tool.build(&inputs, &output, &mut diagnostics)?;
                built = true;
            }
            trace!(tool = tool.name(), clean = target_clean, built, "target ran");
            report.tool_runs.push(ToolRun {
                tool: tool.name(),
                validated: true,
                built,
                diagnostics,
            });
            if report.state == DocState::Valid {
                report.state = if !target_clean {
                    DocState::Invalid
                } else {
                    DocState::Built
                };
            }
        }

        // Step 4: exactly one hop of immediate dependents, build only.
        if target_clean {
            for tool in self.registry.dependents_of(artifact_type) {
                let (inputs, mut diagnostics) = self.resolve_inputs(tool.as_ref())?;
                let output = self.report_root(tool.as_ref());
                tool.build(&inputs, &output, &mut diagnostics)?;
                trace!(tool = tool.name(), "dependent rebuilt");
                report.tool_runs.push(ToolRun {
                    tool: tool.name(),
                    validated: false,
                    built: true,
                    diagnostics,
                });
            }
        }

        self.states.insert(path.clone(), report.state);
        info!(path = %path, state = ?report.state, "change cycle finished");
        Ok(report)
    }

    /// One deletion: drops the path from every matching pattern set and
    /// records the state. No dependent rebuild is triggered; stale
    /// outputs are tolerated.
    pub fn file_deleted(&mut self, path: &ResourcePath) -> Result<(), EngineError> {
        let touched = self.index.remove(path)?;
        debug!(path = %path, sets = touched.len(), "removed from pattern sets");
        self.states.insert(path.clone(), DocState::Deleted);
        self.workspace.deleted(path);
        Ok(())
    }

    /// Redeems a suggestion: resolves the named tool's inputs and runs
    /// its `apply`. I/O failures propagate.
    pub fn apply(&mut self, tool_name: &str, code: &str) -> Result<Diagnostics, EngineError> {
        let tool = self
            .registry
            .iter()
            .find(|tool| tool.name() == tool_name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownTool(tool_name.to_string()))?;
        let (inputs, mut diagnostics) = self.resolve_inputs(tool.as_ref())?;
        let root = self.workspace.root().clone();
        tool.apply(code, &inputs, &root, &mut diagnostics)?;
        Ok(diagnostics)
    }

    /// Fully resolves one tool's inputs: every currently matching file
    /// of every declared input is re-parsed. A file with a syntax error
    /// contributes its one ERROR diagnostic and is excluded from the
    /// artifact lists; it never blocks sibling files.
    fn resolve_inputs(
        &mut self,
        tool: &dyn Tool,
    ) -> Result<(ResolvedInputs, Diagnostics), EngineError> {
        let mut resolved = ResolvedInputs::new();
        let mut diagnostics = Diagnostics::new();
        for input in tool.inputs() {
            resolved.declare(input.name);
            let paths: Vec<ResourcePath> =
                self.index.paths(input.pattern.identity())?.iter().cloned().collect();

            let parser = self.workspace.parser();
            let outcomes = paths
                .par_iter()
                .map(|path| parser.parse(path))
                .collect::<Vec<_>>();

            for (path, outcome) in paths.iter().zip(outcomes) {
                let outcome = outcome?;
                diagnostics.extend(outcome.diagnostics);
                if let Some(artifact) = outcome.artifact {
                    resolved.push(input.name, path.clone(), artifact);
                }
            }
        }
        Ok((resolved, diagnostics))
    }

    fn report_root(&self, tool: &dyn Tool) -> Resource {
        self.workspace
            .root()
            .select(&format!("{}/{}", REPORT_ROOT, tool.name()))
    }
}
