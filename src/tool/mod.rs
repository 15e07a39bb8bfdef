//! Tool contract.
//!
//! A [`Tool`] is one unit of validate/build/remediate logic over one or
//! more artifact-typed inputs. Inputs and outputs are declarative;
//! `validate` is pure, `build` is the only side-effecting phase and runs
//! only when `validate` produced no ERROR, and `apply` redeems a named
//! suggestion.

mod registry;
mod resolved;

pub use registry::{RegistryError, ToolRegistry};
pub use resolved::{ResolvedArtifact, ResolvedInputs};

use std::io;
use std::sync::Arc;

use tracing::warn;

use crate::artifact::{ArtifactType, Diagnostics};
use crate::format::{ConvertFn, Format};
use crate::workspace::{Pattern, Resource};

/// One declared input: a pattern of files parsed as one artifact type.
#[derive(Clone)]
pub struct ToolInput {
    pub name: &'static str,
    pub pattern: Pattern,
    pub format: Arc<dyn Format>,
    pub artifact_type: ArtifactType,
    pub convert: ConvertFn,
    /// Primary inputs are the types this tool targets; secondary inputs
    /// only make it a dependent.
    pub primary: bool,
}

impl ToolInput {
    pub fn primary(
        name: &'static str,
        pattern: Pattern,
        format: Arc<dyn Format>,
        artifact_type: ArtifactType,
        convert: ConvertFn,
    ) -> Self {
        Self {
            name,
            pattern,
            format,
            artifact_type,
            convert,
            primary: true,
        }
    }

    pub fn secondary(
        name: &'static str,
        pattern: Pattern,
        format: Arc<dyn Format>,
        artifact_type: ArtifactType,
        convert: ConvertFn,
    ) -> Self {
        Self {
            name,
            pattern,
            format,
            artifact_type,
            convert,
            primary: false,
        }
    }
}

/// One declared output pattern. Declarative only; nothing enforces it.
#[derive(Clone)]
pub struct ToolOutput {
    pub pattern: Pattern,
}

impl ToolOutput {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }
}

/// A unit of validate/build/remediate logic.
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn inputs(&self) -> Vec<ToolInput>;

    fn outputs(&self) -> Vec<ToolOutput>;

    /// Pure, read-only cross-input consistency checks.
    fn validate(&self, inputs: &ResolvedInputs, diagnostics: &mut Diagnostics);

    /// Side-effecting generation into the tool's report root. Invoked
    /// only when `validate` produced no ERROR.
    fn build(
        &self,
        inputs: &ResolvedInputs,
        output: &Resource,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<()>;

    /// Executes a named remediation against the workspace root. An
    /// unrecognized code yields one WARN diagnostic, never a failure;
    /// I/O failures propagate to the caller.
    fn apply(
        &self,
        code: &str,
        inputs: &ResolvedInputs,
        input_root: &Resource,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<()>;
}

/// Shared handling for an unrecognized `apply` code.
pub fn unknown_suggestion(tool: &dyn Tool, code: &str, diagnostics: &mut Diagnostics) {
    warn!(tool = tool.name(), code, "unknown suggestion code");
    diagnostics.warn(
        format!("Unknown suggestion '{}' for tool '{}'", code, tool.name()),
        None,
    );
}
