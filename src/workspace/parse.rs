//! The per-path parse pipeline.
//!
//! One file in, at most one artifact out. Grammar rejections become one
//! ERROR diagnostic scoped to the file and never block sibling files;
//! only I/O failures surface as `Err`.

use std::io;

use tracing::trace;

use crate::artifact::{ArtifactHandle, ArtifactType, Diagnostics};
use crate::base::Location;
use crate::format::FormatError;

use super::binding::BindingRegistry;
use super::path::ResourcePath;
use super::resource::Resource;

/// How far one path made it through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// No binding matches the path; it is silently ignored.
    Unbound,
    /// The mandatory root clause is structurally absent.
    Placeholder,
    /// The grammar rejected the file.
    Syntax,
    /// Parsed but not convertible to a named artifact.
    Invalid,
    /// Converted and validated (diagnostics may still carry errors).
    Parsed,
}

/// Result of parsing one path.
pub struct ParseOutcome {
    pub status: ParseStatus,
    pub artifact: Option<ArtifactHandle>,
    pub diagnostics: Diagnostics,
}

impl ParseOutcome {
    fn empty(status: ParseStatus) -> Self {
        Self {
            status,
            artifact: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn artifact_type(&self) -> Option<ArtifactType> {
        self.artifact.as_ref().map(|a| a.artifact_type())
    }
}

/// Runs the pipeline for one path against a root resource and the
/// binding registry. Free function so input resolution can fan out over
/// worker threads without borrowing the whole workspace.
pub(super) fn parse_at(
    root: &Resource,
    bindings: &BindingRegistry,
    path: &ResourcePath,
) -> io::Result<ParseOutcome> {
    let Some(binding) = bindings.binding_for(path) else {
        trace!(path = %path, "no binding, path ignored");
        return Ok(ParseOutcome::empty(ParseStatus::Unbound));
    };
    trace!(path = %path, artifact_type = binding.artifact_type.name(), "parsing");

    let mut reader = root.at(path).open_read()?;
    let parsed = match binding.format.parser().parse(&mut reader) {
        Ok(parsed) => parsed,
        Err(FormatError::Io(e)) => return Err(e),
        Err(FormatError::Syntax(e)) => {
            let mut outcome = ParseOutcome::empty(ParseStatus::Syntax);
            outcome
                .diagnostics
                .error(e.to_string(), Some(Location::of_path(&path.to_string())));
            return Ok(outcome);
        }
    };
    let Some(doc_root) = parsed else {
        return Ok(ParseOutcome::empty(ParseStatus::Placeholder));
    };

    let mut diagnostics = Diagnostics::new();

    // Self-description rule: the declared name must equal the file's
    // base name, case-sensitively.
    if doc_root.name != path.base_name() {
        diagnostics.error(
            format!(
                "Object name '{}' doesn't match file name '{}'",
                doc_root.name,
                path.base_name()
            ),
            Some(Location::of_path(&path.to_string())),
        );
    }

    let artifact = match (binding.convert)(&doc_root) {
        Ok(artifact) => artifact,
        Err(e) => {
            diagnostics.error(e.to_string(), Some(Location::of_path(&path.to_string())));
            let mut outcome = ParseOutcome::empty(ParseStatus::Invalid);
            outcome.diagnostics = diagnostics;
            return Ok(outcome);
        }
    };

    // Constraint pass, then the artifact's own structural hook.
    let location = artifact.location();
    for violation in artifact.constraints() {
        diagnostics.error(violation.to_string(), Some(location.plus(&violation.field)));
    }
    artifact.validate(&location, &mut diagnostics);

    Ok(ParseOutcome {
        status: ParseStatus::Parsed,
        artifact: Some(artifact),
        diagnostics,
    })
}
