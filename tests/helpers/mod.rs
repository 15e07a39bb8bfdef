//! Shared fixtures for the integration suite.

// Each test binary pulls in only the fixtures it needs.
#![allow(dead_code)]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;

use draftboard::artifact::Diagnostics;
use draftboard::domain::{GLOSSARY, Glossary, OWNER, Owner, USER, User};
use draftboard::notation::{LedgerFormat, StoryFormat};
use draftboard::tool::{ResolvedInputs, Tool, ToolInput, ToolOutput, unknown_suggestion};
use draftboard::workspace::{MemStore, Pattern, Resource, Workspace};

/// A small consistent stakeholder workspace.
pub static STAKEHOLDER_FIXTURE: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        (
            "src/main/stakeholders/Jane.owner",
            "scope acme.shop\n\nowner Jane {\n  statement \"Keeps the backlog honest\"\n  priority high\n}\n",
        ),
        (
            "src/main/stakeholders/Bob.user",
            "scope acme.shop\n\nuser Bob {\n  statement \"Files the orders\"\n  reports_to @owner:Jane\n  tasks [ \"Order\" ]\n}\n",
        ),
        (
            "src/main/glossary/Shop.glossary",
            "scope acme.shop\nglossary Shop\n\n| term  | means                  |\n| Order | \"A confirmed purchase\" |\n",
        ),
    ]
});

/// Builds a workspace over a fresh in-memory store seeded with `files`.
pub fn mem_workspace(files: &[(&str, &str)]) -> Workspace {
    let workspace = Workspace::new(Arc::new(MemStore::new()));
    for (path, content) in files {
        workspace.root().select(path).write_str(content).unwrap();
    }
    workspace
}

// ============================================================================
// RECORDING TOOL
// ============================================================================

/// Tool double that counts its invocations.
pub struct RecordingTool {
    name: &'static str,
    inputs: Vec<ToolInput>,
    pub fail_validate: bool,
    pub validates: AtomicUsize,
    pub builds: AtomicUsize,
}

impl RecordingTool {
    pub fn new(name: &'static str, inputs: Vec<ToolInput>) -> Arc<Self> {
        Arc::new(Self {
            name,
            inputs,
            fail_validate: false,
            validates: AtomicUsize::new(0),
            builds: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &'static str, inputs: Vec<ToolInput>) -> Arc<Self> {
        Arc::new(Self {
            name,
            inputs,
            fail_validate: true,
            validates: AtomicUsize::new(0),
            builds: AtomicUsize::new(0),
        })
    }

    pub fn validate_count(&self) -> usize {
        self.validates.load(Ordering::SeqCst)
    }

    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl Tool for RecordingTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn inputs(&self) -> Vec<ToolInput> {
        self.inputs.clone()
    }

    fn outputs(&self) -> Vec<ToolOutput> {
        Vec::new()
    }

    fn validate(&self, _inputs: &ResolvedInputs, diagnostics: &mut Diagnostics) {
        self.validates.fetch_add(1, Ordering::SeqCst);
        if self.fail_validate {
            diagnostics.error("recorded failure", None);
        }
    }

    fn build(
        &self,
        _inputs: &ResolvedInputs,
        output: &Resource,
        _diagnostics: &mut Diagnostics,
    ) -> io::Result<()> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        output.select("marker.txt").write_str("ok")
    }

    fn apply(
        &self,
        code: &str,
        _inputs: &ResolvedInputs,
        _input_root: &Resource,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<()> {
        unknown_suggestion(self, code, diagnostics);
        Ok(())
    }
}

/// Owner-typed input over the standard stakeholder pattern.
pub fn owner_input(primary: bool) -> ToolInput {
    let pattern = Pattern::parse("src/main/stakeholders/**/*.owner").unwrap();
    if primary {
        ToolInput::primary("owners", pattern, Arc::new(StoryFormat), OWNER, Owner::from_root)
    } else {
        ToolInput::secondary("owners", pattern, Arc::new(StoryFormat), OWNER, Owner::from_root)
    }
}

pub fn user_input(primary: bool) -> ToolInput {
    let pattern = Pattern::parse("src/main/stakeholders/**/*.user").unwrap();
    if primary {
        ToolInput::primary("users", pattern, Arc::new(StoryFormat), USER, User::from_root)
    } else {
        ToolInput::secondary("users", pattern, Arc::new(StoryFormat), USER, User::from_root)
    }
}

pub fn glossary_input(primary: bool) -> ToolInput {
    let pattern = Pattern::parse("src/main/glossary/**/*.glossary").unwrap();
    if primary {
        ToolInput::primary(
            "glossaries",
            pattern,
            Arc::new(LedgerFormat),
            GLOSSARY,
            Glossary::from_root,
        )
    } else {
        ToolInput::secondary(
            "glossaries",
            pattern,
            Arc::new(LedgerFormat),
            GLOSSARY,
            Glossary::from_root,
        )
    }
}
