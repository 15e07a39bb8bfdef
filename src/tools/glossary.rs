//! Glossary coverage tool.
//!
//! Targets glossaries and depends on owners and users: every user task
//! should be a defined term in some glossary.

use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::artifact::{Artifact, Diagnostic, Diagnostics};
use crate::domain::{GLOSSARY, Glossary, OWNER, Owner, Term, USER, User};
use crate::format::Format;
use crate::notation::{LedgerFormat, StoryFormat};
use crate::tool::{ResolvedInputs, Tool, ToolInput, ToolOutput, unknown_suggestion};
use crate::workspace::{Pattern, Resource};

pub const DEFINE_TERMS: &str = "Define terms";

const FALLBACK_GLOSSARY_PATH: &str = "src/main/glossary/Terms.glossary";

pub struct GlossaryTool {
    story: Arc<dyn Format>,
    ledger: Arc<dyn Format>,
}

impl GlossaryTool {
    pub fn new() -> Self {
        Self {
            story: Arc::new(StoryFormat),
            ledger: Arc::new(LedgerFormat),
        }
    }

    /// Task texts that no glossary defines, in first-appearance order.
    fn missing_terms(&self, inputs: &ResolvedInputs) -> Vec<String> {
        let glossaries = inputs.typed::<Glossary>("glossaries");
        let mut missing: Vec<String> = Vec::new();
        for (_, user) in inputs.typed::<User>("users") {
            for task in &user.tasks {
                let defined = glossaries.iter().any(|(_, g)| g.defines(task));
                if !defined && !missing.iter().any(|m| m == task) {
                    missing.push(task.clone());
                }
            }
        }
        missing
    }
}

impl Default for GlossaryTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GlossaryTool {
    fn name(&self) -> &'static str {
        "glossary"
    }

    fn inputs(&self) -> Vec<ToolInput> {
        vec![
            ToolInput::primary(
                "glossaries",
                Pattern::parse("src/main/glossary/**/*.glossary").expect("static pattern"),
                Arc::clone(&self.ledger),
                GLOSSARY,
                Glossary::from_root,
            ),
            ToolInput::secondary(
                "owners",
                Pattern::parse("src/main/stakeholders/**/*.owner").expect("static pattern"),
                Arc::clone(&self.story),
                OWNER,
                Owner::from_root,
            ),
            ToolInput::secondary(
                "users",
                Pattern::parse("src/main/stakeholders/**/*.user").expect("static pattern"),
                Arc::clone(&self.story),
                USER,
                User::from_root,
            ),
        ]
    }

    fn outputs(&self) -> Vec<ToolOutput> {
        vec![ToolOutput::new(
            Pattern::parse("build/reports/glossary/**").expect("static pattern"),
        )]
    }

    fn validate(&self, inputs: &ResolvedInputs, diagnostics: &mut Diagnostics) {
        for term in self.missing_terms(inputs) {
            diagnostics.push(
                Diagnostic::warn(format!("Term '{term}' is not defined in any glossary"))
                    .suggest(DEFINE_TERMS, DEFINE_TERMS),
            );
        }
    }

    fn build(
        &self,
        inputs: &ResolvedInputs,
        output: &Resource,
        _diagnostics: &mut Diagnostics,
    ) -> io::Result<()> {
        let mut report = String::from("# Terms\n\n");
        for (_, glossary) in inputs.typed::<Glossary>("glossaries") {
            report.push_str(&format!("## {}\n", glossary.qualified_name()));
            for term in &glossary.terms {
                report.push_str(&format!("- **{}**: {}\n", term.name, term.means));
            }
            report.push('\n');
        }
        debug!(tool = self.name(), "writing terms report");
        output.select("terms.md").write_str(&report)
    }

    fn apply(
        &self,
        code: &str,
        inputs: &ResolvedInputs,
        input_root: &Resource,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<()> {
        if code != DEFINE_TERMS {
            unknown_suggestion(self, code, diagnostics);
            return Ok(());
        }

        let missing = self.missing_terms(inputs);
        if missing.is_empty() {
            return Ok(());
        }

        // Append to the first glossary file, or start a fresh one when
        // the workspace has none yet.
        let (path, mut glossary) = match inputs.entries("glossaries").first() {
            Some(entry) => {
                let glossary = entry
                    .artifact
                    .as_any()
                    .downcast_ref::<Glossary>()
                    .cloned()
                    .ok_or_else(|| {
                        io::Error::other(format!("'{}' is not a glossary", entry.path))
                    })?;
                (entry.path.clone(), glossary)
            }
            None => (
                crate::workspace::ResourcePath::parse(FALLBACK_GLOSSARY_PATH),
                Glossary::new("Terms".parse().expect("static name")),
            ),
        };

        for term in &missing {
            glossary.terms.push(Term::new(term, "TBD"));
        }

        let target = input_root.at(&path);
        let mut writer = target.open_write()?;
        self.ledger.builder().build(&glossary.to_root(), &mut writer)?;
        writer.flush()?;

        for term in &missing {
            diagnostics.info(format!("Added term '{term}' to '{path}'"), None);
        }
        Ok(())
    }
}
