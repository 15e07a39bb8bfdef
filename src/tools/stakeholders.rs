//! Stakeholder consistency tool.
//!
//! Targets owners and users. Checks that every package has exactly one
//! owner, that at least one owner exists when users do, and that every
//! typed stakeholder link resolves.

use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::artifact::{Artifact, Diagnostic, Diagnostics, Link};
use crate::base::Location;
use crate::domain::{OWNER, Owner, USER, User};
use crate::format::Format;
use crate::notation::StoryFormat;
use crate::tool::{ResolvedInputs, Tool, ToolInput, ToolOutput, unknown_suggestion};
use crate::workspace::{Pattern, Resource};

pub const CREATE_OWNER: &str = "Create owner";

const OWNER_SKELETON_PATH: &str = "src/main/stakeholders/Some.owner";

pub struct StakeholdersTool {
    story: Arc<dyn Format>,
}

impl StakeholdersTool {
    pub fn new() -> Self {
        Self {
            story: Arc::new(StoryFormat),
        }
    }

    fn check_owner_arity(&self, inputs: &ResolvedInputs, diagnostics: &mut Diagnostics) {
        let owners = inputs.typed::<Owner>("owners");
        let users = inputs.typed::<User>("users");

        if owners.is_empty() && !users.is_empty() {
            diagnostics.push(
                Diagnostic::warn("Missing owner").suggest(CREATE_OWNER, CREATE_OWNER),
            );
            return;
        }

        // At most one owner per package.
        let mut packages: Vec<String> = owners
            .iter()
            .map(|(_, owner)| {
                owner
                    .qualified_name()
                    .package()
                    .map(|p| p.to_string())
                    .unwrap_or_default()
            })
            .collect();
        packages.sort();
        packages.dedup();

        for package in packages {
            let mut names: Vec<&str> = owners
                .iter()
                .filter(|(_, owner)| {
                    owner
                        .qualified_name()
                        .package()
                        .map(|p| p.to_string())
                        .unwrap_or_default()
                        == package
                })
                .map(|(_, owner)| owner.qualified_name().name())
                .collect();
            if names.len() > 1 {
                names.sort();
                let location = (!package.is_empty())
                    .then(|| Location::new(package.split('.').collect::<Vec<_>>()));
                let mut diagnostic = Diagnostic::error(format!(
                    "There can be only one owner, but found {}",
                    names.join(", ")
                ));
                diagnostic.location = location;
                diagnostics.push(diagnostic);
            }
        }
    }

    fn check_links(&self, inputs: &ResolvedInputs, diagnostics: &mut Diagnostics) {
        let owners = inputs.artifacts("owners");
        let users = inputs.artifacts("users");
        let everyone: Vec<_> = owners.iter().chain(users.iter()).cloned().collect();

        for (_, user) in inputs.typed::<User>("users") {
            let location = user.location();
            let mut check = |link: &Link, field: &str, candidates: &[crate::artifact::ArtifactHandle]| {
                if let Err(dangling) = link.resolve(candidates) {
                    diagnostics.error(dangling.to_string(), Some(location.plus(field)));
                }
            };
            if let Some(link) = &user.reports_to {
                check(link, "reports_to", &owners);
            }
            if let Some(link) = &user.deputy {
                check(link, "deputy", &users);
            }
            // Untyped collaboration links resolve against owners and
            // users alike; an unresolved one is not an error.
            for link in &user.collaborates {
                let _ = link.resolve(&everyone);
            }
        }
    }
}

impl Default for StakeholdersTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for StakeholdersTool {
    fn name(&self) -> &'static str {
        "stakeholders"
    }

    fn inputs(&self) -> Vec<ToolInput> {
        vec![
            ToolInput::primary(
                "owners",
                Pattern::parse("src/main/stakeholders/**/*.owner").expect("static pattern"),
                Arc::clone(&self.story),
                OWNER,
                Owner::from_root,
            ),
            ToolInput::primary(
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
            Pattern::parse("build/reports/stakeholders/**").expect("static pattern"),
        )]
    }

    fn validate(&self, inputs: &ResolvedInputs, diagnostics: &mut Diagnostics) {
        self.check_owner_arity(inputs, diagnostics);
        self.check_links(inputs, diagnostics);
    }

    fn build(
        &self,
        inputs: &ResolvedInputs,
        output: &Resource,
        _diagnostics: &mut Diagnostics,
    ) -> io::Result<()> {
        let mut report = String::from("# Stakeholders\n\n## Owners\n");
        for (_, owner) in inputs.typed::<Owner>("owners") {
            report.push_str(&format!(
                "- {} ({}): {}\n",
                owner.qualified_name(),
                owner.priority.as_str(),
                owner.statement
            ));
        }
        report.push_str("\n## Users\n");
        for (_, user) in inputs.typed::<User>("users") {
            report.push_str(&format!("- {}", user.qualified_name()));
            if let Some(reports_to) = &user.reports_to {
                report.push_str(&format!(" → {}", reports_to.id));
            }
            report.push('\n');
        }
        debug!(tool = self.name(), "writing stakeholders report");
        output.select("stakeholders.md").write_str(&report)
    }

    fn apply(
        &self,
        code: &str,
        _inputs: &ResolvedInputs,
        input_root: &Resource,
        diagnostics: &mut Diagnostics,
    ) -> io::Result<()> {
        if code != CREATE_OWNER {
            unknown_suggestion(self, code, diagnostics);
            return Ok(());
        }

        // Minimal owner skeleton; overwriting on re-apply is fine.
        let owner = Owner::new("Some".parse().expect("static name"), "TBD")
            .expect("skeleton satisfies its own constraints");
        let target = input_root.select(OWNER_SKELETON_PATH);
        let mut writer = target.open_write()?;
        self.story.builder().build(&owner.to_root(), &mut writer)?;
        writer.flush()?;

        diagnostics.info(format!("Created '{OWNER_SKELETON_PATH}'"), None);
        Ok(())
    }
}
