//! The full change cycle, driven through the orchestrator with the
//! shipped tools.

mod helpers;

use std::sync::Arc;

use draftboard::base::constants::INDEX_ROOT;
use draftboard::engine::{DocState, Engine, EngineError};
use draftboard::tool::{Tool, ToolRegistry};
use draftboard::tools::{CREATE_OWNER, DEFINE_TERMS, GlossaryTool, StakeholdersTool};
use draftboard::workspace::{FsStore, Resource, ResourcePath, Workspace};
use draftboard::Severity;

use helpers::{STAKEHOLDER_FIXTURE, mem_workspace};

fn engine_over(files: &[(&str, &str)]) -> Engine {
    let registry = ToolRegistry::new(vec![
        Arc::new(StakeholdersTool::new()) as Arc<dyn Tool>,
        Arc::new(GlossaryTool::new()) as Arc<dyn Tool>,
    ])
    .unwrap();
    Engine::new(mem_workspace(files), registry).unwrap()
}

#[test]
fn a_clean_change_builds_the_target_and_one_hop_of_dependents() {
    let mut engine = engine_over(&STAKEHOLDER_FIXTURE);
    let bob = ResourcePath::parse("src/main/stakeholders/Bob.user");

    let report = engine.file_changed(&bob).unwrap();
    assert_eq!(report.state, DocState::Built);
    assert!(report.diagnostics.is_empty());

    let runs: Vec<(&str, bool, bool)> = report
        .tool_runs
        .iter()
        .map(|run| (run.tool, run.validated, run.built))
        .collect();
    assert_eq!(runs, [("stakeholders", true, true), ("glossary", false, true)]);
    assert_eq!(engine.state_of(&bob), DocState::Built);

    let root = engine.workspace().root();
    let stakeholders = root
        .select("build/reports/stakeholders/stakeholders.md")
        .read_to_string()
        .unwrap();
    assert!(stakeholders.contains("acme.shop.Jane"));
    assert!(stakeholders.contains("acme.shop.Bob"));
    let terms = root
        .select("build/reports/glossary/terms.md")
        .read_to_string()
        .unwrap();
    assert!(terms.contains("Order"));
}

#[test]
fn pattern_sets_are_persisted_as_newline_delimited_paths() {
    let engine = engine_over(&STAKEHOLDER_FIXTURE);
    let index = engine.workspace().root().select(INDEX_ROOT);

    let files = index.children().unwrap();
    assert!(!files.is_empty());
    let user_set = files
        .iter()
        .find(|file| file.name().contains("-user-"))
        .expect("a persisted set for the user pattern");
    assert_eq!(
        user_set.read_to_string().unwrap(),
        "src/main/stakeholders/Bob.user\n"
    );
}

#[test]
fn missing_owner_warns_and_its_suggestion_creates_the_skeleton() {
    let mut engine = engine_over(&[(
        "src/main/stakeholders/Bob.user",
        "scope acme.shop\n\nuser Bob {\n  statement \"Files the orders\"\n}\n",
    )]);
    let bob = ResourcePath::parse("src/main/stakeholders/Bob.user");

    let report = engine.file_changed(&bob).unwrap();
    let run = &report.tool_runs[0];
    assert_eq!(run.tool, "stakeholders");
    assert!(run.built, "a warning must not block the build");
    assert_eq!(run.diagnostics.warning_count(), 1);
    let warning = run.diagnostics.iter().next().unwrap();
    assert_eq!(warning.message, "Missing owner");
    assert_eq!(warning.suggestions.len(), 1);
    assert_eq!(warning.suggestions[0].code, CREATE_OWNER);

    // Redeeming the suggestion materializes the skeleton file.
    let diagnostics = engine.apply("stakeholders", CREATE_OWNER).unwrap();
    let infos: Vec<&str> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Info)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(infos, ["Created 'src/main/stakeholders/Some.owner'"]);

    let skeleton = ResourcePath::parse("src/main/stakeholders/Some.owner");
    let content = engine.workspace().root().at(&skeleton).read_to_string().unwrap();
    assert!(content.contains("owner Some"));

    // With the skeleton in place the warning disappears.
    let report = engine.file_changed(&skeleton).unwrap();
    assert_eq!(report.state, DocState::Built);
    assert_eq!(report.tool_runs[0].diagnostics.warning_count(), 0);

    // Re-applying just overwrites the same skeleton.
    assert!(engine.apply("stakeholders", CREATE_OWNER).is_ok());
}

#[test]
fn a_second_owner_in_one_package_blocks_every_build() {
    let mut engine = engine_over(&[
        (
            "src/main/stakeholders/First.owner",
            "scope acme.shop\n\nowner First {\n  statement \"x\"\n}\n",
        ),
        (
            "src/main/stakeholders/Second.owner",
            "scope acme.shop\n\nowner Second {\n  statement \"y\"\n}\n",
        ),
    ]);

    let report = engine
        .file_changed(&ResourcePath::parse("src/main/stakeholders/Second.owner"))
        .unwrap();
    assert_eq!(report.state, DocState::Invalid);

    // The targeting tool validated and stopped; no dependent ran.
    assert_eq!(report.tool_runs.len(), 1);
    let run = &report.tool_runs[0];
    assert!(run.validated);
    assert!(!run.built);
    assert_eq!(run.diagnostics.error_count(), 1);
    let error = run.diagnostics.iter().next().unwrap();
    assert_eq!(
        error.message,
        "There can be only one owner, but found First, Second"
    );
}

#[test]
fn dangling_typed_links_are_validation_errors() {
    let mut engine = engine_over(&[
        (
            "src/main/stakeholders/Jane.owner",
            "scope acme.shop\n\nowner Jane {\n  statement \"x\"\n}\n",
        ),
        (
            "src/main/stakeholders/Bob.user",
            "scope acme.shop\n\nuser Bob {\n  statement \"y\"\n  reports_to @owner:Ghost\n}\n",
        ),
    ]);

    let report = engine
        .file_changed(&ResourcePath::parse("src/main/stakeholders/Bob.user"))
        .unwrap();
    let run = &report.tool_runs[0];
    assert!(!run.built);
    let messages: Vec<&str> = run.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, ["no Owner named 'Ghost'"]);
}

#[test]
fn deletion_drops_the_path_from_resolution_without_rebuilding() {
    let mut engine = engine_over(&[
        (
            "src/main/stakeholders/Jane.owner",
            "scope acme.shop\n\nowner Jane {\n  statement \"x\"\n}\n",
        ),
        (
            "src/main/stakeholders/Bob.user",
            "scope acme.shop\n\nuser Bob {\n  statement \"y\"\n}\n",
        ),
    ]);
    let jane = ResourcePath::parse("src/main/stakeholders/Jane.owner");
    let bob = ResourcePath::parse("src/main/stakeholders/Bob.user");

    let report = engine.file_changed(&bob).unwrap();
    assert_eq!(report.tool_runs[0].diagnostics.warning_count(), 0);

    engine.workspace().root().at(&jane).delete().unwrap();
    engine.file_deleted(&jane).unwrap();
    assert_eq!(engine.state_of(&jane), DocState::Deleted);

    // The next resolution no longer sees the deleted owner.
    let report = engine.file_changed(&bob).unwrap();
    let warning = report.tool_runs[0].diagnostics.iter().next().unwrap();
    assert_eq!(warning.message, "Missing owner");
}

#[test]
fn undefined_task_terms_warn_and_define_terms_appends_them() {
    let mut engine = engine_over(&[
        (
            "src/main/stakeholders/Jane.owner",
            "scope acme.shop\n\nowner Jane {\n  statement \"x\"\n}\n",
        ),
        (
            "src/main/stakeholders/Bob.user",
            "scope acme.shop\n\nuser Bob {\n  statement \"y\"\n  tasks [ \"Order\", \"Refund\" ]\n}\n",
        ),
        (
            "src/main/glossary/Shop.glossary",
            "scope acme.shop\nglossary Shop\n\n| term  | means                  |\n| Order | \"A confirmed purchase\" |\n",
        ),
    ]);
    let shop = ResourcePath::parse("src/main/glossary/Shop.glossary");

    let report = engine.file_changed(&shop).unwrap();
    let run = &report.tool_runs[0];
    assert_eq!(run.tool, "glossary");
    assert_eq!(run.diagnostics.warning_count(), 1);
    let warning = run.diagnostics.iter().next().unwrap();
    assert_eq!(warning.message, "Term 'Refund' is not defined in any glossary");
    assert_eq!(warning.suggestions[0].code, DEFINE_TERMS);

    let diagnostics = engine.apply("glossary", DEFINE_TERMS).unwrap();
    let infos: Vec<&str> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Info)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(infos, ["Added term 'Refund' to 'src/main/glossary/Shop.glossary'"]);
    let content = engine.workspace().root().at(&shop).read_to_string().unwrap();
    assert!(content.contains("Refund"));

    // Coverage is complete after the remediation.
    let report = engine.file_changed(&shop).unwrap();
    assert_eq!(report.tool_runs[0].diagnostics.warning_count(), 0);
}

#[test]
fn unknown_suggestion_codes_warn_instead_of_failing() {
    let mut engine = engine_over(&STAKEHOLDER_FIXTURE);
    let diagnostics = engine.apply("stakeholders", "Tidy up").unwrap();
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().message,
        "Unknown suggestion 'Tidy up' for tool 'stakeholders'"
    );
}

#[test]
fn unknown_tools_are_an_error() {
    let mut engine = engine_over(&STAKEHOLDER_FIXTURE);
    match engine.apply("linter", CREATE_OWNER) {
        Err(EngineError::UnknownTool(name)) => assert_eq!(name, "linter"),
        other => panic!("expected an unknown-tool error, got {other:?}"),
    }
}

#[test]
fn the_cycle_runs_end_to_end_on_a_real_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = Workspace::new(Arc::new(FsStore::new(dir.path())));
    for (path, content) in STAKEHOLDER_FIXTURE.iter() {
        workspace.root().select(path).write_str(content).unwrap();
    }
    let registry = ToolRegistry::new(vec![
        Arc::new(StakeholdersTool::new()) as Arc<dyn Tool>,
        Arc::new(GlossaryTool::new()) as Arc<dyn Tool>,
    ])
    .unwrap();
    let mut engine = Engine::new(workspace, registry).unwrap();

    let report = engine
        .file_changed(&ResourcePath::parse("src/main/stakeholders/Jane.owner"))
        .unwrap();
    assert_eq!(report.state, DocState::Built);

    let written: Vec<String> = walkdir::WalkDir::new(dir.path().join("build/reports"))
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(written.contains(&"stakeholders.md".to_string()));
    assert!(written.contains(&"terms.md".to_string()));

    let report_text =
        std::fs::read_to_string(dir.path().join("build/reports/stakeholders/stakeholders.md"))
            .unwrap();
    assert!(report_text.contains("acme.shop.Jane"));
}
