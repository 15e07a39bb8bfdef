//! The per-path parse pipeline, driven through a whole workspace.

mod helpers;

use std::sync::Arc;

use parking_lot::Mutex;

use draftboard::domain::{OWNER, Owner, USER, User};
use draftboard::notation::StoryFormat;
use draftboard::workspace::{
    ArtifactBinding, ParseStatus, Pattern, ResourcePath, Workspace, WorkspaceEvent,
};

use helpers::mem_workspace;

fn bound_workspace(files: &[(&str, &str)]) -> Workspace {
    let mut workspace = mem_workspace(files);
    workspace.register_binding(ArtifactBinding::new(
        OWNER,
        Pattern::parse("src/main/stakeholders/**/*.owner").unwrap(),
        Arc::new(StoryFormat),
        Owner::from_root,
    ));
    workspace.register_binding(ArtifactBinding::new(
        USER,
        Pattern::parse("src/main/stakeholders/**/*.user").unwrap(),
        Arc::new(StoryFormat),
        User::from_root,
    ));
    workspace
}

#[test]
fn a_clean_file_parses_to_its_artifact() {
    let workspace = bound_workspace(&[(
        "src/main/stakeholders/Jane.owner",
        "scope acme.shop\n\nowner Jane {\n  statement \"Keeps the backlog honest\"\n}\n",
    )]);
    let outcome = workspace
        .parse(&ResourcePath::parse("src/main/stakeholders/Jane.owner"))
        .unwrap();

    assert_eq!(outcome.status, ParseStatus::Parsed);
    assert!(outcome.diagnostics.is_empty());
    let artifact = outcome.artifact.unwrap();
    assert_eq!(artifact.artifact_type(), OWNER);
    assert_eq!(artifact.qualified_name().to_string(), "acme.shop.Jane");
}

#[test]
fn unbound_paths_are_silently_ignored() {
    let workspace = bound_workspace(&[]);
    // The file does not even have to exist; no binding, no read.
    let outcome = workspace.parse(&ResourcePath::parse("README.md")).unwrap();
    assert_eq!(outcome.status, ParseStatus::Unbound);
    assert!(outcome.artifact.is_none());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn placeholder_files_yield_no_artifact_and_no_noise() {
    let workspace = bound_workspace(&[(
        "src/main/stakeholders/Jane.owner",
        "// coming soon\n",
    )]);
    let outcome = workspace
        .parse(&ResourcePath::parse("src/main/stakeholders/Jane.owner"))
        .unwrap();
    assert_eq!(outcome.status, ParseStatus::Placeholder);
    assert!(outcome.artifact.is_none());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn grammar_rejections_become_one_scoped_error() {
    let workspace = bound_workspace(&[(
        "src/main/stakeholders/Jane.owner",
        "owner Jane {\n  statement\n}\n",
    )]);
    let outcome = workspace
        .parse(&ResourcePath::parse("src/main/stakeholders/Jane.owner"))
        .unwrap();

    assert_eq!(outcome.status, ParseStatus::Syntax);
    assert!(outcome.artifact.is_none());
    assert_eq!(outcome.diagnostics.error_count(), 1);
    let diagnostic = outcome.diagnostics.iter().next().unwrap();
    assert!(diagnostic.message.contains("syntax error"));
    assert!(diagnostic.location.is_some());
}

#[test]
fn self_description_mismatch_is_reported_but_still_converts() {
    let workspace = bound_workspace(&[(
        "src/main/stakeholders/Jane.owner",
        "owner Janet {\n  statement \"x\"\n}\n",
    )]);
    let outcome = workspace
        .parse(&ResourcePath::parse("src/main/stakeholders/Jane.owner"))
        .unwrap();

    assert_eq!(outcome.status, ParseStatus::Parsed);
    assert!(outcome.artifact.is_some());
    let messages: Vec<&str> = outcome
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        messages,
        ["Object name 'Janet' doesn't match file name 'Jane'"]
    );
}

#[test]
fn unmet_constraints_surface_as_located_errors() {
    let workspace = bound_workspace(&[(
        "src/main/stakeholders/Jane.owner",
        "scope acme.shop\n\nowner Jane {\n  priority low\n}\n",
    )]);
    let outcome = workspace
        .parse(&ResourcePath::parse("src/main/stakeholders/Jane.owner"))
        .unwrap();

    assert_eq!(outcome.status, ParseStatus::Parsed);
    assert_eq!(outcome.diagnostics.error_count(), 1);
    let diagnostic = outcome.diagnostics.iter().next().unwrap();
    assert!(diagnostic.message.contains("statement"));
    let location = diagnostic.location.as_ref().unwrap().to_string();
    assert!(location.ends_with("statement"), "got location '{location}'");
}

#[test]
fn structural_validation_runs_after_conversion() {
    let workspace = bound_workspace(&[(
        "src/main/stakeholders/Bob.user",
        "user Bob {\n  statement \"works\"\n  collaborates [ @Bob ]\n}\n",
    )]);
    let outcome = workspace
        .parse(&ResourcePath::parse("src/main/stakeholders/Bob.user"))
        .unwrap();

    assert_eq!(outcome.status, ParseStatus::Parsed);
    assert_eq!(outcome.diagnostics.error_count(), 1);
    let diagnostic = outcome.diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.message, "User 'Bob' collaborates with itself");
}

#[test]
fn the_most_specific_binding_wins() {
    let mut workspace = bound_workspace(&[(
        "src/main/stakeholders/Jane.owner",
        "owner Jane {\n  statement \"x\"\n}\n",
    )]);
    // Catch-all over the same base; the extension-specific binding above
    // must still be chosen.
    workspace.register_binding(ArtifactBinding::new(
        USER,
        Pattern::parse("src/main/stakeholders/**").unwrap(),
        Arc::new(StoryFormat),
        User::from_root,
    ));

    let outcome = workspace
        .parse(&ResourcePath::parse("src/main/stakeholders/Jane.owner"))
        .unwrap();
    assert_eq!(outcome.artifact_type(), Some(OWNER));
}

#[test]
fn change_notifications_reach_subscribers_with_the_fresh_artifact() {
    let mut workspace = bound_workspace(&[
        (
            "src/main/stakeholders/Jane.owner",
            "owner Jane {\n  statement \"x\"\n}\n",
        ),
        ("src/main/stakeholders/Empty.owner", "// placeholder\n"),
    ]);

    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&seen);
    workspace.events.subscribe(move |event, _: &mut Workspace| {
        let label = match event {
            WorkspaceEvent::Changed { path, artifact } => {
                format!("changed {} as {}", path, artifact.artifact_type())
            }
            WorkspaceEvent::Deleted { path } => format!("deleted {path}"),
        };
        sink.lock().push(label);
    });

    let jane = ResourcePath::parse("src/main/stakeholders/Jane.owner");
    workspace.changed(&jane).unwrap();
    // A placeholder produces no artifact, so no notification goes out.
    workspace
        .changed(&ResourcePath::parse("src/main/stakeholders/Empty.owner"))
        .unwrap();
    workspace.deleted(&jane);

    assert_eq!(
        *seen.lock(),
        [
            "changed src/main/stakeholders/Jane.owner as Owner",
            "deleted src/main/stakeholders/Jane.owner"
        ]
    );
}
