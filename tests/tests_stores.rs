//! Backend conformance.
//!
//! Both shipped stores must answer identically for the same normalized
//! path, so the whole suite runs once per backend.

use std::sync::Arc;

use draftboard::workspace::{FsStore, MemStore, Resource, ResourcePath, Store};

fn exercise(store: Arc<dyn Store>) {
    let root = Resource::root(store);

    // Writing creates the intermediate containers.
    let file = root.select("src/main/stakeholders/Jane.owner");
    assert!(!file.exists());
    file.write_str("owner Jane { statement \"x\" }\n").unwrap();
    assert!(file.exists());
    assert!(!file.is_container());
    assert!(root.select("src/main").exists());
    assert!(root.select("src/main").is_container());

    assert_eq!(
        file.read_to_string().unwrap(),
        "owner Jane { statement \"x\" }\n"
    );
    assert!(file.last_modified().is_ok());

    // Children arrive sorted by name.
    root.select("src/main/stakeholders/Adam.user")
        .write_str("")
        .unwrap();
    let names: Vec<String> = root
        .select("src/main/stakeholders")
        .children()
        .unwrap()
        .iter()
        .map(|child| child.name().to_string())
        .collect();
    assert_eq!(names, ["Adam.user", "Jane.owner"]);

    // Overwriting replaces the whole content.
    file.write_str("replaced").unwrap();
    assert_eq!(file.read_to_string().unwrap(), "replaced");

    // Recursive delete; an absent target is a no-op.
    root.select("src").delete().unwrap();
    assert!(!file.exists());
    assert!(!root.select("src").exists());
    root.select("never/was/here").delete().unwrap();

    // Reading an absent path is an error.
    assert!(file.read_to_string().is_err());
}

#[test]
fn mem_store_conforms() {
    exercise(Arc::new(MemStore::new()));
}

#[test]
fn fs_store_conforms() {
    let dir = tempfile::tempdir().unwrap();
    exercise(Arc::new(FsStore::new(dir.path())));
}

#[test]
fn selection_normalizes_before_the_backend_sees_anything() {
    let root = Resource::root(Arc::new(MemStore::new()));
    assert_eq!(root.select("a//b/./c/../d").path().to_string(), "a/b/d");
    // `..` never escapes the workspace root.
    assert_eq!(root.select("../escape").path().to_string(), "escape");
}

#[test]
fn base_names_drop_only_the_extension() {
    assert_eq!(ResourcePath::parse("src/Jane.owner").base_name(), "Jane");
    assert_eq!(ResourcePath::parse("src/archive.tar.gz").base_name(), "archive.tar");
    assert_eq!(ResourcePath::parse("src/.hidden").base_name(), ".hidden");
}
