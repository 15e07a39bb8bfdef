//! Workspace: the storage-agnostic face of a document tree.
//!
//! A [`Workspace`] owns a root [`Resource`], the artifact-type binding
//! registry, and the change-notification hooks. Parsing a path runs the
//! whole front half of the pipeline: binding selection, parse, the
//! self-description check, conversion, the constraint pass, and the
//! artifact's own validation hook.

mod binding;
mod events;
mod parse;
mod path;
mod pattern;
mod resource;
mod store;

pub use binding::{ArtifactBinding, BindingRegistry};
pub use events::{EventBus, EventEmitter, WorkspaceEvent};
pub use parse::{ParseOutcome, ParseStatus};
pub use path::ResourcePath;
pub use pattern::{Pattern, PatternError};
pub use resource::Resource;
pub use store::{FsStore, MemStore, Store};

use std::io;
use std::sync::Arc;

/// One document tree plus its registered artifact-type bindings.
pub struct Workspace {
    root: Resource,
    bindings: BindingRegistry,
    pub events: EventEmitter<WorkspaceEvent, Workspace>,
}

impl Workspace {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            root: Resource::root(store),
            bindings: BindingRegistry::new(),
            events: EventEmitter::new(),
        }
    }

    pub fn root(&self) -> &Resource {
        &self.root
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    /// Registers one artifact-type binding. Bindings are registered once
    /// at startup and are immutable thereafter.
    pub fn register_binding(&mut self, binding: ArtifactBinding) {
        self.bindings.register(binding);
    }

    /// Parses and converts one document. A path matching no binding is
    /// silently ignored; only I/O failures are `Err`.
    pub fn parse(&self, path: &ResourcePath) -> io::Result<ParseOutcome> {
        self.parser().parse(path)
    }

    /// Borrowed parsing view. Unlike the workspace itself this is
    /// `Sync`, so input resolution can fan file parsing out over worker
    /// threads.
    pub fn parser(&self) -> WorkspaceParser<'_> {
        WorkspaceParser {
            root: &self.root,
            bindings: &self.bindings,
        }
    }

    /// Backend-facing hook: one coalesced edit to `path`. Re-parses and,
    /// when a fresh artifact came out, notifies subscribers.
    pub fn changed(&mut self, path: &ResourcePath) -> io::Result<ParseOutcome> {
        let outcome = self.parse(path)?;
        if let Some(artifact) = outcome.artifact.clone() {
            self.publish(WorkspaceEvent::Changed {
                path: path.clone(),
                artifact,
            });
        }
        Ok(outcome)
    }

    /// Backend-facing hook: `path` disappeared.
    pub fn deleted(&mut self, path: &ResourcePath) {
        self.publish(WorkspaceEvent::Deleted { path: path.clone() });
    }
}

/// Shared-reference view of the parsing half of a workspace.
#[derive(Clone, Copy)]
pub struct WorkspaceParser<'a> {
    root: &'a Resource,
    bindings: &'a BindingRegistry,
}

impl WorkspaceParser<'_> {
    pub fn parse(&self, path: &ResourcePath) -> io::Result<ParseOutcome> {
        parse::parse_at(self.root, self.bindings, path)
    }
}

impl EventBus<WorkspaceEvent> for Workspace {
    fn publish(&mut self, event: WorkspaceEvent) {
        let emitter = std::mem::take(&mut self.events);
        self.events = emitter.emit(event, self);
    }
}
