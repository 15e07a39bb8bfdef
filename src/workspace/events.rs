//! Workspace change notification.
//!
//! Backends deliver coalesced change notifications; the workspace fans
//! them out to subscribers. The emitter is taken out of its owner while
//! emitting and reinstalled afterwards, so subscribers get mutable
//! access to the owner without aliasing the subscriber list.

use crate::artifact::ArtifactHandle;

use super::path::ResourcePath;

/// One coalesced change in the workspace.
#[derive(Clone)]
pub enum WorkspaceEvent {
    /// A document changed and re-parsed into a fresh artifact.
    Changed {
        path: ResourcePath,
        artifact: ArtifactHandle,
    },
    /// A document disappeared.
    Deleted { path: ResourcePath },
}

impl WorkspaceEvent {
    pub fn path(&self) -> &ResourcePath {
        match self {
            Self::Changed { path, .. } => path,
            Self::Deleted { path } => path,
        }
    }
}

type Subscriber<E, C> = Box<dyn FnMut(&E, &mut C) + Send>;

/// Subscriber list for one event type over one owner type.
pub struct EventEmitter<E, C> {
    subscribers: Vec<Subscriber<E, C>>,
}

impl<E, C> EventEmitter<E, C> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&E, &mut C) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Emits to every subscriber, returning the emitter for
    /// reinstallation into its owner.
    pub fn emit(mut self, event: E, owner: &mut C) -> Self {
        for subscriber in &mut self.subscribers {
            subscriber(&event, owner);
        }
        self
    }
}

impl<E, C> Default for EventEmitter<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner-side publish hook in the take-and-reinstall style.
pub trait EventBus<E> {
    fn publish(&mut self, event: E);
}
