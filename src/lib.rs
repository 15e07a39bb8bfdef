//! # draftboard-base
//!
//! Core library for structured design-document notations, typed artifacts,
//! and continuous validation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! engine     → Orchestrator: change cycle, persisted pattern index, doc states
//!   ↓
//! tools      → Concrete analysis tools (stakeholders, glossary)
//!   ↓
//! tool       → Tool contract, ResolvedInputs, ToolRegistry
//!   ↓
//! domain     → Concrete artifact types (Owner, User, Glossary)
//!   ↓
//! notation   → Concrete notations (story clauses, ledger tables)
//!   ↓
//! workspace  → Resource/Store abstraction, Pattern, bindings, events
//!   ↓
//! format     → Format/Parser/Builder contract, conversion helpers
//!   ↓
//! artifact   → Artifact trait, Link, Diagnostic/Suggestion, constraints
//!   ↓
//! document   → Untyped document model (DataItem, Root)
//!   ↓
//! base       → Primitives (FullyQualifiedName, Location, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → document → artifact → format → workspace
//          → notation → domain → tool → tools → engine)
// ============================================================================

/// Foundation types: FullyQualifiedName, Location, filesystem constants
pub mod base;

/// Untyped document model produced by parsers: DataItem, Root
pub mod document;

/// Typed artifact model: Artifact trait, Link, diagnostics, constraints
pub mod artifact;

/// Format contract: Parser/Builder traits, syntax errors, conversion helpers
pub mod format;

/// Workspace: Resource/Store backends, patterns, bindings, change events
pub mod workspace;

/// Concrete notations: story clause syntax, ledger table syntax
pub mod notation;

/// Concrete artifact types: Owner, User, Glossary
pub mod domain;

/// Tool contract: inputs/outputs, ResolvedInputs, ToolRegistry
pub mod tool;

/// Concrete analysis tools: stakeholders, glossary
pub mod tools;

/// Orchestrator: validate/build/propagate cycle over a persisted index
pub mod engine;

// Re-export commonly needed items
pub use artifact::{Artifact, ArtifactHandle, ArtifactType, Diagnostic, Diagnostics, Severity};
pub use base::{FullyQualifiedName, Location};
