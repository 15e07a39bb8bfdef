//! Foundation types for the Draftboard toolchain.
//!
//! This module provides fundamental types used throughout the engine:
//! - [`FullyQualifiedName`] - dotted package + simple name of an artifact
//! - [`Location`] - ordered path anchoring a diagnostic
//! - Domain constants (source root, report root, index root)
//!
//! This module has NO dependencies on other draftboard modules.

pub mod constants;
mod fqn;
mod location;

pub use fqn::{FullyQualifiedName, NameError};
pub use location::Location;
