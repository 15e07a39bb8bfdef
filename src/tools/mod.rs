//! Concrete analysis tools.
//!
//! Each tool declares its artifact-typed inputs, performs pure
//! cross-input validation, renders a plain-text report on build, and
//! redeems its own suggestions on apply.

mod glossary;
mod stakeholders;

pub use glossary::{DEFINE_TERMS, GlossaryTool};
pub use stakeholders::{CREATE_OWNER, StakeholdersTool};
