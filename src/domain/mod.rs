//! Concrete artifact types.
//!
//! These are the demonstration domain the shipped tools analyze: owners
//! and users in the story notation, glossaries in the ledger notation.
//! Each type declares its `ArtifactType` descriptor and its conversion
//! from the document model.

mod glossary;
mod owner;
mod user;

pub use glossary::{GLOSSARY, Glossary, Term};
pub use owner::{OWNER, Owner, Priority};
pub use user::{USER, User};
