//! Format contract.
//!
//! A notation plugs into the engine through a [`Format`]: a factory for a
//! [`Parser`] (bytes → [`Root`]) and a [`Builder`] ([`Root`] → bytes).
//!
//! Contract: for every root `r` expressible by a conversion inverse,
//! `parse(build(r))` is structurally equal to `r`.

pub mod convert;

pub use convert::{ConvertError, ConvertFn, EnumProperty};

use std::io::{Read, Write};

use thiserror::Error;

use crate::document::Root;

/// Grammar rejection, localized to one line and column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at {line}:{column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed column.
    pub column: u32,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Failure while parsing one document.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Bytes → document model.
pub trait Parser: Send + Sync {
    /// Parses a whole document. Returns `Ok(None)` when the mandatory
    /// root clause is structurally absent (a placeholder file), and
    /// `FormatError::Syntax` when the grammar rejects the input.
    fn parse(&self, input: &mut dyn Read) -> Result<Option<Root>, FormatError>;
}

/// Document model → canonical bytes.
pub trait Builder: Send + Sync {
    fn build(&self, root: &Root, output: &mut dyn Write) -> std::io::Result<()>;
}

/// Factory of a parser/builder pair for one notation.
pub trait Format: Send + Sync {
    fn name(&self) -> &'static str;
    fn parser(&self) -> Box<dyn Parser>;
    fn builder(&self) -> Box<dyn Builder>;
}
