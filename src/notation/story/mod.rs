//! The `story` notation: block clause syntax.
//!
//! ```text
//! scope acme.shop
//!
//! owner Jane {
//!   statement "Keeps the backlog honest"
//!   priority high
//!   interests [ "quality", "cost" ]
//! }
//! ```
//!
//! An optional `scope` line, at most one root clause, then zero or more
//! side clauses that become object fields on the root. Comments run
//! `//` to end of line; whitespace is insignificant.

mod builder;
mod lexer;
mod parser;

use crate::format::{Builder, Format, Parser};

/// Format registration for the story notation.
pub struct StoryFormat;

impl Format for StoryFormat {
    fn name(&self) -> &'static str {
        "story"
    }

    fn parser(&self) -> Box<dyn Parser> {
        Box::new(parser::StoryParser)
    }

    fn builder(&self) -> Box<dyn Builder> {
        Box::new(builder::StoryBuilder)
    }
}
