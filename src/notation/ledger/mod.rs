//! The `ledger` notation: table syntax.
//!
//! ```text
//! scope acme.shop
//! glossary Shop
//!
//! | term    | means                  | see      |
//! | Order   | "A confirmed purchase" | @Invoice |
//! | Invoice | "A bill for an order"  |          |
//! ```
//!
//! An optional `scope` line, one root line, then zero or more pipe
//! tables. The first column header is the field key; each row becomes
//! an object named by its first cell. Cell values use the story value
//! syntax minus nesting.

mod builder;
mod lexer;
mod parser;

use crate::format::{Builder, Format, Parser};

/// Format registration for the ledger notation.
pub struct LedgerFormat;

impl Format for LedgerFormat {
    fn name(&self) -> &'static str {
        "ledger"
    }

    fn parser(&self) -> Box<dyn Parser> {
        Box::new(parser::LedgerParser)
    }

    fn builder(&self) -> Box<dyn Builder> {
        Box::new(builder::LedgerBuilder)
    }
}
