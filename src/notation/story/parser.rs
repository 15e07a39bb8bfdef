//! Recursive-descent parser for the story notation.

use std::io::Read;

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextSize;

use crate::document::{DataItem, Object, Reference, Root};
use crate::format::{FormatError, Parser, SyntaxError};
use crate::notation::{line_col, unquote};

use super::lexer::{Token, TokenKind, tokenize};

pub(super) struct StoryParser;

impl Parser for StoryParser {
    fn parse(&self, input: &mut dyn Read) -> Result<Option<Root>, FormatError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        parse_text(&text).map_err(FormatError::from)
    }
}

pub(super) fn parse_text(input: &str) -> Result<Option<Root>, SyntaxError> {
    let mut cursor = Cursor {
        input,
        tokens: tokenize(input),
        pos: 0,
    };

    let scope = cursor.parse_scope()?;

    // Placeholder file: no root clause at all.
    if cursor.at_end() {
        return Ok(None);
    }

    let doc_type = cursor.expect_word("document type")?;
    let name = cursor.expect_word("object name")?;
    let mut root = Root::new(doc_type.text, name.text);
    root.scope = scope.map(SmolStr::new);
    cursor.expect(TokenKind::LBrace, "'{'")?;
    cursor.parse_properties_into(&mut root.fields)?;
    cursor.expect(TokenKind::RBrace, "'}'")?;

    // Side clauses attach to the root; a repeated key accumulates.
    while !cursor.at_end() {
        let key = cursor.expect_word("clause keyword")?;
        let object = cursor.parse_object()?;
        root.push_field(key.text, DataItem::Object(object));
    }

    Ok(Some(root))
}

struct Cursor<'a> {
    input: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn error(&self, expected: &str) -> SyntaxError {
        let (found, offset) = match self.peek() {
            Some(token) => (format!("'{}'", token.text), token.offset),
            None => (
                "end of input".to_string(),
                TextSize::new(self.input.len() as u32),
            ),
        };
        let (line, column) = line_col(self.input, offset);
        SyntaxError::new(format!("expected {expected}, found {found}"), line, column)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'a>, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error(expected)),
        }
    }

    fn expect_word(&mut self, expected: &str) -> Result<Token<'a>, SyntaxError> {
        self.expect(TokenKind::Word, expected)
    }

    /// `scope <dotted>` unless the clause turns out to be a root clause
    /// whose type word happens to be `scope`.
    fn parse_scope(&mut self) -> Result<Option<String>, SyntaxError> {
        let start = self.pos;
        match self.peek() {
            Some(token) if token.kind == TokenKind::Word && token.text == "scope" => {}
            _ => return Ok(None),
        }
        self.pos += 1;
        if self.peek_kind() != Some(TokenKind::Word) {
            self.pos = start;
            return Ok(None);
        }
        let dotted = self.parse_dotted()?;
        if self.peek_kind() == Some(TokenKind::LBrace) {
            self.pos = start;
            return Ok(None);
        }
        Ok(Some(dotted))
    }

    fn parse_dotted(&mut self) -> Result<String, SyntaxError> {
        let mut name = self.expect_word("a name")?.text.to_string();
        while self.peek_kind() == Some(TokenKind::Dot) {
            self.pos += 1;
            name.push('.');
            name.push_str(self.expect_word("a name segment")?.text);
        }
        Ok(name)
    }

    /// `<Name> { property* }`
    fn parse_object(&mut self) -> Result<Object, SyntaxError> {
        let name = self.expect_word("object name")?;
        let mut object = Object::new(name.text);
        self.expect(TokenKind::LBrace, "'{'")?;
        self.parse_properties_into(&mut object.fields)?;
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(object)
    }

    fn parse_properties_into(
        &mut self,
        fields: &mut IndexMap<SmolStr, DataItem>,
    ) -> Result<(), SyntaxError> {
        while !matches!(self.peek_kind(), Some(TokenKind::RBrace) | None) {
            let key = self.expect_word("property key")?;
            let value = self.parse_value()?;
            push_field(fields, key.text, value);
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<DataItem, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::String) => {
                let token = self.bump().unwrap();
                Ok(DataItem::String(unquote(token.text)))
            }
            Some(TokenKind::At) => {
                self.pos += 1;
                Ok(DataItem::Reference(self.parse_reference()?))
            }
            Some(TokenKind::LBracket) => {
                self.pos += 1;
                let mut items = Vec::new();
                loop {
                    while self.peek_kind() == Some(TokenKind::Comma) {
                        self.pos += 1;
                    }
                    if self.peek_kind() == Some(TokenKind::RBracket) {
                        self.pos += 1;
                        break;
                    }
                    if self.at_end() {
                        return Err(self.error("']'"));
                    }
                    items.push(self.parse_value()?);
                }
                Ok(DataItem::List(items))
            }
            Some(TokenKind::Word) => {
                if self.nth_kind(1) == Some(TokenKind::LBrace) {
                    Ok(DataItem::Object(self.parse_object()?))
                } else {
                    let token = self.bump().unwrap();
                    Ok(DataItem::Enum(SmolStr::new(token.text)))
                }
            }
            _ => Err(self.error("a value")),
        }
    }

    /// `[type:]id[(attr ref-or-list, ...)]`, the `@` already consumed.
    fn parse_reference(&mut self) -> Result<Reference, SyntaxError> {
        let first = self.parse_dotted()?;
        let (target_type, id) = if self.peek_kind() == Some(TokenKind::Colon) {
            self.pos += 1;
            (Some(first), self.parse_dotted()?)
        } else {
            (None, first)
        };
        let mut reference = Reference::new(target_type.as_deref(), &id);

        if self.peek_kind() == Some(TokenKind::LParen) {
            self.pos += 1;
            loop {
                while self.peek_kind() == Some(TokenKind::Comma) {
                    self.pos += 1;
                }
                if self.peek_kind() == Some(TokenKind::RParen) {
                    self.pos += 1;
                    break;
                }
                let key = self.expect_word("attribute key")?;
                let values = self.parse_reference_values()?;
                reference.attributes.insert(SmolStr::new(key.text), values);
            }
        }
        Ok(reference)
    }

    fn parse_reference_values(&mut self) -> Result<Vec<Reference>, SyntaxError> {
        match self.peek_kind() {
            Some(TokenKind::At) => {
                self.pos += 1;
                Ok(vec![self.parse_reference()?])
            }
            Some(TokenKind::LBracket) => {
                self.pos += 1;
                let mut refs = Vec::new();
                loop {
                    while self.peek_kind() == Some(TokenKind::Comma) {
                        self.pos += 1;
                    }
                    if self.peek_kind() == Some(TokenKind::RBracket) {
                        self.pos += 1;
                        break;
                    }
                    self.expect(TokenKind::At, "'@'")?;
                    refs.push(self.parse_reference()?);
                }
                Ok(refs)
            }
            _ => Err(self.error("a reference")),
        }
    }
}

fn push_field(fields: &mut IndexMap<SmolStr, DataItem>, key: &str, value: DataItem) {
    match fields.get_mut(key) {
        None => {
            fields.insert(SmolStr::new(key), value);
        }
        Some(DataItem::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, DataItem::List(Vec::new()));
            *existing = DataItem::List(vec![first, value]);
        }
    }
}
