//! Line-oriented parser for the ledger notation.

use std::io::Read;

use smol_str::SmolStr;
use text_size::TextSize;

use crate::document::{DataItem, Object, Reference, Root};
use crate::format::{FormatError, Parser, SyntaxError};
use crate::notation::{line_col, unquote};

use super::lexer::{Token, TokenKind, tokenize};

pub(super) struct LedgerParser;

impl Parser for LedgerParser {
    fn parse(&self, input: &mut dyn Read) -> Result<Option<Root>, FormatError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        parse_text(&text).map_err(FormatError::from)
    }
}

pub(super) fn parse_text(input: &str) -> Result<Option<Root>, SyntaxError> {
    let lines = split_lines(tokenize(input));
    let mut pos = 0usize;

    skip_blank(&lines, &mut pos);
    let scope = parse_scope(input, &lines, &mut pos)?;
    skip_blank(&lines, &mut pos);

    // Placeholder file: no root line at all.
    if pos >= lines.len() {
        return Ok(None);
    }

    let mut root = parse_root_line(input, &lines[pos])?;
    root.scope = scope.map(SmolStr::new);
    pos += 1;

    loop {
        skip_blank(&lines, &mut pos);
        if pos >= lines.len() {
            break;
        }
        if lines[pos].first().map(|t| t.kind) != Some(TokenKind::Pipe) {
            return Err(error_at(input, lines[pos].first(), "a table row"));
        }
        let mut rows = Vec::new();
        while pos < lines.len() && lines[pos].first().map(|t| t.kind) == Some(TokenKind::Pipe) {
            rows.push(cells_of(input, &lines[pos])?);
            pos += 1;
        }
        let (key, objects) = parse_table(input, &rows)?;
        root.push_field(&key, DataItem::List(objects));
    }

    Ok(Some(root))
}

fn split_lines(tokens: Vec<Token<'_>>) -> Vec<Vec<Token<'_>>> {
    let mut lines = vec![Vec::new()];
    for token in tokens {
        if token.kind == TokenKind::Newline {
            lines.push(Vec::new());
        } else {
            lines.last_mut().unwrap().push(token);
        }
    }
    lines
}

fn skip_blank(lines: &[Vec<Token<'_>>], pos: &mut usize) {
    while *pos < lines.len() && lines[*pos].is_empty() {
        *pos += 1;
    }
}

fn error_at(input: &str, token: Option<&Token<'_>>, expected: &str) -> SyntaxError {
    let (found, offset) = match token {
        Some(token) => (format!("'{}'", token.text), token.offset),
        None => (
            "end of line".to_string(),
            TextSize::new(input.len() as u32),
        ),
    };
    let (line, column) = line_col(input, offset);
    SyntaxError::new(format!("expected {expected}, found {found}"), line, column)
}

/// `scope <dotted>` on its own line.
fn parse_scope(
    input: &str,
    lines: &[Vec<Token<'_>>],
    pos: &mut usize,
) -> Result<Option<String>, SyntaxError> {
    let Some(line) = lines.get(*pos) else {
        return Ok(None);
    };
    match line.first() {
        Some(token) if token.kind == TokenKind::Word && token.text == "scope" && line.len() > 1 => {
        }
        _ => return Ok(None),
    }
    let mut cursor = 1usize;
    let dotted = parse_dotted(input, line, &mut cursor)?;
    if cursor != line.len() {
        return Err(error_at(input, line.get(cursor), "end of scope line"));
    }
    *pos += 1;
    Ok(Some(dotted))
}

fn parse_dotted(
    input: &str,
    line: &[Token<'_>],
    cursor: &mut usize,
) -> Result<String, SyntaxError> {
    let mut name = expect_word(input, line, cursor, "a name")?.to_string();
    while line.get(*cursor).map(|t| t.kind) == Some(TokenKind::Dot) {
        *cursor += 1;
        name.push('.');
        name.push_str(expect_word(input, line, cursor, "a name segment")?);
    }
    Ok(name)
}

fn expect_word<'a>(
    input: &str,
    line: &[Token<'a>],
    cursor: &mut usize,
    expected: &str,
) -> Result<&'a str, SyntaxError> {
    match line.get(*cursor) {
        Some(token) if token.kind == TokenKind::Word => {
            *cursor += 1;
            Ok(token.text)
        }
        token => Err(error_at(input, token, expected)),
    }
}

/// `<type-word> <Name>` with nothing else on the line.
fn parse_root_line(input: &str, line: &[Token<'_>]) -> Result<Root, SyntaxError> {
    let mut cursor = 0usize;
    let doc_type = expect_word(input, line, &mut cursor, "document type")?;
    let name = expect_word(input, line, &mut cursor, "object name")?;
    if cursor != line.len() {
        return Err(error_at(input, line.get(cursor), "end of root line"));
    }
    Ok(Root::new(doc_type, name))
}

/// Splits one `| .. | .. |` line into cell token runs.
fn cells_of<'a>(input: &str, line: &[Token<'a>]) -> Result<Vec<Vec<Token<'a>>>, SyntaxError> {
    if line.first().map(|t| t.kind) != Some(TokenKind::Pipe) {
        return Err(error_at(input, line.first(), "'|'"));
    }
    let mut cells: Vec<Vec<Token<'a>>> = Vec::new();
    let mut current: Vec<Token<'a>> = Vec::new();
    for token in &line[1..] {
        if token.kind == TokenKind::Pipe {
            cells.push(std::mem::take(&mut current));
        } else {
            current.push(*token);
        }
    }
    // A well-formed row ends with a pipe; tolerate a missing one.
    if !current.is_empty() {
        cells.push(current);
    }
    Ok(cells)
}

/// Header row + data rows → (field key, one object per row).
fn parse_table(
    input: &str,
    rows: &[Vec<Vec<Token<'_>>>],
) -> Result<(String, Vec<DataItem>), SyntaxError> {
    let header = &rows[0];
    let mut keys = Vec::with_capacity(header.len());
    for cell in header {
        let mut cursor = 0usize;
        let key = expect_word(input, cell, &mut cursor, "a column header")?;
        if cursor != cell.len() {
            return Err(error_at(input, cell.get(cursor), "end of column header"));
        }
        keys.push(key.to_string());
    }
    if keys.is_empty() {
        return Err(error_at(input, None, "a column header"));
    }

    let mut objects = Vec::new();
    for row in &rows[1..] {
        let mut cursor = 0usize;
        let name_cell = row.first().map(Vec::as_slice).unwrap_or(&[]);
        let name = expect_word(input, name_cell, &mut cursor, "an object name")?;
        let mut object = Object::new(name);
        for (i, key) in keys.iter().enumerate().skip(1) {
            let cell = row.get(i).map(Vec::as_slice).unwrap_or(&[]);
            if let Some(value) = parse_cell(input, cell)? {
                object.push_field(key, value);
            }
        }
        objects.push(DataItem::Object(object));
    }
    Ok((keys[0].clone(), objects))
}

/// Story value syntax minus nesting: strings, enum words, references.
/// Several space-separated values make a list; an empty cell is `None`.
fn parse_cell(input: &str, cell: &[Token<'_>]) -> Result<Option<DataItem>, SyntaxError> {
    let mut cursor = 0usize;
    let mut values = Vec::new();
    while cursor < cell.len() {
        let token = cell[cursor];
        let value = match token.kind {
            TokenKind::String => {
                cursor += 1;
                DataItem::String(unquote(token.text))
            }
            TokenKind::Word => {
                cursor += 1;
                DataItem::Enum(SmolStr::new(token.text))
            }
            TokenKind::At => {
                cursor += 1;
                let first = parse_dotted(input, cell, &mut cursor)?;
                if cell.get(cursor).map(|t| t.kind) == Some(TokenKind::Colon) {
                    cursor += 1;
                    let id = parse_dotted(input, cell, &mut cursor)?;
                    DataItem::Reference(Reference::new(Some(&first), &id))
                } else {
                    DataItem::Reference(Reference::new(None, &first))
                }
            }
            _ => return Err(error_at(input, Some(&token), "a cell value")),
        };
        values.push(value);
    }
    Ok(match values.len() {
        0 => None,
        1 => Some(values.into_iter().next().unwrap()),
        _ => Some(DataItem::List(values)),
    })
}
