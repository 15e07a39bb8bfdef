//! Logos-based lexer for the ledger notation.
//!
//! Newlines terminate rows, so they survive tokenization; horizontal
//! whitespace does not.

use logos::Logos;
use text_size::TextSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TokenKind {
    #[regex(r"[ \t\r]+")]
    Space,

    #[token("\n")]
    Newline,

    #[token("|")]
    Pipe,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token("@")]
    At,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    // Catch-all so stray characters surface as a reportable token
    // instead of a lexer error.
    #[regex(r".", priority = 0)]
    Error,
}

/// Tokenizes the whole input, dropping horizontal whitespace but
/// keeping newlines and error tokens.
pub(super) fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();
    let mut offset = 0u32;
    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = result.unwrap_or(TokenKind::Error);
        if kind != TokenKind::Space {
            tokens.push(Token {
                kind,
                text,
                offset: TextSize::new(offset),
            });
        }
        offset += text.len() as u32;
    }
    tokens
}
