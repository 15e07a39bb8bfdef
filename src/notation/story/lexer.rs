//! Logos-based lexer for the story notation.

use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("@")]
    At,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    // Catch-all so stray characters surface as a reportable token
    // instead of a lexer error.
    #[regex(r".", priority = 0)]
    Error,
}

/// Tokenizes the whole input, dropping trivia but keeping error tokens
/// for the parser to report.
pub(super) fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();
    let mut offset = 0u32;
    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = result.unwrap_or(TokenKind::Error);
        if !matches!(kind, TokenKind::Whitespace | TokenKind::LineComment) {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_trivia_and_keeps_positions() {
        let tokens = tokenize("owner Jane { // note\n}");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::LBrace,
                TokenKind::RBrace
            ]
        );
        assert_eq!(u32::from(tokens[1].offset), 6);
    }

    #[test]
    fn unknown_characters_become_error_tokens() {
        let tokens = tokenize("owner %");
        assert_eq!(tokens[1].kind, TokenKind::Error);
    }
}
