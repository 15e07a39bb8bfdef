//! Glob patterns over workspace paths.
//!
//! A [`Pattern`] is a fixed base path plus a wildcard tail that begins
//! with `**`, e.g. `src/main/stakeholders/**/*.owner`. The textual form
//! it was registered with is its identity; the persisted index is keyed
//! by that identity.

use std::fmt;

use smol_str::SmolStr;
use thiserror::Error;

use super::path::ResourcePath;

/// Malformed pattern text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{0}' has no '**' wildcard segment")]
    MissingWildcard(String),
    #[error("pattern '{0}' puts fixed segments before '**' in its tail")]
    FixedTail(String),
}

/// A (base path, wildcard) pair selecting a set of workspace paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    base: ResourcePath,
    /// Wildcard segments, starting with `**`.
    tail: Vec<SmolStr>,
}

impl Pattern {
    /// Parses pattern text of the form `<base>/**[/<glob segment>...]`.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let mut base_segments: Vec<&str> = Vec::new();
        let mut tail: Vec<SmolStr> = Vec::new();
        let mut in_tail = false;
        for segment in text.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            if segment == "**" && !in_tail {
                in_tail = true;
                tail.push(SmolStr::new(segment));
                continue;
            }
            if in_tail {
                tail.push(SmolStr::new(segment));
            } else if segment.contains('*') {
                return Err(PatternError::FixedTail(text.to_string()));
            } else {
                base_segments.push(segment);
            }
        }
        if !in_tail {
            return Err(PatternError::MissingWildcard(text.to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            base: ResourcePath::parse(&base_segments.join("/")),
            tail,
        })
    }

    /// The exact registration text; key of the persisted index.
    pub fn identity(&self) -> &str {
        &self.text
    }

    /// The fixed prefix below which all matches live.
    pub fn base(&self) -> &ResourcePath {
        &self.base
    }

    /// The file extension the pattern tail selects, if any.
    pub fn extension(&self) -> Option<&str> {
        let last = self.tail.last()?;
        match last.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() && !ext.contains('*') => Some(ext),
            _ => None,
        }
    }

    /// Tests a workspace-relative path against the pattern.
    pub fn matches(&self, path: &ResourcePath) -> bool {
        match path.strip_prefix(&self.base) {
            Some(rest) => match_segments(&self.tail, rest),
            None => false,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Matches wildcard segments against path segments. `**` spans zero or
/// more segments; within a segment `*` spans zero or more characters.
fn match_segments(pattern: &[SmolStr], path: &[SmolStr]) -> bool {
    match pattern.first() {
        None => path.is_empty(),
        Some(p) if p == "**" => (0..=path.len())
            .any(|skip| match_segments(&pattern[1..], &path[skip..])),
        Some(p) => match path.first() {
            Some(s) => match_one(p, s) && match_segments(&pattern[1..], &path[1..]),
            None => false,
        },
    }
}

fn match_one(pattern: &str, segment: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == segment,
        Some((prefix, rest)) => {
            if let Some(stripped) = segment.strip_prefix(prefix) {
                (0..=stripped.len())
                    .filter(|i| stripped.is_char_boundary(*i))
                    .any(|i| match_one(rest, &stripped[i..]))
            } else {
                false
            }
        }
    }
}
