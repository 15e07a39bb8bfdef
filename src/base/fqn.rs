//! Fully qualified names.
//!
//! A [`FullyQualifiedName`] is a non-empty sequence of dotted segments:
//! the leading segments are the package, the last segment is the simple
//! name. `acme.shop.Jane` has package `acme.shop` and name `Jane`.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

/// Error raised when a name or segment is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name must have at least one segment")]
    Empty,
    #[error("invalid name segment '{0}'")]
    InvalidSegment(SmolStr),
}

/// Dotted scope + name identifying one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FullyQualifiedName {
    segments: Vec<SmolStr>,
}

impl FullyQualifiedName {
    /// Builds a name from pre-split segments, validating each one.
    pub fn new<I, S>(segments: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let segments: Vec<SmolStr> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(NameError::Empty);
        }
        for segment in &segments {
            if !is_valid_segment(segment) {
                return Err(NameError::InvalidSegment(segment.clone()));
            }
        }
        Ok(Self { segments })
    }

    /// Builds a name from an optional dotted package plus a simple name.
    pub fn scoped(package: Option<&str>, name: &str) -> Result<Self, NameError> {
        let mut segments: Vec<SmolStr> = Vec::new();
        if let Some(package) = package {
            segments.extend(package.split('.').map(SmolStr::new));
        }
        segments.push(SmolStr::new(name));
        Self::new(segments)
    }

    /// The simple name: the last segment.
    pub fn name(&self) -> &str {
        self.segments.last().map(SmolStr::as_str).unwrap_or("")
    }

    /// The package: every segment but the last, or `None` for a bare name.
    pub fn package(&self) -> Option<FullyQualifiedName> {
        match self.segments.len() {
            0 | 1 => None,
            n => Some(Self {
                segments: self.segments[..n - 1].to_vec(),
            }),
        }
    }

    /// All segments in order.
    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }
}

impl fmt::Display for FullyQualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for FullyQualifiedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split('.').map(SmolStr::new))
    }
}

/// A segment is a Unicode identifier: XID_Start (or `_`) then XID_Continue.
fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || unicode_ident::is_xid_start(c) => {}
        _ => return false,
    }
    chars.all(unicode_ident::is_xid_continue)
}
