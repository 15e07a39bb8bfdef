//! Diagnostic locations.
//!
//! A [`Location`] is an ordered path of non-empty segments
//! (package/type/name/property\[index\]) that anchors every diagnostic.

use std::fmt;

use smol_str::SmolStr;

/// Ordered path segments anchoring a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    segments: Vec<SmolStr>,
}

impl Location {
    /// Builds a location from raw segments; empty segments are dropped.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let segments = segments
            .into_iter()
            .map(Into::into)
            .filter(|s: &SmolStr| !s.is_empty())
            .collect();
        Self { segments }
    }

    /// Location of a whole source file, from its slash-separated path.
    pub fn of_path(path: &str) -> Self {
        Self::new(path.split('/'))
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// Returns a copy extended by one segment. Empty segments are ignored.
    pub fn plus(&self, segment: &str) -> Self {
        debug_assert!(!segment.is_empty(), "location segments are never empty");
        let mut segments = self.segments.clone();
        if !segment.is_empty() {
            segments.push(SmolStr::new(segment));
        }
        Self { segments }
    }

    /// Returns a copy whose last segment is rewritten to `segment[index]`.
    pub fn plus_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            *last = SmolStr::new(format!("{last}[{index}]"));
        }
        Self { segments }
    }

    /// Prefix test: does this location sit inside `outer`?
    pub fn is_inside(&self, outer: &Location) -> bool {
        self.segments.len() >= outer.segments.len()
            && self.segments[..outer.segments.len()] == outer.segments[..]
    }
}

impl fmt::Display for Location {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_extends_and_keeps_original() {
        let base = Location::new(["acme", "Owner", "Jane"]);
        let extended = base.plus("statement");
        assert_eq!(extended.to_string(), "acme.Owner.Jane.statement");
        assert_eq!(base.segments().len(), 3);
    }

    #[test]
    fn plus_index_rewrites_last_segment() {
        let loc = Location::new(["Jane", "interests"]).plus_index(1);
        assert_eq!(loc.to_string(), "Jane.interests[1]");
    }

    #[test]
    fn is_inside_is_a_prefix_test() {
        let outer = Location::new(["acme", "Owner", "Jane"]);
        let inner = outer.plus("statement");
        assert!(inner.is_inside(&outer));
        assert!(!outer.is_inside(&inner));
        assert!(outer.is_inside(&outer));
    }

    #[test]
    fn of_path_splits_segments() {
        let loc = Location::of_path("src/main/stakeholders/Jane.owner");
        assert_eq!(loc.segments().len(), 4);
    }
}
