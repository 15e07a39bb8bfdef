//! Per-path document states.

/// Where one document path sits in the validate/build lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocState {
    /// Never parsed, unbound, or a placeholder.
    #[default]
    Unparsed,
    /// Parse, conversion, constraint, or validation errors.
    Invalid,
    /// Parsed and validated clean; no build ran.
    Valid,
    /// Parsed, validated clean, and the targeting tool built.
    Built,
    /// The backing file disappeared.
    Deleted,
}
