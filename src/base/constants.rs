//! Workspace directory conventions.
//!
//! Every path the engine derives on its own is rooted at one of these
//! constants, so embedders can rely on a stable on-disk layout.

/// Root of authored source documents: `src/main/<category>/**`.
pub const SOURCE_ROOT: &str = "src/main";

/// Root for generated tool output: `build/reports/<tool>/...`.
pub const REPORT_ROOT: &str = "build/reports";

/// Reserved subtree for the persisted pattern-membership index.
pub const INDEX_ROOT: &str = "build/index";
