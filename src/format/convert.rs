//! Conversion helpers: document model → typed artifact fields.
//!
//! Conversion is keyed by artifact type, not by notation: each artifact
//! type supplies one `fn(&Root) -> Result<ArtifactHandle, ConvertError>`
//! whose body is an explicit match over field keys. The helpers here are
//! the shared coercions those bodies use.
//!
//! Unknown keys are ignored and wrong-shaped values are skipped; the
//! later constraint pass reports what ends up missing. The only
//! conversion failure is an invalid scope/name combination.

use smol_str::SmolStr;
use thiserror::Error;

use crate::artifact::{ArtifactHandle, ArtifactType, Link};
use crate::base::{FullyQualifiedName, NameError};
use crate::document::{DataItem, Object, Reference, Root};

/// Conversion failure: the document cannot yield a named artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert document: {0}")]
pub struct ConvertError(#[from] pub NameError);

/// One artifact type's conversion entry point.
pub type ConvertFn = fn(&Root) -> Result<ArtifactHandle, ConvertError>;

/// An enum-valued artifact field; `from_name` matches case-insensitively.
pub trait EnumProperty: Sized {
    fn from_name(name: &str) -> Option<Self>;
}

/// Binds `scope` → package and the object name → the qualified name.
pub fn qualified_name(root: &Root) -> Result<FullyQualifiedName, ConvertError> {
    Ok(FullyQualifiedName::scoped(
        root.scope.as_deref(),
        &root.name,
    )?)
}

/// Coerces a string-valued field; anything else is skipped.
pub fn string_value(item: Option<&DataItem>) -> Option<String> {
    match item {
        Some(DataItem::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Coerces an enum-valued field, matching the constant case-insensitively.
pub fn enum_value<E: EnumProperty>(item: Option<&DataItem>) -> Option<E> {
    match item {
        Some(DataItem::Enum(name)) => E::from_name(name),
        _ => None,
    }
}

/// Coerces a reference-valued field into one link. The declared target
/// type, when given, overrides whatever type word the document carried.
pub fn link(item: Option<&DataItem>, target_type: Option<ArtifactType>) -> Option<Link> {
    match item {
        Some(DataItem::Reference(r)) => Some(reference_to_link(r, target_type)),
        _ => None,
    }
}

/// Coerces a field into a list of links: a single reference yields one,
/// a list yields one per reference element.
pub fn links_of(item: Option<&DataItem>, target_type: Option<ArtifactType>) -> Vec<Link> {
    match item {
        Some(DataItem::Reference(r)) => vec![reference_to_link(r, target_type)],
        Some(DataItem::List(items)) => items
            .iter()
            .filter_map(|i| match i {
                DataItem::Reference(r) => Some(reference_to_link(r, target_type)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Coerces a field into a list of strings, skipping non-string elements.
pub fn string_list(item: Option<&DataItem>) -> Vec<String> {
    match item {
        Some(DataItem::String(s)) => vec![s.clone()],
        Some(DataItem::List(items)) => items
            .iter()
            .filter_map(|i| match i {
                DataItem::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Coerces a field into its nested objects: a single object yields one,
/// a list yields one per object element.
pub fn objects_of(item: Option<&DataItem>) -> Vec<&Object> {
    match item {
        Some(DataItem::Object(o)) => vec![o],
        Some(DataItem::List(items)) => items
            .iter()
            .filter_map(|i| match i {
                DataItem::Object(o) => Some(o),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// A named attribute of a reference field, as links.
pub fn attribute_links(
    item: Option<&DataItem>,
    attribute: &str,
    target_type: Option<ArtifactType>,
) -> Vec<Link> {
    match item {
        Some(DataItem::Reference(r)) => r
            .attribute(attribute)
            .iter()
            .map(|a| reference_to_link(a, target_type))
            .collect(),
        _ => Vec::new(),
    }
}

fn reference_to_link(reference: &Reference, target_type: Option<ArtifactType>) -> Link {
    Link {
        target_type,
        id: SmolStr::new(&reference.id),
    }
}
