//! Untyped document model.
//!
//! Every notation's parser produces this intermediate representation and
//! every builder consumes it. Values are transient: a [`Root`] is produced
//! by `parse`, handed to a conversion, and dropped.
//!
//! Field maps are ordered, and structural equality is order-sensitive:
//! two documents whose keys arrive in a different order are not equal.
//! That is what makes the per-notation round-trip contract
//! (`parse(build(r)) == r`) meaningful.

use indexmap::IndexMap;
use smol_str::SmolStr;

/// One value in a document: the open-ended shapes of the model, closed
/// into an exhaustively matched union.
#[derive(Debug, Clone, PartialEq)]
pub enum DataItem {
    /// Quoted string value.
    String(String),
    /// Bare-word enum constant; matched case-insensitively at conversion.
    Enum(SmolStr),
    /// Reference to another object, by id.
    Reference(Reference),
    /// Named nested object.
    Object(Object),
    /// Ordered sequence of values.
    List(Vec<DataItem>),
}

/// A reference value: optional target type, an id, and reference-valued
/// attributes.
#[derive(Debug, Clone)]
pub struct Reference {
    pub target_type: Option<SmolStr>,
    pub id: SmolStr,
    pub attributes: IndexMap<SmolStr, Vec<Reference>>,
}

impl Reference {
    pub fn new(target_type: Option<&str>, id: &str) -> Self {
        Self {
            target_type: target_type.map(SmolStr::new),
            id: SmolStr::new(id),
            attributes: IndexMap::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> &[Reference] {
        self.attributes.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.target_type == other.target_type
            && self.id == other.id
            && ordered_eq(&self.attributes, &other.attributes)
    }
}

/// A named object with ordered fields.
#[derive(Debug, Clone)]
pub struct Object {
    pub name: SmolStr,
    pub fields: IndexMap<SmolStr, DataItem>,
}

impl Object {
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            fields: IndexMap::new(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&DataItem> {
        self.fields.get(key)
    }

    /// Sets a field, accumulating repeated keys into a list.
    pub fn push_field(&mut self, key: &str, value: DataItem) {
        push_field(&mut self.fields, key, value);
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && ordered_eq(&self.fields, &other.fields)
    }
}

/// The single top-level clause of a document. A root never nests, so it
/// is a separate struct rather than a `DataItem` variant.
#[derive(Debug, Clone)]
pub struct Root {
    /// Dotted package scope, when declared.
    pub scope: Option<SmolStr>,
    /// The document's type word (`owner`, `glossary`, ...).
    pub doc_type: SmolStr,
    /// The declared object name; must match the file's base name.
    pub name: SmolStr,
    pub fields: IndexMap<SmolStr, DataItem>,
}

impl Root {
    pub fn new(doc_type: &str, name: &str) -> Self {
        Self {
            scope: None,
            doc_type: SmolStr::new(doc_type),
            name: SmolStr::new(name),
            fields: IndexMap::new(),
        }
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(SmolStr::new(scope));
        self
    }

    pub fn field(&self, key: &str) -> Option<&DataItem> {
        self.fields.get(key)
    }

    /// Sets a field, accumulating repeated keys into a list.
    pub fn push_field(&mut self, key: &str, value: DataItem) {
        push_field(&mut self.fields, key, value);
    }
}

impl PartialEq for Root {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope
            && self.doc_type == other.doc_type
            && self.name == other.name
            && ordered_eq(&self.fields, &other.fields)
    }
}

/// Order-sensitive map equality. `IndexMap::eq` ignores order; the
/// document model must not.
fn ordered_eq<V: PartialEq>(a: &IndexMap<SmolStr, V>, b: &IndexMap<SmolStr, V>) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|((ak, av), (bk, bv))| ak == bk && av == bv)
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
