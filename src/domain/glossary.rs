//! Glossaries: destructured term tables in the ledger notation.

use std::any::Any;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::artifact::{
    Artifact, ArtifactHandle, ArtifactType, ConstraintViolation, Diagnostics, Link,
};
use crate::base::{FullyQualifiedName, Location};
use crate::document::{DataItem, Object, Reference, Root};
use crate::format::convert::{self, ConvertError};

pub const GLOSSARY: ArtifactType = ArtifactType::new("Glossary");

/// One row of the term table.
#[derive(Debug, Clone)]
pub struct Term {
    pub name: SmolStr,
    pub means: String,
    pub see: Vec<Link>,
}

impl Term {
    pub fn new(name: &str, means: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            means: means.to_string(),
            see: Vec::new(),
        }
    }
}

/// One glossary document.
#[derive(Debug, Clone)]
pub struct Glossary {
    name: FullyQualifiedName,
    pub terms: Vec<Term>,
}

impl Glossary {
    pub fn new(name: FullyQualifiedName) -> Self {
        Self {
            name,
            terms: Vec::new(),
        }
    }

    pub fn from_root(root: &Root) -> Result<ArtifactHandle, ConvertError> {
        let mut glossary = Self::new(convert::qualified_name(root)?);
        for object in convert::objects_of(root.field("term")) {
            let mut term = Term::new(&object.name, "");
            if let Some(means) = convert::string_value(object.field("means")) {
                term.means = means;
            }
            term.see = convert::links_of(object.field("see"), None);
            glossary.terms.push(term);
        }
        Ok(Arc::new(glossary))
    }

    pub fn to_root(&self) -> Root {
        let mut root = Root::new("glossary", self.name.name());
        if let Some(package) = self.name.package() {
            root = root.with_scope(&package.to_string());
        }
        let rows = self
            .terms
            .iter()
            .map(|term| {
                let mut object = Object::new(&term.name);
                object.push_field("means", DataItem::String(term.means.clone()));
                match term.see.as_slice() {
                    [] => {}
                    [single] => object.push_field(
                        "see",
                        DataItem::Reference(Reference::new(None, &single.id)),
                    ),
                    many => object.push_field(
                        "see",
                        DataItem::List(
                            many.iter()
                                .map(|link| {
                                    DataItem::Reference(Reference::new(None, &link.id))
                                })
                                .collect(),
                        ),
                    ),
                }
                DataItem::Object(object)
            })
            .collect();
        root.push_field("term", DataItem::List(rows));
        root
    }

    pub fn defines(&self, term_name: &str) -> bool {
        self.terms.iter().any(|term| term.name == term_name)
    }
}

impl Artifact for Glossary {
    fn qualified_name(&self) -> &FullyQualifiedName {
        &self.name
    }

    fn artifact_type(&self) -> ArtifactType {
        GLOSSARY
    }

    /// Every term requires a meaning.
    fn constraints(&self) -> Vec<ConstraintViolation> {
        self.terms
            .iter()
            .filter(|term| term.means.trim().is_empty())
            .map(|term| {
                ConstraintViolation::new("term", format!("term '{}' has no meaning", term.name))
            })
            .collect()
    }

    /// Structural rule: term names are unique within one glossary.
    fn validate(&self, location: &Location, diagnostics: &mut Diagnostics) {
        let mut seen: Vec<&str> = Vec::new();
        for term in &self.terms {
            if seen.contains(&term.name.as_str()) {
                diagnostics.error(
                    format!("Duplicate term '{}'", term.name),
                    Some(location.plus("term")),
                );
            } else {
                seen.push(&term.name);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_without_meaning_violate_their_constraint() {
        let mut glossary = Glossary::new("acme.Shop".parse().unwrap());
        glossary.terms.push(Term::new("Order", ""));
        glossary.terms.push(Term::new("Invoice", "a bill"));
        assert_eq!(glossary.constraints().len(), 1);
    }

    #[test]
    fn duplicate_terms_are_a_structural_error() {
        let mut glossary = Glossary::new("acme.Shop".parse().unwrap());
        glossary.terms.push(Term::new("Order", "a purchase"));
        glossary.terms.push(Term::new("Order", "again"));

        let mut diagnostics = Diagnostics::new();
        glossary.validate(&glossary.location(), &mut diagnostics);
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn to_root_round_trips_through_from_root() {
        let mut glossary = Glossary::new("acme.Shop".parse().unwrap());
        let mut order = Term::new("Order", "a purchase");
        order.see = vec![Link::untyped("Invoice")];
        glossary.terms.push(order);

        let artifact = Glossary::from_root(&glossary.to_root()).unwrap();
        let back = artifact.as_any().downcast_ref::<Glossary>().unwrap();
        assert_eq!(back.terms.len(), 1);
        assert!(back.defines("Order"));
        assert_eq!(back.terms[0].see.len(), 1);
    }
}
