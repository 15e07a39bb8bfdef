//! Users: the stakeholders who work inside a package.

use std::any::Any;
use std::sync::Arc;

use crate::artifact::{Artifact, ArtifactHandle, ArtifactType, Diagnostics, Link};
use crate::base::{FullyQualifiedName, Location};
use crate::document::{DataItem, Root};
use crate::format::convert::{self, ConvertError};

use super::owner::OWNER;

pub const USER: ArtifactType = ArtifactType::new("User");

/// One user document.
#[derive(Debug, Clone)]
pub struct User {
    name: FullyQualifiedName,
    pub statement: String,
    /// Typed reference to the accountable owner.
    pub reports_to: Option<Link>,
    /// Stand-in user, bound from the `deputy` attribute of `reports_to`.
    pub deputy: Option<Link>,
    /// Untyped references to other stakeholders.
    pub collaborates: Vec<Link>,
    pub tasks: Vec<String>,
}

impl User {
    pub fn new(name: FullyQualifiedName) -> Self {
        Self {
            name,
            statement: String::new(),
            reports_to: None,
            deputy: None,
            collaborates: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn from_root(root: &Root) -> Result<ArtifactHandle, ConvertError> {
        let mut user = Self::new(convert::qualified_name(root)?);
        for key in root.fields.keys() {
            match key.as_str() {
                "statement" => {
                    if let Some(value) = convert::string_value(root.field(key)) {
                        user.statement = value;
                    }
                }
                "reports_to" => {
                    user.reports_to = convert::link(root.field(key), Some(OWNER));
                    user.deputy = convert::attribute_links(root.field(key), "deputy", Some(USER))
                        .into_iter()
                        .next();
                }
                "collaborates" => {
                    user.collaborates = convert::links_of(root.field(key), None);
                }
                "tasks" => user.tasks = convert::string_list(root.field(key)),
                _ => {}
            }
        }
        Ok(Arc::new(user))
    }

    pub fn to_root(&self) -> Root {
        let mut root = Root::new("user", self.name.name());
        if let Some(package) = self.name.package() {
            root = root.with_scope(&package.to_string());
        }
        if !self.statement.is_empty() {
            root.push_field("statement", DataItem::String(self.statement.clone()));
        }
        if let Some(reports_to) = &self.reports_to {
            let mut reference =
                crate::document::Reference::new(Some("owner"), &reports_to.id);
            if let Some(deputy) = &self.deputy {
                reference.attributes.insert(
                    "deputy".into(),
                    vec![crate::document::Reference::new(None, &deputy.id)],
                );
            }
            root.push_field("reports_to", DataItem::Reference(reference));
        }
        if !self.collaborates.is_empty() {
            root.push_field(
                "collaborates",
                DataItem::List(
                    self.collaborates
                        .iter()
                        .map(|link| {
                            DataItem::Reference(crate::document::Reference::new(None, &link.id))
                        })
                        .collect(),
                ),
            );
        }
        if !self.tasks.is_empty() {
            root.push_field(
                "tasks",
                DataItem::List(
                    self.tasks
                        .iter()
                        .map(|t| DataItem::String(t.clone()))
                        .collect(),
                ),
            );
        }
        root
    }
}

impl Artifact for User {
    fn qualified_name(&self) -> &FullyQualifiedName {
        &self.name
    }

    fn artifact_type(&self) -> ArtifactType {
        USER
    }

    /// Structural rule: a user never collaborates with itself.
    fn validate(&self, location: &Location, diagnostics: &mut Diagnostics) {
        for link in &self.collaborates {
            if link.id == self.name.name() || link.id == self.name.to_string() {
                diagnostics.error(
                    format!("User '{}' collaborates with itself", self.name.name()),
                    Some(location.plus("collaborates")),
                );
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
    fn reports_to_is_typed_and_deputy_binds_from_its_attribute() {
        let mut root = Root::new("user", "Bob");
        let mut reference = crate::document::Reference::new(Some("owner"), "Jane");
        reference.attributes.insert(
            "deputy".into(),
            vec![crate::document::Reference::new(None, "Ann")],
        );
        root.push_field("reports_to", DataItem::Reference(reference));

        let artifact = User::from_root(&root).unwrap();
        let user = artifact.as_any().downcast_ref::<User>().unwrap();
        assert_eq!(user.reports_to.as_ref().unwrap().target_type, Some(OWNER));
        assert_eq!(user.deputy.as_ref().unwrap().target_type, Some(USER));
        assert_eq!(user.deputy.as_ref().unwrap().id, "Ann");
    }

    #[test]
    fn self_collaboration_is_a_structural_error() {
        let mut user = User::new("acme.Bob".parse().unwrap());
        user.collaborates = vec![Link::untyped("Bob")];

        let mut diagnostics = Diagnostics::new();
        user.validate(&user.location(), &mut diagnostics);
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn collaboration_with_others_is_fine() {
        let mut user = User::new("acme.Bob".parse().unwrap());
        user.collaborates = vec![Link::untyped("Ann")];

        let mut diagnostics = Diagnostics::new();
        user.validate(&user.location(), &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
