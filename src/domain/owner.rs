//! Owners: the stakeholders accountable for a package.

use std::any::Any;
use std::sync::Arc;

use crate::artifact::{Artifact, ArtifactHandle, ArtifactType, ConstraintViolation};
use crate::base::FullyQualifiedName;
use crate::document::Root;
use crate::format::convert::{self, ConvertError, EnumProperty};

pub const OWNER: ArtifactType = ArtifactType::new("Owner");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl EnumProperty for Priority {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

/// One owner document: an accountable stakeholder.
#[derive(Debug, Clone)]
pub struct Owner {
    name: FullyQualifiedName,
    pub statement: String,
    pub priority: Priority,
    pub interests: Vec<String>,
}

impl Owner {
    /// Checked constructor: a blank statement is rejected immediately.
    pub fn new(name: FullyQualifiedName, statement: &str) -> Result<Self, ConstraintViolation> {
        if statement.trim().is_empty() {
            return Err(ConstraintViolation::required("statement"));
        }
        Ok(Self {
            name,
            statement: statement.to_string(),
            priority: Priority::default(),
            interests: Vec::new(),
        })
    }

    /// Conversion from the document model. Missing or blank statements
    /// are left for the constraint pass to report.
    pub fn from_root(root: &Root) -> Result<ArtifactHandle, ConvertError> {
        let name = convert::qualified_name(root)?;
        let mut owner = Self {
            name,
            statement: String::new(),
            priority: Priority::default(),
            interests: Vec::new(),
        };
        for key in root.fields.keys() {
            match key.as_str() {
                "statement" => {
                    if let Some(value) = convert::string_value(root.field(key)) {
                        owner.statement = value;
                    }
                }
                "priority" => {
                    if let Some(value) = convert::enum_value(root.field(key)) {
                        owner.priority = value;
                    }
                }
                "interests" => owner.interests = convert::string_list(root.field(key)),
                // Unknown keys are ignored.
                _ => {}
            }
        }
        Ok(Arc::new(owner))
    }

    /// Inverse of [`Owner::from_root`], used by builders and remediation.
    pub fn to_root(&self) -> Root {
        let mut root = Root::new("owner", self.name.name());
        if let Some(package) = self.name.package() {
            root = root.with_scope(&package.to_string());
        }
        root.push_field(
            "statement",
            crate::document::DataItem::String(self.statement.clone()),
        );
        root.push_field(
            "priority",
            crate::document::DataItem::Enum(self.priority.as_str().into()),
        );
        if !self.interests.is_empty() {
            root.push_field(
                "interests",
                crate::document::DataItem::List(
                    self.interests
                        .iter()
                        .map(|i| crate::document::DataItem::String(i.clone()))
                        .collect(),
                ),
            );
        }
        root
    }
}

impl Artifact for Owner {
    fn qualified_name(&self) -> &FullyQualifiedName {
        &self.name
    }

    fn artifact_type(&self) -> ArtifactType {
        OWNER
    }

    fn constraints(&self) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();
        if self.statement.trim().is_empty() {
            violations.push(ConstraintViolation::required("statement"));
        }
        violations
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
