//! Nullability annotation kinds and the predicate deciding whether an attribute list already
//! carries one.
//!
//! Matching is a plain comparison on the unqualified attribute class name. Namespaces, aliases
//! and subclasses are not resolved, so any attribute class called `NotNullAttribute` counts.

use crate::domain::semantic::AttributeData;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    NotNull,
    CanBeNull,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 2] = [AnnotationKind::NotNull, AnnotationKind::CanBeNull];

    /// Short name as written in source (`[NotNull]`).
    pub fn attribute_name(&self) -> &'static str {
        match self {
            AnnotationKind::NotNull => "NotNull",
            AnnotationKind::CanBeNull => "CanBeNull",
        }
    }

    /// Resolved attribute class name.
    pub fn class_name(&self) -> &'static str {
        match self {
            AnnotationKind::NotNull => "NotNullAttribute",
            AnnotationKind::CanBeNull => "CanBeNullAttribute",
        }
    }

    pub fn from_class_name(class_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.class_name() == class_name)
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.attribute_name())
    }
}

/// True iff any attribute is `NotNullAttribute` or `CanBeNullAttribute`.
pub fn has_annotation(attributes: &[AttributeData]) -> bool {
    attributes
        .iter()
        .any(|a| AnnotationKind::from_class_name(&a.class_name).is_some())
}
