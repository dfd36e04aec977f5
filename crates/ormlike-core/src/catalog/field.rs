//! Field definitions for entities.

use super::types::FieldType;
use rkyv::{Archive, Deserialize, Serialize};

/// Tag key whose value opts a field in or out of pattern rewriting.
pub const ANNOTATION_KEY: &str = "ormlike";

/// Per-field opt-in/opt-out marker for pattern rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldAnnotation {
    /// No marker, or a marker that is neither `"true"` nor `"false"`.
    #[default]
    Unset,
    /// Marker is `"true"`.
    ExplicitlyEnabled,
    /// Marker is `"false"`; vetoes rewriting regardless of policy.
    ExplicitlyDisabled,
}

impl FieldAnnotation {
    /// Parse the declarative marker string attached to a field.
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some("true") => FieldAnnotation::ExplicitlyEnabled,
            Some("false") => FieldAnnotation::ExplicitlyDisabled,
            _ => FieldAnnotation::Unset,
        }
    }
}

/// A declarative key/value marker attached to a field definition.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct FieldTag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

/// A field definition within an entity.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field data type.
    pub field_type: FieldType,
    /// Declarative markers, looked up by key.
    pub tags: Vec<FieldTag>,
}

impl FieldDef {
    /// Create a new required field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            tags: Vec::new(),
        }
    }

    /// Create an optional field.
    pub fn optional(name: impl Into<String>, scalar: crate::catalog::ScalarType) -> Self {
        Self::new(name, FieldType::OptionalScalar(scalar))
    }

    /// Attach a tag, replacing any existing tag with the same key.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.tags.retain(|t| t.key != key);
        self.tags.push(FieldTag {
            key,
            value: value.into(),
        });
        self
    }

    /// Opt this field in (`true`) or out (`false`) of pattern rewriting.
    pub fn with_pattern_matching(self, enabled: bool) -> Self {
        self.with_tag(ANNOTATION_KEY, if enabled { "true" } else { "false" })
    }

    /// Get a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    /// The pattern-rewriting annotation declared on this field.
    pub fn pattern_annotation(&self) -> FieldAnnotation {
        FieldAnnotation::from_marker(self.tag(ANNOTATION_KEY))
    }

    /// Check if this field accepts nulls.
    pub fn is_nullable(&self) -> bool {
        self.field_type.is_nullable()
    }
}
