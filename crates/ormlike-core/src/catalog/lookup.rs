//! Field annotation lookup capability.
//!
//! The rewriter never reaches into a global schema; it is handed something
//! that answers "what annotation does this field carry?".

use super::{EntityDef, FieldAnnotation};
use std::collections::HashMap;

/// Resolves the pattern-rewriting annotation of a field by name.
///
/// Implementations must be read-only. Unknown fields resolve to
/// [`FieldAnnotation::Unset`].
pub trait FieldLookup {
    /// Get the annotation for a field.
    fn annotation(&self, field: &str) -> FieldAnnotation;
}

/// Lookup for queries with no schema metadata: every field is unannotated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnnotations;

impl FieldLookup for NoAnnotations {
    fn annotation(&self, _field: &str) -> FieldAnnotation {
        FieldAnnotation::Unset
    }
}

impl FieldLookup for EntityDef {
    fn annotation(&self, field: &str) -> FieldAnnotation {
        self.get_field(field)
            .map(|f| f.pattern_annotation())
            .unwrap_or_default()
    }
}

impl FieldLookup for HashMap<String, FieldAnnotation> {
    fn annotation(&self, field: &str) -> FieldAnnotation {
        self.get(field).copied().unwrap_or_default()
    }
}

/// Adapts a closure into a [`FieldLookup`].
#[derive(Debug, Clone, Copy)]
pub struct LookupFn<F>(pub F);

impl<F> FieldLookup for LookupFn<F>
where
    F: Fn(&str) -> FieldAnnotation,
{
    fn annotation(&self, field: &str) -> FieldAnnotation {
        (self.0)(field)
    }
}
