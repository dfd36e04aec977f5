//! Rewrite configuration and per-field policy resolution.

use crate::catalog::FieldAnnotation;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Plugin-wide rewrite configuration.
///
/// Built once when the plugin is constructed and shared read-only by every
/// query afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewritePolicy {
    /// Substitute token for `%`. `None` recognises only the native character.
    pub wildcard_marker: Option<String>,
    /// Only rewrite fields explicitly annotated with `"true"`.
    pub require_annotation: bool,
    /// Only rewrite queries whose session flag is `true`.
    pub require_session_flag: bool,
}

impl RewritePolicy {
    /// Create the default policy: rewrite everywhere, native `%` only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wildcard marker. An empty string clears it.
    pub fn with_wildcard_marker(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        self.wildcard_marker = (!marker.is_empty()).then_some(marker);
        self
    }

    /// Only rewrite fields annotated as enabled.
    pub fn require_annotation(mut self, required: bool) -> Self {
        self.require_annotation = required;
        self
    }

    /// Only rewrite when the per-query session flag is `true`.
    pub fn require_session_flag(mut self, required: bool) -> Self {
        self.require_session_flag = required;
        self
    }

    /// Load a policy from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let policy: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(policy.normalized())
    }

    /// The configured marker, treating an empty string as unset.
    pub fn marker(&self) -> Option<&str> {
        self.wildcard_marker.as_deref().filter(|m| !m.is_empty())
    }

    fn normalized(mut self) -> Self {
        if self.marker().is_none() {
            self.wildcard_marker = None;
        }
        self
    }
}

/// Outcome of resolving a field against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// The field's values may be rewritten.
    Allowed,
    /// The field is left untouched.
    Denied,
}

impl FieldPolicy {
    /// Resolve whether a field with `annotation` may be rewritten.
    ///
    /// An explicit opt-out always wins; with `require_annotation`, only an
    /// explicit opt-in is allowed.
    pub fn resolve(annotation: FieldAnnotation, policy: &RewritePolicy) -> Self {
        match (annotation, policy.require_annotation) {
            (FieldAnnotation::ExplicitlyDisabled, _) => FieldPolicy::Denied,
            (FieldAnnotation::ExplicitlyEnabled, _) => FieldPolicy::Allowed,
            (FieldAnnotation::Unset, true) => FieldPolicy::Denied,
            (FieldAnnotation::Unset, false) => FieldPolicy::Allowed,
        }
    }

    /// Check if rewriting is allowed.
    pub fn is_allowed(self) -> bool {
        self == FieldPolicy::Allowed
    }
}
