//! Per-query context handed to hooks.

use ormlike_proto::Value;
use std::collections::HashMap;

/// Caller-owned settings attached to a single query invocation.
///
/// Hooks read settings; they never modify the context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryContext {
    /// Named settings, e.g. per-query feature switches.
    pub settings: HashMap<String, Value>,
}

impl QueryContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Attach a setting in place.
    pub fn set_setting(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.settings.insert(key.into(), value.into());
    }

    /// Get a setting by key.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }
}
