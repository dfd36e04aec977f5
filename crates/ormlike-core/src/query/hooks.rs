//! Pre-execution hooks and plugin registration.

use crate::catalog::FieldLookup;
use crate::error::Error;
use ormlike_proto::GraphQuery;

use super::context::QueryContext;

/// A callback run on every read query before it is evaluated.
pub trait QueryHook: Send + Sync {
    /// Inspect or transform `query` in place.
    ///
    /// `fields` resolves per-field metadata for the query's root entity.
    fn before_query(&self, query: &mut GraphQuery, context: &QueryContext, fields: &dyn FieldLookup);
}

/// Something that installs one or more hooks into a registry.
pub trait Plugin {
    /// Stable identifying name.
    fn name(&self) -> &str;

    /// Register this plugin's hooks.
    fn initialize(&self, registry: &mut HookRegistry) -> Result<(), Error>;
}

/// Ordered collection of named query hooks.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<(String, Box<dyn QueryHook>)>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook under a unique name. Hooks run in registration order.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        hook: Box<dyn QueryHook>,
    ) -> Result<(), Error> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(Error::DuplicateHook(name));
        }
        self.hooks.push((name, hook));
        Ok(())
    }

    /// Get a registered hook by name.
    pub fn get(&self, name: &str) -> Option<&dyn QueryHook> {
        self.hooks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, h)| h.as_ref())
    }

    /// Names of all registered hooks, in run order.
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook against `query`.
    pub fn run_before_query(
        &self,
        query: &mut GraphQuery,
        context: &QueryContext,
        fields: &dyn FieldLookup,
    ) {
        for (_, hook) in &self.hooks {
            hook.before_query(query, context, fields);
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}
