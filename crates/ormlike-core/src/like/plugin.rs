//! The rewriter packaged as a host plugin.

use std::sync::Arc;

use ormlike_proto::GraphQuery;
use tracing::{debug, info};

use super::gate::{should_rewrite, SessionFlag};
use super::policy::RewritePolicy;
use super::rewrite::ConditionRewriter;
use crate::catalog::FieldLookup;
use crate::error::Error;
use crate::query::{HookRegistry, Plugin, QueryContext, QueryHook};

/// Plugin name.
pub const PLUGIN_NAME: &str = "ormlike";

/// Name the before-query hook is registered under.
pub const HOOK_NAME: &str = "ormlike:query";

/// Query-context key holding the per-query rewrite-enabled signal.
///
/// Read through [`SessionFlag::from_setting`]; absent means "not set".
pub const SETTING_KEY: &str = "ormlike";

/// Rewrites equality and membership filters into LIKE comparisons.
#[derive(Debug, Clone, Default)]
pub struct LikePlugin {
    policy: Arc<RewritePolicy>,
}

impl LikePlugin {
    /// Create a plugin with the given policy.
    pub fn new(policy: RewritePolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// The policy this plugin applies.
    pub fn policy(&self) -> &RewritePolicy {
        &self.policy
    }

    /// Gate then rewrite a query's filter in place.
    ///
    /// A query without a filter is left alone.
    pub fn apply(&self, query: &mut GraphQuery, context: &QueryContext, fields: &dyn FieldLookup) {
        let flag = SessionFlag::from_setting(context.setting(SETTING_KEY));
        if !should_rewrite(flag, &self.policy) {
            debug!(entity = %query.root_entity, ?flag, "rewrite skipped by session gate");
            return;
        }

        if let Some(filter) = query.filter.as_mut() {
            ConditionRewriter::new(&self.policy, fields).rewrite_in_place(&mut filter.expression);
        }
    }
}

impl Plugin for LikePlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn initialize(&self, registry: &mut HookRegistry) -> Result<(), Error> {
        registry.register(HOOK_NAME, Box::new(LikeHook(self.clone())))?;
        info!(
            hook = HOOK_NAME,
            marker = ?self.policy.marker(),
            require_annotation = self.policy.require_annotation,
            require_session_flag = self.policy.require_session_flag,
            "registered LIKE rewriter"
        );
        Ok(())
    }
}

struct LikeHook(LikePlugin);

impl QueryHook for LikeHook {
    fn before_query(&self, query: &mut GraphQuery, context: &QueryContext, fields: &dyn FieldLookup) {
        self.0.apply(query, context, fields);
    }
}
