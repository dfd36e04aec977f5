//! Recursive condition-tree rewriting.

use super::pattern::detect;
use super::policy::{FieldPolicy, RewritePolicy};
use crate::catalog::FieldLookup;
use ormlike_proto::{FilterExpr, Value};
use tracing::{debug, trace};

/// Rewrites equality and membership leaves into pattern matches.
///
/// Holds only borrowed, read-only state, so one rewriter can be built per
/// query at no cost.
pub struct ConditionRewriter<'a> {
    policy: &'a RewritePolicy,
    fields: &'a dyn FieldLookup,
}

impl<'a> ConditionRewriter<'a> {
    /// Create a rewriter for one query.
    pub fn new(policy: &'a RewritePolicy, fields: &'a dyn FieldLookup) -> Self {
        Self { policy, fields }
    }

    /// Rewrite a tree, returning the transformed tree.
    pub fn rewrite(&self, expr: FilterExpr) -> FilterExpr {
        match expr {
            FilterExpr::And(children) => {
                FilterExpr::And(children.into_iter().map(|c| self.rewrite(c)).collect())
            }
            FilterExpr::Or(children) => {
                FilterExpr::Or(children.into_iter().map(|c| self.rewrite(c)).collect())
            }
            FilterExpr::Eq { field, value } => self.rewrite_eq(field, value),
            FilterExpr::In { field, values } => self.rewrite_in(field, values),
            other => other,
        }
    }

    /// Rewrite a tree in place.
    pub fn rewrite_in_place(&self, expr: &mut FilterExpr) {
        let taken = std::mem::replace(expr, FilterExpr::And(Vec::new()));
        *expr = self.rewrite(taken);
    }

    fn allowed(&self, field: &str) -> bool {
        FieldPolicy::resolve(self.fields.annotation(field), self.policy).is_allowed()
    }

    fn rewrite_eq(&self, field: String, value: Value) -> FilterExpr {
        let Value::String(text) = &value else {
            return FilterExpr::Eq { field, value };
        };
        if !self.allowed(&field) {
            trace!(field = %field, "field denied, equality kept");
            return FilterExpr::Eq { field, value };
        }

        let decision = detect(text, self.policy.marker());
        if !decision.is_pattern {
            trace!(field = %field, "no wildcard, equality kept");
            return FilterExpr::Eq { field, value };
        }

        debug!(field = %field, pattern = %decision.rewritten_value, "equality rewritten to LIKE");
        FilterExpr::Like {
            field,
            pattern: decision.rewritten_value,
        }
    }

    fn rewrite_in(&self, field: String, values: Vec<Value>) -> FilterExpr {
        if !self.allowed(&field) {
            trace!(field = %field, "field denied, membership kept");
            return FilterExpr::In { field, values };
        }

        let marker = self.policy.marker();
        let patterns: Vec<Option<String>> = values
            .iter()
            .map(|v| {
                v.as_str()
                    .map(|s| detect(s, marker))
                    .filter(|d| d.is_pattern)
                    .map(|d| d.rewritten_value)
            })
            .collect();

        if patterns.iter().all(Option::is_none) {
            trace!(field = %field, "no wildcard values, membership kept");
            return FilterExpr::In { field, values };
        }

        debug!(field = %field, alternatives = values.len(), "membership split into OR");
        let leaves = values
            .into_iter()
            .zip(patterns)
            .map(|(value, pattern)| match pattern {
                Some(pattern) => FilterExpr::Like {
                    field: field.clone(),
                    pattern,
                },
                None => FilterExpr::Eq {
                    field: field.clone(),
                    value,
                },
            })
            .collect();
        FilterExpr::Or(leaves)
    }
}
