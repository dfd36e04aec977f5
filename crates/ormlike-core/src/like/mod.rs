//! LIKE rewriting engine.
//!
//! Control flows one way: the session gate decides whether a query is
//! rewritten, the condition rewriter walks its filter, and each equality or
//! membership leaf consults the field policy and then the pattern detector.

mod gate;
mod pattern;
mod plugin;
mod policy;
mod rewrite;

pub use gate::{should_rewrite, SessionFlag};
pub use pattern::{detect, PatternDecision, NATIVE_WILDCARD};
pub use plugin::{LikePlugin, HOOK_NAME, PLUGIN_NAME, SETTING_KEY};
pub use policy::{FieldPolicy, RewritePolicy};
pub use rewrite::ConditionRewriter;
