//! ORMLIKE Core - LIKE rewriting engine, schema catalog, and query hooks.
//!
//! The [`like`] module holds the rewriter itself. [`catalog`] supplies the
//! per-field annotations it consults, and [`query`] is a small in-memory host
//! engine that runs it as a pre-execution hook.

pub mod catalog;
pub mod error;
pub mod like;
pub mod query;

pub use catalog::{
    Catalog, EntityDef, FieldAnnotation, FieldDef, FieldLookup, FieldTag, FieldType,
    LookupFn, NoAnnotations, ScalarType, SchemaBundle,
};
pub use error::Error;
pub use like::{
    detect, should_rewrite, ConditionRewriter, FieldPolicy, LikePlugin, PatternDecision,
    RewritePolicy, SessionFlag,
};
pub use query::{
    FilterEvaluator, HookRegistry, Plugin, QueryContext, QueryExecutor, QueryHook, QueryResult,
    Row,
};

/// Re-export protocol types.
pub use ormlike_proto as proto;
