//! Host query engine for ORMLIKE.
//!
//! A minimal in-memory engine that runs pre-execution hooks, such as the
//! LIKE rewriter, before evaluating a `GraphQuery`.

mod context;
mod executor;
mod filter;
mod hooks;

pub use context::QueryContext;
pub use executor::{QueryExecutor, QueryResult, Row};
pub use filter::{extract_filter_fields, FilterEvaluator};
pub use hooks::{HookRegistry, Plugin, QueryHook};
