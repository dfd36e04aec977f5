//! ORMLIKE protocol types.
//!
//! This crate defines the condition-tree IR a host query engine hands to the
//! ORMLIKE rewriter, and the scalar values those conditions carry.
//!
//! # Modules
//!
//! - [`value`] - Runtime scalar values for filter leaves and rows
//! - [`query`] - The recursive condition tree and the read query carrying it
//! - [`columns`] - Column-to-value maps turned into condition trees
//! - [`error`] - Protocol error types
//!
//! # Example
//!
//! ```ignore
//! use ormlike_proto::{filter_from_columns, ColumnValue, GraphQuery};
//!
//! let filter = filter_from_columns([("name", ColumnValue::many(["jessica", "%o%"]))]);
//! let query = GraphQuery::new("User").with_filter(filter.unwrap().into());
//! ```

pub mod columns;
pub mod error;
pub mod query;
pub mod value;

pub use error::Error;

// Re-export commonly used types at crate root
pub use columns::{filter_from_columns, filter_from_json, ColumnValue};
pub use query::{Filter, FilterExpr, GraphQuery, OrderDirection, OrderSpec, Pagination};
pub use value::Value;

/// Parse a read query from its JSON form.
pub fn query_from_json(json: &str) -> Result<GraphQuery, Error> {
    Ok(serde_json::from_str(json)?)
}
