//! Core error types.

use thiserror::Error;

/// Core errors.
///
/// The rewrite engine itself never fails; these come from the catalog, hook
/// registration, configuration loading and the in-memory host engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Protocol error.
    #[error("protocol error: {0}")]
    Protocol(#[from] ormlike_proto::Error),

    /// Query names an entity the catalog does not know.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Query or row names a field the entity does not declare.
    #[error("unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: String, field: String },

    /// A row value does not fit the declared field type.
    #[error("type mismatch for field '{field}': expected {expected}")]
    TypeMismatch { field: String, expected: String },

    /// A hook with the same name is already registered.
    #[error("hook already registered: {0}")]
    DuplicateHook(String),

    /// Proposed schema version does not advance the current one.
    #[error("schema version {proposed} does not advance current version {current}")]
    SchemaVersion { current: u64, proposed: u64 },

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}
