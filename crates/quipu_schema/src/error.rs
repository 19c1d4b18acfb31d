//! Error types for loading and validating schema documents.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document '{document}' declares '{name}' more than once")]
    DuplicateType { document: String, name: String },

    #[error("'{owner}' declares field key {key} more than once")]
    DuplicateFieldKey { owner: String, key: i16 },

    #[error("service '{service}' declares function '{name}' more than once")]
    DuplicateFunction { service: String, name: String },

    #[error("reference to unknown document '{0}'")]
    UnknownDocument(String),

    #[error("unknown type '{name}' in document '{document}'")]
    UnknownType { document: String, name: String },

    #[error("typedef cycle through '{name}' in document '{document}'")]
    TypedefCycle { document: String, name: String },
}
