//! Error types for Vala code generation.
//!
//! Everything here reports a schema-author mistake the generator can only
//! discover while emitting. Internal-consistency violations (member scope
//! misuse) panic instead, per the crate panic policy.

use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

#[derive(Debug, Error)]
pub enum GenError {
    /// An option name the Vala backend does not understand. Raised before
    /// any output path is touched.
    #[error("unknown option vala:{0}")]
    UnknownOption(String),

    #[error("reference to unknown document '{0}'")]
    UnknownDocument(String),

    #[error("unknown type '{name}' in document '{document}'")]
    UnknownType { document: String, name: String },

    #[error("typedef cycle through '{name}' in document '{document}'")]
    TypedefCycle { document: String, name: String },

    /// `void` reached a position that needs a wire representation.
    #[error("void has no wire representation")]
    VoidWireType,

    #[error("type error: {ty} has no field {field}")]
    NoSuchField { ty: String, field: String },

    #[error("cannot render {found} constant as {expected}")]
    ConstTypeMismatch { expected: String, found: String },

    #[error("enum {enum_name} has no member named {member}")]
    UnknownEnumMember { enum_name: String, member: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
