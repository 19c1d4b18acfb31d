//! Schema document model for the Quipu compiler.
//!
//! A schema describes structs, enums, exceptions, services, constants, and
//! typedefs for a single document plus the flattened set of documents it
//! includes. Documents arrive as JSON produced by the frontend; this crate
//! owns deserialization and the structural checks that do not depend on any
//! particular code generator.
//!
//! ## Notes
//! - This crate is intentionally backend-agnostic: it knows nothing about
//!   target languages, identifier escaping, or wire encodings.
//! - Validation here is structural (duplicate names, dangling references,
//!   typedef cycles). Anything a generator can only discover while emitting
//!   is reported by the generator instead.
//!
//! ## Examples
//! ```rust
//! use quipu_schema::Schema;
//!
//! let schema = Schema::from_json(r#"{"document": {"name": "demo", "namespace": "Demo"}}"#).unwrap();
//! assert_eq!(schema.document.name, "demo");
//! assert!(schema.validate().is_ok());
//! ```

pub mod ast;
pub mod error;
pub mod validate;

pub use ast::{
    ConstDef, ConstValue, Document, EnumDef, EnumMember, Field, Function, NamedRef, Requiredness,
    Schema, ServiceDef, StructDef, TypeRef, TypedefDef,
};
pub use error::SchemaError;
