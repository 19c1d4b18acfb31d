#![forbid(unsafe_code)]
//! Quipu Schema Compiler
//!
//! Quipu turns language-independent schema documents (structs, enums,
//! services, constants, typedefs) into source code for a target language.
//! This crate provides the Vala backend: type mapping, identifier
//! normalization, constant rendering, struct and service emission, and the
//! output driver, plus the `quipu` CLI.
//!
//! Schema parsing and validation live in the `quipu_schema` crate,
//! re-exported here as [`schema`].
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a generator bug (logic error), use
//!   `.expect("INVARIANT: reason")` or `panic!("INVARIANT: ...")` with a clear explanation.
//!   Schema-author mistakes never panic; they surface as [`backend::codegen::errors::GenError`].

pub mod backend;
pub mod cli;
pub mod version;

pub use quipu_schema as schema;

pub use backend::ValaCodegen;
pub use backend::codegen::options::GeneratorOptions;
pub use backend::output::generate_to_dir;
