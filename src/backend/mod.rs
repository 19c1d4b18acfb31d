//! Quipu Compiler Backend
//!
//! This module turns a parsed schema document into Vala source files.
//!
//! The pipeline is:
//! 1. `Schema` from quipu_schema → ValaCodegen → one source file per declaration
//! 2. The output writer lays the files out under the namespace directory
//!
//! ## Module Organization
//!
//! - `codegen/` - Code generation from schema documents to Vala
//!   - `mod.rs` - Main ValaCodegen struct and per-file entry points
//!   - `types.rs` - Typedef resolution and Vala type naming
//!   - `names.rs` - Identifier escaping, casing, member rename scopes
//!   - `keywords.rs` - The Vala keyword table
//!   - `consts.rs` - Constant and default value rendering
//!   - `structs.rs` - Struct, exception, and wire read/write emission
//!   - `services.rs` - Interface, client, and processor emission
//!   - `docs.rs` - Valadoc comment blocks
//!   - `options.rs` - Backend option parsing
//! - `vala_emitter.rs` - Low-level Vala code string builder
//! - `output.rs` - Output tree writing

pub mod codegen;
pub mod output;
pub mod vala_emitter;

pub use codegen::ValaCodegen;
pub use output::{generate_to_dir, OutputWriter};
