//! Vala source generation.
//!
//! The generator walks one schema document and renders one `.vala` file per
//! declaration: enums, structs, exceptions, services, and a constants class
//! when the document declares constants. Typedefs resolve away in the type
//! mapper and produce no files of their own.
//!
//! Identifier handling lives in [`names`], type mapping in [`types`], and
//! the per-declaration emitters in their own submodules. Everything renders
//! through [`ValaEmitter`](crate::backend::vala_emitter::ValaEmitter) into
//! plain strings; filesystem concerns stay in
//! [`output`](crate::backend::output).

mod consts;
mod services;
mod structs;

pub mod docs;
pub mod errors;
pub mod keywords;
pub mod names;
pub mod options;
pub mod types;

use quipu_schema::{Document, EnumDef, Schema};

use crate::backend::vala_emitter::ValaEmitter;

use self::names::{escape_identifier, pascal_case, MemberNameScopes};
use self::options::GeneratorOptions;
use self::types::TypeResolver;

/// Generator state for one document of a schema.
///
/// The mutable parts are the property rename scopes and the counter behind
/// generated local names; both reset naturally between files because every
/// scope is closed by the emitter that opened it.
pub struct ValaCodegen<'a> {
    schema: &'a Schema,
    document: &'a Document,
    options: GeneratorOptions,
    resolver: TypeResolver<'a>,
    scopes: MemberNameScopes,
    tmp_counter: u32,
}

impl<'a> ValaCodegen<'a> {
    pub fn new(schema: &'a Schema, options: GeneratorOptions) -> Self {
        Self {
            schema,
            document: &schema.document,
            options,
            resolver: TypeResolver::new(schema, &schema.document, options),
            scopes: MemberNameScopes::new(),
            tmp_counter: 0,
        }
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Fresh name for a generated local. The counter never resets, so names
    /// stay unique across nesting levels within a file.
    fn tmp(&mut self, prefix: &str) -> String {
        self.tmp_counter += 1;
        format!("{}{}", prefix, self.tmp_counter)
    }

    /// The banner and `using` lines every generated file starts with.
    /// Collection usings only matter for the Gee flavor; GLib types are in
    /// scope without one. Enum files carry neither.
    fn file_header(&self, out: &mut ValaEmitter, collections: bool, runtime: bool) {
        out.line("/**");
        out.line(&format!(
            " * Autogenerated by the Quipu Compiler ({})",
            crate::version::QUIPU_VERSION
        ));
        out.line(" *");
        out.line(" * DO NOT EDIT UNLESS YOU ARE SURE THAT YOU KNOW WHAT YOU ARE DOING");
        out.line(" *  @generated");
        out.line(" */");
        if collections && self.options.use_libgee {
            out.line("using Gee;");
        }
        if runtime {
            out.line("using Quipu;");
        }
        out.blank_line();
    }

    /// Opens the document's namespace block if it has one. Returns whether a
    /// block was opened so the caller can close it symmetrically.
    fn open_namespace(&self, out: &mut ValaEmitter) -> bool {
        if self.document.namespace.is_empty() {
            return false;
        }
        out.open_block(&format!("namespace {}", self.document.namespace));
        true
    }

    fn close_namespace(&self, out: &mut ValaEmitter, opened: bool) {
        if opened {
            out.close_block();
        }
    }

    /// One enum declaration as a complete source file.
    pub fn enum_file(&self, def: &EnumDef) -> String {
        let mut out = ValaEmitter::new();
        self.file_header(&mut out, false, false);
        let ns = self.open_namespace(&mut out);
        if let Some(doc) = def.doc.as_deref() {
            docs::write_summary(&mut out, doc);
        }
        out.open_block(&format!("public enum {}", pascal_case(&def.name)));
        for member in &def.members {
            if let Some(doc) = member.doc.as_deref() {
                docs::write_summary(&mut out, doc);
            }
            out.line(&format!(
                "{} = {},",
                escape_identifier(&member.name),
                member.value
            ));
        }
        out.close_block();
        self.close_namespace(&mut out, ns);
        out.finish()
    }
}
