//! Schema document definitions.
//!
//! This module defines the data model for a parsed schema: one main document
//! plus the flattened set of documents it includes. The shapes mirror what
//! the frontend serializes, so everything derives `serde` traits and tolerates
//! omitted collections in the JSON.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Identifier as written by the schema author.
pub type Ident = String;

/// A complete compilation input: the document being generated and every
/// document it transitively includes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub document: Document,
    #[serde(default)]
    pub includes: Vec<Document>,
}

impl Schema {
    /// Parse a schema from its JSON form.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a schema from any reader yielding JSON.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, SchemaError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and parse a schema JSON file.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        Self::from_reader(io::BufReader::new(fs::File::open(path)?))
    }

    /// The main document followed by every include.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        std::iter::once(&self.document).chain(self.includes.iter())
    }

    /// Look a document up by name across the main document and includes.
    pub fn document_named(&self, name: &str) -> Option<&Document> {
        self.documents().find(|d| d.name == name)
    }

    /// Run the structural checks from [`crate::validate`].
    pub fn validate(&self) -> Result<(), Vec<SchemaError>> {
        crate::validate::check(self)
    }
}

/// One schema document: the unit a generator turns into output files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document name (the schema file's base name in practice).
    pub name: Ident,
    /// Target namespace for generated code. Empty means "no namespace".
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub typedefs: Vec<TypedefDef>,
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    #[serde(default)]
    pub consts: Vec<ConstDef>,
    #[serde(default)]
    pub structs: Vec<StructDef>,
    #[serde(default)]
    pub exceptions: Vec<StructDef>,
    #[serde(default)]
    pub services: Vec<ServiceDef>,
}

impl Document {
    pub fn find_typedef(&self, name: &str) -> Option<&TypedefDef> {
        self.typedefs.iter().find(|t| t.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn find_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn find_exception(&self, name: &str) -> Option<&StructDef> {
        self.exceptions.iter().find(|s| s.name == name)
    }

    pub fn find_service(&self, name: &str) -> Option<&ServiceDef> {
        self.services.iter().find(|s| s.name == name)
    }
}

/// Reference to a declaration, optionally qualified by document.
///
/// `document: None` means "the document this reference appears in".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub document: Option<Ident>,
    pub name: Ident,
}

/// A type as written in the schema, before typedef resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Void,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Double,
    Str,
    Binary,
    List(Box<TypeRef>),
    Set(Box<TypeRef>),
    Map(Box<TypeRef>, Box<TypeRef>),
    Named(NamedRef),
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Void
    }
}

/// Field requiredness, matching the three source-language forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requiredness {
    Required,
    Optional,
    /// Neither keyword was written: written on the wire like required,
    /// tracked for presence like optional.
    #[default]
    Default,
}

/// A numbered field of a struct, exception, or function argument list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    pub key: i16,
    pub name: Ident,
    pub ty: TypeRef,
    #[serde(default)]
    pub requiredness: Requiredness,
    #[serde(default)]
    pub default: Option<ConstValue>,
    #[serde(default)]
    pub doc: Option<String>,
}

/// A struct or exception declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: Ident,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Marks the declaration final; generators may seal the emitted type.
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub doc: Option<String>,
}

/// An enum declaration. Every member carries an explicit value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: Ident,
    #[serde(default)]
    pub members: Vec<EnumMember>,
    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: Ident,
    pub value: i32,
    #[serde(default)]
    pub doc: Option<String>,
}

/// A transparent type alias. Generators resolve these away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedefDef {
    pub name: Ident,
    pub target: TypeRef,
}

/// A document-level constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstDef {
    pub name: Ident,
    pub ty: TypeRef,
    pub value: ConstValue,
    #[serde(default)]
    pub doc: Option<String>,
}

/// A constant value as parsed from the schema source.
///
/// There is no boolean variant: the frontend parses `true`/`false` into
/// integers, and the target type decides how an integer renders. Map entries
/// keep declaration order so rendering is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstValue {
    Int(i64),
    Double(f64),
    Str(String),
    /// A dotted reference, e.g. an enum member (`Color.RED`) or another
    /// constant's name.
    Identifier(String),
    List(Vec<ConstValue>),
    Map(Vec<(ConstValue, ConstValue)>),
}

/// A service declaration: a named set of callable functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDef {
    pub name: Ident,
    #[serde(default)]
    pub extends: Option<NamedRef>,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub doc: Option<String>,
}

/// One service function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: Ident,
    /// One-way calls get no result struct, no reply envelope, and no
    /// response-reading client code.
    #[serde(default)]
    pub oneway: bool,
    #[serde(default)]
    pub return_type: TypeRef,
    #[serde(default)]
    pub args: Vec<Field>,
    /// Declared exceptions, modeled as fields of the synthesized result.
    #[serde(default)]
    pub throws: Vec<Field>,
    #[serde(default)]
    pub doc: Option<String>,
}
