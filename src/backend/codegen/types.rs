//! Schema type to Vala type mapping.
//!
//! Typedefs are resolved here, once, so the emitters only ever see the
//! shapes below. Type names are Pascal-cased; no keyword escaping is needed
//! for them because every Vala keyword is lowercase. Collection types come
//! in two flavors selected by the `libgee` option: Gee (`HashMap`,
//! `HashSet`, `ArrayList`) or GLib (`HashTable`, `GenericSet`, `Array` and
//! `GenericArray`).

use quipu_schema::{Document, EnumDef, NamedRef, Schema, StructDef, TypeRef};

use super::errors::{GenError, GenResult};
use super::names::pascal_case;
use super::options::GeneratorOptions;

/// A schema type with every typedef already chased to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Void,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Double,
    Str,
    Binary,
    List(Box<ResolvedType>),
    Set(Box<ResolvedType>),
    Map(Box<ResolvedType>, Box<ResolvedType>),
    Enum { document: String, name: String },
    Struct { document: String, name: String, is_exception: bool },
}

impl ResolvedType {
    pub fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Map(_, _))
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct { .. })
    }

    /// Types whose Vala representation is a reference and can be compared
    /// against `null`.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Self::Str
                | Self::Binary
                | Self::List(_)
                | Self::Set(_)
                | Self::Map(_, _)
                | Self::Struct { .. }
        )
    }

    /// Value-like types that fit a GLib `Array`; everything else needs a
    /// `GenericArray`.
    fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::Double
                | Self::Enum { .. }
        )
    }
}

/// Maps schema types to Vala spellings for one document of a schema.
pub struct TypeResolver<'a> {
    schema: &'a Schema,
    document: &'a Document,
    options: GeneratorOptions,
}

impl<'a> TypeResolver<'a> {
    pub fn new(schema: &'a Schema, document: &'a Document, options: GeneratorOptions) -> Self {
        Self {
            schema,
            document,
            options,
        }
    }

    /// Resolves a schema type, chasing typedefs across documents. Reports
    /// dangling references and typedef cycles.
    pub fn resolve(&self, ty: &TypeRef) -> GenResult<ResolvedType> {
        self.resolve_in(self.document, ty, &mut Vec::new())
    }

    fn resolve_in(
        &self,
        context: &'a Document,
        ty: &TypeRef,
        trail: &mut Vec<(String, String)>,
    ) -> GenResult<ResolvedType> {
        Ok(match ty {
            TypeRef::Void => ResolvedType::Void,
            TypeRef::Bool => ResolvedType::Bool,
            TypeRef::I8 => ResolvedType::I8,
            TypeRef::I16 => ResolvedType::I16,
            TypeRef::I32 => ResolvedType::I32,
            TypeRef::I64 => ResolvedType::I64,
            TypeRef::Double => ResolvedType::Double,
            TypeRef::Str => ResolvedType::Str,
            TypeRef::Binary => ResolvedType::Binary,
            TypeRef::List(elem) => {
                ResolvedType::List(Box::new(self.resolve_in(context, elem, trail)?))
            }
            TypeRef::Set(elem) => {
                ResolvedType::Set(Box::new(self.resolve_in(context, elem, trail)?))
            }
            TypeRef::Map(key, value) => ResolvedType::Map(
                Box::new(self.resolve_in(context, key, trail)?),
                Box::new(self.resolve_in(context, value, trail)?),
            ),
            TypeRef::Named(named) => return self.resolve_named(context, named, trail),
        })
    }

    fn resolve_named(
        &self,
        context: &'a Document,
        named: &NamedRef,
        trail: &mut Vec<(String, String)>,
    ) -> GenResult<ResolvedType> {
        let target = match &named.document {
            Some(doc_name) => self
                .schema
                .document_named(doc_name)
                .ok_or_else(|| GenError::UnknownDocument(doc_name.clone()))?,
            None => context,
        };

        if let Some(typedef) = target.find_typedef(&named.name) {
            let key = (target.name.clone(), named.name.clone());
            if trail.contains(&key) {
                return Err(GenError::TypedefCycle {
                    document: target.name.clone(),
                    name: named.name.clone(),
                });
            }
            trail.push(key);
            return self.resolve_in(target, &typedef.target, trail);
        }
        if target.find_enum(&named.name).is_some() {
            return Ok(ResolvedType::Enum {
                document: target.name.clone(),
                name: named.name.clone(),
            });
        }
        if target.find_struct(&named.name).is_some() {
            return Ok(ResolvedType::Struct {
                document: target.name.clone(),
                name: named.name.clone(),
                is_exception: false,
            });
        }
        if target.find_exception(&named.name).is_some() {
            return Ok(ResolvedType::Struct {
                document: target.name.clone(),
                name: named.name.clone(),
                is_exception: true,
            });
        }
        Err(GenError::UnknownType {
            document: target.name.clone(),
            name: named.name.clone(),
        })
    }

    /// Convenience for `resolve` followed by [`Self::type_name`].
    pub fn type_name_of(&self, ty: &TypeRef) -> GenResult<String> {
        Ok(self.type_name(&self.resolve(ty)?))
    }

    /// The Vala spelling of a resolved type.
    pub fn type_name(&self, ty: &ResolvedType) -> String {
        match ty {
            ResolvedType::Void => "void".to_string(),
            ResolvedType::Bool => "bool".to_string(),
            ResolvedType::I8 => "int8".to_string(),
            ResolvedType::I16 => "int16".to_string(),
            ResolvedType::I32 => "int32".to_string(),
            ResolvedType::I64 => "int64".to_string(),
            ResolvedType::Double => "double".to_string(),
            ResolvedType::Str => "string".to_string(),
            ResolvedType::Binary => "uint8[]".to_string(),
            ResolvedType::List(elem) => {
                let elem_name = self.type_name(elem);
                if self.options.use_libgee {
                    format!("ArrayList<{elem_name}>")
                } else if elem.is_numeric() {
                    format!("Array<{elem_name}>")
                } else {
                    format!("GenericArray<{elem_name}>")
                }
            }
            ResolvedType::Set(elem) => {
                let elem_name = self.type_name(elem);
                if self.options.use_libgee {
                    format!("HashSet<{elem_name}>")
                } else {
                    format!("GenericSet<{elem_name}>")
                }
            }
            ResolvedType::Map(key, value) => {
                let key_name = self.type_name(key);
                let value_name = self.type_name(value);
                if self.options.use_libgee {
                    format!("HashMap<{key_name}, {value_name}>")
                } else {
                    format!("HashTable<{key_name}, {value_name}>")
                }
            }
            ResolvedType::Enum { document, name }
            | ResolvedType::Struct { document, name, .. } => {
                self.qualified_type_name(document, name)
            }
        }
    }

    /// Pascal-cases a declared type name and prefixes the owning document's
    /// namespace when the type lives in a different document.
    fn qualified_type_name(&self, document: &str, name: &str) -> String {
        let class_name = pascal_case(name);
        if document != self.document.name {
            if let Some(doc) = self.schema.document_named(document) {
                if !doc.namespace.is_empty() {
                    return format!("{}.{class_name}", doc.namespace);
                }
            }
        }
        class_name
    }

    /// The protocol type tag a value of this type travels under.
    pub fn wire_tag(&self, ty: &ResolvedType) -> GenResult<&'static str> {
        Ok(match ty {
            ResolvedType::Void => return Err(GenError::VoidWireType),
            ResolvedType::Bool => "Quipu.Type.BOOL",
            ResolvedType::I8 => "Quipu.Type.BYTE",
            ResolvedType::I16 => "Quipu.Type.I16",
            ResolvedType::I32 => "Quipu.Type.I32",
            ResolvedType::I64 => "Quipu.Type.I64",
            ResolvedType::Double => "Quipu.Type.DOUBLE",
            ResolvedType::Str | ResolvedType::Binary => "Quipu.Type.STRING",
            ResolvedType::Enum { .. } => "Quipu.Type.I32",
            ResolvedType::Struct { .. } => "Quipu.Type.STRUCT",
            ResolvedType::Map(_, _) => "Quipu.Type.MAP",
            ResolvedType::Set(_) => "Quipu.Type.SET",
            ResolvedType::List(_) => "Quipu.Type.LIST",
        })
    }

    /// GLib hash and equality functions for a key type. Only meaningful for
    /// the GLib collection flavor; Gee collections hash through the type
    /// system on their own.
    pub fn hash_functions(&self, key: &ResolvedType) -> (&'static str, &'static str) {
        match key {
            ResolvedType::Str | ResolvedType::Binary => ("str_hash", "str_equal"),
            ResolvedType::I32 => ("int_hash", "int_equal"),
            ResolvedType::I64 => ("int64_hash", "int64_equal"),
            ResolvedType::Double => ("double_hash", "double_equal"),
            _ => ("direct_hash", "direct_equal"),
        }
    }

    /// A `new ...` expression building an empty instance of a container
    /// type. GLib maps and sets take their key hash and equality functions;
    /// everything else constructs bare.
    ///
    /// # Panics
    ///
    /// Panics when called with a non-container type.
    pub fn container_init(&self, ty: &ResolvedType) -> String {
        let type_name = self.type_name(ty);
        match ty {
            ResolvedType::Map(key, _) | ResolvedType::Set(key) if !self.options.use_libgee => {
                let (hash, equal) = self.hash_functions(key);
                format!("new {type_name}({hash}, {equal})")
            }
            ResolvedType::List(_) | ResolvedType::Set(_) | ResolvedType::Map(_, _) => {
                format!("new {type_name}()")
            }
            other => panic!("INVARIANT: container_init on non-container type {other:?}"),
        }
    }

    /// Element count of a container value.
    pub fn count_expr(&self, prefix: &str) -> String {
        if self.options.use_libgee {
            format!("{prefix}.size")
        } else {
            format!("{prefix}.length")
        }
    }

    /// Statement appending `elem` to a list or set value.
    pub fn collection_add(&self, container: &ResolvedType, target: &str, elem: &str) -> String {
        match container {
            ResolvedType::List(elem_ty) if !self.options.use_libgee && elem_ty.is_numeric() => {
                format!("{target}.append_val({elem});")
            }
            ResolvedType::List(_) | ResolvedType::Set(_) => format!("{target}.add({elem});"),
            other => panic!("INVARIANT: collection_add on non-collection type {other:?}"),
        }
    }

    /// Expression iterating the keys of a map value.
    pub fn map_keys_expr(&self, prefix: &str) -> String {
        if self.options.use_libgee {
            format!("{prefix}.keys")
        } else {
            format!("{prefix}.get_keys()")
        }
    }

    /// The enum declaration behind a resolved enum type.
    pub fn enum_def(&self, ty: &ResolvedType) -> Option<&'a EnumDef> {
        match ty {
            ResolvedType::Enum { document, name } => self
                .schema
                .document_named(document)
                .and_then(|doc| doc.find_enum(name)),
            _ => None,
        }
    }

    /// The struct or exception declaration behind a resolved struct type.
    pub fn struct_def(&self, ty: &ResolvedType) -> Option<&'a StructDef> {
        match ty {
            ResolvedType::Struct {
                document,
                name,
                is_exception,
            } => self.schema.document_named(document).and_then(|doc| {
                if *is_exception {
                    doc.find_exception(name)
                } else {
                    doc.find_struct(name)
                }
            }),
            _ => None,
        }
    }
}
