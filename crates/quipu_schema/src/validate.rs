//! Structural validation for schema documents.
//!
//! These checks catch what must hold regardless of target language: unique
//! declaration names per document, unique field keys per struct, resolvable
//! type references, and acyclic typedefs. Generators assume a validated
//! schema but re-report anything they can only see while emitting.

use std::collections::HashSet;

use tracing::debug;

use crate::ast::{Document, Field, NamedRef, Schema, TypeRef};
use crate::error::SchemaError;

/// Run every structural check, collecting all findings instead of stopping
/// at the first.
#[tracing::instrument(skip_all, fields(document_count = schema.documents().count()))]
pub fn check(schema: &Schema) -> Result<(), Vec<SchemaError>> {
    let mut checker = Checker { schema, errors: Vec::new() };
    for document in schema.documents() {
        checker.check_document(document);
    }
    if checker.errors.is_empty() { Ok(()) } else { Err(checker.errors) }
}

struct Checker<'a> {
    schema: &'a Schema,
    errors: Vec<SchemaError>,
}

impl<'a> Checker<'a> {
    fn report(&mut self, error: SchemaError) {
        debug!(%error, "structural check failed");
        self.errors.push(error);
    }

    fn check_document(&mut self, document: &'a Document) {
        self.check_unique_declarations(document);

        for typedef in &document.typedefs {
            self.check_type(document, &typedef.target);
            self.check_typedef_cycle(document, &typedef.name);
        }
        for constant in &document.consts {
            self.check_type(document, &constant.ty);
        }
        for strukt in document.structs.iter().chain(document.exceptions.iter()) {
            self.check_fields(document, &strukt.name, &strukt.fields);
        }
        for service in &document.services {
            let mut seen = HashSet::new();
            for function in &service.functions {
                if !seen.insert(function.name.as_str()) {
                    self.report(SchemaError::DuplicateFunction {
                        service: service.name.clone(),
                        name: function.name.clone(),
                    });
                }
                self.check_type(document, &function.return_type);
                let owner = format!("{}.{}", service.name, function.name);
                self.check_fields(document, &owner, &function.args);
                self.check_fields(document, &format!("{owner} throws"), &function.throws);
            }
            if let Some(parent) = &service.extends {
                self.check_extends(document, &service.name, parent);
            }
        }
    }

    fn check_unique_declarations(&mut self, document: &Document) {
        let mut seen = HashSet::new();
        let names = document
            .typedefs
            .iter()
            .map(|t| t.name.as_str())
            .chain(document.enums.iter().map(|e| e.name.as_str()))
            .chain(document.structs.iter().map(|s| s.name.as_str()))
            .chain(document.exceptions.iter().map(|s| s.name.as_str()))
            .chain(document.services.iter().map(|s| s.name.as_str()));
        for name in names {
            if !seen.insert(name) {
                self.report(SchemaError::DuplicateType {
                    document: document.name.clone(),
                    name: name.to_string(),
                });
            }
        }
    }

    fn check_fields(&mut self, document: &'a Document, owner: &str, fields: &[Field]) {
        let mut keys = HashSet::new();
        for field in fields {
            if !keys.insert(field.key) {
                self.report(SchemaError::DuplicateFieldKey {
                    owner: owner.to_string(),
                    key: field.key,
                });
            }
            self.check_type(document, &field.ty);
        }
    }

    fn check_type(&mut self, context: &'a Document, ty: &TypeRef) {
        match ty {
            TypeRef::List(elem) | TypeRef::Set(elem) => self.check_type(context, elem),
            TypeRef::Map(key, value) => {
                self.check_type(context, key);
                self.check_type(context, value);
            }
            TypeRef::Named(named) => {
                let Some(target) = self.target_document(context, named) else {
                    return;
                };
                let declared = target.find_typedef(&named.name).is_some()
                    || target.find_enum(&named.name).is_some()
                    || target.find_struct(&named.name).is_some()
                    || target.find_exception(&named.name).is_some();
                if !declared {
                    self.report(SchemaError::UnknownType {
                        document: target.name.clone(),
                        name: named.name.clone(),
                    });
                }
            }
            _ => {}
        }
    }

    fn check_extends(&mut self, context: &'a Document, _service: &str, parent: &NamedRef) {
        let Some(target) = self.target_document(context, parent) else {
            return;
        };
        if target.find_service(&parent.name).is_none() {
            self.report(SchemaError::UnknownType {
                document: target.name.clone(),
                name: parent.name.clone(),
            });
        }
    }

    /// Resolve which document a reference points into, reporting unknown
    /// document names once per occurrence.
    fn target_document(&mut self, context: &'a Document, named: &NamedRef) -> Option<&'a Document> {
        match &named.document {
            None => Some(context),
            Some(name) => {
                let found = self.schema.document_named(name);
                if found.is_none() {
                    self.report(SchemaError::UnknownDocument(name.clone()));
                }
                found
            }
        }
    }

    /// Walk a typedef chain, reporting a cycle when it returns to its start.
    fn check_typedef_cycle(&mut self, document: &'a Document, name: &str) {
        let mut current_doc = document;
        let mut current_name = name.to_string();
        let mut hops = 0usize;
        // Bounded walk: a chain longer than the total typedef count must loop.
        let limit: usize = self.schema.documents().map(|d| d.typedefs.len()).sum();
        loop {
            let Some(typedef) = current_doc.find_typedef(&current_name) else {
                return;
            };
            let TypeRef::Named(next) = &typedef.target else {
                return;
            };
            let Some(next_doc) = (match &next.document {
                None => Some(current_doc),
                Some(doc_name) => self.schema.document_named(doc_name),
            }) else {
                return;
            };
            hops += 1;
            if next_doc.name == document.name && next.name == name {
                self.report(SchemaError::TypedefCycle {
                    document: document.name.clone(),
                    name: name.to_string(),
                });
                return;
            }
            if hops > limit {
                // Looping without revisiting the start: some other typedef's
                // cycle; that typedef reports it.
                return;
            }
            current_doc = next_doc;
            current_name = next.name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{StructDef, TypedefDef};

    fn empty_document(name: &str) -> Document {
        Document {
            name: name.to_string(),
            namespace: String::new(),
            typedefs: Vec::new(),
            enums: Vec::new(),
            consts: Vec::new(),
            structs: Vec::new(),
            exceptions: Vec::new(),
            services: Vec::new(),
        }
    }

    fn schema_with(document: Document) -> Schema {
        Schema { document, includes: Vec::new() }
    }

    #[test]
    fn empty_schema_is_valid() {
        assert!(check(&schema_with(empty_document("m"))).is_ok());
    }

    #[test]
    fn duplicate_declaration_names_are_reported() {
        let mut doc = empty_document("m");
        doc.structs.push(StructDef {
            name: "Thing".into(),
            fields: Vec::new(),
            is_final: false,
            doc: None,
        });
        doc.typedefs.push(TypedefDef { name: "Thing".into(), target: TypeRef::I32 });
        let errors = check(&schema_with(doc)).unwrap_err();
        assert!(matches!(&errors[0], SchemaError::DuplicateType { name, .. } if name == "Thing"));
    }

    #[test]
    fn duplicate_field_keys_are_reported() {
        let mut doc = empty_document("m");
        doc.structs.push(StructDef {
            name: "Pair".into(),
            fields: vec![
                Field {
                    key: 1,
                    name: "a".into(),
                    ty: TypeRef::I32,
                    requiredness: Default::default(),
                    default: None,
                    doc: None,
                },
                Field {
                    key: 1,
                    name: "b".into(),
                    ty: TypeRef::I32,
                    requiredness: Default::default(),
                    default: None,
                    doc: None,
                },
            ],
            is_final: false,
            doc: None,
        });
        let errors = check(&schema_with(doc)).unwrap_err();
        assert!(matches!(&errors[0], SchemaError::DuplicateFieldKey { key: 1, .. }));
    }

    #[test]
    fn dangling_reference_is_reported() {
        let mut doc = empty_document("m");
        doc.typedefs.push(TypedefDef {
            name: "Alias".into(),
            target: TypeRef::Named(NamedRef { document: None, name: "Missing".into() }),
        });
        let errors = check(&schema_with(doc)).unwrap_err();
        assert!(matches!(&errors[0], SchemaError::UnknownType { name, .. } if name == "Missing"));
    }

    #[test]
    fn cross_document_reference_resolves_through_includes() {
        let mut doc = empty_document("m");
        doc.typedefs.push(TypedefDef {
            name: "Alias".into(),
            target: TypeRef::Named(NamedRef { document: Some("dep".into()), name: "Thing".into() }),
        });
        let mut dep = empty_document("dep");
        dep.structs.push(StructDef {
            name: "Thing".into(),
            fields: Vec::new(),
            is_final: false,
            doc: None,
        });
        let schema = Schema { document: doc, includes: vec![dep] };
        assert!(check(&schema).is_ok());
    }

    #[test]
    fn typedef_cycle_is_reported_for_each_participant() {
        let mut doc = empty_document("m");
        doc.typedefs.push(TypedefDef {
            name: "A".into(),
            target: TypeRef::Named(NamedRef { document: None, name: "B".into() }),
        });
        doc.typedefs.push(TypedefDef {
            name: "B".into(),
            target: TypeRef::Named(NamedRef { document: None, name: "A".into() }),
        });
        let errors = check(&schema_with(doc)).unwrap_err();
        let cycles = errors
            .iter()
            .filter(|e| matches!(e, SchemaError::TypedefCycle { .. }))
            .count();
        assert_eq!(cycles, 2);
    }
}
