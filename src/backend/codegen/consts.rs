//! Constant rendering and the per-document constants class.
//!
//! Scalar constants become `public const` members initialized inline.
//! Composite constants (structs and collections) declare as `public static`
//! with an empty instance and get their contents assigned in a
//! `static construct` block, since Vala cannot express them as literals.
//! Composites nested inside other composites render through numbered
//! temporaries declared right before their insertion.

use quipu_schema::{ConstDef, ConstValue};

use crate::backend::vala_emitter::ValaEmitter;

use super::docs;
use super::errors::{GenError, GenResult};
use super::names::{escape_identifier, sanitize_identifier};
use super::types::ResolvedType;
use super::ValaCodegen;

fn value_kind(value: &ConstValue) -> &'static str {
    match value {
        ConstValue::Int(_) => "integer",
        ConstValue::Double(_) => "double",
        ConstValue::Str(_) => "string",
        ConstValue::Identifier(_) => "identifier",
        ConstValue::List(_) => "list",
        ConstValue::Map(_) => "map",
    }
}

fn mismatch(expected: impl Into<String>, found: &ConstValue) -> GenError {
    GenError::ConstTypeMismatch {
        expected: expected.into(),
        found: value_kind(found).to_string(),
    }
}

/// Quotes a string for a Vala source literal.
fn quote_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn is_base(ty: &ResolvedType) -> bool {
    matches!(
        ty,
        ResolvedType::Bool
            | ResolvedType::I8
            | ResolvedType::I16
            | ResolvedType::I32
            | ResolvedType::I64
            | ResolvedType::Double
            | ResolvedType::Str
            | ResolvedType::Binary
    )
}

impl ValaCodegen<'_> {
    /// The constants class for the document, or `None` when it declares no
    /// constants. The class is named `<document>Constants` with the document
    /// name sanitized but not capitalized; only the file name capitalizes.
    pub fn constants_file(&mut self) -> GenResult<Option<String>> {
        let document = self.document;
        if document.consts.is_empty() {
            return Ok(None);
        }

        let mut out = ValaEmitter::new();
        self.file_header(&mut out, true, false);
        let ns = self.open_namespace(&mut out);
        let class_name = format!("{}Constants", sanitize_identifier(&document.name));
        out.open_block(&format!("public class {class_name}"));

        let mut deferred: Vec<(&ConstDef, ResolvedType)> = Vec::new();
        for def in &document.consts {
            let ty = self.resolver.resolve(&def.ty)?;
            if let Some(doc) = def.doc.as_deref() {
                docs::write_summary(&mut out, doc);
            }
            let composite =
                self.const_declaration(&mut out, &def.name, &ty, &def.value, false, false, false)?;
            if composite {
                deferred.push((def, ty));
            }
        }

        if !deferred.is_empty() {
            out.blank_line();
            out.open_block("static construct");
            for (def, ty) in &deferred {
                self.const_composite_body(&mut out, &escape_identifier(&def.name), ty, &def.value)?;
            }
            out.close_block();
        }

        out.close_block();
        self.close_namespace(&mut out, ns);
        Ok(Some(out.finish()))
    }

    /// Writes one constant declaration or default assignment.
    ///
    /// With `defval` set the line is a bare assignment, used for field
    /// defaults and nested temporaries; `needtype` keeps the type on such a
    /// line, turning it into a local declaration. `in_static` drops the
    /// visibility prefix. Returns whether the constant is a composite whose
    /// contents still need a `static construct` assignment pass.
    pub(super) fn const_declaration(
        &mut self,
        out: &mut ValaEmitter,
        name: &str,
        ty: &ResolvedType,
        value: &ConstValue,
        in_static: bool,
        defval: bool,
        needtype: bool,
    ) -> GenResult<bool> {
        let name = escape_identifier(name);
        let mut decl = String::new();
        if !defval || needtype {
            if !in_static {
                decl.push_str(if is_base(ty) { "public const " } else { "public static " });
            }
            decl.push_str(&self.resolver.type_name(ty));
            decl.push(' ');
        }

        match ty {
            ResolvedType::Void => Err(GenError::VoidWireType),
            ResolvedType::Enum { .. } => {
                let member = self.enum_member_expr(ty, value)?;
                out.line(&format!("{decl}{name} = {member};"));
                Ok(false)
            }
            ResolvedType::Struct { .. } => {
                let type_name = self.resolver.type_name(ty);
                out.line(&format!("{decl}{name} = new {type_name}();"));
                if defval {
                    self.const_composite_body(out, &name, ty, value)?;
                }
                Ok(true)
            }
            ResolvedType::List(_) | ResolvedType::Set(_) | ResolvedType::Map(_, _) => {
                let init = self.resolver.container_init(ty);
                out.line(&format!("{decl}{name} = {init};"));
                if defval {
                    self.const_composite_body(out, &name, ty, value)?;
                }
                Ok(true)
            }
            _ => {
                let rendered = self.render_const_value(out, ty, value)?;
                out.line(&format!("{decl}{name} = {rendered};"));
                Ok(false)
            }
        }
    }

    /// Renders a constant as an expression. Scalars render inline; composite
    /// values declare and populate a numbered temporary first and return its
    /// name.
    pub(super) fn render_const_value(
        &mut self,
        out: &mut ValaEmitter,
        ty: &ResolvedType,
        value: &ConstValue,
    ) -> GenResult<String> {
        match ty {
            ResolvedType::Str | ResolvedType::Binary => match value {
                ConstValue::Str(text) => Ok(quote_string(text)),
                other => Err(mismatch(self.resolver.type_name(ty), other)),
            },
            ResolvedType::Bool => match value {
                ConstValue::Int(v) => Ok(if *v > 0 { "true" } else { "false" }.to_string()),
                other => Err(mismatch("bool", other)),
            },
            ResolvedType::I8 | ResolvedType::I16 | ResolvedType::I32 | ResolvedType::I64 => {
                match value {
                    ConstValue::Int(v) => Ok(v.to_string()),
                    other => Err(mismatch(self.resolver.type_name(ty), other)),
                }
            }
            ResolvedType::Double => match value {
                // Integer-form doubles keep their integer spelling.
                ConstValue::Int(v) => Ok(v.to_string()),
                ConstValue::Double(d) => Ok(d.to_string()),
                other => Err(mismatch("double", other)),
            },
            ResolvedType::Enum { .. } => self.enum_member_expr(ty, value),
            ResolvedType::Struct { .. }
            | ResolvedType::List(_)
            | ResolvedType::Set(_)
            | ResolvedType::Map(_, _) => {
                let tmp = self.tmp("tmp");
                self.const_declaration(out, &tmp, ty, value, true, true, true)?;
                Ok(tmp)
            }
            ResolvedType::Void => Err(GenError::VoidWireType),
        }
    }

    /// `EnumClass.MEMBER` for an enum-typed constant. Accepts the dotted
    /// identifier form and a bare integer matched against member values.
    fn enum_member_expr(&self, ty: &ResolvedType, value: &ConstValue) -> GenResult<String> {
        let def = self
            .resolver
            .enum_def(ty)
            .expect("INVARIANT: resolved enum type without a definition");
        let class_name = self.resolver.type_name(ty);
        match value {
            ConstValue::Identifier(path) => {
                let member = match path.rfind('.') {
                    Some(dot) => &path[dot + 1..],
                    None => path.as_str(),
                };
                if !def.members.iter().any(|m| m.name == member) {
                    return Err(GenError::UnknownEnumMember {
                        enum_name: class_name,
                        member: member.to_string(),
                    });
                }
                Ok(format!("{class_name}.{}", escape_identifier(member)))
            }
            ConstValue::Int(v) => {
                let member = def
                    .members
                    .iter()
                    .find(|m| i64::from(m.value) == *v)
                    .ok_or_else(|| GenError::UnknownEnumMember {
                        enum_name: class_name.clone(),
                        member: v.to_string(),
                    })?;
                Ok(format!("{class_name}.{}", escape_identifier(&member.name)))
            }
            other => Err(mismatch(class_name, other)),
        }
    }

    /// Writes the member assignments populating a composite constant that
    /// `target` already names.
    pub(super) fn const_composite_body(
        &mut self,
        out: &mut ValaEmitter,
        target: &str,
        ty: &ResolvedType,
        value: &ConstValue,
    ) -> GenResult<()> {
        match ty {
            ResolvedType::Struct { .. } => {
                let def = self
                    .resolver
                    .struct_def(ty)
                    .expect("INVARIANT: resolved struct type without a definition");
                let type_name = self.resolver.type_name(ty);
                let entries = match value {
                    ConstValue::Map(entries) => entries,
                    other => return Err(mismatch(type_name, other)),
                };
                let member_names: Vec<&str> =
                    def.fields.iter().map(|f| f.name.as_str()).collect();
                let scope = self.scopes.prepare(
                    &type_name,
                    &member_names,
                    self.options.pascal_case_properties,
                );
                for (key, entry_value) in entries {
                    let field_name = match key {
                        ConstValue::Str(s) | ConstValue::Identifier(s) => s.as_str(),
                        other => return Err(mismatch("field name", other)),
                    };
                    let field = def
                        .fields
                        .iter()
                        .find(|f| f.name == field_name)
                        .ok_or_else(|| GenError::NoSuchField {
                            ty: type_name.clone(),
                            field: field_name.to_string(),
                        })?;
                    let field_ty = self.resolver.resolve(&field.ty)?;
                    let rendered = self.render_const_value(out, &field_ty, entry_value)?;
                    let property = self.scopes.mapped_name(&field.name);
                    out.line(&format!("{target}.{property} = {rendered};"));
                }
                self.scopes.cleanup(scope);
                Ok(())
            }
            ResolvedType::Map(key_ty, value_ty) => {
                let entries = match value {
                    ConstValue::Map(entries) => entries,
                    other => return Err(mismatch("map", other)),
                };
                for (key, entry_value) in entries {
                    let key_expr = self.render_const_value(out, key_ty, key)?;
                    let value_expr = self.render_const_value(out, value_ty, entry_value)?;
                    out.line(&format!("{target}[{key_expr}] = {value_expr};"));
                }
                Ok(())
            }
            ResolvedType::List(elem_ty) | ResolvedType::Set(elem_ty) => {
                let items = match value {
                    ConstValue::List(items) => items,
                    other => return Err(mismatch("list", other)),
                };
                for item in items {
                    let expr = self.render_const_value(out, elem_ty, item)?;
                    out.line(&self.resolver.collection_add(ty, target, &expr));
                }
                Ok(())
            }
            other => panic!("INVARIANT: composite body for non-composite type {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use quipu_schema::Schema;

    use super::super::options::GeneratorOptions;
    use super::super::ValaCodegen;

    fn generate(json: &str, options: GeneratorOptions) -> String {
        let schema = Schema::from_json(json).unwrap();
        let mut codegen = ValaCodegen::new(&schema, options);
        codegen.constants_file().unwrap().expect("document has constants")
    }

    #[test]
    fn document_without_constants_yields_no_file() {
        let schema = Schema::from_json(r#"{"document": {"name": "demo"}}"#).unwrap();
        let mut codegen = ValaCodegen::new(&schema, GeneratorOptions::default());
        assert!(codegen.constants_file().unwrap().is_none());
    }

    #[test]
    fn scalar_constants_are_inline_const_members() {
        let text = generate(
            r#"{
                "document": {
                    "name": "demo",
                    "namespace": "Demo",
                    "consts": [
                        {"name": "MAX_RETRIES", "ty": "i32", "value": {"int": 5}},
                        {"name": "GREETING", "ty": "str", "value": {"str": "hi \"you\"\n"}},
                        {"name": "ENABLED", "ty": "bool", "value": {"int": 1}},
                        {"name": "RATIO", "ty": "double", "value": {"double": 0.5}},
                        {"name": "WHOLE", "ty": "double", "value": {"int": 3}}
                    ]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("    public class demoConstants\n"));
        assert!(text.contains("        public const int32 MAX_RETRIES = 5;\n"));
        assert!(text.contains("        public const string GREETING = \"hi \\\"you\\\"\\n\";\n"));
        assert!(text.contains("        public const bool ENABLED = true;\n"));
        assert!(text.contains("        public const double RATIO = 0.5;\n"));
        assert!(text.contains("        public const double WHOLE = 3;\n"));
        assert!(!text.contains("static construct"));
        assert!(!text.contains("using Quipu;"));
    }

    #[test]
    fn enum_constant_renders_the_member_reference() {
        let text = generate(
            r#"{
                "document": {
                    "name": "demo",
                    "enums": [{"name": "state", "members": [
                        {"name": "IDLE", "value": 0}, {"name": "ON", "value": 1}
                    ]}],
                    "consts": [
                        {"name": "BOOT", "ty": {"named": {"name": "state"}},
                         "value": {"identifier": "state.ON"}},
                        {"name": "REST", "ty": {"named": {"name": "state"}},
                         "value": {"int": 0}}
                    ]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("public static State BOOT = State.ON;\n"));
        assert!(text.contains("public static State REST = State.IDLE;\n"));
    }

    #[test]
    fn map_constant_declares_empty_and_fills_in_static_construct() {
        let text = generate(
            r#"{
                "document": {
                    "name": "demo",
                    "consts": [{
                        "name": "SIZES",
                        "ty": {"map": ["str", "i32"]},
                        "value": {"map": [
                            [{"str": "small"}, {"int": 1}],
                            [{"str": "large"}, {"int": 10}]
                        ]}
                    }]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains(
            "    public static HashTable<string, int32> SIZES = new HashTable<string, int32>(str_hash, str_equal);\n"
        ));
        assert!(text.contains(
            "\n    static construct\n    {\n        SIZES[\"small\"] = 1;\n        SIZES[\"large\"] = 10;\n    }\n"
        ));
    }

    #[test]
    fn libgee_map_constant_constructs_bare() {
        let text = generate(
            r#"{
                "document": {
                    "name": "demo",
                    "consts": [{
                        "name": "SIZES",
                        "ty": {"map": ["str", "i32"]},
                        "value": {"map": [[{"str": "small"}, {"int": 1}]]}
                    }]
                }
            }"#,
            GeneratorOptions {
                use_libgee: true,
                ..GeneratorOptions::default()
            },
        );
        assert!(text.contains("using Gee;\n"));
        assert!(text.contains("public static HashMap<string, int32> SIZES = new HashMap<string, int32>();\n"));
    }

    #[test]
    fn struct_constant_assigns_renamed_properties() {
        let text = generate(
            r#"{
                "document": {
                    "name": "demo",
                    "structs": [{"name": "point", "fields": [
                        {"key": 1, "name": "x", "ty": "i32"},
                        {"key": 2, "name": "class", "ty": "str"}
                    ]}],
                    "consts": [{
                        "name": "ORIGIN",
                        "ty": {"named": {"name": "point"}},
                        "value": {"map": [
                            [{"str": "x"}, {"int": 0}],
                            [{"str": "class"}, {"str": "origin"}]
                        ]}
                    }]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("public static Point ORIGIN = new Point();\n"));
        assert!(text.contains("        ORIGIN.X = 0;\n"));
        assert!(text.contains("        ORIGIN.Class = \"origin\";\n"));
    }

    #[test]
    fn nested_composites_render_through_temporaries() {
        let text = generate(
            r#"{
                "document": {
                    "name": "demo",
                    "consts": [{
                        "name": "GRID",
                        "ty": {"list": {"list": "i32"}},
                        "value": {"list": [{"list": [{"int": 1}, {"int": 2}]}]}
                    }]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains(
            "public static GenericArray<Array<int32>> GRID = new GenericArray<Array<int32>>();\n"
        ));
        assert!(text.contains("        Array<int32> tmp1 = new Array<int32>();\n"));
        assert!(text.contains("        tmp1.append_val(1);\n"));
        assert!(text.contains("        tmp1.append_val(2);\n"));
        assert!(text.contains("        GRID.add(tmp1);\n"));
    }

    #[test]
    fn unknown_struct_field_is_a_type_error() {
        let schema = Schema::from_json(
            r#"{
                "document": {
                    "name": "demo",
                    "structs": [{"name": "point", "fields": [{"key": 1, "name": "x", "ty": "i32"}]}],
                    "consts": [{
                        "name": "BAD",
                        "ty": {"named": {"name": "point"}},
                        "value": {"map": [[{"str": "zz"}, {"int": 0}]]}
                    }]
                }
            }"#,
        )
        .unwrap();
        let mut codegen = ValaCodegen::new(&schema, GeneratorOptions::default());
        let err = codegen.constants_file().unwrap_err();
        assert_eq!(err.to_string(), "type error: Point has no field zz");
    }

    #[test]
    fn value_shape_mismatch_is_reported() {
        let schema = Schema::from_json(
            r#"{
                "document": {
                    "name": "demo",
                    "consts": [{"name": "N", "ty": "i32", "value": {"str": "five"}}]
                }
            }"#,
        )
        .unwrap();
        let mut codegen = ValaCodegen::new(&schema, GeneratorOptions::default());
        let err = codegen.constants_file().unwrap_err();
        assert_eq!(err.to_string(), "cannot render string constant as int32");
    }
}
