//! Struct and exception emission.
//!
//! Every schema struct becomes a Vala class deriving from the runtime
//! `Struct` base (`ApplicationException` for exceptions) with one property
//! per field, an `__isset` presence record for the fields that track
//! presence, and `read`/`write` methods speaking the field protocol.
//!
//! Required fields are plain auto-properties and are enforced on read.
//! Optional and default fields go through a backing member so their setter
//! can flip the presence bit. Service result structs share this emitter;
//! only their writer differs, emitting at most one field.

use quipu_schema::{Field, Requiredness, StructDef};

use crate::backend::vala_emitter::ValaEmitter;

use super::docs;
use super::errors::GenResult;
use super::names::{escape_identifier, pascal_case};
use super::types::ResolvedType;
use super::ValaCodegen;

fn read_method(ty: &ResolvedType) -> &'static str {
    match ty {
        ResolvedType::Bool => "read_bool",
        ResolvedType::I8 => "read_byte",
        ResolvedType::I16 => "read_i16",
        ResolvedType::I32 => "read_i32",
        ResolvedType::I64 => "read_i64",
        ResolvedType::Double => "read_double",
        ResolvedType::Str => "read_string",
        ResolvedType::Binary => "read_binary",
        other => panic!("INVARIANT: no scalar read method for {other:?}"),
    }
}

fn write_method(ty: &ResolvedType) -> &'static str {
    match ty {
        ResolvedType::Bool => "write_bool",
        ResolvedType::I8 => "write_byte",
        ResolvedType::I16 => "write_i16",
        ResolvedType::I32 => "write_i32",
        ResolvedType::I64 => "write_i64",
        ResolvedType::Double => "write_double",
        ResolvedType::Str => "write_string",
        ResolvedType::Binary => "write_binary",
        other => panic!("INVARIANT: no scalar write method for {other:?}"),
    }
}

impl ValaCodegen<'_> {
    /// One struct or exception declaration as a complete source file.
    pub fn struct_file(&mut self, def: &StructDef, is_exception: bool) -> GenResult<String> {
        let mut out = ValaEmitter::new();
        self.file_header(&mut out, true, true);
        let ns = self.open_namespace(&mut out);
        self.struct_definition(&mut out, def, is_exception, false)?;
        self.close_namespace(&mut out, ns);
        Ok(out.finish())
    }

    /// The class body for a struct-like declaration. Also used for the
    /// argument and result helper classes nested in service wrappers, which
    /// is why `def` may be synthesized rather than schema-owned.
    pub(super) fn struct_definition(
        &mut self,
        out: &mut ValaEmitter,
        def: &StructDef,
        is_exception: bool,
        is_result: bool,
    ) -> GenResult<()> {
        let class_name = pascal_case(&def.name);
        if let Some(doc) = def.doc.as_deref() {
            docs::write_summary(out, doc);
        }

        let mut fields: Vec<(&Field, ResolvedType)> = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            fields.push((field, self.resolver.resolve(&field.ty)?));
        }
        let member_names: Vec<&str> = def.fields.iter().map(|f| f.name.as_str()).collect();
        let scope = self.scopes.prepare(
            &class_name,
            &member_names,
            self.options.pascal_case_properties,
        );

        let base = if is_exception { "ApplicationException" } else { "Struct" };
        let sealed = if def.is_final { "sealed " } else { "" };
        out.open_block(&format!("public {sealed}class {class_name} : {base}"));

        let has_isset = fields
            .iter()
            .any(|(f, _)| f.requiredness != Requiredness::Required);

        if has_isset {
            for (field, ty) in &fields {
                if field.requiredness == Requiredness::Required {
                    continue;
                }
                out.line(&format!(
                    "private {} _{};",
                    self.resolver.type_name(ty),
                    field.name
                ));
            }
            out.blank_line();
        }

        for (field, ty) in &fields {
            let enum_class = self
                .resolver
                .enum_def(ty)
                .map(|_| self.resolver.type_name(ty));
            docs::write_field_doc(out, field.doc.as_deref(), enum_class.as_deref());
            let property = self.scopes.mapped_name(&field.name);
            let type_name = self.resolver.type_name(ty);
            if field.requiredness == Requiredness::Required {
                out.line(&format!("public {type_name} {property} {{ get; set; }}"));
            } else {
                out.open_block(&format!("public {type_name} {property}"));
                out.open_block("get");
                out.line(&format!("return _{};", field.name));
                out.close_block();
                out.open_block("set");
                out.line(&format!("__isset.{} = true;", escape_identifier(&field.name)));
                out.line(&format!("this._{} = value;", field.name));
                out.close_block();
                out.close_block();
            }
            out.blank_line();
        }

        if has_isset {
            out.line("public Isset __isset;");
            out.blank_line();
            out.open_block("public struct Isset");
            for (field, _) in &fields {
                if field.requiredness == Requiredness::Required {
                    continue;
                }
                out.line(&format!("public bool {};", escape_identifier(&field.name)));
            }
            out.close_block();
            out.blank_line();
        }

        out.open_block(&format!("public {class_name}()"));
        for (field, ty) in &fields {
            let Some(default) = field.default.as_ref() else {
                continue;
            };
            if field.requiredness == Requiredness::Required {
                let property = self.scopes.mapped_name(&field.name);
                self.const_declaration(
                    out,
                    &format!("this.{property}"),
                    ty,
                    default,
                    true,
                    true,
                    false,
                )?;
            } else {
                self.const_declaration(
                    out,
                    &format!("this._{}", field.name),
                    ty,
                    default,
                    true,
                    true,
                    false,
                )?;
                out.line(&format!(
                    "this.__isset.{} = true;",
                    escape_identifier(&field.name)
                ));
            }
        }
        out.close_block();
        out.blank_line();

        let has_required = fields
            .iter()
            .any(|(f, _)| f.requiredness == Requiredness::Required);
        if has_required {
            let params: Vec<String> = fields
                .iter()
                .filter(|(f, _)| f.requiredness == Requiredness::Required)
                .map(|(f, ty)| {
                    format!("{} {}", self.resolver.type_name(ty), escape_identifier(&f.name))
                })
                .collect();
            out.open_block(&format!(
                "public {class_name}.with_required({})",
                params.join(", ")
            ));
            out.line("this();");
            for (field, _) in &fields {
                if field.requiredness != Requiredness::Required {
                    continue;
                }
                let property = self.scopes.mapped_name(&field.name);
                out.line(&format!(
                    "this.{property} = {};",
                    escape_identifier(&field.name)
                ));
            }
            out.close_block();
            out.blank_line();
        }

        self.struct_reader(out, &class_name, &fields)?;
        out.blank_line();
        if is_result {
            self.result_writer(out, def, &fields)?;
        } else {
            self.struct_writer(out, def, &fields)?;
        }

        out.close_block();
        self.scopes.cleanup(scope);
        Ok(())
    }

    /// The `read` method: a field loop with a `switch` on field ids, a
    /// type-tag check per recognized field, and a skip for everything else.
    /// Required fields are tracked and enforced after the stop field.
    fn struct_reader(
        &mut self,
        out: &mut ValaEmitter,
        class_name: &str,
        fields: &[(&Field, ResolvedType)],
    ) -> GenResult<()> {
        out.open_block("public override int32 read(Protocol protocol) throws Error");
        for (field, _) in fields {
            if field.requiredness == Requiredness::Required {
                out.line(&format!("bool isset_{} = false;", field.name));
            }
        }
        out.line("string struct_name;");
        out.line("protocol.read_struct_begin(out struct_name);");
        out.open_block("while (true)");
        out.line("string field_name;");
        out.line("Quipu.Type field_type;");
        out.line("int16 field_id;");
        out.line("protocol.read_field_begin(out field_name, out field_type, out field_id);");
        out.open_block("if (field_type == Quipu.Type.STOP)");
        out.line("break;");
        out.close_block();
        out.blank_line();

        out.open_block("switch (field_id)");
        for (field, ty) in fields {
            out.line(&format!("case {}:", field.key));
            out.indent();
            let tag = self.resolver.wire_tag(ty)?;
            out.open_block(&format!("if (field_type == {tag})"));
            let property = self.scopes.mapped_name(&field.name);
            self.deserialize_into(out, &format!("this.{property}"), ty, false)?;
            if field.requiredness == Requiredness::Required {
                out.line(&format!("isset_{} = true;", field.name));
            }
            out.close_block();
            out.open_block("else");
            out.line("protocol.skip(field_type);");
            out.close_block();
            out.line("break;");
            out.dedent();
        }
        out.line("default:");
        out.indent();
        out.line("protocol.skip(field_type);");
        out.line("break;");
        out.dedent();
        out.close_block();
        out.blank_line();

        out.line("protocol.read_field_end();");
        out.close_block();
        out.blank_line();
        out.line("protocol.read_struct_end();");
        for (field, _) in fields {
            if field.requiredness != Requiredness::Required {
                continue;
            }
            out.open_block(&format!("if (!isset_{})", field.name));
            out.line(&format!(
                "throw new ProtocolError.INVALID_DATA(\"required field {} not set in {}\");",
                field.name, class_name
            ));
            out.close_block();
        }
        out.blank_line();
        out.line("return 1;");
        out.close_block();
        Ok(())
    }

    /// The `write` method. Fields go out sorted by key. Required fields
    /// write unconditionally; the rest are gated on presence, plus a null
    /// check for reference types.
    fn struct_writer(
        &mut self,
        out: &mut ValaEmitter,
        def: &StructDef,
        fields: &[(&Field, ResolvedType)],
    ) -> GenResult<()> {
        out.open_block("public override int32 write(Protocol protocol) throws Error");
        out.line(&format!("protocol.write_struct_begin(\"{}\");", def.name));
        let mut order: Vec<usize> = (0..fields.len()).collect();
        order.sort_by_key(|&i| fields[i].0.key);
        for &i in &order {
            let (field, ty) = &fields[i];
            let property = self.scopes.mapped_name(&field.name);
            let tag = self.resolver.wire_tag(ty)?;
            let begin = format!(
                "protocol.write_field_begin(\"{}\", {}, {});",
                field.name, tag, field.key
            );
            if field.requiredness == Requiredness::Required {
                out.line(&begin);
                self.serialize_value(out, &property, ty)?;
                out.line("protocol.write_field_end();");
            } else {
                let isset = format!("__isset.{}", escape_identifier(&field.name));
                let guard = if ty.is_nullable() {
                    format!("if ({property} != null && {isset})")
                } else {
                    format!("if ({isset})")
                };
                out.open_block(&guard);
                out.line(&begin);
                self.serialize_value(out, &property, ty)?;
                out.line("protocol.write_field_end();");
                out.close_block();
            }
        }
        out.line("protocol.write_field_stop();");
        out.line("protocol.write_struct_end();");
        out.line("return 1;");
        out.close_block();
        Ok(())
    }

    /// The `write` method for service result structs: an `if`/`else if`
    /// chain over the presence bits in declaration order, so at most one
    /// field reaches the wire.
    fn result_writer(
        &mut self,
        out: &mut ValaEmitter,
        def: &StructDef,
        fields: &[(&Field, ResolvedType)],
    ) -> GenResult<()> {
        out.open_block("public override int32 write(Protocol protocol) throws Error");
        out.line(&format!("protocol.write_struct_begin(\"{}\");", def.name));
        for (index, (field, ty)) in fields.iter().enumerate() {
            let property = self.scopes.mapped_name(&field.name);
            let isset = format!("this.__isset.{}", escape_identifier(&field.name));
            let keyword = if index == 0 { "if" } else { "else if" };
            out.open_block(&format!("{keyword} ({isset})"));
            let tag = self.resolver.wire_tag(ty)?;
            let begin = format!(
                "protocol.write_field_begin(\"{}\", {}, {});",
                field.name, tag, field.key
            );
            if ty.is_nullable() {
                out.open_block(&format!("if ({property} != null)"));
                out.line(&begin);
                self.serialize_value(out, &property, ty)?;
                out.line("protocol.write_field_end();");
                out.close_block();
            } else {
                out.line(&begin);
                self.serialize_value(out, &property, ty)?;
                out.line("protocol.write_field_end();");
            }
            out.close_block();
        }
        out.line("protocol.write_field_stop();");
        out.line("protocol.write_struct_end();");
        out.line("return 1;");
        out.close_block();
        Ok(())
    }

    /// Statements writing `expr` to the protocol as a value of `ty`.
    pub(super) fn serialize_value(
        &mut self,
        out: &mut ValaEmitter,
        expr: &str,
        ty: &ResolvedType,
    ) -> GenResult<()> {
        match ty {
            ResolvedType::Void => Err(super::errors::GenError::VoidWireType),
            ResolvedType::Struct { .. } => {
                out.line(&format!("{expr}.write(protocol);"));
                Ok(())
            }
            ResolvedType::Enum { .. } => {
                out.line(&format!("protocol.write_i32((int32) {expr});"));
                Ok(())
            }
            ResolvedType::Map(key_ty, value_ty) => {
                out.line("{");
                out.indent();
                let key_tag = self.resolver.wire_tag(key_ty)?;
                let value_tag = self.resolver.wire_tag(value_ty)?;
                let count = self.resolver.count_expr(expr);
                out.line(&format!(
                    "protocol.write_map_begin({key_tag}, {value_tag}, {count});"
                ));
                let iter = self.tmp("_iter");
                let key_type = self.resolver.type_name(key_ty);
                out.open_block(&format!(
                    "foreach ({key_type} {iter} in {})",
                    self.resolver.map_keys_expr(expr)
                ));
                self.serialize_value(out, &iter, key_ty)?;
                self.serialize_value(out, &format!("{expr}[{iter}]"), value_ty)?;
                out.close_block();
                out.line("protocol.write_map_end();");
                out.close_block();
                Ok(())
            }
            ResolvedType::Set(elem_ty) => {
                out.line("{");
                out.indent();
                let elem_tag = self.resolver.wire_tag(elem_ty)?;
                let count = self.resolver.count_expr(expr);
                out.line(&format!("protocol.write_set_begin({elem_tag}, {count});"));
                let iter = self.tmp("_iter");
                let elem_type = self.resolver.type_name(elem_ty);
                out.open_block(&format!("foreach ({elem_type} {iter} in {expr})"));
                self.serialize_value(out, &iter, elem_ty)?;
                out.close_block();
                out.line("protocol.write_set_end();");
                out.close_block();
                Ok(())
            }
            ResolvedType::List(elem_ty) => {
                out.line("{");
                out.indent();
                let elem_tag = self.resolver.wire_tag(elem_ty)?;
                let count = self.resolver.count_expr(expr);
                out.line(&format!("protocol.write_list_begin({elem_tag}, {count});"));
                let iter = self.tmp("_iter");
                let elem_type = self.resolver.type_name(elem_ty);
                out.open_block(&format!("foreach ({elem_type} {iter} in {expr})"));
                self.serialize_value(out, &iter, elem_ty)?;
                out.close_block();
                out.line("protocol.write_list_end();");
                out.close_block();
                Ok(())
            }
            scalar => {
                out.line(&format!("protocol.{}({expr});", write_method(scalar)));
                Ok(())
            }
        }
    }

    /// Statements reading a value of `ty` from the protocol into `target`.
    ///
    /// Scalar reads use `out` parameters, which Vala forbids on properties,
    /// so `direct` says whether `target` is a plain local. Property targets
    /// read into a temporary and assign.
    pub(super) fn deserialize_into(
        &mut self,
        out: &mut ValaEmitter,
        target: &str,
        ty: &ResolvedType,
        direct: bool,
    ) -> GenResult<()> {
        match ty {
            ResolvedType::Void => Err(super::errors::GenError::VoidWireType),
            ResolvedType::Struct { .. } => {
                out.line(&format!("{target} = new {}();", self.resolver.type_name(ty)));
                out.line(&format!("{target}.read(protocol);"));
                Ok(())
            }
            ResolvedType::Enum { .. } => {
                let tmp = self.tmp("_tmp");
                out.line(&format!("int32 {tmp};"));
                out.line(&format!("protocol.read_i32(out {tmp});"));
                out.line(&format!(
                    "{target} = ({}) {tmp};",
                    self.resolver.type_name(ty)
                ));
                Ok(())
            }
            ResolvedType::Map(key_ty, value_ty) => {
                out.line("{");
                out.indent();
                let key_tag_var = self.tmp("_ktype");
                let value_tag_var = self.tmp("_vtype");
                let size = self.tmp("_size");
                out.line(&format!("Quipu.Type {key_tag_var};"));
                out.line(&format!("Quipu.Type {value_tag_var};"));
                out.line(&format!("int {size};"));
                out.line(&format!(
                    "protocol.read_map_begin(out {key_tag_var}, out {value_tag_var}, out {size});"
                ));
                out.line(&format!("{target} = {};", self.resolver.container_init(ty)));
                let i = self.tmp("_i");
                out.open_block(&format!("for (int {i} = 0; {i} < {size}; ++{i})"));
                let key_var = self.tmp("_key");
                let value_var = self.tmp("_val");
                out.line(&format!("{} {key_var};", self.resolver.type_name(key_ty)));
                out.line(&format!("{} {value_var};", self.resolver.type_name(value_ty)));
                self.deserialize_into(out, &key_var, key_ty, true)?;
                self.deserialize_into(out, &value_var, value_ty, true)?;
                out.line(&format!("{target}[{key_var}] = {value_var};"));
                out.close_block();
                out.line("protocol.read_map_end();");
                out.close_block();
                Ok(())
            }
            ResolvedType::List(elem_ty) | ResolvedType::Set(elem_ty) => {
                let is_list = matches!(ty, ResolvedType::List(_));
                out.line("{");
                out.indent();
                let elem_tag_var = self.tmp("_etype");
                let size = self.tmp("_size");
                out.line(&format!("Quipu.Type {elem_tag_var};"));
                out.line(&format!("int {size};"));
                let begin = if is_list { "read_list_begin" } else { "read_set_begin" };
                out.line(&format!(
                    "protocol.{begin}(out {elem_tag_var}, out {size});"
                ));
                out.line(&format!("{target} = {};", self.resolver.container_init(ty)));
                let i = self.tmp("_i");
                out.open_block(&format!("for (int {i} = 0; {i} < {size}; ++{i})"));
                let elem_var = self.tmp("_elem");
                out.line(&format!("{} {elem_var};", self.resolver.type_name(elem_ty)));
                self.deserialize_into(out, &elem_var, elem_ty, true)?;
                out.line(&self.resolver.collection_add(ty, target, &elem_var));
                out.close_block();
                let end = if is_list { "read_list_end" } else { "read_set_end" };
                out.line(&format!("protocol.{end}();"));
                out.close_block();
                Ok(())
            }
            scalar => {
                let method = read_method(scalar);
                if direct {
                    out.line(&format!("protocol.{method}(out {target});"));
                } else {
                    let tmp = self.tmp("_tmp");
                    out.line(&format!("{} {tmp};", self.resolver.type_name(scalar)));
                    out.line(&format!("protocol.{method}(out {tmp});"));
                    out.line(&format!("{target} = {tmp};"));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quipu_schema::Schema;

    use super::super::options::GeneratorOptions;
    use super::super::ValaCodegen;

    fn struct_text(json: &str, options: GeneratorOptions) -> String {
        let schema = Schema::from_json(json).unwrap();
        let mut codegen = ValaCodegen::new(&schema, options);
        codegen
            .struct_file(&schema.document.structs[0], false)
            .unwrap()
    }

    const PERSON: &str = r#"{
        "document": {
            "name": "demo",
            "namespace": "Demo",
            "structs": [{
                "name": "person",
                "fields": [
                    {"key": 1, "name": "name", "ty": "str", "requiredness": "required"},
                    {"key": 2, "name": "age", "ty": "i32",
                     "default": {"int": 30}},
                    {"key": 3, "name": "email", "ty": "str", "requiredness": "optional"}
                ]
            }]
        }
    }"#;

    #[test]
    fn properties_split_on_requiredness() {
        let text = struct_text(PERSON, GeneratorOptions::default());
        assert!(text.contains("public class Person : Struct\n"));
        assert!(text.contains("public string Name { get; set; }\n"));
        assert!(text.contains("private int32 _age;\n"));
        assert!(text.contains("private string _email;\n"));
        assert!(text.contains("public int32 Age\n"));
        assert!(text.contains("return _age;\n"));
        assert!(text.contains("__isset.age = true;\n"));
        assert!(text.contains("this._age = value;\n"));
    }

    #[test]
    fn isset_record_covers_non_required_fields_only() {
        let text = struct_text(PERSON, GeneratorOptions::default());
        assert!(text.contains("public Isset __isset;\n"));
        assert!(text.contains("public struct Isset\n"));
        assert!(text.contains("public bool age;\n"));
        assert!(text.contains("public bool email;\n"));
        assert!(!text.contains("public bool name;\n"));
    }

    #[test]
    fn constructors_chain_and_apply_defaults() {
        let text = struct_text(PERSON, GeneratorOptions::default());
        assert!(text.contains("public Person()\n"));
        assert!(text.contains("this._age = 30;\n"));
        assert!(text.contains("this.__isset.age = true;\n"));
        assert!(text.contains("public Person.with_required(string name)\n"));
        assert!(text.contains("this();\n"));
        assert!(text.contains("this.Name = name;\n"));
    }

    #[test]
    fn reader_enforces_required_fields() {
        let text = struct_text(PERSON, GeneratorOptions::default());
        assert!(text.contains("public override int32 read(Protocol protocol) throws Error\n"));
        assert!(text.contains("bool isset_name = false;\n"));
        assert!(text.contains("protocol.read_struct_begin(out struct_name);\n"));
        assert!(text.contains("case 1:\n"));
        assert!(text.contains("if (field_type == Quipu.Type.STRING)\n"));
        assert!(text.contains("isset_name = true;\n"));
        assert!(text.contains("if (!isset_name)\n"));
        assert!(text.contains(
            "throw new ProtocolError.INVALID_DATA(\"required field name not set in Person\");\n"
        ));
        assert!(text.contains("protocol.skip(field_type);\n"));
        assert!(text.contains("return 1;\n"));
    }

    #[test]
    fn property_reads_go_through_a_temporary() {
        let text = struct_text(PERSON, GeneratorOptions::default());
        assert!(text.contains("string _tmp1;\n"));
        assert!(text.contains("protocol.read_string(out _tmp1);\n"));
        assert!(text.contains("this.Name = _tmp1;\n"));
    }

    #[test]
    fn writer_gates_on_presence_and_null() {
        let text = struct_text(PERSON, GeneratorOptions::default());
        assert!(text.contains("protocol.write_struct_begin(\"person\");\n"));
        assert!(text.contains("protocol.write_field_begin(\"name\", Quipu.Type.STRING, 1);\n"));
        assert!(text.contains("if (__isset.age)\n"));
        assert!(text.contains("if (Email != null && __isset.email)\n"));
        assert!(text.contains("protocol.write_field_stop();\n"));
        assert!(text.contains("protocol.write_struct_end();\n"));
    }

    #[test]
    fn writer_orders_fields_by_key() {
        let text = struct_text(
            r#"{
                "document": {
                    "name": "demo",
                    "structs": [{
                        "name": "pair",
                        "fields": [
                            {"key": 5, "name": "second", "ty": "i32", "requiredness": "required"},
                            {"key": 2, "name": "first", "ty": "i32", "requiredness": "required"}
                        ]
                    }]
                }
            }"#,
            GeneratorOptions::default(),
        );
        let first = text.find("write_field_begin(\"first\", Quipu.Type.I32, 2)").unwrap();
        let second = text.find("write_field_begin(\"second\", Quipu.Type.I32, 5)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn sealed_struct_and_exception_base() {
        let schema = Schema::from_json(
            r#"{
                "document": {
                    "name": "demo",
                    "structs": [{"name": "frozen", "fields": [], "is_final": true}],
                    "exceptions": [{"name": "not_found", "fields": [
                        {"key": 1, "name": "message", "ty": "str"}
                    ]}]
                }
            }"#,
        )
        .unwrap();
        let mut codegen = ValaCodegen::new(&schema, GeneratorOptions::default());
        let frozen = codegen.struct_file(&schema.document.structs[0], false).unwrap();
        assert!(frozen.contains("public sealed class Frozen : Struct\n"));
        let not_found = codegen
            .struct_file(&schema.document.exceptions[0], true)
            .unwrap();
        assert!(not_found.contains("public class NotFound : ApplicationException\n"));
    }

    #[test]
    fn keyword_fields_are_escaped_in_isset_but_not_backing() {
        let text = struct_text(
            r#"{
                "document": {
                    "name": "demo",
                    "structs": [{"name": "odd", "fields": [
                        {"key": 1, "name": "class", "ty": "str"}
                    ]}]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("private string _class;\n"));
        assert!(text.contains("public string Class\n"));
        assert!(text.contains("__isset.@class = true;\n"));
        assert!(text.contains("public bool @class;\n"));
        assert!(text.contains("if (Class != null && __isset.@class)\n"));
    }

    #[test]
    fn enum_fields_cast_across_the_wire() {
        let text = struct_text(
            r#"{
                "document": {
                    "name": "demo",
                    "enums": [{"name": "color", "members": [{"name": "RED", "value": 0}]}],
                    "structs": [{"name": "paint", "fields": [
                        {"key": 1, "name": "shade", "ty": {"named": {"name": "color"}},
                         "requiredness": "required"}
                    ]}]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("/// <seealso cref=\"Color\"/>\n"));
        assert!(text.contains("public Color Shade { get; set; }\n"));
        assert!(text.contains("protocol.write_i32((int32) Shade);\n"));
        assert!(text.contains("int32 _tmp1;\n"));
        assert!(text.contains("protocol.read_i32(out _tmp1);\n"));
        assert!(text.contains("this.Shade = (Color) _tmp1;\n"));
    }

    #[test]
    fn container_fields_stream_elementwise() {
        let text = struct_text(
            r#"{
                "document": {
                    "name": "demo",
                    "structs": [{"name": "bag", "fields": [
                        {"key": 1, "name": "tags", "ty": {"map": ["str", "i32"]},
                         "requiredness": "required"}
                    ]}]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("protocol.read_map_begin(out _ktype1, out _vtype2, out _size3);\n"));
        assert!(text.contains("this.Tags = new HashTable<string, int32>(str_hash, str_equal);\n"));
        assert!(text.contains("for (int _i4 = 0; _i4 < _size3; ++_i4)\n"));
        assert!(text.contains("string _key5;\n"));
        assert!(text.contains("int32 _val6;\n"));
        assert!(text.contains("protocol.read_string(out _key5);\n"));
        assert!(text.contains("protocol.read_i32(out _val6);\n"));
        assert!(text.contains("this.Tags[_key5] = _val6;\n"));
        assert!(text.contains("protocol.read_map_end();\n"));
        assert!(text.contains("protocol.write_map_begin(Quipu.Type.STRING, Quipu.Type.I32, Tags.length);\n"));
        assert!(text.contains("foreach (string _iter7 in Tags.get_keys())\n"));
        assert!(text.contains("protocol.write_string(_iter7);\n"));
        assert!(text.contains("protocol.write_i32(Tags[_iter7]);\n"));
        assert!(text.contains("protocol.write_map_end();\n"));
    }

    #[test]
    fn binary_fields_use_byte_arrays() {
        let text = struct_text(
            r#"{
                "document": {
                    "name": "demo",
                    "structs": [{"name": "blob", "fields": [
                        {"key": 1, "name": "data", "ty": "binary", "requiredness": "required"}
                    ]}]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("public uint8[] Data { get; set; }\n"));
        assert!(text.contains("protocol.write_binary(Data);\n"));
        assert!(text.contains("uint8[] _tmp1;\n"));
        assert!(text.contains("protocol.read_binary(out _tmp1);\n"));
    }
}
