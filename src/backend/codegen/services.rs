//! Service emission.
//!
//! A schema service becomes three things in one file: an interface
//! (`IName`) that user code implements or calls, a `Client` speaking the
//! call/reply message protocol over a pair of `Protocol` instances, and a
//! `Processor` dispatching incoming messages to an interface
//! implementation. Declared exceptions surface as `out` parameters, since
//! Vala error domains cannot carry struct payloads.
//!
//! Argument and result helper classes are synthesized structs that reuse
//! the struct emitter; results get the at-most-one-field writer.

use quipu_schema::{Field, Function, NamedRef, Requiredness, ServiceDef, StructDef};

use crate::backend::vala_emitter::ValaEmitter;

use super::docs;
use super::errors::{GenError, GenResult};
use super::names::{escape_identifier, pascal_case, snake_case};
use super::types::ResolvedType;
use super::ValaCodegen;

fn args_class_name(function: &Function) -> String {
    pascal_case(&format!("{}_args", function.name))
}

fn result_class_name(function: &Function) -> String {
    pascal_case(&format!("{}_result", function.name))
}

impl ValaCodegen<'_> {
    /// One service declaration as a complete source file.
    pub fn service_file(&mut self, def: &ServiceDef) -> GenResult<String> {
        let mut out = ValaEmitter::new();
        self.file_header(&mut out, true, true);
        let ns = self.open_namespace(&mut out);
        self.service_interface(&mut out, def)?;
        out.blank_line();
        self.service_wrapper(&mut out, def)?;
        self.close_namespace(&mut out, ns);
        Ok(out.finish())
    }

    /// Namespace prefix for a service living in another document.
    fn parent_prefix(&self, parent: &NamedRef) -> GenResult<String> {
        let Some(doc_name) = parent.document.as_deref() else {
            return Ok(String::new());
        };
        if doc_name == self.document.name {
            return Ok(String::new());
        }
        let doc = self
            .schema
            .document_named(doc_name)
            .ok_or_else(|| GenError::UnknownDocument(doc_name.to_string()))?;
        if doc.namespace.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("{}.", doc.namespace))
        }
    }

    fn service_interface(&mut self, out: &mut ValaEmitter, def: &ServiceDef) -> GenResult<()> {
        if let Some(doc) = def.doc.as_deref() {
            docs::write_summary(out, doc);
        }
        let parent = match def.extends.as_ref() {
            Some(parent) => format!(
                "{}I{}",
                self.parent_prefix(parent)?,
                pascal_case(&parent.name)
            ),
            None => "Object".to_string(),
        };
        out.open_block(&format!(
            "public interface I{} : {parent}",
            pascal_case(&def.name)
        ));
        for (index, function) in def.functions.iter().enumerate() {
            if index > 0 {
                out.blank_line();
            }
            docs::write_function_doc(out, function);
            let signature = self.function_signature(function, "public abstract ")?;
            out.line(&format!("{signature};"));
        }
        out.close_block();
        Ok(())
    }

    fn function_signature(&self, function: &Function, modifiers: &str) -> GenResult<String> {
        let return_type = self.resolver.resolve(&function.return_type)?;
        Ok(format!(
            "{modifiers}{} {}({}) throws Error",
            self.resolver.type_name(&return_type),
            escape_identifier(&snake_case(&function.name)),
            self.argument_list(function)?
        ))
    }

    /// Declared arguments followed by one `out` parameter per declared
    /// exception, in declaration order.
    fn argument_list(&self, function: &Function) -> GenResult<String> {
        let mut parts = Vec::new();
        for arg in &function.args {
            let ty = self.resolver.resolve(&arg.ty)?;
            parts.push(format!(
                "{} {}",
                self.resolver.type_name(&ty),
                escape_identifier(&arg.name)
            ));
        }
        for ex in &function.throws {
            let ty = self.resolver.resolve(&ex.ty)?;
            parts.push(format!(
                "out {} {}",
                self.resolver.type_name(&ty),
                escape_identifier(&ex.name)
            ));
        }
        Ok(parts.join(", "))
    }

    /// The wrapper class holding `Client`, `Processor`, and the argument
    /// and result helper classes. Named after the service as declared.
    fn service_wrapper(&mut self, out: &mut ValaEmitter, def: &ServiceDef) -> GenResult<()> {
        out.open_block(&format!("public class {} : Object", escape_identifier(&def.name)));
        self.service_client(out, def)?;
        out.blank_line();
        self.service_processor(out, def)?;
        for function in &def.functions {
            out.blank_line();
            self.helper_structs(out, function)?;
        }
        out.close_block();
        Ok(())
    }

    fn service_client(&mut self, out: &mut ValaEmitter, def: &ServiceDef) -> GenResult<()> {
        let header = match def.extends.as_ref() {
            Some(parent) => format!(
                "public class Client : {}{}.Client",
                self.parent_prefix(parent)?,
                escape_identifier(&parent.name)
            ),
            None => format!("public class Client : I{}, Object", pascal_case(&def.name)),
        };
        out.open_block(&header);
        if def.extends.is_none() {
            out.line("protected Protocol input_protocol;");
            out.line("protected Protocol output_protocol;");
            out.blank_line();
        }
        out.open_block("public Client(Protocol protocol)");
        out.line("this.with_protocols(protocol, protocol);");
        out.close_block();
        out.blank_line();
        out.open_block(
            "public Client.with_protocols(Protocol input_protocol, Protocol output_protocol)",
        );
        if def.extends.is_some() {
            out.line("base.with_protocols(input_protocol, output_protocol);");
        } else {
            out.line("this.input_protocol = input_protocol;");
            out.line("this.output_protocol = output_protocol;");
        }
        out.close_block();
        for function in &def.functions {
            out.blank_line();
            self.client_method(out, function)?;
        }
        out.close_block();
        Ok(())
    }

    /// One client method: send the argument struct under a CALL (or
    /// ONEWAY) envelope, then read back either an exception envelope or
    /// the result struct. One-way calls return right after the flush.
    fn client_method(&mut self, out: &mut ValaEmitter, function: &Function) -> GenResult<()> {
        let signature = self.function_signature(function, "public ")?;
        out.open_block(&signature);
        let message_type = if function.oneway { "ONEWAY" } else { "CALL" };
        out.line("int32 seqid = 0;");
        out.line(&format!(
            "output_protocol.write_message_begin(\"{}\", MessageType.{message_type}, seqid);",
            function.name
        ));
        out.blank_line();

        let args_class = args_class_name(function);
        out.line(&format!("var args = new {args_class}();"));
        let arg_names: Vec<&str> = function.args.iter().map(|a| a.name.as_str()).collect();
        let scope = self.scopes.prepare(
            &args_class,
            &arg_names,
            self.options.pascal_case_properties,
        );
        for arg in &function.args {
            out.line(&format!(
                "args.{} = {};",
                self.scopes.mapped_name(&arg.name),
                escape_identifier(&arg.name)
            ));
        }
        self.scopes.cleanup(scope);
        out.blank_line();
        out.line("args.write(output_protocol);");
        out.line("output_protocol.write_message_end();");
        out.line("output_protocol.transport.flush();");
        if function.oneway {
            out.close_block();
            return Ok(());
        }

        let result_class = result_class_name(function);
        let returns_value = !matches!(
            self.resolver.resolve(&function.return_type)?,
            ResolvedType::Void
        );
        let mut result_members: Vec<&str> = Vec::new();
        if returns_value {
            result_members.push("success");
        }
        for ex in &function.throws {
            result_members.push(ex.name.as_str());
        }
        let scope = self.scopes.prepare(
            &result_class,
            &result_members,
            self.options.pascal_case_properties,
        );

        out.blank_line();
        out.line("string name;");
        out.line("MessageType message_type;");
        out.line("input_protocol.read_message_begin(out name, out message_type, out seqid);");
        out.open_block("if (message_type == MessageType.EXCEPTION)");
        out.line("var x = new ApplicationException();");
        out.line("x.read(input_protocol);");
        out.line("throw new ApplicationExceptionError.UNKNOWN(x.message);");
        out.close_block();
        out.blank_line();
        out.line(&format!("var result = new {result_class}();"));
        out.line("result.read(input_protocol);");
        out.line("input_protocol.read_message_end();");
        for ex in &function.throws {
            let escaped = escape_identifier(&ex.name);
            out.open_block(&format!("if (result.__isset.{escaped})"));
            out.line(&format!(
                "{escaped} = result.{};",
                self.scopes.mapped_name(&ex.name)
            ));
            out.close_block();
            out.open_block("else");
            out.line(&format!("{escaped} = null;"));
            out.close_block();
        }
        if returns_value {
            out.open_block("if (result.__isset.success)");
            out.line(&format!("return result.{};", self.scopes.mapped_name("success")));
            out.close_block();
            out.line(&format!(
                "throw new ApplicationExceptionError.MISSING_RESULT(\"{} failed: unknown result\");",
                function.name
            ));
        } else {
            out.line("return;");
        }
        self.scopes.cleanup(scope);
        out.close_block();
        Ok(())
    }

    /// The processor: a name-keyed table of typed dispatch delegates, an
    /// unknown-method reply, and one handler per function.
    fn service_processor(&mut self, out: &mut ValaEmitter, def: &ServiceDef) -> GenResult<()> {
        let interface = format!("I{}", pascal_case(&def.name));
        out.open_block("public class Processor : Quipu.Processor");
        out.line(&format!("private {interface} service;"));
        out.blank_line();
        out.line(
            "private delegate void ProcessFunction(int32 seqid, Protocol input_protocol, Protocol output_protocol) throws Error;",
        );
        out.blank_line();
        if self.options.use_libgee {
            out.line(
                "private HashMap<string, ProcessFunction> process_map = new HashMap<string, ProcessFunction>();",
            );
        } else {
            out.line(
                "private HashTable<string, ProcessFunction> process_map = new HashTable<string, ProcessFunction>(str_hash, str_equal);",
            );
        }
        out.blank_line();
        out.line(&format!("public Processor({interface} service)"));
        out.indent();
        out.line("requires (service != null)");
        out.dedent();
        out.line("{");
        out.indent();
        out.line("this.service = service;");
        for function in &def.functions {
            out.line(&format!(
                "process_map[\"{}\"] = process_{};",
                function.name,
                snake_case(&function.name)
            ));
        }
        out.close_block();
        out.blank_line();

        out.open_block("public override bool process(Protocol input_protocol, Protocol output_protocol)");
        out.open_block("try");
        out.line("string name;");
        out.line("MessageType message_type;");
        out.line("int32 seqid;");
        out.line("input_protocol.read_message_begin(out name, out message_type, out seqid);");
        out.blank_line();
        out.line("var fn = process_map.get(name);");
        out.blank_line();
        out.open_block("if (fn == null)");
        out.line("input_protocol.skip(Quipu.Type.STRUCT);");
        out.line("input_protocol.read_message_end();");
        out.line("var x = new ApplicationException();");
        out.line("x.type = ApplicationExceptionError.UNKNOWN_METHOD;");
        out.line("x.message = \"Invalid method name: '\" + name + \"'\";");
        out.line("output_protocol.write_message_begin(name, MessageType.EXCEPTION, seqid);");
        out.line("x.write(output_protocol);");
        out.line("output_protocol.write_message_end();");
        out.line("output_protocol.transport.flush();");
        out.line("return true;");
        out.close_block();
        out.blank_line();
        out.line("fn(seqid, input_protocol, output_protocol);");
        out.close_block();
        out.open_block("catch (Error e)");
        out.line("return false;");
        out.close_block();
        out.blank_line();
        out.line("return true;");
        out.close_block();

        for function in &def.functions {
            out.blank_line();
            self.process_function(out, function)?;
        }
        out.close_block();
        Ok(())
    }

    /// One dispatch handler: read the argument struct, invoke the service,
    /// and send back a REPLY carrying the result struct. Transport errors
    /// propagate so the connection loop can drop the peer; anything else
    /// becomes an internal-error EXCEPTION envelope.
    fn process_function(&mut self, out: &mut ValaEmitter, function: &Function) -> GenResult<()> {
        out.open_block(&format!(
            "private void process_{}(int32 seqid, Protocol input_protocol, Protocol output_protocol) throws Error",
            snake_case(&function.name)
        ));
        let args_class = args_class_name(function);
        out.line(&format!("var args = new {args_class}();"));
        out.line("args.read(input_protocol);");
        out.line("input_protocol.read_message_end();");
        let returns_value = !matches!(
            self.resolver.resolve(&function.return_type)?,
            ResolvedType::Void
        );
        if !function.oneway {
            out.line(&format!("var result = new {}();", result_class_name(function)));
        }
        out.open_block("try");
        for ex in &function.throws {
            let ty = self.resolver.resolve(&ex.ty)?;
            out.line(&format!(
                "{} {};",
                self.resolver.type_name(&ty),
                escape_identifier(&ex.name)
            ));
        }

        let arg_names: Vec<&str> = function.args.iter().map(|a| a.name.as_str()).collect();
        let scope = self.scopes.prepare(
            &args_class,
            &arg_names,
            self.options.pascal_case_properties,
        );
        let mut call_args: Vec<String> = function
            .args
            .iter()
            .map(|a| format!("args.{}", self.scopes.mapped_name(&a.name)))
            .collect();
        self.scopes.cleanup(scope);
        for ex in &function.throws {
            call_args.push(format!("out {}", escape_identifier(&ex.name)));
        }

        let result_scope = if function.oneway {
            None
        } else {
            let result_class = result_class_name(function);
            let mut members: Vec<&str> = Vec::new();
            if returns_value {
                members.push("success");
            }
            for ex in &function.throws {
                members.push(ex.name.as_str());
            }
            Some(self.scopes.prepare(
                &result_class,
                &members,
                self.options.pascal_case_properties,
            ))
        };

        let call = format!(
            "service.{}({})",
            escape_identifier(&snake_case(&function.name)),
            call_args.join(", ")
        );
        if returns_value && !function.oneway {
            out.line(&format!(
                "result.{} = {call};",
                self.scopes.mapped_name("success")
            ));
        } else {
            out.line(&format!("{call};"));
        }
        if !function.oneway {
            for ex in &function.throws {
                out.line(&format!(
                    "result.{} = {};",
                    self.scopes.mapped_name(&ex.name),
                    escape_identifier(&ex.name)
                ));
            }
            out.line(&format!(
                "output_protocol.write_message_begin(\"{}\", MessageType.REPLY, seqid);",
                function.name
            ));
            out.line("result.write(output_protocol);");
        }
        out.close_block();
        out.open_block("catch (TransportError e)");
        out.line("throw e;");
        out.close_block();
        out.open_block("catch (Error e)");
        out.line("stderr.printf(\"Error occurred in processor:\\n%s\\n\", e.message);");
        if !function.oneway {
            out.line("var x = new ApplicationException();");
            out.line("x.type = ApplicationExceptionError.INTERNAL_ERROR;");
            out.line("x.message = \"Internal error.\";");
            out.line(&format!(
                "output_protocol.write_message_begin(\"{}\", MessageType.EXCEPTION, seqid);",
                function.name
            ));
            out.line("x.write(output_protocol);");
        }
        out.close_block();
        if !function.oneway {
            out.blank_line();
            out.line("output_protocol.write_message_end();");
            out.line("output_protocol.transport.flush();");
        }
        if let Some(scope) = result_scope {
            self.scopes.cleanup(scope);
        }
        out.close_block();
        Ok(())
    }

    /// The synthesized argument struct, and for two-way functions the
    /// result struct holding field 0 (`success`) plus one field per
    /// declared exception.
    fn helper_structs(&mut self, out: &mut ValaEmitter, function: &Function) -> GenResult<()> {
        let args = StructDef {
            name: format!("{}_args", function.name),
            fields: function.args.clone(),
            is_final: false,
            doc: None,
        };
        self.struct_definition(out, &args, false, false)?;
        if function.oneway {
            return Ok(());
        }

        let returns_value = !matches!(
            self.resolver.resolve(&function.return_type)?,
            ResolvedType::Void
        );
        let mut fields = Vec::new();
        if returns_value {
            fields.push(Field {
                key: 0,
                name: "success".to_string(),
                ty: function.return_type.clone(),
                ..Field::default()
            });
        }
        for ex in &function.throws {
            // Result presence bits drive the writer, so exception fields
            // are never treated as required here.
            let mut ex = ex.clone();
            ex.requiredness = Requiredness::Default;
            fields.push(ex);
        }
        let result = StructDef {
            name: format!("{}_result", function.name),
            fields,
            is_final: false,
            doc: None,
        };
        out.blank_line();
        self.struct_definition(out, &result, false, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quipu_schema::Schema;

    use super::super::options::GeneratorOptions;
    use super::super::ValaCodegen;

    fn service_text(json: &str, options: GeneratorOptions) -> String {
        let schema = Schema::from_json(json).unwrap();
        let mut codegen = ValaCodegen::new(&schema, options);
        codegen
            .service_file(&schema.document.services[0])
            .unwrap()
    }

    const CALCULATOR: &str = r#"{
        "document": {
            "name": "demo",
            "namespace": "Demo",
            "exceptions": [{"name": "div_error", "fields": [
                {"key": 1, "name": "reason", "ty": "str"}
            ]}],
            "services": [{
                "name": "Calculator",
                "functions": [
                    {"name": "add", "return_type": "i32", "args": [
                        {"key": 1, "name": "a", "ty": "i32"},
                        {"key": 2, "name": "b", "ty": "i32"}
                    ]},
                    {"name": "divide", "return_type": "double",
                     "args": [
                         {"key": 1, "name": "num", "ty": "double"},
                         {"key": 2, "name": "den", "ty": "double"}
                     ],
                     "throws": [
                         {"key": 1, "name": "err",
                          "ty": {"named": {"name": "div_error"}}}
                     ]},
                    {"name": "ping", "oneway": true}
                ]
            }]
        }
    }"#;

    #[test]
    fn interface_carries_exceptions_as_out_parameters() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains("public interface ICalculator : Object\n"));
        assert!(text.contains("public abstract int32 add(int32 a, int32 b) throws Error;\n"));
        assert!(text.contains(
            "public abstract double divide(double num, double den, out DivError err) throws Error;\n"
        ));
        assert!(text.contains("public abstract void ping() throws Error;\n"));
    }

    #[test]
    fn client_wires_protocols_through_named_constructors() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains("public class Calculator : Object\n"));
        assert!(text.contains("public class Client : ICalculator, Object\n"));
        assert!(text.contains("protected Protocol input_protocol;\n"));
        assert!(text.contains("protected Protocol output_protocol;\n"));
        assert!(text.contains("public Client(Protocol protocol)\n"));
        assert!(text.contains("this.with_protocols(protocol, protocol);\n"));
        assert!(text.contains(
            "public Client.with_protocols(Protocol input_protocol, Protocol output_protocol)\n"
        ));
    }

    #[test]
    fn client_call_sends_args_and_reads_result() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains(
            "output_protocol.write_message_begin(\"add\", MessageType.CALL, seqid);\n"
        ));
        assert!(text.contains("var args = new AddArgs();\n"));
        assert!(text.contains("args.A = a;\n"));
        assert!(text.contains("args.B = b;\n"));
        assert!(text.contains("args.write(output_protocol);\n"));
        assert!(text.contains("output_protocol.transport.flush();\n"));
        assert!(text.contains("var result = new AddResult();\n"));
        assert!(text.contains("if (result.__isset.success)\n"));
        assert!(text.contains("return result.Success;\n"));
        assert!(text.contains(
            "throw new ApplicationExceptionError.MISSING_RESULT(\"add failed: unknown result\");\n"
        ));
    }

    #[test]
    fn client_surfaces_remote_exceptions() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains("if (message_type == MessageType.EXCEPTION)\n"));
        assert!(text.contains("var x = new ApplicationException();\n"));
        assert!(text.contains("x.read(input_protocol);\n"));
        assert!(text.contains("throw new ApplicationExceptionError.UNKNOWN(x.message);\n"));
        assert!(text.contains("if (result.__isset.err)\n"));
        assert!(text.contains("err = result.Err;\n"));
        assert!(text.contains("err = null;\n"));
    }

    #[test]
    fn oneway_skips_result_plumbing() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains(
            "output_protocol.write_message_begin(\"ping\", MessageType.ONEWAY, seqid);\n"
        ));
        assert!(!text.contains("PingResult"));
        assert!(!text.contains(
            "output_protocol.write_message_begin(\"ping\", MessageType.REPLY, seqid);\n"
        ));
        assert!(text.contains("public class PingArgs : Struct\n"));
    }

    #[test]
    fn processor_registers_typed_dispatch_delegates() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains("public class Processor : Quipu.Processor\n"));
        assert!(text.contains("private ICalculator service;\n"));
        assert!(text.contains(
            "private delegate void ProcessFunction(int32 seqid, Protocol input_protocol, Protocol output_protocol) throws Error;\n"
        ));
        assert!(text.contains(
            "private HashTable<string, ProcessFunction> process_map = new HashTable<string, ProcessFunction>(str_hash, str_equal);\n"
        ));
        assert!(text.contains("public Processor(ICalculator service)\n"));
        assert!(text.contains("requires (service != null)\n"));
        assert!(text.contains("process_map[\"add\"] = process_add;\n"));
        assert!(text.contains("process_map[\"divide\"] = process_divide;\n"));
        assert!(text.contains("process_map[\"ping\"] = process_ping;\n"));
    }

    #[test]
    fn processor_rejects_unknown_methods() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains("var fn = process_map.get(name);\n"));
        assert!(text.contains("if (fn == null)\n"));
        assert!(text.contains("input_protocol.skip(Quipu.Type.STRUCT);\n"));
        assert!(text.contains("x.type = ApplicationExceptionError.UNKNOWN_METHOD;\n"));
        assert!(text.contains("x.message = \"Invalid method name: '\" + name + \"'\";\n"));
        assert!(text.contains("fn(seqid, input_protocol, output_protocol);\n"));
    }

    #[test]
    fn handlers_reply_and_fence_internal_errors() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains(
            "private void process_add(int32 seqid, Protocol input_protocol, Protocol output_protocol) throws Error\n"
        ));
        assert!(text.contains("result.Success = service.add(args.A, args.B);\n"));
        assert!(text.contains("DivError err;\n"));
        assert!(text.contains(
            "result.Success = service.divide(args.Num, args.Den, out err);\n"
        ));
        assert!(text.contains("result.Err = err;\n"));
        assert!(text.contains(
            "output_protocol.write_message_begin(\"add\", MessageType.REPLY, seqid);\n"
        ));
        assert!(text.contains("catch (TransportError e)\n"));
        assert!(text.contains("throw e;\n"));
        assert!(text.contains(
            "stderr.printf(\"Error occurred in processor:\\n%s\\n\", e.message);\n"
        ));
        assert!(text.contains("x.type = ApplicationExceptionError.INTERNAL_ERROR;\n"));
        assert!(text.contains("x.message = \"Internal error.\";\n"));
    }

    #[test]
    fn result_struct_writes_at_most_one_field() {
        let text = service_text(CALCULATOR, GeneratorOptions::default());
        assert!(text.contains("public class DivideResult : Struct\n"));
        assert!(text.contains("protocol.write_struct_begin(\"divide_result\");\n"));
        assert!(text.contains("if (this.__isset.success)\n"));
        assert!(text.contains("else if (this.__isset.err)\n"));
        assert!(text.contains("protocol.write_field_begin(\"success\", Quipu.Type.DOUBLE, 0);\n"));
    }

    #[test]
    fn extends_chains_through_parent_client() {
        let text = service_text(
            r#"{
                "document": {
                    "name": "demo",
                    "namespace": "Demo",
                    "services": [
                        {"name": "Child",
                         "extends": {"name": "Parent"},
                         "functions": [{"name": "extra"}]}
                    ]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("public interface IChild : IParent\n"));
        assert!(text.contains("public class Client : Parent.Client\n"));
        assert!(text.contains("base.with_protocols(input_protocol, output_protocol);\n"));
        assert!(!text.contains("protected Protocol input_protocol;\n"));
    }

    #[test]
    fn foreign_parents_are_namespace_qualified() {
        let text = service_text(
            r#"{
                "document": {
                    "name": "app",
                    "namespace": "App",
                    "services": [
                        {"name": "Worker",
                         "extends": {"document": "base", "name": "Core"},
                         "functions": []}
                    ]
                },
                "includes": [{
                    "name": "base",
                    "namespace": "Base",
                    "services": [{"name": "Core", "functions": []}]
                }]
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("public interface IWorker : Base.ICore\n"));
        assert!(text.contains("public class Client : Base.Core.Client\n"));
    }

    #[test]
    fn keyword_arguments_are_escaped_at_every_hop() {
        let text = service_text(
            r#"{
                "document": {
                    "name": "demo",
                    "services": [{
                        "name": "Locker",
                        "functions": [{
                            "name": "hold",
                            "return_type": "bool",
                            "args": [{"key": 1, "name": "lock", "ty": "str"}]
                        }]
                    }]
                }
            }"#,
            GeneratorOptions::default(),
        );
        assert!(text.contains("public abstract bool hold(string @lock) throws Error;\n"));
        assert!(text.contains("args.Lock = @lock;\n"));
        assert!(text.contains("service.hold(args.Lock)"));
    }

    #[test]
    fn libgee_processor_uses_a_gee_map() {
        let text = service_text(
            r#"{
                "document": {
                    "name": "demo",
                    "services": [{"name": "Echo", "functions": [{"name": "hit"}]}]
                }
            }"#,
            GeneratorOptions {
                use_libgee: true,
                ..GeneratorOptions::default()
            },
        );
        assert!(text.contains(
            "private HashMap<string, ProcessFunction> process_map = new HashMap<string, ProcessFunction>();\n"
        ));
        assert!(text.contains("using Gee;\n"));
    }
}
