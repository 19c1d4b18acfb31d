//! XML documentation comments for generated Vala.
//!
//! Schema documentation strings are carried over as `///` comments in the
//! C# XML shape that Valadoc understands.

use quipu_schema::Function;

use crate::backend::vala_emitter::ValaEmitter;

fn doc_lines(doc: &str) -> impl Iterator<Item = &str> {
    doc.strip_suffix('\n').unwrap_or(doc).split('\n')
}

/// Wraps free-form documentation text in a `<summary>` block.
pub fn write_summary(out: &mut ValaEmitter, doc: &str) {
    out.doc_line("<summary>");
    for line in doc_lines(doc) {
        out.doc_line(line);
    }
    out.doc_line("</summary>");
}

/// Field documentation. Enum-typed fields gain a `<seealso>` naming the enum
/// class even when the field itself is undocumented.
pub fn write_field_doc(out: &mut ValaEmitter, doc: Option<&str>, enum_class: Option<&str>) {
    if doc.is_none() && enum_class.is_none() {
        return;
    }
    out.doc_line("<summary>");
    if let Some(doc) = doc {
        for line in doc_lines(doc) {
            out.doc_line(line);
        }
    }
    if let Some(class_name) = enum_class {
        out.doc_line(&format!("<seealso cref=\"{class_name}\"/>"));
    }
    out.doc_line("</summary>");
}

/// Function documentation: the summary plus one `<param>` line per argument.
/// Argument documentation is flattened onto a single line. Undocumented
/// functions get no comment at all, whatever their arguments carry.
pub fn write_function_doc(out: &mut ValaEmitter, function: &Function) {
    let Some(doc) = function.doc.as_deref() else {
        return;
    };
    out.doc_line("<summary>");
    for line in doc_lines(doc) {
        out.doc_line(line);
    }
    out.doc_line("</summary>");
    for arg in &function.args {
        let body = arg
            .doc
            .as_deref()
            .map(|arg_doc| arg_doc.replace('\n', ""))
            .unwrap_or_default();
        out.doc_line(&format!("<param name=\"{}\">{}</param>", arg.name, body));
    }
}
