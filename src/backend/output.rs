//! Output tree writing.
//!
//! Generated files land under the output root, with the document namespace
//! mirrored as a directory path (`Demo.Net` becomes `Demo/Net/`). Files are
//! rewritten only when their content actually changed, so build systems
//! watching the output tree do not rebuild for identical regenerations.

use std::fs;
use std::path::{Path, PathBuf};

use quipu_schema::Schema;
use tracing::{debug, info};

use super::codegen::errors::GenResult;
use super::codegen::names::capitalize_first;
use super::codegen::options::GeneratorOptions;
use super::codegen::ValaCodegen;

/// Writes generated sources under one namespace directory.
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// Creates the namespace directory under `out_dir`.
    pub fn new(out_dir: impl AsRef<Path>, namespace: &str) -> GenResult<Self> {
        let mut root = out_dir.as_ref().to_path_buf();
        if !namespace.is_empty() {
            root = root.join(namespace.replace('.', "/"));
        }
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Writes `content` to `file_name`, skipping the write when an
    /// identical file is already in place.
    pub fn write(&self, file_name: &str, content: &str) -> GenResult<PathBuf> {
        let path = self.root.join(file_name);
        if let Ok(existing) = fs::read_to_string(&path) {
            if existing == content {
                debug!(file = %path.display(), "unchanged, skipping write");
                return Ok(path);
            }
        }
        fs::write(&path, content)?;
        info!(file = %path.display(), "wrote");
        Ok(path)
    }
}

/// Generates every Vala source file for the schema's main document and
/// returns the paths touched.
///
/// Each enum, struct, exception, and service gets a file named after the
/// declaration; document constants collect into `Name.Constants.vala`.
#[tracing::instrument(skip_all, fields(document = %schema.document.name))]
pub fn generate_to_dir(
    schema: &Schema,
    options: GeneratorOptions,
    out_dir: &Path,
) -> GenResult<Vec<PathBuf>> {
    let mut codegen = ValaCodegen::new(schema, options);
    let document = codegen.document();
    let writer = OutputWriter::new(out_dir, &document.namespace)?;
    let mut written = Vec::new();

    for def in &document.enums {
        let text = codegen.enum_file(def);
        written.push(writer.write(&format!("{}.vala", def.name), &text)?);
    }
    for def in &document.structs {
        let text = codegen.struct_file(def, false)?;
        written.push(writer.write(&format!("{}.vala", def.name), &text)?);
    }
    for def in &document.exceptions {
        let text = codegen.struct_file(def, true)?;
        written.push(writer.write(&format!("{}.vala", def.name), &text)?);
    }
    for def in &document.services {
        let text = codegen.service_file(def)?;
        written.push(writer.write(&format!("{}.vala", def.name), &text)?);
    }
    if let Some(text) = codegen.constants_file()? {
        let file_name = format!("{}.Constants.vala", capitalize_first(&document.name));
        written.push(writer.write(&file_name, &text)?);
    }

    info!(files = written.len(), "generation complete");
    Ok(written)
}
