//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use quipu_schema::Schema;

use crate::backend::codegen::options::GeneratorOptions;
use crate::backend::output;

use super::{CliError, CliResult, ExitCode};

/// Load a schema file and run the structural checks, reporting every
/// finding rather than stopping at the first.
fn load_schema(path: &Path) -> CliResult<Schema> {
    let schema = Schema::from_path(path).map_err(|e| {
        CliError::failure(format!("Error reading schema '{}': {}", path.display(), e))
    })?;

    if let Err(errors) = schema.validate() {
        let mut msg = String::new();
        for (index, error) in errors.iter().enumerate() {
            if index > 0 {
                msg.push('\n');
            }
            msg.push_str(&format!("{}: {}", path.display(), error));
        }
        return Err(CliError::failure(msg));
    }

    Ok(schema)
}

/// Parse and validate a schema file.
pub fn check_schema(path: &Path) -> CliResult<ExitCode> {
    let schema = load_schema(path)?;

    let documents = schema.documents().count();
    println!("✓ Schema check passed! ({} document(s))", documents);
    Ok(ExitCode::SUCCESS)
}

/// Generate Vala sources from a schema file.
///
/// Backend options are parsed before anything touches the filesystem.
pub fn generate(path: &Path, out_dir: &Path, option_specs: &[String]) -> CliResult<ExitCode> {
    let options = GeneratorOptions::parse_specs(option_specs)
        .map_err(|e| CliError::failure(e.to_string()))?;

    let schema = load_schema(path)?;

    let written = output::generate_to_dir(&schema, options, out_dir)
        .map_err(|e| CliError::failure(format!("Code generation error: {}", e)))?;

    println!(
        "✓ Generated {} file(s) in: {}",
        written.len(),
        out_dir.display()
    );
    Ok(ExitCode::SUCCESS)
}
