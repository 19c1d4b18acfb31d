//! Backend options for the Vala generator.
//!
//! Options arrive as `name` or `name=value` strings from the command line.
//! Only the names listed here are accepted; anything else aborts generation
//! before a single file is touched.

use super::errors::{GenError, GenResult};

/// Toggles that change the shape of the emitted Vala.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Emit Gee collection types (`HashMap`, `HashSet`, `ArrayList`) instead
    /// of the GLib ones (`HashTable`, `GenericSet`, `Array`/`GenericArray`).
    pub use_libgee: bool,
    /// Render property names in Pascal case following the Microsoft naming
    /// convention instead of only upper-casing the first letter.
    pub pascal_case_properties: bool,
}

impl GeneratorOptions {
    /// Builds options from already-split `(name, value)` pairs. Values are
    /// accepted but ignored; both options are plain switches.
    pub fn from_pairs<'a, I>(pairs: I) -> GenResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (name, _value) in pairs {
            match name {
                "libgee" => options.use_libgee = true,
                "pascal" => options.pascal_case_properties = true,
                other => return Err(GenError::UnknownOption(other.to_string())),
            }
        }
        Ok(options)
    }

    /// Parses raw `name` / `name=value` specs as passed on the command line.
    pub fn parse_specs(specs: &[String]) -> GenResult<Self> {
        Self::from_pairs(specs.iter().map(|spec| {
            match spec.split_once('=') {
                Some((name, value)) => (name, value),
                None => (spec.as_str(), ""),
            }
        }))
    }
}
