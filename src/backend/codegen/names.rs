//! Identifier shaping for emitted Vala.
//!
//! Schema identifiers pass through here on their way into generated source:
//! keyword escaping with the `@` sigil, the two Pascal-case flavors (type
//! names and property names follow different rules), snake case for method
//! names, and the per-struct property rename scopes that keep generated
//! member names from colliding with their owner or with `read`/`write`.

use std::collections::{HashMap, HashSet};

use super::keywords::is_vala_keyword;

/// Escapes identifiers that collide with a Vala keyword by prefixing the
/// `@` sigil. The comparison is case-insensitive but the original spelling
/// is preserved, so `Class` becomes `@Class`.
pub fn escape_identifier(name: &str) -> String {
    if is_vala_keyword(name) {
        format!("@{name}")
    } else {
        name.to_string()
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Pascal case for type names. Only underscores start a new word; any other
/// non-alphanumeric character is dropped without starting one, so `foo_bar`
/// becomes `FooBar` while `foo.bar` becomes `Foobar`. Interior capitalization
/// the schema author wrote is preserved.
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if capitalize_next {
                out.push(ch.to_ascii_uppercase());
                capitalize_next = false;
            } else {
                out.push(ch);
            }
        } else if ch == '_' {
            capitalize_next = true;
        }
    }
    out
}

/// Pascal case for property names. Unlike [`pascal_case`], every
/// non-alphanumeric character starts a new word, and a name that does not
/// begin with an alphanumeric character is returned unchanged.
pub fn property_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if !first.is_ascii_alphanumeric() {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    out.push(first.to_ascii_uppercase());
    let mut capitalize_next = false;
    for ch in chars {
        if ch.is_ascii_alphanumeric() {
            if capitalize_next {
                out.push(ch.to_ascii_uppercase());
                capitalize_next = false;
            } else {
                out.push(ch);
            }
        } else {
            capitalize_next = true;
        }
    }
    out
}

/// Snake case for generated method names.
pub fn snake_case(name: &str) -> String {
    use heck::ToSnakeCase;
    name.to_snake_case()
}

/// Rewrites a free-form name into a legal Vala identifier: a leading digit
/// gains an underscore prefix and every other illegal character becomes an
/// underscore.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        out.push('_');
    }
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    out
}

/// The property name a member would get before collision handling.
pub fn property_candidate(member: &str, pascal_properties: bool) -> String {
    let capitalized = capitalize_first(member);
    if pascal_properties {
        property_pascal_case(&capitalized)
    } else {
        capitalized
    }
}

/// Proof that a prepared rename scope is still the active one. Produced by
/// [`MemberNameScopes::prepare`] and consumed by [`MemberNameScopes::cleanup`],
/// so a scope cannot be popped twice or out of order.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct ScopeId(u64);

#[derive(Debug)]
struct Scope {
    id: u64,
    owner: String,
    mapping: HashMap<String, String>,
}

/// Stack of property rename scopes, one per struct-like declaration being
/// emitted. Scopes nest while a service function emits its args struct inside
/// its result handling, and must be torn down in reverse order of setup.
#[derive(Debug, Default)]
pub struct MemberNameScopes {
    stack: Vec<Scope>,
    next_id: u64,
}

impl MemberNameScopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a scope for `owner` and assigns every member a property name.
    /// Candidates that collide with the owner's type name, with `Read` or
    /// `Write` (the wire methods every generated struct has), or with an
    /// earlier member gain trailing underscores until they are unique.
    pub fn prepare(
        &mut self,
        owner: &str,
        members: &[&str],
        pascal_properties: bool,
    ) -> ScopeId {
        let mut used: HashSet<String> = HashSet::new();
        used.insert(owner.to_string());
        used.insert("Read".to_string());
        used.insert("Write".to_string());

        let mut mapping = HashMap::with_capacity(members.len());
        for &member in members {
            let mut candidate = property_candidate(member, pascal_properties);
            let renamed = used.contains(&candidate);
            while used.contains(&candidate) {
                candidate.push('_');
            }
            if renamed {
                tracing::debug!(owner, member, property = %candidate, "renamed colliding property");
            }
            used.insert(candidate.clone());
            mapping.insert(member.to_string(), candidate);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.stack.push(Scope {
            id,
            owner: owner.to_string(),
            mapping,
        });
        ScopeId(id)
    }

    /// Closes the scope named by `token`.
    ///
    /// # Panics
    ///
    /// Panics if no scope is active or `token` does not name the top of the
    /// stack. Both mean the emitter opened and closed scopes out of order,
    /// which is a generator bug, not a schema error.
    pub fn cleanup(&mut self, token: ScopeId) {
        let top = self
            .stack
            .last()
            .expect("INVARIANT: member scope cleanup with no active scope");
        assert!(
            top.id == token.0,
            "INVARIANT: member scope cleanup out of order (active scope is {})",
            top.owner
        );
        self.stack.pop();
    }

    /// Looks up the property name `raw` was given in the active scope. A miss
    /// returns the raw name unchanged.
    pub fn mapped_name(&self, raw: &str) -> String {
        if let Some(scope) = self.stack.last() {
            if let Some(mapped) = scope.mapping.get(raw) {
                return mapped.clone();
            }
        }
        tracing::debug!(member = raw, "no active property mapping for member");
        raw.to_string()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
