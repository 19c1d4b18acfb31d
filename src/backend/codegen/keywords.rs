//! Vala keyword vocabulary (for codegen identifier escaping).

/// Reserved words in Vala. Schema identifiers that collide with one of these
/// are escaped with the `@` sigil, which Vala strips from the symbol name.
pub const VALA_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "base", "break", "case", "catch", "class", "const", "construct",
    "continue", "default", "delegate", "delete", "do", "dynamic", "else", "ensures", "enum",
    "errordomain", "extern", "false", "finally", "for", "foreach", "get", "if", "in", "inline",
    "interface", "internal", "is", "lock", "namespace", "new", "null", "out", "override", "owned",
    "params", "private", "protected", "public", "ref", "requires", "return", "sealed", "set",
    "signal", "sizeof", "static", "struct", "switch", "this", "throw", "throws", "true", "try",
    "typeof", "unlock", "unowned", "using", "var", "virtual", "void", "volatile", "weak", "while",
    "yield",
];

/// Check whether an identifier is a Vala keyword. Matching is
/// case-insensitive, so `Class` collides just like `class`.
pub fn is_vala_keyword(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    VALA_KEYWORDS.contains(&lowered.as_str())
}
