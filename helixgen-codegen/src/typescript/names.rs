//! Identifier rules and the fixed names of the generated module.

use crate::error::EmitError;
use std::collections::HashMap;

/// `number[]` alias for embeddings.
pub const VECTOR: &str = "Vector";
/// `T | null | undefined` alias.
pub const OPTIONAL: &str = "Optional";
/// Identifier alias.
pub const HELIX_ID: &str = "HelixID";
/// Runtime client alias.
pub const CLIENT_ALIAS: &str = "HelixDBClient";
/// Untyped response alias.
pub const RESPONSE: &str = "HelixDBResponse";
/// Untyped payload alias.
pub const INPUT: &str = "HelixDBInput";
pub const BASE_NODE: &str = "BaseNode";
pub const BASE_VECTOR: &str = "BaseVector";
pub const BASE_EDGE: &str = "BaseEdge";
pub const ANY_NODE: &str = "AnyNode";
pub const ANY_EDGE: &str = "AnyEdge";
pub const ANY_VECTOR: &str = "AnyVector";
/// Typed client interface.
pub const TYPED_CLIENT: &str = "TypedHelixDBClient";
/// Factory function.
pub const CREATE_CLIENT: &str = "createTypedClient";
/// Endpoint constants object.
pub const ENDPOINTS: &str = "QueryEndpoints";
/// Union of endpoint strings.
pub const ENDPOINT: &str = "QueryEndpoint";
/// Unchecked extraction helper.
pub const EXTRACT: &str = "extractData";
/// Name of the runtime method every typed method forwards to.
pub const QUERY_METHOD: &str = "query";

/// Keywords that cannot name a declaration.
const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
    "let",
    "static",
    "implements",
    "interface",
    "package",
    "private",
    "protected",
    "public",
    "await",
    "async",
];

/// Predefined type names that cannot name an interface or alias.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "any",
    "bigint",
    "boolean",
    "never",
    "number",
    "object",
    "string",
    "symbol",
    "undefined",
    "unknown",
];

/// Returns true if `name` is a reserved word or predefined type name.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name) || RESERVED_TYPE_NAMES.contains(&name)
}

/// Returns true if `name` is a plain ASCII identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escapes a string for a single-quoted literal.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out
}

/// Quotes a property key unless it is a plain identifier.
pub fn quote_if_needed(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", escape_string(name))
    }
}

/// Checks that `name` can be emitted as a declaration or method name.
///
/// # Errors
/// Returns `EmitError` if the name is not an identifier or is reserved.
pub fn check_identifier(name: &str, owner: &str) -> Result<(), EmitError> {
    if !is_identifier(name) {
        return Err(EmitError::invalid(name, owner));
    }
    if is_reserved(name) {
        return Err(EmitError::reserved(name, owner));
    }
    Ok(())
}

/// Tracks names claimed in one scope; names equal up to ASCII case collide.
#[derive(Debug, Default)]
pub struct NameRegistry {
    claimed: HashMap<String, (String, String)>,
}

impl NameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and claims a name.
    ///
    /// # Errors
    /// Returns `EmitError` if the name is invalid, reserved, or collides with
    /// an earlier claim.
    pub fn claim(&mut self, name: &str, owner: &str) -> Result<(), EmitError> {
        check_identifier(name, owner)?;
        let folded = name.to_ascii_lowercase();
        if let Some((existing, existing_owner)) = self.claimed.get(&folded) {
            return Err(EmitError::NameCollision {
                name: name.to_string(),
                owner: owner.to_string(),
                existing: existing.clone(),
                existing_owner: existing_owner.clone(),
            });
        }
        self.claimed
            .insert(folded, (name.to_string(), owner.to_string()));
        Ok(())
    }

    /// Number of claimed names.
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Returns true if nothing has been claimed.
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
