// src/core/commons.rs

/// Parses a boolean the way CI parameters spell them.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`. Anything else,
/// including the empty string, is treated as unset.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Resolves a tri-state flag against its default.
pub fn parse_bool_or(default: bool, value: Option<bool>) -> bool {
    value.unwrap_or(default)
}
