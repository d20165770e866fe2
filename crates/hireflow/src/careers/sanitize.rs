use serde_json::{Map, Value};

/// Nesting depth at which sanitization gives up on a payload. The walk is
/// recursive, so unbounded depth is a stack-exhaustion exposure.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Raised when a payload nests deeper than the configured bound.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("payload nested deeper than {max_depth} levels")]
    DepthExceeded { max_depth: usize },
}

/// Escape the HTML-significant characters of a single string.
///
/// Substitutions run left to right over the input and each one is
/// independent; `&` itself is never targeted, so text that already contains
/// entities is not double-escaped.
pub fn sanitize_str(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Recursively sanitize every string leaf of a JSON tree, preserving shape.
///
/// Sequences are mapped element-wise keeping order and length, mappings are
/// mapped key-wise keeping every key, and non-string scalars pass through
/// untouched. The walk is pure; callers run it once over the whole inbound
/// payload before any field is read.
pub fn sanitize_value(value: &Value, max_depth: usize) -> Result<Value, SanitizeError> {
    sanitize_at(value, max_depth, 0)
}

fn sanitize_at(value: &Value, max_depth: usize, depth: usize) -> Result<Value, SanitizeError> {
    if depth > max_depth {
        return Err(SanitizeError::DepthExceeded { max_depth });
    }

    match value {
        Value::String(text) => Ok(Value::String(sanitize_str(text))),
        Value::Array(items) => {
            let mut sanitized = Vec::with_capacity(items.len());
            for item in items {
                sanitized.push(sanitize_at(item, max_depth, depth + 1)?);
            }
            Ok(Value::Array(sanitized))
        }
        Value::Object(entries) => {
            let mut sanitized = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                sanitized.insert(key.clone(), sanitize_at(entry, max_depth, depth + 1)?);
            }
            Ok(Value::Object(sanitized))
        }
        scalar => Ok(scalar.clone()),
    }
}
