use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("document root must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("field `{0}` is present but is not an array")]
    NotAnArray(&'static str),
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;

/// Human-readable name of a JSON value's kind, used in diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
