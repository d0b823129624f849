/// Errors from parsing textual parameter values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid {kind} '{input}': expected {expected}")]
    InvalidFormat {
        kind: &'static str,
        input: String,
        expected: &'static str,
    },

    #[error("invalid number '{value}' in '{input}'")]
    InvalidNumber { input: String, value: String },

    #[error("unknown side '{0}' (expected left, right, back or front)")]
    UnknownSide(String),

    #[error("unknown color '{0}'")]
    UnknownColor(String),
}
