use thiserror::Error;

/// Why a tagged declaration could not be imported. The scanner logs it and
/// moves on to the next tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected a return type or `inline` after the tag, found `{0}`")]
    MissingReturnType(String),

    #[error("failed to get function name at `{0}`")]
    MissingFunctionName(String),

    #[error("`{0}` is not a valid function name")]
    InvalidFunctionName(String),

    #[error("expected `(` after function name `{0}`")]
    MissingArgumentList(String),

    #[error("argument list is missing its closing `)`")]
    UnterminatedArguments,

    #[error("expected an argument type at `{0}`")]
    MissingArgumentType(String),

    #[error("failed to get argument name at `{0}`")]
    MissingArgumentName(String),

    #[error("argument `{name}` has unsupported type `{spelling}`")]
    UnsupportedArgumentType { name: String, spelling: String },

    #[error("default value of argument `{name}` is not a valid {expected} literal: `{found}`")]
    MalformedDefault {
        name: String,
        expected: &'static str,
        found: String,
    },

    #[error("block comment is never closed")]
    UnterminatedComment,

    #[error("argument `{name}` at index {index} has no default but follows a defaulted argument")]
    NonTrailingDefault { index: usize, name: String },
}

/// First line of `src`, shortened for error messages.
pub(crate) fn snippet(src: &str) -> String {
    const MAX: usize = 40;
    let line = src.lines().next().unwrap_or("").trim_end();
    match line.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}
