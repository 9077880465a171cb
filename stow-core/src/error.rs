use thiserror::Error;

/// The discriminated error kinds a Stow driver or the query builder can raise.
///
/// Call sites generally propagate these through `anyhow`, attaching context
/// (the SQL being prepared, the offending identifier) the way the teacher's
/// drivers attach `anyhow::Context` at their own error sites.
#[derive(Debug, Error)]
pub enum Error {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("failed to prepare statement: {0}")]
    Prepare(String),

    #[error("failed to bind parameter {index}: {message}")]
    Bind { index: usize, message: String },

    #[error("execution error: {0}")]
    Execute(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
