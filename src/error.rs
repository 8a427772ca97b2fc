use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssumeError {
    #[error("assumptions require a condition")]
    MissingCondition,
    #[error("handler is not callable")]
    InvalidHandler,
    #[error(transparent)]
    Failed(#[from] AssumptionFailed),
    /// Raised by a custom handler
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

/// Report of the diagnostic handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("assumption failed in {file}\nsource code (line {line}):\n{code}\nresult was: {result}")]
pub struct AssumptionFailed {
    pub file: String,
    pub line: u32,
    /// The source text at `line`, or a placeholder if it could not be read
    pub code: String,
    /// `Debug` rendering of the falsy result
    pub result: String,
}
