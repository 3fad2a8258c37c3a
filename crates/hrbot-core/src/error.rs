use thiserror::Error;

/// A convenience `Result` alias using [`HrError`].
pub type HrResult<T> = Result<T, HrError>;

/// Top-level error type for hrbot.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Error, Debug)]
pub enum HrError {
    /// The employee roster is missing, malformed, or inconsistent.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// The embedding model failed to produce a vector.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The similarity index rejected an operation.
    #[error("Index error: {0}")]
    Index(String),

    /// A search could not be completed.
    #[error("Search error: {0}")]
    Search(String),

    /// An outbound HTTP request failed (LLM or embedding API).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The language model returned something unusable.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Configuration parsing or validation failed.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
