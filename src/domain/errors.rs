//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. A missing or malformed risk score is
//! not an error: the interpreter recovers with the fallback score.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Network or API-status failure from a data source. Recovered by the dashboard
    /// as an empty collection plus a warning.
    #[error("Data source error: {0}")]
    Fetch(String),

    /// The LLM backend call failed. Never memoized.
    #[error("LLM invocation failed: {0}")]
    Invocation(String),

    #[error("Analysis store error: {0}")]
    Store(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}
