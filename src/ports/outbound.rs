//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    AnalysisKey, AnalysisResult, DomainError, Item, ItemDetails, ItemQuery, ItemSource,
};

/// Read-only public records API (Congress.gov, Federal Register, CourtListener).
#[async_trait::async_trait]
pub trait DataSourcePort: Send + Sync {
    /// Which source (and therefore which panel) this adapter feeds.
    fn source(&self) -> ItemSource;

    /// Fetch items matching `query`. Non-success status and transport errors map to
    /// `DomainError::Fetch`; the caller decides how to degrade.
    async fn fetch(&self, query: &ItemQuery) -> Result<Vec<Item>, DomainError>;

    /// Fetch on-demand details for one item. Sources without a details endpoint
    /// return `Ok(None)`.
    async fn details(&self, _item: &Item) -> Result<Option<ItemDetails>, DomainError> {
        Ok(None)
    }
}

/// LLM backend. Prompt in, text out. No retries, caching or parsing here.
#[async_trait::async_trait]
pub trait LlmPort: Send + Sync {
    /// Send one prompt and return the raw response text.
    ///
    /// Failures carry the backend's message in `DomainError::Invocation`.
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}

/// Storage behind the analysis cache. Maps `AnalysisKey` to `AnalysisResult`.
#[async_trait::async_trait]
pub trait AnalysisStorePort: Send + Sync {
    async fn get(&self, key: &AnalysisKey) -> Result<Option<AnalysisResult>, DomainError>;

    /// Store a result. Overwrites any previous entry for `key`.
    async fn put(&self, key: &AnalysisKey, result: &AnalysisResult) -> Result<(), DomainError>;

    /// Number of stored entries.
    async fn len(&self) -> Result<usize, DomainError>;
}
