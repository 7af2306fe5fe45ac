//! Analysis service. Orchestrates on-demand LLM analysis of a single item.
//!
//! Coordinates between the prompt builder, the analysis cache, the LLM port and the
//! result interpreter.

use crate::domain::{AnalysisKey, AnalysisMode, DomainError};
use crate::ports::{AnalysisView, LlmPort};
use crate::usecases::analysis_cache::AnalysisCache;
use crate::usecases::interpreter::interpret;
use crate::usecases::prompt::{self, PENDING_MESSAGE, PromptPlan};
use std::sync::Arc;
use tracing::{info, warn};

/// Service for AI-powered item analysis.
///
/// Orchestrates the flow:
/// 1. Build the prompt (or short-circuit when the item has no text yet)
/// 2. Check the analysis cache
/// 3. On a miss, call the LLM and interpret its answer
/// 4. Store the result; failures are reported but not stored
pub struct AnalysisService {
    llm: Arc<dyn LlmPort>,
    cache: AnalysisCache,
}

impl AnalysisService {
    /// Create a new analysis service.
    ///
    /// # Arguments
    /// * `llm` - LLM port implementation (OpenAI-compatible, Mock, etc.)
    /// * `cache` - Session-owned analysis cache
    pub fn new(llm: Arc<dyn LlmPort>, cache: AnalysisCache) -> Self {
        Self { llm, cache }
    }

    /// Analyze one item in `mode`.
    ///
    /// Idempotent per (item_id, mode): repeated calls return the first successful result,
    /// even if the text has since gone empty. Pending short-circuits are not cached, so an
    /// item gets analyzed once its text appears.
    pub async fn analyze(
        &self,
        item_id: &str,
        title: &str,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisView, DomainError> {
        let key = AnalysisKey::new(item_id, mode);
        // A stored result answers for its key whatever text the item carries now.
        if let Some(hit) = self.cache.peek(&key).await? {
            return Ok(AnalysisView::Ready(hit));
        }

        let request = match prompt::build(mode, title, text) {
            PromptPlan::Ready(p) => p,
            PromptPlan::Pending => {
                info!(item_id, mode = %mode, "no substantive text; skipping LLM call");
                return Ok(AnalysisView::Pending {
                    message: PENDING_MESSAGE.to_string(),
                });
            }
        };

        let llm = Arc::clone(&self.llm);
        let computed = self
            .cache
            .get_or_try_compute(&key, move || async move {
                let raw = llm.generate(&request).await?;
                Ok::<_, DomainError>(interpret(mode, &raw))
            })
            .await;

        match computed {
            Ok(result) => Ok(AnalysisView::Ready(result)),
            Err(DomainError::Invocation(msg)) => {
                warn!(key = %key, error = %msg, "analysis failed");
                Ok(AnalysisView::Failed {
                    message: format!("AI Connection Error: {}", msg),
                })
            }
            Err(e) => Err(e),
        }
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }
}
