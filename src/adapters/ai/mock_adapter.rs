//! Mock LLM adapter for running without an API key.
//!
//! Returns canned responses shaped like real ones, so the risk meter and the
//! pending/ready flows can be exercised offline.

use crate::domain::DomainError;
use crate::ports::LlmPort;
use crate::usecases::prompt::RISK_SCORE_MARKER;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Mock LLM adapter.
///
/// Simulates network latency with configurable delay and counts calls.
pub struct MockLlmAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    calls: AtomicUsize,
}

impl MockLlmAdapter {
    /// Create a new mock adapter with default delay (300ms).
    pub fn new() -> Self {
        Self::with_delay(300)
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockLlmAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmPort for MockLlmAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        info!(prompt_len = prompt.len(), "[MOCK] Simulating LLM call");

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        // Constitution prompts quote the marker; answer in the requested format.
        if prompt.contains(RISK_SCORE_MARKER) {
            let score = (prompt.len() % 10) + 1;
            return Ok(format!(
                "{} {}\n\n[MOCK] This is a simulated constitutional review. With a real API key \
                 configured, this would discuss the enumerated powers, individual rights and \
                 precedent relevant to the measure.",
                RISK_SCORE_MARKER, score
            ));
        }

        Ok("[MOCK] - This measure changes how a federal program works.\n\
            - It matters because it affects who qualifies and how money is spent.\n\
            - Configure POLICY_TRACKER_AI_API_KEY for a real analysis."
            .to_string())
    }
}
