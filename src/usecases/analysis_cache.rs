//! Analysis cache. Memoizes (item id, mode) -> AnalysisResult for the session.
//!
//! - Hits return the stored result without running `compute`.
//! - At most one computation per key is in flight; concurrent callers for the same
//!   key wait on a per-key gate, then re-check storage and reuse the first result.
//! - Failed computations are not stored, so the next trigger retries.
//! - No eviction: entries live as long as the storage does.

use crate::domain::{AnalysisKey, AnalysisResult, DomainError};
use crate::ports::AnalysisStorePort;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Session-owned analysis cache over injectable storage.
pub struct AnalysisCache {
    store: Arc<dyn AnalysisStorePort>,
    /// One async gate per key ever computed. Bounded by items x modes.
    gates: Mutex<HashMap<AnalysisKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl AnalysisCache {
    pub fn new(store: Arc<dyn AnalysisStorePort>) -> Self {
        Self {
            store,
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached result for `key`, or run `compute` once and store its result.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &AnalysisKey,
        compute: F,
    ) -> Result<AnalysisResult, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AnalysisResult>,
    {
        self.get_or_try_compute(key, move || async move { Ok(compute().await) })
            .await
    }

    /// Fallible variant. An `Err` from `compute` is returned as-is and nothing is stored.
    pub async fn get_or_try_compute<F, Fut>(
        &self,
        key: &AnalysisKey,
        compute: F,
    ) -> Result<AnalysisResult, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AnalysisResult, DomainError>>,
    {
        if let Some(hit) = self.store.get(key).await? {
            debug!(key = %key, "analysis cache hit");
            return Ok(hit);
        }

        let gate = self.gate_for(key);
        let _guard = gate.lock().await;

        // Another caller may have finished while we waited on the gate.
        if let Some(hit) = self.store.get(key).await? {
            debug!(key = %key, "analysis cache hit after wait");
            return Ok(hit);
        }

        info!(key = %key, "analysis cache miss; computing");
        let result = compute().await?;

        if let Err(e) = self.store.put(key, &result).await {
            warn!(key = %key, error = %e, "failed to store analysis; returning uncached result");
        }
        Ok(result)
    }

    /// Cached result for `key`, if any. Never computes.
    pub async fn peek(&self, key: &AnalysisKey) -> Result<Option<AnalysisResult>, DomainError> {
        self.store.get(key).await
    }

    pub async fn len(&self) -> Result<usize, DomainError> {
        self.store.len().await
    }

    fn gate_for(&self, key: &AnalysisKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(gates.entry(key.clone()).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;
    use crate::domain::{AnalysisMode, RiskScore};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn cache() -> AnalysisCache {
        AnalysisCache::new(Arc::new(MemoryStore::new()))
    }

    fn result(score: RiskScore, body: &str) -> AnalysisResult {
        AnalysisResult {
            score,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_call_is_a_hit() {
        let cache = cache();
        let key = AnalysisKey::new("HR123", AnalysisMode::Constitution);
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_compute(&key, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                result(RiskScore::Extracted(7), "first")
            })
            .await
            .unwrap();
        let second = cache
            .get_or_compute(&key, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                result(RiskScore::Extracted(1), "second")
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(second.body, "first");
    }

    #[tokio::test]
    async fn test_keys_differ_by_mode() {
        let cache = cache();
        let impact = AnalysisKey::new("HR123", AnalysisMode::Impact);
        let sentiment = AnalysisKey::new("HR123", AnalysisMode::Sentiment);

        cache
            .get_or_compute(&impact, || async { result(RiskScore::Unscored, "impact") })
            .await
            .unwrap();
        let got = cache
            .get_or_compute(&sentiment, || async {
                result(RiskScore::Unscored, "sentiment")
            })
            .await
            .unwrap();

        assert_eq!(got.body, "sentiment");
        assert_eq!(cache.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache = cache();
        let key = AnalysisKey::new("EO-1", AnalysisMode::Impact);

        let failed = cache
            .get_or_try_compute(&key, || async {
                Err(DomainError::Invocation("quota exceeded".into()))
            })
            .await;
        assert!(matches!(failed, Err(DomainError::Invocation(_))));
        assert!(cache.peek(&key).await.unwrap().is_none());

        let ok = cache
            .get_or_try_compute(&key, || async { Ok(result(RiskScore::Unscored, "ok")) })
            .await
            .unwrap();
        assert_eq!(ok.body, "ok");
        assert_eq!(cache.peek(&key).await.unwrap(), Some(ok));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_one_computation() {
        let cache = Arc::new(cache());
        let key = AnalysisKey::new("HR9", AnalysisMode::Constitution);
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_compute(&key, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        result(RiskScore::Extracted(i), "shared")
                    })
                    .await
                    .unwrap()
            }));
        }

        let mut results = Vec::new();
        for h in handles {
            results.push(h.await.unwrap());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_new_body_text_does_not_invalidate() {
        let cache = cache();
        let key = AnalysisKey::new("S42", AnalysisMode::Impact);

        cache
            .get_or_compute(&key, || async { result(RiskScore::Unscored, "old text analysis") })
            .await
            .unwrap();
        let again = cache
            .get_or_compute(&key, || async { result(RiskScore::Unscored, "new text analysis") })
            .await
            .unwrap();

        assert_eq!(again.body, "old text analysis");
    }
}
