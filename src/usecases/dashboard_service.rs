//! Dashboard service. Implements the UI boundary (`DashboardPort`).
//!
//! - Fetches list panels through data-source ports, TTL-cached per (source, query)
//! - Degrades fetch failures to an empty list plus a warning
//! - Clears a panel's selection when its query changes (collection replaced)
//! - Routes analysis requests to `AnalysisService`, using fetched details when present

use crate::domain::{AnalysisMode, DomainError, Item, ItemDetails, ItemQuery, ItemSource};
use crate::ports::{
    AnalysisView, DashboardPort, DataSourcePort, ItemDetailView, ItemsView,
};
use crate::shared::TtlCache;
use crate::usecases::analysis_service::AnalysisService;
use crate::usecases::selection::SelectionCoordinator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, warn};

struct SourceSlot {
    adapter: Arc<dyn DataSourcePort>,
    ttl_secs: i64,
}

/// Session context behind the presentation layer.
pub struct DashboardService {
    sources: HashMap<ItemSource, SourceSlot>,
    feeds: TtlCache<(ItemSource, ItemQuery), Vec<Item>>,
    details: TtlCache<String, ItemDetails>,
    /// Latest copy of every item seen this session, by id.
    catalog: RwLock<HashMap<String, Item>>,
    last_queries: Mutex<HashMap<ItemSource, ItemQuery>>,
    analysis: AnalysisService,
    selection: SelectionCoordinator,
}

impl DashboardService {
    pub fn new(analysis: AnalysisService) -> Self {
        Self {
            sources: HashMap::new(),
            feeds: TtlCache::new(),
            details: TtlCache::new(),
            catalog: RwLock::new(HashMap::new()),
            last_queries: Mutex::new(HashMap::new()),
            analysis,
            selection: SelectionCoordinator::new(),
        }
    }

    /// Register a data source. Its results are cached for `ttl_secs`.
    pub fn with_source(mut self, adapter: Arc<dyn DataSourcePort>, ttl_secs: i64) -> Self {
        self.sources
            .insert(adapter.source(), SourceSlot { adapter, ttl_secs });
        self
    }

    /// List panel contents for `source`.
    pub async fn get_view(&self, source: ItemSource, query: &ItemQuery) -> ItemsView {
        self.note_query(source, query);

        let Some(slot) = self.sources.get(&source) else {
            return ItemsView {
                items: Vec::new(),
                warning: Some(format!("{} source is not configured.", source.label())),
            };
        };

        let key = (source, query.clone());
        let items = match self.feeds.get(&key) {
            Some(hit) => {
                debug!(panel = source.panel(), "fetch cache hit");
                hit
            }
            None => match slot.adapter.fetch(query).await {
                Ok(items) => {
                    self.feeds.clear_expired();
                    self.feeds.insert(key, items.clone(), slot.ttl_secs);
                    items
                }
                Err(e) => {
                    warn!(panel = source.panel(), error = %e, "fetch failed; showing empty list");
                    return ItemsView {
                        items: Vec::new(),
                        warning: Some(format!("Could not load {}: {}", source.label(), e)),
                    };
                }
            },
        };

        self.remember(&items);
        ItemsView {
            items,
            warning: None,
        }
    }

    fn lookup(&self, item_id: &str) -> Result<Item, DomainError> {
        let catalog = self.catalog.read().unwrap_or_else(|e| e.into_inner());
        catalog
            .get(item_id)
            .cloned()
            .ok_or_else(|| DomainError::ItemNotFound(item_id.to_string()))
    }

    fn remember(&self, items: &[Item]) {
        let mut catalog = self.catalog.write().unwrap_or_else(|e| e.into_inner());
        for item in items {
            catalog.insert(item.id.clone(), item.clone());
        }
    }

    /// A different query replaces the panel's collection, which drops its selection.
    fn note_query(&self, source: ItemSource, query: &ItemQuery) {
        let mut last = self.last_queries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = last.insert(source, query.clone()) {
            if previous != *query {
                info!(panel = source.panel(), "collection replaced; clearing selection");
                self.selection.clear(source.panel());
            }
        }
    }

    /// On-demand details, TTL-cached like the source's lists. Failures yield `None`;
    /// partial details are returned but not cached, so the next request retries.
    async fn details_for(&self, item: &Item) -> Option<ItemDetails> {
        if let Some(hit) = self.details.get(&item.id) {
            return Some(hit);
        }
        let slot = self.sources.get(&item.source)?;
        match slot.adapter.details(item).await {
            Ok(Some(details)) => {
                if details.partial {
                    debug!(item_id = %item.id, "partial details; not caching");
                } else {
                    self.details
                        .insert(item.id.clone(), details.clone(), slot.ttl_secs);
                }
                Some(details)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(item_id = %item.id, error = %e, "details fetch failed");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl DashboardPort for DashboardService {
    async fn get_bills_view(&self, query: &ItemQuery) -> ItemsView {
        self.get_view(ItemSource::Legislation, query).await
    }

    async fn get_orders_view(&self, query: &ItemQuery) -> ItemsView {
        self.get_view(ItemSource::ExecutiveOrder, query).await
    }

    async fn get_cases_view(&self, query: &ItemQuery) -> ItemsView {
        self.get_view(ItemSource::CourtCase, query).await
    }

    async fn get_item_detail(&self, item_id: &str) -> Result<ItemDetailView, DomainError> {
        let item = self.lookup(item_id)?;
        let details = self.details_for(&item).await;
        Ok(ItemDetailView { item, details })
    }

    async fn get_item_analysis(
        &self,
        item_id: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisView, DomainError> {
        let item = self.lookup(item_id)?;
        let text = self
            .details_for(&item)
            .await
            .and_then(|d| d.summary)
            .unwrap_or_else(|| item.body_text.clone());
        self.analysis
            .analyze(&item.id, &item.title, &text, mode)
            .await
    }

    fn get_selection(&self, panel: &str) -> Option<String> {
        self.selection.get_selection(panel)
    }

    fn set_selection(&self, panel: &str, item_id: &str) {
        self.selection.set_selection(panel, item_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;
    use crate::domain::{PANEL_LEGISLATION, RiskScore};
    use crate::usecases::analysis_cache::AnalysisCache;
    use crate::usecases::prompt::PENDING_MESSAGE;
    use crate::usecases::test_support::{ScriptedLlm, StubSource, item};

    fn dashboard(llm: Arc<ScriptedLlm>, sources: Vec<Arc<StubSource>>) -> DashboardService {
        let analysis =
            AnalysisService::new(llm, AnalysisCache::new(Arc::new(MemoryStore::new())));
        sources
            .into_iter()
            .fold(DashboardService::new(analysis), |d, s| d.with_source(s, 600))
    }

    fn bills() -> Vec<Item> {
        vec![
            item(
                ItemSource::Legislation,
                "HR123",
                "Clean Water Act Amendments",
                "Official summary text not yet available for this bill.",
            ),
            item(
                ItemSource::Legislation,
                "S42",
                "Farm Credit Modernization",
                "Expands lending authority for rural cooperatives.",
            ),
        ]
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_warning() {
        let source = StubSource::new(ItemSource::Legislation, bills());
        source.set_failing(true);
        let svc = dashboard(ScriptedLlm::new(vec![]), vec![Arc::clone(&source)]);

        let view = svc.get_bills_view(&ItemQuery::latest()).await;

        assert!(view.items.is_empty());
        let warning = view.warning.unwrap();
        assert!(warning.contains("Proposed Laws"));
        assert!(warning.contains("429"));
    }

    #[tokio::test]
    async fn test_failures_are_not_fetch_cached() {
        let source = StubSource::new(ItemSource::Legislation, bills());
        source.set_failing(true);
        let svc = dashboard(ScriptedLlm::new(vec![]), vec![Arc::clone(&source)]);

        svc.get_bills_view(&ItemQuery::latest()).await;
        source.set_failing(false);
        let view = svc.get_bills_view(&ItemQuery::latest()).await;

        assert_eq!(view.items.len(), 2);
        assert!(view.warning.is_none());
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test]
    async fn test_views_are_ttl_cached() {
        let source = StubSource::new(ItemSource::Legislation, bills());
        let svc = dashboard(ScriptedLlm::new(vec![]), vec![Arc::clone(&source)]);

        svc.get_bills_view(&ItemQuery::latest()).await;
        svc.get_bills_view(&ItemQuery::latest()).await;

        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_source_warns() {
        let svc = dashboard(ScriptedLlm::new(vec![]), vec![]);
        let view = svc.get_cases_view(&ItemQuery::latest()).await;
        assert!(view.items.is_empty());
        assert!(view.warning.is_some());
    }

    #[tokio::test]
    async fn test_new_query_clears_selection() {
        let source = StubSource::new(ItemSource::Legislation, bills());
        let svc = dashboard(ScriptedLlm::new(vec![]), vec![source]);

        svc.get_bills_view(&ItemQuery::latest()).await;
        svc.set_selection(PANEL_LEGISLATION, "HR123");
        assert_eq!(svc.get_selection(PANEL_LEGISLATION).as_deref(), Some("HR123"));

        // Same query: the collection is unchanged and so is the selection.
        svc.get_bills_view(&ItemQuery::latest()).await;
        assert_eq!(svc.get_selection(PANEL_LEGISLATION).as_deref(), Some("HR123"));

        let view = svc.get_bills_view(&ItemQuery::search("farm")).await;
        assert_eq!(view.items.len(), 1);
        assert_eq!(svc.get_selection(PANEL_LEGISLATION), None);
        assert_eq!(svc.get_selection("other_panel"), None);
    }

    #[tokio::test]
    async fn test_analysis_of_unknown_item() {
        let svc = dashboard(ScriptedLlm::new(vec![]), vec![]);
        let err = svc
            .get_item_analysis("HR999", AnalysisMode::Impact)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ItemNotFound(_)));
    }

    #[tokio::test]
    async fn test_placeholder_bill_is_pending_without_llm_call() {
        let llm = ScriptedLlm::new(vec![Ok("unused".into())]);
        let source = StubSource::new(ItemSource::Legislation, bills());
        let svc = dashboard(Arc::clone(&llm), vec![source]);

        svc.get_bills_view(&ItemQuery::latest()).await;
        let view = svc
            .get_item_analysis("HR123", AnalysisMode::Impact)
            .await
            .unwrap();

        assert_eq!(
            view,
            AnalysisView::Pending {
                message: PENDING_MESSAGE.to_string()
            }
        );
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_details_summary_feeds_analysis() {
        let llm = ScriptedLlm::new(vec![Ok("Risk Score: 2\nLow risk.".into())]);
        let source = StubSource::with_details(
            ItemSource::Legislation,
            bills(),
            Some(ItemDetails {
                sponsor_party: Some("R".into()),
                summary: Some("This bill sets new discharge limits.".into()),
                floor_votes: vec![],
                partial: false,
            }),
        );
        let svc = dashboard(Arc::clone(&llm), vec![source]);

        svc.get_bills_view(&ItemQuery::latest()).await;
        let view = svc
            .get_item_analysis("HR123", AnalysisMode::Constitution)
            .await
            .unwrap();
        let AnalysisView::Ready(result) = view else {
            panic!("expected ready analysis");
        };
        assert_eq!(result.score, RiskScore::Extracted(2));

        let detail = svc.get_item_detail("HR123").await.unwrap();
        assert_eq!(detail.item.id, "HR123");
        assert_eq!(
            detail.details.and_then(|d| d.sponsor_party).as_deref(),
            Some("R")
        );
    }

    #[tokio::test]
    async fn test_reappearing_item_keeps_cached_analysis() {
        let llm = ScriptedLlm::new(vec![Ok("First analysis".into())]);
        let source = StubSource::new(ItemSource::Legislation, bills());
        let svc = dashboard(Arc::clone(&llm), vec![source]);

        svc.get_bills_view(&ItemQuery::latest()).await;
        let first = svc
            .get_item_analysis("S42", AnalysisMode::Sentiment)
            .await
            .unwrap();

        svc.get_bills_view(&ItemQuery::search("farm")).await;
        let second = svc
            .get_item_analysis("S42", AnalysisMode::Sentiment)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_partial_details_are_retried() {
        let llm = ScriptedLlm::new(vec![Ok("Risk Score: 3\nModest.".into())]);
        let source = StubSource::with_details(
            ItemSource::Legislation,
            bills(),
            Some(ItemDetails {
                sponsor_party: Some("D".into()),
                summary: None,
                floor_votes: vec![],
                partial: true,
            }),
        );
        let svc = dashboard(Arc::clone(&llm), vec![Arc::clone(&source)]);
        svc.get_bills_view(&ItemQuery::latest()).await;

        let pending = svc
            .get_item_analysis("HR123", AnalysisMode::Constitution)
            .await
            .unwrap();
        assert!(matches!(pending, AnalysisView::Pending { .. }));
        assert_eq!(llm.calls(), 0);

        source.set_details(Some(ItemDetails {
            sponsor_party: Some("D".into()),
            summary: Some("Caps agricultural runoff.".into()),
            floor_votes: vec![],
            partial: false,
        }));
        let ready = svc
            .get_item_analysis("HR123", AnalysisMode::Constitution)
            .await
            .unwrap();
        assert!(matches!(ready, AnalysisView::Ready(_)));
        assert_eq!(source.detail_fetches(), 2);

        // Complete details stay cached.
        svc.get_item_detail("HR123").await.unwrap();
        assert_eq!(source.detail_fetches(), 2);
        assert_eq!(llm.calls(), 1);
    }
}
