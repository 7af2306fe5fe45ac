//! Inbound ports. UI (adapter) calls into the application.

use crate::domain::{AnalysisMode, AnalysisResult, DomainError, Item, ItemDetails, ItemQuery};

/// A list panel's contents. A failed fetch yields no items and a warning to show.
#[derive(Debug, Clone, Default)]
pub struct ItemsView {
    pub items: Vec<Item>,
    pub warning: Option<String>,
}

/// Detail panel contents for one item.
#[derive(Debug, Clone)]
pub struct ItemDetailView {
    pub item: Item,
    pub details: Option<ItemDetails>,
}

/// Outcome of an analysis request, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisView {
    /// The item has no substantive text yet; the LLM was not called.
    Pending { message: String },
    Ready(AnalysisResult),
    /// The LLM call failed. Nothing was cached; triggering again retries.
    Failed { message: String },
}

/// Read/write operations the presentation layer uses.
#[async_trait::async_trait]
pub trait DashboardPort: Send + Sync {
    async fn get_bills_view(&self, query: &ItemQuery) -> ItemsView;

    async fn get_orders_view(&self, query: &ItemQuery) -> ItemsView;

    async fn get_cases_view(&self, query: &ItemQuery) -> ItemsView;

    async fn get_item_detail(&self, item_id: &str) -> Result<ItemDetailView, DomainError>;

    async fn get_item_analysis(
        &self,
        item_id: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisView, DomainError>;

    fn get_selection(&self, panel: &str) -> Option<String>;

    fn set_selection(&self, panel: &str, item_id: &str);
}

/// Input port: the interactive front end driving the dashboard.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive loop until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
