//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/JSON wire types here; adapters map into these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Panel key for the bills list.
pub const PANEL_LEGISLATION: &str = "legislation";
/// Panel key for the executive orders list.
pub const PANEL_EXECUTIVE_ORDERS: &str = "executive_orders";
/// Panel key for the court cases list.
pub const PANEL_COURT_CASES: &str = "court_cases";

/// Where an item was fetched from. Each source feeds exactly one display panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    Legislation,
    ExecutiveOrder,
    CourtCase,
}

impl ItemSource {
    pub const ALL: [ItemSource; 3] = [
        ItemSource::Legislation,
        ItemSource::ExecutiveOrder,
        ItemSource::CourtCase,
    ];

    /// Panel key owning this source's selection slot.
    pub fn panel(self) -> &'static str {
        match self {
            ItemSource::Legislation => PANEL_LEGISLATION,
            ItemSource::ExecutiveOrder => PANEL_EXECUTIVE_ORDERS,
            ItemSource::CourtCase => PANEL_COURT_CASES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemSource::Legislation => "Proposed Laws",
            ItemSource::ExecutiveOrder => "Executive Orders",
            ItemSource::CourtCase => "Supreme Court Cases",
        }
    }
}

/// A tracked record: bill, executive order or court case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique within its source and stable across fetches (e.g. `HR123`).
    pub id: String,
    pub source: ItemSource,
    pub title: String,
    /// May be empty or a "not yet published" placeholder.
    pub body_text: String,
    pub status_text: String,
    pub url: Option<String>,
    pub date: Option<String>,
}

/// Search/filter parameters for a data-source fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ItemQuery {
    /// Free-text search; `None` or blank lists the latest items.
    pub search: Option<String>,
    /// Max items requested from the source. `None` uses the source's configured limit.
    pub limit: Option<usize>,
}

impl ItemQuery {
    pub fn latest() -> Self {
        Self::default()
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            limit: None,
        }
    }

    /// Trimmed, non-empty search term.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// On-demand enrichment for an item (bills only).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub sponsor_party: Option<String>,
    pub summary: Option<String>,
    /// Texts of recorded actions that mention a floor vote.
    pub floor_votes: Vec<String>,
    /// Some lookup failed; fields may be missing only for now.
    #[serde(default)]
    pub partial: bool,
}

/// Which prompt template and which interpretation rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Impact,
    Sentiment,
    Constitution,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [
        AnalysisMode::Impact,
        AnalysisMode::Sentiment,
        AnalysisMode::Constitution,
    ];

    /// Resolve a mode tag. Unknown tags resolve to `Impact` rather than failing.
    pub fn resolve(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "sentiment" => AnalysisMode::Sentiment,
            "constitution" | "constitutional" => AnalysisMode::Constitution,
            _ => AnalysisMode::Impact,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Impact => "impact",
            AnalysisMode::Sentiment => "sentiment",
            AnalysisMode::Constitution => "constitution",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one cacheable analysis: (item id, mode).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisKey {
    pub item_id: String,
    pub mode: AnalysisMode,
}

impl AnalysisKey {
    pub fn new(item_id: impl Into<String>, mode: AnalysisMode) -> Self {
        Self {
            item_id: item_id.into(),
            mode,
        }
    }
}

impl fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.item_id, self.mode)
    }
}

/// Risk score attached to an analysis.
///
/// `Extracted` values are kept as the model returned them, even outside 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskScore {
    Extracted(i64),
    Unscored,
}

impl RiskScore {
    /// Value reported for `Unscored`.
    pub const FALLBACK: i64 = 5;

    /// Integer for the risk meter. Always available.
    pub fn value(self) -> i64 {
        match self {
            RiskScore::Extracted(v) => v,
            RiskScore::Unscored => Self::FALLBACK,
        }
    }

    pub fn is_extracted(self) -> bool {
        matches!(self, RiskScore::Extracted(_))
    }
}

/// Interpreted analysis. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: RiskScore,
    /// The complete raw model text; never truncated.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_resolve_falls_back_to_impact() {
        assert_eq!(AnalysisMode::resolve("sentiment"), AnalysisMode::Sentiment);
        assert_eq!(
            AnalysisMode::resolve(" Constitution "),
            AnalysisMode::Constitution
        );
        assert_eq!(AnalysisMode::resolve("impact"), AnalysisMode::Impact);
        assert_eq!(AnalysisMode::resolve("economics"), AnalysisMode::Impact);
        assert_eq!(AnalysisMode::resolve(""), AnalysisMode::Impact);
    }

    #[test]
    fn test_unscored_value_is_fallback() {
        assert_eq!(RiskScore::Unscored.value(), 5);
        assert_eq!(RiskScore::Extracted(12).value(), 12);
        assert!(!RiskScore::Unscored.is_extracted());
    }

    #[test]
    fn test_source_panels() {
        assert_eq!(ItemSource::Legislation.panel(), "legislation");
        assert_eq!(ItemSource::ExecutiveOrder.panel(), "executive_orders");
        assert_eq!(ItemSource::CourtCase.panel(), "court_cases");
    }
}
