//! Congress.gov v3 adapter. Lists recent bills and fetches per-bill details on demand.
//!
//! The list endpoint carries no summary text, so bills start with a placeholder body;
//! `details` supplies the summary, sponsor party and floor-vote actions.

use super::{get_json, matches_term};
use crate::domain::{DomainError, Item, ItemDetails, ItemQuery, ItemSource};
use crate::ports::DataSourcePort;
use serde::Deserialize;
use tracing::{info, warn};

/// Body text until the Library of Congress publishes a summary.
pub const SUMMARY_PLACEHOLDER: &str = "Official summary text not yet available for this bill.";

const STATUS_PENDING: &str = "Status Pending";

/// Congress.gov API adapter.
///
/// Requires an api.data.gov key (`DEMO_KEY` works with low rate limits).
pub struct CongressAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    congress: String,
    default_limit: usize,
}

impl CongressAdapter {
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://api.congress.gov/v3"
    /// * `api_key` - api.data.gov key
    /// * `congress` - Congress number, e.g. "119"
    /// * `default_limit` - Bills per fetch when the query sets none
    pub fn new(base_url: String, api_key: String, congress: String, default_limit: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            congress,
            default_limit,
        }
    }

    fn request(&self, path: &str) -> (reqwest::RequestBuilder, String) {
        let url = format!("{}/{}", self.base_url, path);
        let req = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("format", "json")]);
        (req, url)
    }

    /// Split an item id like `HR123` back into ("hr", "123").
    fn bill_ref(item_id: &str) -> Option<(String, String)> {
        let split = item_id.find(|c: char| c.is_ascii_digit())?;
        let (kind, number) = item_id.split_at(split);
        if kind.is_empty() || number.is_empty() {
            return None;
        }
        Some((kind.to_lowercase(), number.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct BillsResponse {
    #[serde(default)]
    bills: Vec<BillRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BillRecord {
    number: String,
    #[serde(rename = "type")]
    bill_type: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    latest_action: Option<LatestAction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestAction {
    #[serde(default)]
    action_date: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BillDetailResponse {
    bill: BillDetail,
}

#[derive(Debug, Deserialize)]
struct BillDetail {
    #[serde(default)]
    sponsors: Vec<Sponsor>,
}

#[derive(Debug, Deserialize)]
struct Sponsor {
    #[serde(default)]
    party: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummariesResponse {
    #[serde(default)]
    summaries: Vec<Summary>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionsResponse {
    #[serde(default)]
    actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
struct Action {
    #[serde(default)]
    text: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Map a bill record to a domain Item. Id is `{TYPE}{number}`, e.g. `HR123`.
fn bill_to_item(bill: BillRecord, congress: &str) -> Item {
    let kind = bill.bill_type.to_uppercase();
    let (status_text, date) = match bill.latest_action {
        Some(a) => (
            a.text
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| STATUS_PENDING.to_string()),
            a.action_date,
        ),
        None => (STATUS_PENDING.to_string(), None),
    };
    Item {
        id: format!("{}{}", kind, bill.number),
        source: ItemSource::Legislation,
        title: bill.title.unwrap_or_else(|| "No Title".to_string()),
        body_text: SUMMARY_PLACEHOLDER.to_string(),
        status_text,
        url: public_bill_url(congress, &kind, &bill.number),
        date,
    }
}

/// congress.gov page for a bill, e.g. `.../bill/119th-congress/house-bill/123`.
fn public_bill_url(congress: &str, kind: &str, number: &str) -> Option<String> {
    let slug = match kind {
        "HR" => "house-bill",
        "S" => "senate-bill",
        "HJRES" => "house-joint-resolution",
        "SJRES" => "senate-joint-resolution",
        "HCONRES" => "house-concurrent-resolution",
        "SCONRES" => "senate-concurrent-resolution",
        "HRES" => "house-resolution",
        "SRES" => "senate-resolution",
        _ => return None,
    };
    let n: u32 = congress.parse().ok()?;
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    Some(format!(
        "https://www.congress.gov/bill/{}{}-congress/{}/{}",
        n, suffix, slug, number
    ))
}

/// Summaries arrive as HTML fragments. Drop tags and collapse whitespace.
fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&amp;", "&")
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn floor_votes(actions: Vec<Action>) -> Vec<String> {
    actions
        .into_iter()
        .filter_map(|a| a.text)
        .filter(|t| t.contains("Vote"))
        .collect()
}

#[async_trait::async_trait]
impl DataSourcePort for CongressAdapter {
    fn source(&self) -> ItemSource {
        ItemSource::Legislation
    }

    async fn fetch(&self, query: &ItemQuery) -> Result<Vec<Item>, DomainError> {
        let limit = query.limit.unwrap_or(self.default_limit);
        let (req, url) = self.request(&format!("bill/{}", self.congress));
        let resp: BillsResponse = get_json(req.query(&[("limit", limit)]), &url).await?;

        let mut items: Vec<Item> = resp
            .bills
            .into_iter()
            .map(|b| bill_to_item(b, &self.congress))
            .collect();
        if let Some(term) = query.term() {
            items.retain(|i| matches_term(term, &[i.id.as_str(), i.title.as_str()]));
        }

        info!(count = items.len(), congress = %self.congress, "fetched bills");
        Ok(items)
    }

    async fn details(&self, item: &Item) -> Result<Option<ItemDetails>, DomainError> {
        let Some((kind, number)) = Self::bill_ref(&item.id) else {
            return Err(DomainError::Fetch(format!("not a bill id: {}", item.id)));
        };
        let base = format!("bill/{}/{}/{}", self.congress, kind, number);
        let mut partial = false;

        let (req, url) = self.request(&base);
        let sponsor_party = match get_json::<BillDetailResponse>(req, &url).await {
            Ok(r) => r.bill.sponsors.into_iter().find_map(|s| s.party),
            Err(e) => {
                warn!(item_id = %item.id, error = %e, "sponsor lookup failed");
                partial = true;
                None
            }
        };

        let (req, url) = self.request(&format!("{}/summaries", base));
        let summary = match get_json::<SummariesResponse>(req, &url).await {
            Ok(r) => r
                .summaries
                .into_iter()
                .find_map(|s| s.text)
                .map(|t| strip_html(&t))
                .filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(item_id = %item.id, error = %e, "summary lookup failed");
                partial = true;
                None
            }
        };

        let (req, url) = self.request(&format!("{}/actions", base));
        let votes = match get_json::<ActionsResponse>(req, &url).await {
            Ok(r) => floor_votes(r.actions),
            Err(e) => {
                warn!(item_id = %item.id, error = %e, "actions lookup failed");
                partial = true;
                Vec::new()
            }
        };

        Ok(Some(ItemDetails {
            sponsor_party,
            summary,
            floor_votes: votes,
            partial,
        }))
    }
}
