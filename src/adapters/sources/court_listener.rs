//! CourtListener v4 search adapter. Lists recent Supreme Court opinions.

use super::get_json;
use crate::domain::{DomainError, Item, ItemQuery, ItemSource};
use crate::ports::DataSourcePort;
use serde::Deserialize;
use tracing::info;

const SITE_ROOT: &str = "https://www.courtlistener.com";

/// CourtListener REST adapter. Anonymous access works; a token raises rate limits.
pub struct CourtListenerAdapter {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    default_limit: usize,
}

impl CourtListenerAdapter {
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://www.courtlistener.com/api/rest/v4"
    /// * `token` - Optional API token
    /// * `default_limit` - Cases per fetch when the query sets none
    pub fn new(base_url: String, token: Option<String>, default_limit: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            default_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CaseRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaseRecord {
    #[serde(rename = "cluster_id")]
    cluster_id: u64,
    #[serde(default)]
    case_name: Option<String>,
    #[serde(default)]
    date_filed: Option<String>,
    #[serde(default)]
    docket_number: Option<String>,
    #[serde(default, rename = "absolute_url")]
    absolute_url: Option<String>,
    #[serde(default)]
    syllabus: Option<String>,
    #[serde(default)]
    opinions: Vec<OpinionHit>,
}

#[derive(Debug, Deserialize)]
struct OpinionHit {
    #[serde(default)]
    snippet: Option<String>,
}

/// Map a search hit to a domain Item. Id is `SCOTUS-{cluster_id}`.
fn case_to_item(case: CaseRecord) -> Item {
    let body_text = case
        .syllabus
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            case.opinions
                .into_iter()
                .filter_map(|o| o.snippet)
                .find(|s| !s.trim().is_empty())
        })
        .unwrap_or_default();

    let mut status = Vec::new();
    if let Some(d) = &case.date_filed {
        status.push(format!("Decided {}", d));
    }
    if let Some(n) = case.docket_number.as_deref().filter(|n| !n.is_empty()) {
        status.push(format!("Docket {}", n));
    }

    Item {
        id: format!("SCOTUS-{}", case.cluster_id),
        source: ItemSource::CourtCase,
        title: case.case_name.unwrap_or_else(|| "Unnamed case".to_string()),
        body_text,
        status_text: if status.is_empty() {
            "Status unknown".to_string()
        } else {
            status.join(" · ")
        },
        url: case.absolute_url.map(|u| format!("{}{}", SITE_ROOT, u)),
        date: case.date_filed,
    }
}

#[async_trait::async_trait]
impl DataSourcePort for CourtListenerAdapter {
    fn source(&self) -> ItemSource {
        ItemSource::CourtCase
    }

    async fn fetch(&self, query: &ItemQuery) -> Result<Vec<Item>, DomainError> {
        let url = format!("{}/search/", self.base_url);
        let mut params: Vec<(&str, &str)> = vec![
            ("type", "o"),
            ("court", "scotus"),
            ("order_by", "dateFiled desc"),
        ];
        if let Some(term) = query.term() {
            params.push(("q", term));
        }

        let mut req = self.client.get(&url).query(&params);
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Token {}", token));
        }

        let resp: SearchResponse = get_json(req, &url).await?;
        let limit = query.limit.unwrap_or(self.default_limit);
        let items: Vec<Item> = resp
            .results
            .into_iter()
            .take(limit)
            .map(case_to_item)
            .collect();

        info!(count = items.len(), "fetched court cases");
        Ok(items)
    }
}
