//! Federal Register adapter. Lists recent executive orders.

use super::get_json;
use crate::domain::{DomainError, Item, ItemQuery, ItemSource};
use crate::ports::DataSourcePort;
use serde::Deserialize;
use tracing::info;

/// Body text for orders published without an abstract.
pub const NO_ABSTRACT: &str = "No abstract available.";

/// Federal Register documents API adapter. No key required.
pub struct FederalRegisterAdapter {
    client: reqwest::Client,
    base_url: String,
    default_limit: usize,
}

impl FederalRegisterAdapter {
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://www.federalregister.gov/api/v1"
    /// * `default_limit` - Orders per fetch when the query sets none
    pub fn new(base_url: String, default_limit: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            default_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentsResponse {
    #[serde(default)]
    results: Vec<DocumentRecord>,
}

#[derive(Debug, Deserialize)]
struct DocumentRecord {
    document_number: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "abstract")]
    summary: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    executive_order_number: Option<serde_json::Value>,
    #[serde(default)]
    signing_date: Option<String>,
    #[serde(default)]
    publication_date: Option<String>,
}

/// Map a Federal Register document to a domain Item. Id is the document number.
fn document_to_item(doc: DocumentRecord) -> Item {
    let eo_number = doc.executive_order_number.and_then(|v| match v {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    });

    let mut status = Vec::new();
    if let Some(n) = &eo_number {
        status.push(format!("EO {}", n));
    }
    match (&doc.signing_date, &doc.publication_date) {
        (Some(signed), _) => status.push(format!("Signed {}", signed)),
        (None, Some(published)) => status.push(format!("Published {}", published)),
        (None, None) => {}
    }
    let status_text = if status.is_empty() {
        "Status unknown".to_string()
    } else {
        status.join(" · ")
    };

    Item {
        id: doc.document_number,
        source: ItemSource::ExecutiveOrder,
        title: doc.title.unwrap_or_else(|| "Untitled order".to_string()),
        body_text: doc
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| NO_ABSTRACT.to_string()),
        status_text,
        url: doc.html_url,
        date: doc.signing_date.or(doc.publication_date),
    }
}

#[async_trait::async_trait]
impl DataSourcePort for FederalRegisterAdapter {
    fn source(&self) -> ItemSource {
        ItemSource::ExecutiveOrder
    }

    async fn fetch(&self, query: &ItemQuery) -> Result<Vec<Item>, DomainError> {
        let url = format!("{}/documents.json", self.base_url);
        let limit = query.limit.unwrap_or(self.default_limit).to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("conditions[type][]", "PRESDOCU"),
            ("conditions[presidential_document_type][]", "executive_order"),
            ("order", "newest"),
            ("per_page", limit.as_str()),
        ];
        if let Some(term) = query.term() {
            params.push(("conditions[term]", term));
        }

        let resp: DocumentsResponse = get_json(self.client.get(&url).query(&params), &url).await?;
        let items: Vec<Item> = resp.results.into_iter().map(document_to_item).collect();

        info!(count = items.len(), "fetched executive orders");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_mapping() {
        let json = r#"{
            "count": 2,
            "results": [
                {
                    "title": "Protecting the American People Against Invasion",
                    "type": "Presidential Document",
                    "abstract": "Directs agencies to review enforcement priorities.",
                    "document_number": "2025-02006",
                    "html_url": "https://www.federalregister.gov/documents/2025/01/29/2025-02006/protecting",
                    "publication_date": "2025-01-29",
                    "signing_date": "2025-01-20",
                    "executive_order_number": 14159
                },
                {
                    "title": "Untitled",
                    "document_number": "2025-09999",
                    "abstract": null,
                    "publication_date": "2025-03-01"
                }
            ]
        }"#;
        let resp: DocumentsResponse = serde_json::from_str(json).unwrap();
        let items: Vec<Item> = resp.results.into_iter().map(document_to_item).collect();

        assert_eq!(items[0].id, "2025-02006");
        assert_eq!(items[0].source, ItemSource::ExecutiveOrder);
        assert_eq!(items[0].status_text, "EO 14159 · Signed 2025-01-20");
        assert_eq!(
            items[0].body_text,
            "Directs agencies to review enforcement priorities."
        );
        assert_eq!(items[0].date.as_deref(), Some("2025-01-20"));

        assert_eq!(items[1].body_text, NO_ABSTRACT);
        assert_eq!(items[1].status_text, "Published 2025-03-01");
        assert!(items[1].url.is_none());
    }
}
