//! Public records adapters. Implement DataSourcePort.
//!
//! Each adapter maps its API's JSON into domain `Item`s. Non-success statuses and
//! transport errors become `DomainError::Fetch`.

pub mod congress;
pub mod court_listener;
pub mod federal_register;

pub use congress::CongressAdapter;
pub use court_listener::CourtListenerAdapter;
pub use federal_register::FederalRegisterAdapter;

use crate::domain::DomainError;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Send `request` and decode the JSON body.
///
/// `url` is only used for logs and must not include query values; they may carry API keys.
async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<T, DomainError> {
    debug!(url, "fetching");
    let resp = request
        .send()
        .await
        .map_err(|e| DomainError::Fetch(format!("Connection Error: {}", e.without_url())))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!(url, status = %status, "source returned error");
        return Err(DomainError::Fetch(format!(
            "API Error: {} {}",
            status.as_u16(),
            body.chars().take(200).collect::<String>()
        )));
    }

    resp.json::<T>()
        .await
        .map_err(|e| DomainError::Fetch(format!("Failed to parse response: {}", e.without_url())))
}

/// Case-insensitive match of `term` against any of `fields`.
fn matches_term(term: &str, fields: &[&str]) -> bool {
    let needle = term.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}
