//! REST backend client
//!
//! Fetches the list endpoints of the personal finance backend. Paginated
//! responses are followed through their `next` links.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::wire::split_page;
use super::RawSnapshot;
use crate::error::{SpendwiseError, SpendwiseResult};

// Each backend app mounts its own router, so lists sit one level down.
pub const TRANSACTIONS_ENDPOINT: &str = "transactions/transactions/";
pub const BUDGETS_ENDPOINT: &str = "budgets/budgets/";
pub const CATEGORIES_ENDPOINT: &str = "transactions/categories/";
pub const ALERTS_ENDPOINT: &str = "budgets/budget-alerts/";

/// Upper bound on pages followed for a single list
const MAX_PAGES: usize = 100;
/// Longest error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the backend's list endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// `base_url` must end with `/`; endpoints are appended to it.
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> SpendwiseResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("spendwise/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            token,
        })
    }

    /// Fetch transactions, budgets, categories and alerts concurrently.
    ///
    /// The first failure aborts the whole load. The alerts endpoint is
    /// optional: a 404 there yields no alerts.
    pub async fn fetch_all(&self) -> SpendwiseResult<RawSnapshot> {
        let (transactions, budgets, categories, alerts) = tokio::try_join!(
            self.fetch_list(TRANSACTIONS_ENDPOINT),
            self.fetch_list(BUDGETS_ENDPOINT),
            self.fetch_list(CATEGORIES_ENDPOINT),
            self.fetch_optional_list(ALERTS_ENDPOINT),
        )?;

        Ok(RawSnapshot {
            transactions,
            budgets,
            categories,
            alerts,
        })
    }

    /// Fetch every record of a list endpoint, following pagination
    pub async fn fetch_list(&self, endpoint: &str) -> SpendwiseResult<Vec<Value>> {
        let mut url = format!("{}{}", self.base_url, endpoint);
        let mut records = Vec::new();

        for page in 1..=MAX_PAGES {
            tracing::debug!(endpoint, page, %url, "Fetching page");

            let body = self.get_json(endpoint, &url).await?;
            let (mut batch, next) = split_page(body, endpoint)?;
            records.append(&mut batch);

            match next {
                Some(next) => url = next,
                None => {
                    tracing::debug!(endpoint, count = records.len(), "Fetched list");
                    return Ok(records);
                }
            }
        }

        tracing::warn!(endpoint, pages = MAX_PAGES, "Stopped following pagination");
        Ok(records)
    }

    async fn fetch_optional_list(&self, endpoint: &str) -> SpendwiseResult<Vec<Value>> {
        match self.fetch_list(endpoint).await {
            Err(SpendwiseError::Api { status: 404, .. }) => {
                tracing::info!(endpoint, "Endpoint not available, continuing without it");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn get_json(&self, endpoint: &str, url: &str) -> SpendwiseResult<Value> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                tracing::warn!(endpoint, status = status.as_u16(), "Backend rejected credentials");
            }
            return Err(SpendwiseError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty response)".to_string();
    }
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
