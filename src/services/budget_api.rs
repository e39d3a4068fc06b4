use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::{AggregateResponse, HistoryPage};
use crate::services::filter_state::FilterState;

/// Client for the remote budget backend.
///
/// Cloning is cheap and shares the underlying connection pool. Requests are
/// made once: there is no retry and no cancellation beyond the timeout.
#[derive(Clone, Debug)]
pub struct BudgetApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BudgetApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Entries matching `filter`, with the backend's total.
    pub async fn fetch_history(&self, filter: &FilterState) -> AppResult<HistoryPage> {
        let request = self.get("/entries").query(&filter.to_query());
        self.send(request, "history").await
    }

    /// Per-day totals of one month.
    pub async fn fetch_daily(&self, year: i32, month: u32) -> AppResult<AggregateResponse> {
        let request = self
            .get("/graph/day")
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        self.send(request, "daily aggregate").await
    }

    /// Per-month totals of one year.
    pub async fn fetch_monthly(&self, year: i32) -> AppResult<AggregateResponse> {
        let request = self.get("/graph/month").query(&[("year", year)]);
        self.send(request, "monthly aggregate").await
    }

    /// Per-year totals of an inclusive range.
    pub async fn fetch_yearly(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> AppResult<AggregateResponse> {
        let request = self
            .get("/graph/year")
            .query(&[("startYear", start_year), ("endYear", end_year)]);
        self.send(request, "yearly aggregate").await
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> AppResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request for {} failed", what);
            AppError::Upstream(format!("{} request failed: {}", what, e))
        })?;

        debug!(status = %response.status(), url = %response.url(), "Fetched {}", what);

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Backend rejected {} request", what);
            return Err(AppError::Upstream(format!(
                "{} request returned {}: {}",
                what, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse {} response: {}", what, e)))
    }
}
