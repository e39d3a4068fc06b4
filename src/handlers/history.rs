use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::Entry;
use crate::services::filter_state::{FilterPatch, FilterState};
use crate::sort_utils::SortField;
use crate::state::AppState;

/// A filter together with the query it sends to the backend.
#[derive(Debug, Serialize)]
pub struct FilterView {
    pub filter: FilterState,
    pub query: String,
}

impl From<FilterState> for FilterView {
    fn from(filter: FilterState) -> Self {
        let query = filter.query_string();
        Self { filter, query }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub filter: FilterState,
    pub query: String,
    pub entries: Vec<Entry>,
    pub total_cost: f64,
    pub total_cost_display: String,
}

#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub field: Option<String>,
}

/// History listing for the current month overlaid with the given filters.
pub async fn index(
    State(state): State<AppState>,
    Query(patch): Query<FilterPatch>,
) -> AppResult<Json<HistoryResponse>> {
    let filter = FilterState::initial().merge(patch)?;
    let page = state.api.fetch_history(&filter).await?;
    let prefs = state.preferences.get()?;

    Ok(Json(HistoryResponse {
        query: filter.query_string(),
        filter,
        total_cost_display: prefs.format_amount(page.total_cost),
        total_cost: page.total_cost,
        entries: page.entries,
    }))
}

/// Resolve filters without contacting the backend.
pub async fn resolve_filter(Query(patch): Query<FilterPatch>) -> AppResult<Json<FilterView>> {
    let filter = FilterState::initial().merge(patch)?;
    Ok(Json(filter.into()))
}

/// Flip the sort order, or sort by `field` when given.
pub async fn toggle_sort(
    Query(params): Query<SortParams>,
    Json(filter): Json<FilterState>,
) -> AppResult<Json<FilterView>> {
    let next = match params.field {
        Some(raw) => {
            let field = SortField::from_str(&raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown sort field: {}", raw)))?;
            filter.sort_by(field)
        }
        None => filter.toggle_sort_order(),
    };
    Ok(Json(next.into()))
}
