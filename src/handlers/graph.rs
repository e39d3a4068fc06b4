use axum::extract::{Query, State};
use axum::response::Json;
use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::graph::{self, GraphView};
use crate::state::AppState;

/// Widest year range a single chart request may span.
pub const MAX_YEAR_SPAN: i32 = 100;

#[derive(Debug, Deserialize)]
pub struct DailyParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlyParams {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyParams {
    pub start_year: i32,
    pub end_year: i32,
}

pub async fn daily(
    State(state): State<AppState>,
    Query(params): Query<DailyParams>,
) -> AppResult<Json<GraphView<u32>>> {
    let today = Local::now().date_naive();
    let year = params.year.unwrap_or(today.year());
    let month = params.month.unwrap_or(today.month());
    if !(1..=12).contains(&month) {
        return Err(AppError::Validation(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }

    let response = state.api.fetch_daily(year, month).await?;
    Ok(Json(graph::daily_view(&response, year, month)?))
}

pub async fn monthly(
    State(state): State<AppState>,
    Query(params): Query<MonthlyParams>,
) -> AppResult<Json<GraphView<&'static str>>> {
    let year = params.year.unwrap_or_else(|| Local::now().year());

    let response = state.api.fetch_monthly(year).await?;
    Ok(Json(graph::monthly_view(&response)))
}

pub async fn yearly(
    State(state): State<AppState>,
    Query(params): Query<YearlyParams>,
) -> AppResult<Json<GraphView<i32>>> {
    let YearlyParams {
        start_year,
        end_year,
    } = params;
    if start_year > end_year {
        return Err(AppError::Validation(format!(
            "Start year {} is after end year {}",
            start_year, end_year
        )));
    }
    // Widened so extreme years cannot wrap past the cap.
    if i64::from(end_year) - i64::from(start_year) >= i64::from(MAX_YEAR_SPAN) {
        return Err(AppError::Validation(format!(
            "Year range may span at most {} years",
            MAX_YEAR_SPAN
        )));
    }

    let response = state.api.fetch_yearly(start_year, end_year).await?;
    Ok(Json(graph::yearly_view(&response, start_year, end_year)?))
}
