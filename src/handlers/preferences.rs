use axum::extract::State;
use axum::response::Json;

use crate::error::AppResult;
use crate::models::{Preferences, PreferencesPatch};
use crate::state::AppState;

pub async fn show(State(state): State<AppState>) -> AppResult<Json<Preferences>> {
    Ok(Json(state.preferences.get()?))
}

pub async fn update(
    State(state): State<AppState>,
    Json(patch): Json<PreferencesPatch>,
) -> AppResult<Json<Preferences>> {
    Ok(Json(state.preferences.update(patch)?))
}
