use std::sync::Arc;

use crate::services::budget_api::BudgetApiClient;
use crate::services::preferences::PreferencesStore;

#[derive(Clone)]
pub struct AppState {
    pub api: BudgetApiClient,
    pub preferences: Arc<PreferencesStore>,
}
