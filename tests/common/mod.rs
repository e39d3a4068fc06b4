//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the application router directly, while `StubBackend`
//! plays the remote budget API on a local port and records every request it
//! receives.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{RawQuery, State};
use axum::http::{Request, StatusCode, Uri};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use easy_budget::config::ApiConfig;
use easy_budget::handlers;
use easy_budget::server::serve;
use easy_budget::services::budget_api::BudgetApiClient;
use easy_budget::services::preferences::PreferencesStore;
use easy_budget::state::AppState;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// A request seen by the stub backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Recorder = Arc<Mutex<Vec<RecordedRequest>>>;

/// Stand-in for the remote budget API with canned responses.
pub struct StubBackend {
    pub base_url: String,
    requests: Recorder,
}

impl StubBackend {
    pub async fn start() -> Self {
        let requests: Recorder = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route("/api/entries", get(stub_entries))
            .route("/api/graph/day", get(stub_daily))
            .route("/api/graph/month", get(stub_monthly))
            .route("/api/graph/year", get(stub_yearly))
            .with_state(requests.clone());

        let (port, _handle) = serve(app, "127.0.0.1", 0)
            .await
            .expect("Failed to start stub backend");

        Self {
            base_url: format!("http://127.0.0.1:{}/api", port),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().last().cloned()
    }
}

fn record(requests: &Recorder, uri: &Uri, query: Option<String>) {
    let query: Vec<(String, String)> = query
        .map(|q| serde_urlencoded::from_str(&q).unwrap())
        .unwrap_or_default();
    requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query,
    });
}

async fn stub_entries(
    State(requests): State<Recorder>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    record(&requests, &uri, query);
    Json(json!({
        "entries": [
            {
                "id": 1,
                "type": "OUTCOME",
                "cost": 12.5,
                "date": "2024-03-06T12:00:00",
                "categoryDto": {"name": "Food"},
                "accountDto": {"name": "Wallet"}
            },
            {
                "id": 2,
                "type": "OUTCOME",
                "cost": 50.0,
                "date": "2024-03-08T18:30:00",
                "categoryDto": {"name": "Fun"},
                "accountDto": {"name": "Card"}
            }
        ],
        "totalCost": 62.5
    }))
}

async fn stub_daily(
    State(requests): State<Recorder>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    record(&requests, &uri, query);
    Json(json!({
        "incomeList": {"1": 20, "15": 5},
        "outcomeList": {"3": 7.5, "31": 100},
        "outcomeCategoryPercentageList": {"Food": 50, "Rent": 50},
        "outcomeCategoryCostList": {"Rent": 100}
    }))
}

async fn stub_monthly(
    State(requests): State<Recorder>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    record(&requests, &uri, query);
    Json(json!({
        "incomeList": {"MARCH": 1200},
        "incomeCategoryPercentageList": {"Salary": 100},
        "incomeCategoryCostList": {"Salary": 1200}
    }))
}

async fn stub_yearly(
    State(requests): State<Recorder>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    record(&requests, &uri, query);
    Json(json!({
        "outcomeList": {"2021": 99}
    }))
}

/// A test client wired to a fresh stub backend and a temporary preferences
/// file.
pub struct TestClient {
    state: AppState,
    pub backend: Option<StubBackend>,
    prefs_dir: TempDir,
}

impl TestClient {
    pub async fn new() -> Self {
        let backend = StubBackend::start().await;
        let base_url = backend.base_url.clone();
        Self::with_base_url(base_url, Some(backend))
    }

    /// A client whose backend refuses every connection.
    pub fn with_unreachable_backend() -> Self {
        Self::with_base_url("http://127.0.0.1:1/api".into(), None)
    }

    fn with_base_url(base_url: String, backend: Option<StubBackend>) -> Self {
        let prefs_dir = TempDir::new().expect("Failed to create temp dir");
        let api = BudgetApiClient::new(&ApiConfig {
            base_url,
            token: None,
            timeout: Duration::from_secs(5),
        })
        .expect("Failed to create API client");

        let state = AppState {
            api,
            preferences: Arc::new(PreferencesStore::load(
                prefs_dir.path().join("preferences.json"),
            )),
        };

        Self {
            state,
            backend,
            prefs_dir,
        }
    }

    pub fn backend(&self) -> &StubBackend {
        self.backend.as_ref().expect("No stub backend configured")
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.prefs_dir.path().join("preferences.json")
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a POST request with a JSON body and return status and body.
    pub async fn post_json(&self, uri: &str, payload: &Value) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
        (status, parsed)
    }
}
