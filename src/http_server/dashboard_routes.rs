//! Dashboard HTTP Routes
//!
//! Query parameters carry the widget values. Multi-select lists are comma
//! separated; an absent list selects everything, an empty one nothing.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::dashboard::{
    parse_metric, split_list, Dashboard, DashboardFrames, DashboardOptions, DashboardRequest,
    DashboardSettings, RequestError,
};
use crate::dataset::SalesTable;
use crate::observability::{self, Event};
use crate::query::{apply, top_n};

// ==================
// Shared State
// ==================

/// Read-only state shared across handlers
pub struct DashboardState {
    pub table: SalesTable,
    pub settings: DashboardSettings,
}

impl DashboardState {
    pub fn new(table: SalesTable, settings: DashboardSettings) -> Self {
        Self { table, settings }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub platforms: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopQuery {
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub n: Option<usize>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub platforms: Option<String>,
}

impl TopQuery {
    fn selection(&self) -> DashboardQuery {
        DashboardQuery {
            year: self.year.clone(),
            genres: self.genres.clone(),
            platforms: self.platforms.clone(),
            region: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// ==================
// Dashboard Routes
// ==================

/// Routes nested under `/api`
pub fn dashboard_routes(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/options", get(options_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/top", get(top_handler))
        .with_state(state)
}

async fn options_handler(State(state): State<Arc<DashboardState>>) -> Json<DashboardOptions> {
    Json(DashboardOptions::from_table(&state.table))
}

async fn dashboard_handler(
    State(state): State<Arc<DashboardState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardFrames>, ApiError> {
    let request = to_request(&state.table, &query).map_err(reject)?;
    Ok(Json(Dashboard::build(&state.table, &request, &state.settings)))
}

async fn top_handler(
    State(state): State<Arc<DashboardState>>,
    Query(query): Query<TopQuery>,
) -> Result<Json<SalesTable>, ApiError> {
    let metric = parse_metric(query.metric.as_deref()).map_err(reject)?;
    let request = to_request(&state.table, &query.selection()).map_err(reject)?;
    let n = query.n.unwrap_or(state.settings.top_n);

    let filtered = apply(&state.table, &request.filter);
    let rows = top_n(&filtered, metric, n);

    let count = rows.len().to_string();
    observability::log_event_with_fields(
        Event::QueryExecuted,
        &[("metric", metric.column()), ("rows", count.as_str())],
    );
    observability::metrics().increment_queries_executed();

    Ok(Json(rows))
}

// ==================
// Helper Functions
// ==================

fn to_request(table: &SalesTable, query: &DashboardQuery) -> Result<DashboardRequest, RequestError> {
    DashboardRequest::from_params(
        table,
        query.year.as_deref(),
        query.genres.as_deref().map(split_list),
        query.platforms.as_deref().map(split_list),
        query.region.as_deref(),
    )
}

fn reject(err: RequestError) -> ApiError {
    let reason = err.to_string();
    observability::log_event_with_fields(Event::QueryRejected, &[("reason", reason.as_str())]);
    observability::metrics().increment_queries_rejected();

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: reason,
            code: err.code(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::dataset::SalesRecord;

    fn rec(name: &str, platform: &str, year: i32, genre: &str, na: f64, global: f64) -> SalesRecord {
        SalesRecord {
            name: name.into(),
            platform: platform.into(),
            year,
            genre: genre.into(),
            publisher: "Pub".into(),
            na_sales: na,
            eu_sales: 0.0,
            jp_sales: 0.0,
            other_sales: 0.0,
            global_sales: global,
        }
    }

    fn app() -> Router {
        let table = SalesTable::new(vec![
            rec("A", "PS2", 2000, "Action", 1.0, 2.0),
            rec("B", "PS2", 2000, "Sports", 0.2, 0.3),
            rec("C", "GC", 2001, "Action", 0.5, 0.9),
        ]);
        dashboard_routes(Arc::new(DashboardState::new(table, DashboardSettings::default())))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_options() {
        let (status, value) = get_json("/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["years"], serde_json::json!([2000, 2001]));
        assert_eq!(value["platforms"], serde_json::json!(["GC", "PS2"]));
        assert_eq!(value["regions"][0], "NA_Sales");
    }

    #[tokio::test]
    async fn test_dashboard_defaults() {
        let (status, value) = get_json("/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["record_count"], 3);
        assert_eq!(value["top_games"][0]["name"], "A");
    }

    #[tokio::test]
    async fn test_dashboard_filtered() {
        let (status, value) = get_json("/dashboard?year=2000&genres=Action,Sports&platforms=PS2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["year"], 2000);
    }

    #[tokio::test]
    async fn test_empty_list_selects_nothing() {
        let (status, value) = get_json("/dashboard?genres=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["record_count"], 0);
        assert_eq!(value["top_games"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_bad_year_is_400() {
        let (status, value) = get_json("/dashboard?year=twenty").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["code"], "VGS_REQUEST_INVALID_YEAR");
        assert!(value["error"].as_str().unwrap().contains("twenty"));
    }

    #[tokio::test]
    async fn test_unknown_region_is_400() {
        let (status, _) = get_json("/dashboard?region=Moon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_top_by_metric() {
        let (status, value) = get_json("/top?metric=NA&n=2").await;
        assert_eq!(status, StatusCode::OK);
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "A");
        assert_eq!(rows[1]["name"], "C");
    }

    #[tokio::test]
    async fn test_top_unknown_metric_is_400() {
        let (status, value) = get_json("/top?metric=Rank").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["code"], "VGS_REQUEST_UNKNOWN_METRIC");
    }

    #[tokio::test]
    async fn test_top_ignores_region() {
        let (status, value) = get_json("/top?metric=Global&n=1&region=Moon").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["name"], "A");
    }
}
