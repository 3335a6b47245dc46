//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::AvgSpeed;
use crate::routing::RouteError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/cities", get(list_cities))
        .route("/api/cities/search", get(search_cities))
        .route("/api/graph", get(graph_stats))
        .route("/api/route", post(plan_route))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the route form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.routes.snapshot().await;
    let template = IndexTemplate {
        cities: city_names(&snapshot),
        default_speed: AvgSpeed::DEFAULT.kmh(),
        min_speed: AvgSpeed::MIN,
        max_speed: AvgSpeed::MAX,
    };
    render(&template)
}

/// About page.
async fn about_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.routes.snapshot().await;
    let config = state.routes.config();
    let template = AboutTemplate {
        city_count: snapshot.graph().len(),
        edge_count: snapshot.graph().edge_count(),
        surcharge_km: config.surcharge_km,
        longitude_band: config.longitude_band,
    };
    render(&template)
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })
}

fn city_names(snapshot: &crate::routing::GraphSnapshot) -> Vec<String> {
    snapshot
        .graph()
        .cities()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

/// List all loaded cities.
async fn list_cities(State(state): State<AppState>) -> Json<CityListResponse> {
    let snapshot = state.routes.snapshot().await;
    let cities = city_names(&snapshot);
    Json(CityListResponse {
        count: cities.len(),
        cities,
    })
}

/// Search cities by name.
async fn search_cities(
    State(state): State<AppState>,
    Query(req): Query<CitySearchRequest>,
) -> Json<CitySearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let snapshot = state.routes.snapshot().await;

    let cities = snapshot
        .graph()
        .search(&req.q, limit)
        .into_iter()
        .map(CitySearchResult::from)
        .collect();

    Json(CitySearchResponse { cities })
}

/// Summary of the graph in service.
async fn graph_stats(State(state): State<AppState>) -> Json<GraphStatsResponse> {
    let snapshot = state.routes.snapshot().await;
    let cached_routes = state.routes.cached_routes().await;
    Json(GraphStatsResponse::new(
        &snapshot,
        state.routes.config(),
        cached_routes,
    ))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a route between two cities.
///
/// Cities and speed come from the JSON body; `from-city`, `to-city` and
/// `avg-speed` query parameters override it.
async fn plan_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<RouteParams>, QueryRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest {
        kind: "invalid_query",
        message: e.body_text(),
        field: None,
    })?;

    // Parse JSON manually so we can log the body on failure
    let req: RouteRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RouteRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid route request JSON");
            AppError::BadRequest {
                kind: "invalid_json",
                message: format!("Invalid JSON: {e}"),
                field: None,
            }
        })?
    };

    let query = req.into_query(params)?;
    let result = state.routes.route(&query).await?;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = RouteResultTemplate {
            route: RouteView::from_result(&result),
        };
        Ok(render(&template)?.into_response())
    } else {
        Ok(Json(RouteResponse::from_result(&result)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        kind: &'static str,
        message: String,
        field: Option<&'static str>,
    },
    NotFound {
        kind: &'static str,
        message: String,
    },
    Internal {
        message: String,
    },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::NoRoute { .. } => AppError::NotFound {
                kind: e.kind(),
                message: e.to_string(),
            },
            RouteError::UnknownCity { .. } | RouteError::InvalidParameter { .. } => {
                AppError::BadRequest {
                    kind: e.kind(),
                    message: e.to_string(),
                    field: e.field(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest {
                kind,
                message,
                field,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    kind,
                    field,
                },
            ),
            AppError::NotFound { kind, message } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: message,
                    kind,
                    field: None,
                },
            ),
            AppError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: message,
                    kind: "internal",
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            error!(status = %status, kind = body.kind, error = %body.error, "Request failed");
        } else {
            warn!(status = %status, kind = body.kind, error = %body.error, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}
