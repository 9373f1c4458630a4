use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::config::RoutingConfig;
use super::domain::{ShipmentQuery, VendorId};
use super::repository::{CatalogRepository, RepositoryError};
use super::service::{RoutingServiceError, RoutingSimulationService};

/// Simulation payload; `config` overrides the service defaults when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub city: String,
    pub weight: f64,
    #[serde(default)]
    pub seller: String,
    #[serde(default)]
    pub config: Option<RoutingConfig>,
}

/// Router builder exposing the three console views.
pub fn routing_router<R>(service: Arc<RoutingSimulationService<R>>) -> Router
where
    R: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/v1/routing/simulate", post(simulate_handler::<R>))
        .route("/api/v1/routing/config", get(config_handler::<R>))
        .route("/api/v1/vendors", get(vendors_handler::<R>))
        .route("/api/v1/performance", get(performance_handler::<R>))
        .route(
            "/api/v1/performance/:vendor_id",
            get(vendor_metric_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn simulate_handler<R>(
    State(service): State<Arc<RoutingSimulationService<R>>>,
    axum::Json(request): axum::Json<SimulationRequest>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    let query = ShipmentQuery::new(request.city, request.weight, request.seller);
    match service.simulate(query, request.config) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn config_handler<R>(
    State(service): State<Arc<RoutingSimulationService<R>>>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.default_config())).into_response()
}

pub(crate) async fn vendors_handler<R>(
    State(service): State<Arc<RoutingSimulationService<R>>>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.vendor_overview() {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn performance_handler<R>(
    State(service): State<Arc<RoutingSimulationService<R>>>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.performance_overview() {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn vendor_metric_handler<R>(
    State(service): State<Arc<RoutingSimulationService<R>>>,
    Path(vendor_id): Path<String>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    let id = VendorId(vendor_id);
    match service.vendor_metric(&id) {
        Ok(metric) => (StatusCode::OK, axum::Json(metric)).into_response(),
        Err(RoutingServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "vendor_id": id.0,
                "error": "no metrics recorded for vendor",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: RoutingServiceError) -> Response {
    let status = match &error {
        RoutingServiceError::InvalidQuery(_) | RoutingServiceError::InvalidConfig(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        RoutingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RoutingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
