use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_routing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use vendor_routing::config::AppConfig;
use vendor_routing::error::AppError;
use vendor_routing::routing::RoutingSimulationService;
use vendor_routing::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = load_catalog(&args.catalog)?;
    info!(
        vendors = catalog.vendors.len(),
        rules = catalog.rules.len(),
        metrics = catalog.metrics.len(),
        "routing catalog loaded"
    );
    let routing_service = Arc::new(RoutingSimulationService::new(
        Arc::new(catalog),
        config.routing,
    ));

    let app = with_routing_routes(routing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vendor routing console ready");

    axum::serve(listener, app).await?;
    Ok(())
}
