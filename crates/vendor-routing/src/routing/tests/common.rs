use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::routing::catalog::RoutingCatalog;
use crate::routing::config::RoutingConfig;
use crate::routing::domain::{
    AllocationRule, HealthStatus, PerformanceMetric, ShipmentQuery, VendorId, WeightRange,
};
use crate::routing::repository::{CatalogRepository, RepositoryError};
use crate::routing::{routing_router, RoutingSimulationService};
use crate::vendors::{Vendor, VendorStatus};

pub(super) const PINNED_SELLER: &str = "84933479619";

pub(super) fn rule(city: &str, index: i32, vendor: &str) -> AllocationRule {
    AllocationRule {
        partner: "ghnbulky".to_string(),
        city_id: city.to_string(),
        group_service: "WAREHOUSE".to_string(),
        enabled: true,
        index,
        seller: None,
        seller_name: None,
        rule_type: None,
        vendor_id: VendorId::from(vendor),
        weight: Some(WeightRange::from(0.0)),
    }
}

pub(super) fn seller_rule() -> AllocationRule {
    AllocationRule {
        seller: Some(PINNED_SELLER.to_string()),
        seller_name: Some("okmua.com.vn".to_string()),
        rule_type: Some("seller_phone".to_string()),
        weight: Some(WeightRange::from(20.0)),
        ..rule("SGN", 3, "aura")
    }
}

/// Console rule set: a seller-pinned SGN rule, an open SGN rule and a HAN rule.
pub(super) fn rules() -> Vec<AllocationRule> {
    vec![seller_rule(), rule("SGN", 1, "flexichain"), rule("HAN", 2, "teraco")]
}

pub(super) fn metric(vendor: &str, outbound_otp: f64, backlog: u32) -> PerformanceMetric {
    PerformanceMetric {
        vendor_id: VendorId::from(vendor),
        vendor_name: format!("Vendor {vendor}"),
        outbound_otp,
        inbound_otp: 99.0,
        avg_processing_time: 1.5,
        return_tat: 24.0,
        backlog,
        status: HealthStatus::Healthy,
    }
}

pub(super) fn metrics() -> HashMap<VendorId, PerformanceMetric> {
    [
        metric("aura", 98.2, 45),
        metric("teraco", 94.5, 120),
        metric("flexichain", 95.1, 80),
    ]
    .into_iter()
    .map(|metric| (metric.vendor_id.clone(), metric))
    .collect()
}

pub(super) fn config() -> RoutingConfig {
    RoutingConfig {
        weight_otp: 8,
        weight_backlog: 6,
        weight_static: 2,
        backlog_threshold: 100,
    }
}

pub(super) fn query(city: &str, weight: f64, seller: &str) -> ShipmentQuery {
    ShipmentQuery::new(city, weight, seller)
}

pub(super) fn vendors() -> Vec<Vendor> {
    vec![
        Vendor {
            id: "1".to_string(),
            name: "Vendor Aura".to_string(),
            tag: VendorId::from("aura"),
            transit_vendors: vec!["AMILO".to_string(), "FLEXICHAIN".to_string()],
            warehouse_ids: vec!["WH_185".to_string()],
            status: VendorStatus::Enabled,
        },
        Vendor {
            id: "2".to_string(),
            name: "Vendor Teraco".to_string(),
            tag: VendorId::from("teraco"),
            transit_vendors: vec!["DANGMINH".to_string()],
            warehouse_ids: vec!["WH_HUB_THANH_TRI".to_string()],
            status: VendorStatus::Disabled,
        },
    ]
}

pub(super) fn catalog() -> RoutingCatalog {
    RoutingCatalog {
        vendors: vendors(),
        rules: rules(),
        metrics: metrics(),
    }
}

pub(super) fn build_service() -> RoutingSimulationService<RoutingCatalog> {
    RoutingSimulationService::new(Arc::new(catalog()), config())
}

pub(super) fn router_with_service<R>(service: RoutingSimulationService<R>) -> axum::Router
where
    R: CatalogRepository + 'static,
{
    routing_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl CatalogRepository for UnavailableRepository {
    fn vendors(&self) -> Result<Vec<Vendor>, RepositoryError> {
        Err(RepositoryError::Unavailable("config service offline".to_string()))
    }

    fn rules(&self) -> Result<Vec<AllocationRule>, RepositoryError> {
        Err(RepositoryError::Unavailable("config service offline".to_string()))
    }

    fn metrics(&self) -> Result<HashMap<VendorId, PerformanceMetric>, RepositoryError> {
        Err(RepositoryError::Unavailable("config service offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
