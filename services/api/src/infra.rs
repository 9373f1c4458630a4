use crate::cli::CatalogArgs;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use vendor_routing::error::AppError;
use vendor_routing::routing::{
    AllocationRule, HealthStatus, PerformanceMetric, RoutingCatalog, RuleImporter, VendorId,
    WeightRange,
};
use vendor_routing::vendors::{Vendor, VendorStatus};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seller pinned to Aura by the sample rule set.
pub(crate) const SAMPLE_SELLER: &str = "84933479619";

/// Resolve the catalog named on the command line, falling back to [`sample_catalog`].
pub(crate) fn load_catalog(args: &CatalogArgs) -> Result<RoutingCatalog, AppError> {
    let catalog = match &args.catalog {
        Some(path) => RoutingCatalog::from_path(path)?,
        None => sample_catalog(),
    };

    match &args.rules_csv {
        Some(path) => Ok(catalog.with_rules(RuleImporter::from_path(path)?)),
        None => Ok(catalog),
    }
}

/// Two warehouse vendors, three allocation rules and four metric snapshots.
pub(crate) fn sample_catalog() -> RoutingCatalog {
    let vendors = vec![
        Vendor {
            id: "1".to_string(),
            name: "Vendor Aura".to_string(),
            tag: VendorId::from("aura"),
            transit_vendors: strings(&[
                "AMILO",
                "FLEXICHAIN",
                "FLEXICHAIN_SGN",
                "SAOVIET",
                "DUCLONG_SGN",
            ]),
            warehouse_ids: strings(&[
                "WH_185",
                "WH_SS7_PHAN_VAN_TRI",
                "WH_M14_LAZADA",
                "WH_NGUYEN_THI_SANG",
            ]),
            status: VendorStatus::Enabled,
        },
        Vendor {
            id: "2".to_string(),
            name: "Vendor Teraco".to_string(),
            tag: VendorId::from("teraco"),
            transit_vendors: strings(&["DANGMINH", "CARESHIP"]),
            warehouse_ids: strings(&["WH_HUB_THANH_TRI"]),
            status: VendorStatus::Enabled,
        },
    ];

    let rules = vec![
        AllocationRule {
            seller: Some(SAMPLE_SELLER.to_string()),
            seller_name: Some("okmua.com.vn".to_string()),
            rule_type: Some("seller_phone".to_string()),
            weight: Some(WeightRange::from(20.0)),
            ..warehouse_rule("SGN", 3, "aura")
        },
        warehouse_rule("SGN", 1, "flexichain"),
        warehouse_rule("HAN", 2, "teraco"),
    ];

    let metrics: HashMap<VendorId, PerformanceMetric> = [
        (
            "aura",
            snapshot("1", "Vendor Aura (HCM)", [98.2, 99.5, 1.2, 22.0], 45),
        ),
        (
            "teraco",
            PerformanceMetric {
                status: HealthStatus::Critical,
                ..snapshot("2", "Vendor Teraco (HN)", [94.5, 96.0, 3.5, 48.0], 120)
            },
        ),
        (
            "flexichain",
            PerformanceMetric {
                status: HealthStatus::Warning,
                ..snapshot("3", "FlexiChain Node 1", [95.1, 99.8, 0.8, 18.0], 80)
            },
        ),
        (
            "saoviet",
            PerformanceMetric {
                status: HealthStatus::Warning,
                ..snapshot("4", "SaoViet Logistics", [96.8, 97.2, 2.1, 26.0], 55)
            },
        ),
    ]
    .into_iter()
    .map(|(tag, metric)| (VendorId::from(tag), metric))
    .collect();

    RoutingCatalog {
        vendors,
        rules,
        metrics,
    }
}

fn warehouse_rule(city: &str, index: i32, vendor: &str) -> AllocationRule {
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

/// `kpis` is outbound OTP, inbound OTP, processing days and return TAT hours.
fn snapshot(id: &str, name: &str, kpis: [f64; 4], backlog: u32) -> PerformanceMetric {
    let [outbound_otp, inbound_otp, avg_processing_time, return_tat] = kpis;
    PerformanceMetric {
        vendor_id: VendorId::from(id),
        vendor_name: name.to_string(),
        outbound_otp,
        inbound_otp,
        avg_processing_time,
        return_tat,
        backlog,
        status: HealthStatus::Healthy,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
