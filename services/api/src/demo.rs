use crate::cli::CatalogArgs;
use crate::infra::{load_catalog, SAMPLE_SELLER};
use clap::Args;
use std::sync::Arc;
use vendor_routing::config::AppConfig;
use vendor_routing::error::AppError;
use vendor_routing::performance::PerformanceOverview;
use vendor_routing::routing::{
    RoutingCatalog, RoutingConfig, RoutingSimulationService, ShipmentQuery, SimulationReport,
};
use vendor_routing::telemetry;
use vendor_routing::vendors::VendorOverview;

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Destination city code
    #[arg(long, default_value = "SGN")]
    pub(crate) city: String,
    /// Package weight in kilograms
    #[arg(long, default_value_t = 25.0)]
    pub(crate) weight: f64,
    /// Seller identifier (phone number); empty matches only unpinned rules
    #[arg(long, default_value = "")]
    pub(crate) seller: String,
    /// Override the configured OTP weight (0-10)
    #[arg(long)]
    pub(crate) weight_otp: Option<u8>,
    /// Override the configured backlog weight (0-10)
    #[arg(long)]
    pub(crate) weight_backlog: Option<u8>,
    /// Override the configured static priority weight (0-10)
    #[arg(long)]
    pub(crate) weight_static: Option<u8>,
    /// Override the circuit breaker backlog threshold
    #[arg(long)]
    pub(crate) backlog_threshold: Option<u32>,
    /// List the rules removed by the hard filters and why
    #[arg(long)]
    pub(crate) show_excluded: bool,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Destination city for the routing walkthrough
    #[arg(long, default_value = "SGN")]
    pub(crate) city: String,
    /// Package weight in kilograms for the routing walkthrough
    #[arg(long, default_value_t = 25.0)]
    pub(crate) weight: f64,
    /// Seller identifier for the routing walkthrough
    #[arg(long, default_value = SAMPLE_SELLER)]
    pub(crate) seller: String,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let overrides = routing_overrides(config.routing, &args);
    let service = build_service(load_catalog(&args.catalog)?, config.routing);

    let query = ShipmentQuery::new(args.city, args.weight, args.seller);
    let report = service.simulate(query, Some(overrides))?;
    render_simulation(&report, args.show_excluded);

    Ok(())
}

pub(crate) fn run_vendors(args: CatalogArgs) -> Result<(), AppError> {
    let service = build_service(load_catalog(&args)?, RoutingConfig::default());
    render_vendor_overview(&service.vendor_overview()?);
    Ok(())
}

pub(crate) fn run_performance(args: CatalogArgs) -> Result<(), AppError> {
    let service = build_service(load_catalog(&args)?, RoutingConfig::default());
    render_performance(&service.performance_overview()?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = console_config()?;
    let service = build_service(load_catalog(&args.catalog)?, config.routing);

    println!("Vendor routing console demo");
    render_vendor_overview(&service.vendor_overview()?);
    println!();
    render_performance(&service.performance_overview()?);
    println!();

    let query = ShipmentQuery::new(args.city, args.weight, args.seller);
    let report = service.simulate(query, None)?;
    render_simulation(&report, true);

    Ok(())
}

fn console_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

fn build_service(
    catalog: RoutingCatalog,
    defaults: RoutingConfig,
) -> RoutingSimulationService<RoutingCatalog> {
    RoutingSimulationService::new(Arc::new(catalog), defaults)
}

fn routing_overrides(defaults: RoutingConfig, args: &SimulateArgs) -> RoutingConfig {
    RoutingConfig {
        weight_otp: args.weight_otp.unwrap_or(defaults.weight_otp),
        weight_backlog: args.weight_backlog.unwrap_or(defaults.weight_backlog),
        weight_static: args.weight_static.unwrap_or(defaults.weight_static),
        backlog_threshold: args.backlog_threshold.unwrap_or(defaults.backlog_threshold),
    }
}

pub(crate) fn render_vendor_overview(overview: &VendorOverview) {
    println!("Vendor configuration");
    println!(
        "- {} active of {} vendors | {} transit connections",
        overview.active_vendors, overview.total_vendors, overview.transit_connections
    );
    for vendor in &overview.vendors {
        println!(
            "  - [{}] {} ({}) | warehouses: {} | transit: {}",
            vendor.status.label(),
            vendor.name,
            vendor.tag,
            join_or_none(&vendor.warehouse_ids),
            join_or_none(&vendor.transit_vendors)
        );
    }
}

pub(crate) fn render_performance(overview: &PerformanceOverview) {
    println!("Vendor performance");
    println!(
        "- Outbound OTP {} | Inbound OTP {} | Processing {} days | Return TAT {} h",
        format_average(overview.avg_outbound_otp, "%"),
        format_average(overview.avg_inbound_otp, "%"),
        format_average(overview.avg_processing_time, ""),
        format_average(overview.avg_return_tat, ""),
    );
    println!(
        "- Backlog {} orders | {} healthy, {} warning, {} critical",
        overview.total_backlog,
        overview.health.healthy,
        overview.health.warning,
        overview.health.critical
    );
    for metric in &overview.vendors {
        println!(
            "  - {} [{}]: OTP {:.1}% out / {:.1}% in | {:.1} days | {:.0} h TAT | backlog {}",
            metric.vendor_name,
            metric.status.label(),
            metric.outbound_otp,
            metric.inbound_otp,
            metric.avg_processing_time,
            metric.return_tat,
            metric.backlog
        );
    }
}

pub(crate) fn render_simulation(report: &SimulationReport, show_excluded: bool) {
    let query = &report.query;
    let config = &report.config;
    println!("Routing simulation");
    println!(
        "- Shipment: {} | {:.1} kg | seller {}",
        query.city,
        query.weight,
        if query.seller.is_empty() {
            "(none)"
        } else {
            query.seller.as_str()
        }
    );
    println!(
        "- Weights: OTP {} | backlog {} | static {} | circuit breaker above {} orders",
        config.weight_otp, config.weight_backlog, config.weight_static, config.backlog_threshold
    );

    if report.is_empty() {
        println!("\nNo allocation rule matches this shipment.");
    } else {
        println!("\nRanked candidates");
        for (rank, candidate) in report.candidates.iter().enumerate() {
            println!(
                "{:>2}. {} (index {}) score {:.1} [{}]",
                rank + 1,
                candidate.rule.vendor_id,
                candidate.rule.index,
                candidate.score,
                candidate.status.label()
            );
            if let Some(breakdown) = candidate.breakdown {
                println!(
                    "    OTP {:+.1} | backlog -{:.1} | priority {:+.1}",
                    breakdown.otp_bonus, breakdown.backlog_penalty, breakdown.priority_bonus
                );
            }
        }

        match report.selected() {
            Some(candidate) => println!("\nSelected vendor: {}", candidate.rule.vendor_id),
            None => println!("\nSelected vendor: none (every candidate is blocked)"),
        }
    }

    if show_excluded && !report.excluded.is_empty() {
        println!("\nExcluded rules");
        for excluded in &report.excluded {
            println!(
                "- {} {} (index {}): {}",
                excluded.rule.city_id,
                excluded.rule.vendor_id,
                excluded.rule.index,
                excluded.reason.summary()
            );
        }
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

fn format_average(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value:.1}{unit}"),
        None => "n/a".to_string(),
    }
}
