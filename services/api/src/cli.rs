use crate::demo::{run_demo, run_performance, run_simulation, run_vendors, DemoArgs, SimulateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vendor_routing::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Vendor Routing Console",
    about = "Simulate warehouse vendor allocation and inspect vendor health from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score the allocation rules for a single shipment
    Simulate(SimulateArgs),
    /// Print the vendor configuration table
    Vendors(CatalogArgs),
    /// Print the vendor performance monitor
    Performance(CatalogArgs),
    /// Walk through the vendor, performance and routing views
    Demo(DemoArgs),
}

/// Where to read vendors, rules and metrics from. Defaults to the built-in sample catalog.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CatalogArgs {
    /// JSON routing catalog (vendors, rules, metrics)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Allocation rule CSV export; replaces the catalog's rules
    #[arg(long)]
    pub(crate) rules_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Simulate(args) => run_simulation(args),
        Command::Vendors(args) => run_vendors(args),
        Command::Performance(args) => run_performance(args),
        Command::Demo(args) => run_demo(args),
    }
}
