use clap::Parser;
use seatsweep::config::{AuditConfig, DEFAULT_THRESHOLD_DAYS, DEFAULT_WATCHED_SKUS};
use tracing::{debug, error};

/// Flag directory accounts holding high-cost licenses despite inactivity
#[derive(Parser)]
#[command(name = "seatsweep")]
#[command(about = "Audit high-cost license seats held by inactive accounts", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Inactivity threshold in days (accounts idle strictly longer are flagged)
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_DAYS)]
    days: i64,

    /// High-cost SKU to watch; repeatable, replaces the built-in set
    #[arg(long = "sku", value_name = "SKU")]
    skus: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("seatsweep started with verbosity level: {}", cli.verbose);

    let watched = if cli.skus.is_empty() {
        DEFAULT_WATCHED_SKUS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.skus
    };

    let result = match AuditConfig::new(watched, cli.days) {
        Ok(config) => seatsweep::run(config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
