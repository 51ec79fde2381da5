use pricefeed_dashboard::{
    arguments::{get_enabled_debug_modes, patterns, print_help},
    logger::{self, LogTag},
};

/// Entry point for the price feed dashboard
///
/// - `--help` / `--version`: print and exit
/// - `--once [--json]`: connect, load, print the table once
/// - default: interactive terminal loop
#[tokio::main]
async fn main() {
    // Logger writes into the logs directory, so it must exist first
    if let Err(e) = pricefeed_dashboard::paths::ensure_all_directories() {
        eprintln!("Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    if patterns::is_version_requested() {
        println!("pricefeed-dashboard {}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    logger::info(LogTag::System, "Price feed dashboard starting up...");

    let debug_modes = get_enabled_debug_modes();
    if !debug_modes.is_empty() {
        logger::info(LogTag::System, &format!("Debug modes: {}", debug_modes.join(", ")));
    }

    let result = pricefeed_dashboard::run::run_dashboard().await;

    match result {
        Ok(()) => {
            logger::info(LogTag::System, "Dashboard exited");
            logger::flush();
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("Dashboard failed: {:#}", e));
            logger::flush();
            std::process::exit(1);
        }
    }
}
