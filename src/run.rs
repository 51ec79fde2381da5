use crate::{
    arguments,
    config::Config,
    dashboard::Dashboard,
    logger::{self, LogTag},
    paths,
};
use anyhow::Context;
use std::path::PathBuf;

/// Resolves the config path from `--config`, falling back to the data directory
pub fn config_path() -> PathBuf {
    arguments::get_config_path_arg()
        .map(PathBuf::from)
        .unwrap_or_else(paths::get_config_path)
}

/// Loads config with environment and CLI overrides applied (CLI wins)
pub fn load_config() -> anyhow::Result<Config> {
    let path = config_path();
    let mut config = Config::load(&path)?;
    config.apply_env_overrides();
    config.apply_rpc_override(arguments::get_rpc_url_arg());
    config.validate().context("Invalid configuration after overrides")?;

    logger::debug(
        LogTag::Config,
        &format!(
            "Config: rpc={} fallbacks={} contract={} chain={}",
            config.rpc_url,
            config.rpc_fallbacks.len(),
            config.contract_address,
            config.chain_id
        ),
    );
    Ok(config)
}

/// Main dashboard lifecycle: config, wiring, then headless or interactive mode
pub async fn run_dashboard() -> anyhow::Result<()> {
    let config = load_config()?;
    let dashboard = Dashboard::new(&config).context("Failed to set up the dashboard")?;

    if arguments::is_once_enabled() {
        logger::info(LogTag::System, "Headless mode: single refresh");
        return dashboard.run_once(arguments::is_json_enabled()).await;
    }

    let connect = config.auto_connect && !arguments::is_no_connect_enabled();
    dashboard.run_interactive(connect).await
}
