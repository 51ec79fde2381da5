//! Centralized path resolution for the dashboard
//!
//! All file and directory paths are resolved through this module so the
//! binary, the debug tools and tests agree on where things live.
//!
//! ## Path Strategy
//!
//! - **macOS**: `~/Library/Application Support/PriceFeedDashboard/`
//! - **Windows**: `%LOCALAPPDATA%\PriceFeedDashboard\`
//! - **Linux**: `$XDG_DATA_HOME/PriceFeedDashboard/` (fallback `~/.local/share/PriceFeedDashboard/`)
//!
//! ## Directory Structure
//!
//! ```text
//! PriceFeedDashboard/
//! ├── data/
//! │ ├── config.json
//! │ └── icons/<lowercase token address>/logo.png
//! └── logs/
//!   └── dashboard_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

const APP_DIR: &str = "PriceFeedDashboard";

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
  if let Some(dir) = dirs::data_local_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(dir) = dirs::data_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(home) = dirs::home_dir() {
    return home.join(APP_DIR);
  }

  PathBuf::from(APP_DIR)
}

/// Returns the base directory for all dashboard data
pub fn get_base_directory() -> PathBuf {
  BASE_DIRECTORY.clone()
}

/// Returns the data directory path (config, icons)
pub fn get_data_directory() -> PathBuf {
  BASE_DIRECTORY.join("data")
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
  BASE_DIRECTORY.join("logs")
}

/// Returns the default configuration file path
pub fn get_config_path() -> PathBuf {
  get_data_directory().join("config.json")
}

/// Returns the default token icon directory
pub fn get_icons_directory() -> PathBuf {
  get_data_directory().join("icons")
}

/// Creates every directory the application writes to
///
/// Must run before `logger::init()` since the logger opens its file here.
pub fn ensure_all_directories() -> Result<(), String> {
  let dirs_to_create = [
    ("base", get_base_directory()),
    ("data", get_data_directory()),
    ("logs", get_logs_directory()),
  ];

  for (name, dir) in dirs_to_create {
    if !dir.exists() {
      std::fs::create_dir_all(&dir).map_err(|e| {
        format!(
          "Failed to create {} directory at {}: {}",
          name,
          dir.display(),
          e
        )
      })?;
    }
  }

  Ok(())
}
