use anyhow::{ Context, Result };
use alloy_primitives::Address;
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::{ Path, PathBuf };
use std::time::Duration;

use crate::contract::{ DEFAULT_CHAIN_ID, DEFAULT_CONTRACT_ADDRESS, DEFAULT_SPECIAL_TOKEN };
use crate::errors::{ DashboardError, DashboardResult };
use crate::logger::{ self, LogTag };

/// Environment variable that overrides `rpc_url`
pub const RPC_URL_ENV: &str = "PRICE_FEED_RPC_URL";

pub const DEFAULT_RPC_URL: &str = "https://polygon-rpc.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc_url: String,
    pub rpc_fallbacks: Vec<String>,
    /// Deployed price feed contract
    pub contract_address: String,
    /// Token whose price comes from the dedicated entry point
    pub special_token_address: String,
    pub chain_id: u64,
    pub request_timeout_secs: u64,
    /// Token icon root, `<icon_dir>/<lowercase address>/logo.png`
    pub icon_dir: Option<String>,
    pub auto_connect: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            rpc_fallbacks: vec![],
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_checksum(None),
            special_token_address: DEFAULT_SPECIAL_TOKEN.to_checksum(None),
            chain_id: DEFAULT_CHAIN_ID,
            request_timeout_secs: 15,
            icon_dir: None,
            auto_connect: true,
        }
    }
}

impl Config {
    /// Loads the config file, writing defaults first when it does not exist.
    ///
    /// Values are not validated here; callers apply overrides first and then
    /// call [`Config::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save(path)?;
            logger::info(
                LogTag::Config,
                &format!("Created default config at {}", path.display())
            );
            return Ok(default_config);
        }

        let content = fs
            ::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json
            ::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs
                ::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json
            ::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        fs
            ::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn validate(&self) -> DashboardResult<()> {
        for endpoint in std::iter::once(&self.rpc_url).chain(self.rpc_fallbacks.iter()) {
            url::Url
                ::parse(endpoint)
                .map_err(|e| DashboardError::Config(format!("invalid RPC URL '{}': {}", endpoint, e)))?;
        }

        self.contract()?;
        self.special_token()?;

        if self.request_timeout_secs == 0 {
            return Err(DashboardError::Config("request_timeout_secs must be > 0".to_string()));
        }

        Ok(())
    }

    pub fn contract(&self) -> DashboardResult<Address> {
        parse_address("contract_address", &self.contract_address)
    }

    pub fn special_token(&self) -> DashboardResult<Address> {
        parse_address("special_token_address", &self.special_token_address)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured icon root, or the default under the data directory
    pub fn icon_directory(&self) -> PathBuf {
        self.icon_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(crate::paths::get_icons_directory)
    }

    /// Replaces the RPC URL when an override is given (CLI flag or env)
    pub fn apply_rpc_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            logger::debug(LogTag::Config, &format!("RPC URL overridden: {}", url));
            self.rpc_url = url.trim().to_string();
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_rpc_override(std::env::var(RPC_URL_ENV).ok());
    }
}

fn parse_address(field: &str, value: &str) -> DashboardResult<Address> {
    value.trim().parse::<Address>().map_err(|e| DashboardError::InvalidAddress {
        input: format!("{} = {}", field, value),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
        assert_eq!(config.contract().unwrap(), DEFAULT_CONTRACT_ADDRESS);
        assert_eq!(config.special_token().unwrap(), DEFAULT_SPECIAL_TOKEN);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "rpc_url": "http://localhost:8545", "chain_id": 31337 }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.request_timeout_secs, 15);
        assert!(config.auto_connect);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.rpc_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));

        let mut config = Config::default();
        config.contract_address = "0x1234".to_string();
        assert!(matches!(config.validate(), Err(DashboardError::InvalidAddress { .. })));

        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "special_token_address": "nope" }"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert!(matches!(config.validate(), Err(DashboardError::InvalidAddress { .. })));

        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_override_repairs_bad_rpc_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "rpc_url": "polygon rpc" }"#).unwrap();

        let mut config = Config::load(&path).unwrap();
        assert!(config.validate().is_err());

        config.apply_rpc_override(Some("http://127.0.0.1:8545".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rpc_override() {
        let mut config = Config::default();
        config.apply_rpc_override(None);
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        config.apply_rpc_override(Some("  ".to_string()));
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        config.apply_rpc_override(Some("http://127.0.0.1:8545".to_string()));
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
    }

    #[test]
    fn test_icon_directory() {
        let mut config = Config::default();
        assert_eq!(config.icon_directory(), crate::paths::get_icons_directory());
        config.icon_dir = Some("/tmp/icons".to_string());
        assert_eq!(config.icon_directory(), PathBuf::from("/tmp/icons"));
    }
}
