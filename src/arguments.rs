/// Centralized argument handling for the dashboard binary
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for every log tag
/// - Mode flags (--once, --json) and value flags (--config, --rpc-url)
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::env;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by the debug tools to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    *CMD_ARGS.lock() = args;
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    CMD_ARGS.lock().clone()
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    has_arg_in(&get_cmd_args(), arg)
}

/// Gets the value of a command-line argument that follows a flag
pub fn get_arg_value(flag: &str) -> Option<String> {
    get_arg_value_from(&get_cmd_args(), flag)
}

pub fn has_arg_in(args: &[String], arg: &str) -> bool {
    args.iter().any(|a| a == arg)
}

/// Accepts both `--flag value` and `--flag=value`
pub fn get_arg_value_from(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{}=", flag);
    for (i, arg) in args.iter().enumerate() {
        if arg == flag {
            return args.get(i + 1).filter(|v| !v.starts_with("--")).cloned();
        }
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value.to_string());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

pub fn is_debug_rpc_enabled() -> bool {
    has_arg("--debug-rpc")
}

pub fn is_debug_session_enabled() -> bool {
    has_arg("--debug-session")
}

pub fn is_debug_contract_enabled() -> bool {
    has_arg("--debug-contract")
}

pub fn is_debug_prices_enabled() -> bool {
    has_arg("--debug-prices")
}

pub fn is_debug_dashboard_enabled() -> bool {
    has_arg("--debug-dashboard")
}

/// Gets a list of all enabled debug modes
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    let checks: [(&'static str, fn() -> bool); 5] = [
        ("rpc", is_debug_rpc_enabled),
        ("session", is_debug_session_enabled),
        ("contract", is_debug_contract_enabled),
        ("prices", is_debug_prices_enabled),
        ("dashboard", is_debug_dashboard_enabled),
    ];

    checks
        .iter()
        .filter(|(_, enabled)| enabled())
        .map(|(name, _)| *name)
        .collect()
}

// =============================================================================
// MODE FLAGS
// =============================================================================

/// Render once and exit instead of running the interactive loop
pub fn is_once_enabled() -> bool {
    has_arg("--once")
}

/// Emit rows as JSON (only meaningful with --once)
pub fn is_json_enabled() -> bool {
    has_arg("--json")
}

/// Skip the connect action at startup even if the config enables it
pub fn is_no_connect_enabled() -> bool {
    has_arg("--no-connect")
}

pub fn get_config_path_arg() -> Option<String> {
    get_arg_value("--config")
}

pub fn get_rpc_url_arg() -> Option<String> {
    get_arg_value("--rpc-url")
}

/// Common argument parsing patterns
pub mod patterns {
    use super::*;

    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    pub fn is_version_requested() -> bool {
        has_arg("--version") || has_arg("-V")
    }
}

pub fn print_help() {
    println!("pricefeed-dashboard {}", env!("CARGO_PKG_VERSION"));
    println!("Terminal dashboard for an on-chain Chainlink price feed contract\n");
    println!("USAGE:");
    println!("    pricefeed-dashboard [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    --config <PATH>       Config file (default: {})", crate::paths::get_config_path().display());
    println!("    --rpc-url <URL>       Override the configured RPC endpoint");
    println!("    --once                Connect, load, print the table once and exit");
    println!("    --json                With --once, print rows as JSON");
    println!("    --no-connect          Start disconnected (use 'c' to connect)");
    println!("    --quiet               Only warnings and errors");
    println!("    --verbose             Everything, including debug output");
    println!("    --log-level <LEVEL>   error | warning | info | debug | verbose");
    println!("    --debug-<tag>         Debug output for rpc, session, contract, prices, dashboard");
    println!("    -h, --help            Show this help");
    println!("    -V, --version         Show version");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_has_arg_in() {
        let cmd = args(&["pricefeed-dashboard", "--debug-rpc"]);
        assert!(has_arg_in(&cmd, "--debug-rpc"));
        assert!(!has_arg_in(&cmd, "--debug-prices"));
    }

    #[test]
    fn test_get_arg_value_forms() {
        let cmd = args(&["bin", "--config", "/tmp/a.json", "--rpc-url=http://localhost:8545"]);
        assert_eq!(get_arg_value_from(&cmd, "--config"), Some("/tmp/a.json".to_string()));
        assert_eq!(
            get_arg_value_from(&cmd, "--rpc-url"),
            Some("http://localhost:8545".to_string())
        );
        assert_eq!(get_arg_value_from(&cmd, "--log-level"), None);
    }

    #[test]
    fn test_flag_without_value() {
        let cmd = args(&["bin", "--config", "--once"]);
        assert_eq!(get_arg_value_from(&cmd, "--config"), None);
        let cmd = args(&["bin", "--config"]);
        assert_eq!(get_arg_value_from(&cmd, "--config"), None);
    }
}
