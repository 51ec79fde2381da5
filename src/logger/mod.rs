//! Structured logging for the dashboard
//!
//! This module provides a small, ergonomic logging API with:
//! - Automatic debug mode filtering from command-line arguments
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Dual output: colored console + file persistence
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pricefeed_dashboard::logger::{self, LogTag};
//!
//! logger::error(LogTag::Rpc, "Connection failed");
//! logger::warning(LogTag::Prices, "Feed returned no data");
//! logger::info(LogTag::System, "Dashboard started");
//! logger::debug(LogTag::Rpc, "Request details: ..."); // Only if --debug-rpc
//! logger::verbose(LogTag::Contract, "Raw return data: ..."); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, after the data directories exist:
//! ```rust,no_run
//! pricefeed_dashboard::logger::init();
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod special;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use special::log_price_update;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Parses debug flags from the command line and opens the log file.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues that need attention)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug logs are ONLY shown when the --debug-<module> flag for the tag is
/// provided, e.g. `--debug-rpc` for [`LogTag::Rpc`].
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing, requires --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush all pending log writes
///
/// Call this during shutdown to ensure all logs are written to disk.
pub fn flush() {
    file::flush_file_logging();
}
