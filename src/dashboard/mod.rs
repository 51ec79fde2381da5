//! Terminal presentation of the price feed
//!
//! - [`format`]: symbol, price, address and icon helpers
//! - [`view`]: the gated view and its table rendering
//! - [`commands`]: interactive command parsing
//! - [`app`]: the controller running the interactive or headless mode

pub mod app;
pub mod commands;
pub mod format;
pub mod view;

pub use app::{CommandOutcome, Dashboard};
pub use commands::{parse_command, Command, Target};
pub use format::{base_symbol, format_price, price_cell, resolve_icon, truncate_address, IconRef};
pub use view::{build_view, render, render_header, DashboardView, TokenRow, ViewState};
