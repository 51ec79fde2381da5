//! Gated dashboard view: what the screen shows for a given state

use super::format::{base_symbol, price_cell, resolve_icon, truncate_address, IconRef};
use crate::prices::{ListState, PriceMapping, TokenInfo};
use crate::session::SessionStatus;
use serde::Serialize;
use std::path::Path;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// One table row. Hidden fields only appear in JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct TokenRow {
    #[tabled(skip)]
    pub row: usize,
    #[tabled(rename = "Token")]
    pub token: String,
    #[tabled(skip)]
    pub symbol: String,
    #[tabled(rename = "Address")]
    pub short_address: String,
    #[tabled(skip)]
    pub address: String,
    #[tabled(rename = "Price (USDT)")]
    pub price: String,
    #[tabled(rename = "Update")]
    pub update: String,
    #[tabled(skip)]
    pub icon: IconRef,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    ConnectPrompt,
    SwitchNetwork { expected: u64, actual: u64 },
    LoadingList,
    ListError(String),
    Table(Vec<TokenRow>),
}

/// Inputs of [`build_view`], captured at one instant
pub struct ViewState<'a> {
    pub session: SessionStatus,
    pub expected_chain_id: u64,
    pub list: &'a ListState,
    pub prices: &'a PriceMapping,
    /// A batch price read for the current list is in flight
    pub prices_loading: bool,
    pub icon_dir: &'a Path,
}

/// Gate order: disconnected, wrong network, loading, failed/empty, table
pub fn build_view(state: &ViewState<'_>) -> DashboardView {
    let chain_id = match state.session {
        SessionStatus::Connected { chain_id } => chain_id,
        SessionStatus::Disconnected | SessionStatus::Connecting => {
            return DashboardView::ConnectPrompt;
        }
    };

    if chain_id != state.expected_chain_id {
        return DashboardView::SwitchNetwork {
            expected: state.expected_chain_id,
            actual: chain_id,
        };
    }

    match state.list {
        ListState::NotLoaded | ListState::Loading => DashboardView::LoadingList,
        ListState::Failed(reason) => {
            DashboardView::ListError(format!("Error fetching token list: {}", reason))
        }
        ListState::Loaded(tokens) if tokens.is_empty() => {
            DashboardView::ListError("The contract returned no tokens".to_string())
        }
        ListState::Loaded(tokens) => DashboardView::Table(
            tokens
                .iter()
                .enumerate()
                .map(|(i, token)| build_row(i + 1, token, state))
                .collect(),
        ),
    }
}

fn build_row(row: usize, token: &TokenInfo, state: &ViewState<'_>) -> TokenRow {
    let reading = state.prices.get(&token.address);
    let icon = resolve_icon(state.icon_dir, &token.address);
    TokenRow {
        row,
        token: format!("{} {}", icon.marker(), base_symbol(&token.symbol)),
        symbol: token.symbol.clone(),
        short_address: truncate_address(&token.address),
        address: token.address.to_checksum(None),
        price: price_cell(reading),
        update: if reading.is_some() && !state.prices_loading {
            format!("u {}", row)
        } else {
            "-".to_string()
        },
        icon,
    }
}

pub fn render_header(session: SessionStatus) -> String {
    let mut header = String::from("Chainlink Price Feeds    [r] refresh list");
    if matches!(session, SessionStatus::Disconnected) {
        header.push_str("    [c] connect");
    }
    header
}

pub fn render(view: &DashboardView) -> String {
    match view {
        DashboardView::ConnectPrompt => {
            "Not connected. Press 'c' to connect and view price feeds.".to_string()
        }
        DashboardView::SwitchNetwork { expected, actual } => format!(
            "Wrong network (chain {}). Switch the RPC endpoint to chain {} and press 'c' to reconnect.",
            actual, expected
        ),
        DashboardView::LoadingList => "Loading token list...".to_string(),
        DashboardView::ListError(message) => format!("{}\nPress 'r' to retry.", message),
        DashboardView::Table(rows) => {
            let mut table = Table::new(rows.clone());
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::center()));
            table.to_string()
        }
    }
}
