//! Ethereum JSON-RPC transport
//!
//! A thin `reqwest` client for the two methods the dashboard needs
//! (`eth_call`, `eth_chainId`) with fallback endpoints and request statistics.

mod client;
mod types;
mod utils;

pub use client::RpcClient;
pub use types::{RpcEndpoint, RpcError, RpcResult, RpcStats};
pub use utils::{decode_hex_data, encode_hex_data, parse_hex_quantity};
