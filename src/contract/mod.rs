//! On-chain price feed contract: descriptor, reader seam and RPC reader

mod abi;
mod reader;

pub use abi::IChainlinkPriceFeed;
pub use reader::RpcContractReader;

use crate::errors::DashboardResult;
use crate::prices::{PriceReading, TokenInfo};
use alloy_primitives::{address, Address};
use async_trait::async_trait;

/// Price feed aggregator deployed on Polygon mainnet
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("846829c8e1180408f6a927F680B251cf63ab8fe6");

/// WBTC on Polygon, priced through `getWBTCPriceInUSDT()`
pub const DEFAULT_SPECIAL_TOKEN: Address = address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6");

/// Polygon mainnet
pub const DEFAULT_CHAIN_ID: u64 = 137;

/// Read-only entry points of the price feed contract
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// `getTokenList()`
    async fn list_tokens(&self) -> DashboardResult<Vec<TokenInfo>>;

    /// `getLatestPrice(token)`
    async fn latest_price(&self, token: Address) -> DashboardResult<PriceReading>;

    /// `getWBTCPriceInUSDT()`
    async fn special_price(&self) -> DashboardResult<PriceReading>;

    /// `feedDecimals(token)`
    async fn feed_decimals(&self, token: Address) -> DashboardResult<u8>;
}
