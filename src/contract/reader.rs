use super::abi::IChainlinkPriceFeed;
use super::ContractReader;
use crate::errors::{DashboardError, DashboardResult};
use crate::logger::{self, LogTag};
use crate::prices::{PriceReading, TokenInfo};
use crate::rpc::RpcClient;
use crate::session::Session;
use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use std::sync::Arc;

/// `ContractReader` over `eth_call`
///
/// Every read checks the session first: nothing is sent while disconnected
/// or connected to another network.
pub struct RpcContractReader {
    rpc: Arc<RpcClient>,
    session: Arc<Session>,
    contract: Address,
}

impl RpcContractReader {
    pub fn new(rpc: Arc<RpcClient>, session: Arc<Session>, contract: Address) -> Self {
        Self { rpc, session, contract }
    }

    async fn call<C: SolCall + Send>(&self, call: C) -> DashboardResult<C::Return> {
        self.session.ensure_ready()?;

        let data = call.abi_encode();
        logger::debug(
            LogTag::Contract,
            &format!("{} on {} ({} bytes)", C::SIGNATURE, self.contract, data.len()),
        );

        let output = self.rpc.eth_call(self.contract, &data).await?;
        logger::verbose(
            LogTag::Contract,
            &format!("{} returned {} bytes", C::SIGNATURE, output.len()),
        );

        C::abi_decode_returns(&output).map_err(|e| DashboardError::Decode {
            function: C::SIGNATURE,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ContractReader for RpcContractReader {
    async fn list_tokens(&self) -> DashboardResult<Vec<TokenInfo>> {
        let entries = self.call(IChainlinkPriceFeed::getTokenListCall {}).await?;
        Ok(entries
            .into_iter()
            .map(|entry| TokenInfo {
                address: entry.token,
                symbol: entry.symbol,
            })
            .collect())
    }

    async fn latest_price(&self, token: Address) -> DashboardResult<PriceReading> {
        let ret = self.call(IChainlinkPriceFeed::getLatestPriceCall { token }).await?;
        Ok(PriceReading::new(ret.price, ret.decimals))
    }

    async fn special_price(&self) -> DashboardResult<PriceReading> {
        let ret = self.call(IChainlinkPriceFeed::getWBTCPriceInUSDTCall {}).await?;
        Ok(PriceReading::new(ret.price, ret.decimals))
    }

    async fn feed_decimals(&self, token: Address) -> DashboardResult<u8> {
        self.call(IChainlinkPriceFeed::feedDecimalsCall { token }).await
    }
}
