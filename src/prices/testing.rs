//! Scripted in-memory contract reader for orchestration tests

use super::types::{PriceReading, TokenInfo};
use crate::contract::ContractReader;
use crate::errors::{DashboardError, DashboardResult};
use crate::rpc::RpcError;
use alloy_primitives::{Address, I256};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Notify;

/// Deterministic address with `n` in the last byte
pub fn address(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xaa;
    bytes[19] = n;
    Address::from(bytes)
}

pub fn token(n: u8, symbol: &str) -> TokenInfo {
    TokenInfo { address: address(n), symbol: symbol.to_string() }
}

fn reverted() -> DashboardError {
    DashboardError::Rpc(RpcError::JsonRpc { code: 3, message: "execution reverted".to_string() })
}

#[derive(Default)]
pub struct ScriptedReader {
    /// Served in order; the last one repeats once the queue is drained
    lists: Mutex<VecDeque<Option<Vec<TokenInfo>>>>,
    last_list: Mutex<Option<Vec<TokenInfo>>>,
    prices: Mutex<HashMap<Address, Option<PriceReading>>>,
    special: Mutex<Option<PriceReading>>,
    decimals: Mutex<HashMap<Address, u8>>,
    gates: Mutex<HashMap<Address, Arc<Notify>>>,
    list_gate: Mutex<Option<Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(self, tokens: Vec<TokenInfo>) -> Self {
        self.lists.lock().push_back(Some(tokens));
        self
    }

    pub fn with_failed_list(self) -> Self {
        self.lists.lock().push_back(None);
        self
    }

    pub fn with_price(self, token: Address, price: i64, decimals: u8) -> Self {
        self.set_price(token, price, decimals);
        self
    }

    pub fn with_failing_price(self, token: Address) -> Self {
        self.prices.lock().insert(token, None);
        self
    }

    pub fn with_special_price(self, price: i64, decimals: u8) -> Self {
        *self.special.lock() = Some(PriceReading::new(I256::try_from(price).unwrap(), decimals));
        self
    }

    pub fn with_decimals(self, token: Address, decimals: u8) -> Self {
        self.decimals.lock().insert(token, decimals);
        self
    }

    pub fn set_price(&self, token: Address, price: i64, decimals: u8) {
        self.prices
            .lock()
            .insert(token, Some(PriceReading::new(I256::try_from(price).unwrap(), decimals)));
    }

    pub fn fail_price(&self, token: Address) {
        self.prices.lock().insert(token, None);
    }

    /// Holds `latest_price(token)` until the returned handle is notified
    pub fn gate(&self, token: Address) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().insert(token, notify.clone());
        notify
    }

    /// Holds the next `list_tokens()` (after it picked its list) until notified
    pub fn gate_list(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.list_gate.lock() = Some(notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ContractReader for ScriptedReader {
    async fn list_tokens(&self) -> DashboardResult<Vec<TokenInfo>> {
        self.calls.lock().push("list".to_string());
        let next = self.lists.lock().pop_front();
        let list = match next {
            Some(list) => {
                *self.last_list.lock() = list.clone();
                list
            }
            None => self.last_list.lock().clone(),
        };
        let gate = self.list_gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        list.ok_or_else(reverted)
    }

    async fn latest_price(&self, token: Address) -> DashboardResult<PriceReading> {
        self.calls.lock().push(format!("latest:{}", token));
        let gate = self.gates.lock().remove(&token);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.prices.lock().get(&token).copied().flatten().ok_or_else(reverted)
    }

    async fn special_price(&self) -> DashboardResult<PriceReading> {
        self.calls.lock().push("special".to_string());
        (*self.special.lock()).ok_or_else(reverted)
    }

    async fn feed_decimals(&self, token: Address) -> DashboardResult<u8> {
        self.calls.lock().push(format!("decimals:{}", token));
        self.decimals.lock().get(&token).copied().ok_or_else(reverted)
    }
}
