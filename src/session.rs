//! Wallet/session state over the configured RPC endpoint
//!
//! The connect action asks the endpoint for its chain id. "Connected" means
//! it answered; the active network is whatever it reported. Contract reads
//! go through [`Session::ensure_ready`] and are refused otherwise.

use crate::errors::{DashboardError, DashboardResult};
use crate::logger::{self, LogTag};
use crate::rpc::RpcClient;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected { chain_id: u64 },
}

pub struct Session {
    rpc: Arc<RpcClient>,
    expected_chain_id: u64,
    status: Mutex<SessionStatus>,
}

impl Session {
    pub fn new(rpc: Arc<RpcClient>, expected_chain_id: u64) -> Self {
        Self {
            rpc,
            expected_chain_id,
            status: Mutex::new(SessionStatus::Disconnected),
        }
    }

    /// User-initiated connect: query the active network.
    ///
    /// Returns the chain id on success; on failure the session stays
    /// disconnected.
    pub async fn connect(&self) -> DashboardResult<u64> {
        *self.status.lock() = SessionStatus::Connecting;
        logger::info(
            LogTag::Session,
            &format!("Connecting to {}", self.rpc.primary_url()),
        );

        match self.rpc.chain_id().await {
            Ok(chain_id) => {
                self.mark_connected(chain_id);
                if chain_id == self.expected_chain_id {
                    logger::info(LogTag::Session, &format!("Connected to chain {}", chain_id));
                } else {
                    logger::warning(
                        LogTag::Session,
                        &format!(
                            "Connected to chain {}, but the feed lives on chain {}",
                            chain_id, self.expected_chain_id
                        ),
                    );
                }
                Ok(chain_id)
            }
            Err(e) => {
                *self.status.lock() = SessionStatus::Disconnected;
                logger::error(LogTag::Session, &format!("Connection failed: {}", e));
                Err(e.into())
            }
        }
    }

    /// Record an established connection (used by `connect` and tests)
    pub fn mark_connected(&self, chain_id: u64) {
        *self.status.lock() = SessionStatus::Connected { chain_id };
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.lock()
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.status(), SessionStatus::Connected { .. })
    }

    pub fn active_chain_id(&self) -> Option<u64> {
        match self.status() {
            SessionStatus::Connected { chain_id } => Some(chain_id),
            _ => None,
        }
    }

    pub fn expected_chain_id(&self) -> u64 {
        self.expected_chain_id
    }

    pub fn is_on_expected_network(&self) -> bool {
        self.active_chain_id() == Some(self.expected_chain_id)
    }

    /// Reads are only allowed when connected to the expected network
    pub fn ensure_ready(&self) -> DashboardResult<()> {
        match self.status() {
            SessionStatus::Connected { chain_id } if chain_id == self.expected_chain_id => Ok(()),
            SessionStatus::Connected { chain_id } => Err(DashboardError::WrongNetwork {
                expected: self.expected_chain_id,
                actual: chain_id,
            }),
            _ => Err(DashboardError::NotConnected),
        }
    }
}
