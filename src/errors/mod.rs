//! Structured error handling for the dashboard
//!
//! Every failure that can reach a caller is one of these variants. Price-read
//! failures never surface as errors past the orchestrator (they become the
//! sentinel reading); list failures become a UI state. What remains is startup
//! and transport plumbing.

use crate::rpc::RpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Failed to decode {function} return data: {reason}")]
    Decode { function: &'static str, reason: String },

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Wrong network: expected chain {expected}, connected to {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },
}

impl DashboardError {
    /// Whether retrying the same operation later can succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            DashboardError::Rpc(e) => e.is_transient(),
            DashboardError::NotConnected => true,
            DashboardError::WrongNetwork { .. } => true,
            _ => false,
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_network_message() {
        let err = DashboardError::WrongNetwork { expected: 137, actual: 1 };
        assert_eq!(err.to_string(), "Wrong network: expected chain 137, connected to 1");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_decode_errors_are_not_recoverable() {
        let err = DashboardError::Decode {
            function: "getTokenList",
            reason: "buffer overrun".to_string(),
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("getTokenList"));
    }

    #[test]
    fn test_transport_errors_are_recoverable() {
        let err: DashboardError = RpcError::Timeout { endpoint: "http://localhost:8545".to_string() }.into();
        assert!(err.is_recoverable());
    }
}
