use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RpcEndpoint {
    pub url: String,
    pub healthy: bool,
    pub last_used: Option<DateTime<Utc>>,
    pub response_time_ms: u64,
    pub error_count: u32,
    pub success_count: u32,
}

/// Consecutive transport failures before an endpoint is tried last
const UNHEALTHY_AFTER_ERRORS: u32 = 3;

impl RpcEndpoint {
    pub fn new(url: String) -> Self {
        Self {
            url,
            healthy: true,
            last_used: None,
            response_time_ms: 0,
            error_count: 0,
            success_count: 0,
        }
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.success_count + self.error_count;
        if total == 0 {
            1.0
        } else {
            (self.success_count as f64) / (total as f64)
        }
    }

    pub fn record_success(&mut self, response_time_ms: u64) {
        self.success_count += 1;
        self.error_count = 0;
        self.response_time_ms = response_time_ms;
        self.healthy = true;
        self.last_used = Some(Utc::now());
    }

    pub fn record_error(&mut self) {
        self.error_count += 1;
        self.last_used = Some(Utc::now());
        if self.error_count >= UNHEALTHY_AFTER_ERRORS {
            self.healthy = false;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcStats {
    pub startup_time: DateTime<Utc>,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time_ms: u64,
    pub calls_per_method: HashMap<String, u64>,
}

impl RpcStats {
    pub fn new() -> Self {
        Self {
            startup_time: Utc::now(),
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            average_response_time_ms: 0,
            calls_per_method: HashMap::new(),
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            1.0
        } else {
            (self.successful_requests as f64) / (self.total_requests as f64)
        }
    }

    pub fn record(&mut self, method: &str, success: bool, response_time_ms: u64) {
        self.total_requests += 1;
        *self.calls_per_method.entry(method.to_string()).or_insert(0) += 1;
        if success {
            // Running mean over successful calls only
            let n = self.successful_requests;
            self.average_response_time_ms = (self.average_response_time_ms * n + response_time_ms) / (n + 1);
            self.successful_requests += 1;
        } else {
            self.failed_requests += 1;
        }
    }
}

impl Default for RpcStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum RpcError {
    ConnectionFailed { endpoint: String, reason: String },
    Timeout { endpoint: String },
    HttpStatus { endpoint: String, status: u16 },
    /// Error object returned by the node (e.g. execution reverted)
    JsonRpc { code: i64, message: String },
    InvalidResponse(String),
    AllEndpointsFailed { attempts: usize, last_error: String },
    ConfigurationError(String),
}

impl RpcError {
    /// Transport-level failures worth trying on another endpoint
    pub fn is_transient(&self) -> bool {
        match self {
            RpcError::ConnectionFailed { .. } => true,
            RpcError::Timeout { .. } => true,
            RpcError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            RpcError::AllEndpointsFailed { .. } => true,
            RpcError::JsonRpc { .. } => false,
            RpcError::InvalidResponse(_) => false,
            RpcError::ConfigurationError(_) => false,
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcError::ConnectionFailed { endpoint, reason } => {
                write!(f, "Connection to {} failed: {}", endpoint, reason)
            }
            RpcError::Timeout { endpoint } => write!(f, "Request to {} timed out", endpoint),
            RpcError::HttpStatus { endpoint, status } => {
                write!(f, "HTTP {} from {}", status, endpoint)
            }
            RpcError::JsonRpc { code, message } => write!(f, "RPC error {}: {}", code, message),
            RpcError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            RpcError::AllEndpointsFailed { attempts, last_error } => {
                write!(f, "All {} RPC endpoints failed, last error: {}", attempts, last_error)
            }
            RpcError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for RpcError {}

pub type RpcResult<T> = Result<T, RpcError>;

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    pub fn into_result(self) -> RpcResult<serde_json::Value> {
        if let Some(error) = self.error {
            let message = match error.data {
                Some(serde_json::Value::String(data)) => format!("{} ({})", error.message, data),
                _ => error.message,
            };
            return Err(RpcError::JsonRpc { code: error.code, message });
        }
        self.result
            .ok_or_else(|| RpcError::InvalidResponse("response has neither result nor error".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_becomes_unhealthy_after_repeated_errors() {
        let mut endpoint = RpcEndpoint::new("http://localhost:8545".to_string());
        endpoint.record_error();
        endpoint.record_error();
        assert!(endpoint.healthy);
        endpoint.record_error();
        assert!(!endpoint.healthy);
        endpoint.record_success(12);
        assert!(endpoint.healthy);
        assert_eq!(endpoint.error_count, 0);
    }

    #[test]
    fn test_stats_running_average() {
        let mut stats = RpcStats::new();
        stats.record("eth_call", true, 10);
        stats.record("eth_call", true, 30);
        stats.record("eth_chainId", false, 500);
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.average_response_time_ms, 20);
        assert_eq!(stats.calls_per_method["eth_call"], 2);
        assert!((stats.success_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_revert_is_not_transient() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted","data":"0x"}}"#,
        )
        .unwrap();
        let err = response.into_result().unwrap_err();
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "RPC error 3: execution reverted (0x)");
    }

    #[test]
    fn test_result_is_extracted() {
        let response: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":7,"result":"0x89"}"#).unwrap();
        assert_eq!(response.into_result().unwrap(), serde_json::json!("0x89"));
    }

    #[test]
    fn test_rate_limit_is_transient() {
        let err = RpcError::HttpStatus { endpoint: "x".to_string(), status: 429 };
        assert!(err.is_transient());
        let err = RpcError::HttpStatus { endpoint: "x".to_string(), status: 404 };
        assert!(!err.is_transient());
    }
}
