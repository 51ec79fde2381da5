//! JSON-RPC client with ordered endpoint fallback
//!
//! Requests go to the primary endpoint first; transport failures (timeouts,
//! refused connections, 429/5xx) move on to the next configured endpoint.
//! Node-level errors such as reverts are returned immediately since another
//! endpoint would answer the same.

use super::types::{JsonRpcRequest, JsonRpcResponse, RpcEndpoint, RpcError, RpcResult, RpcStats};
use super::utils::{decode_hex_data, encode_hex_data, parse_hex_quantity};
use crate::logger::{self, LogTag};
use alloy_primitives::Address;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub struct RpcClient {
    http: reqwest::Client,
    endpoints: Mutex<Vec<RpcEndpoint>>,
    stats: Mutex<RpcStats>,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(primary_url: &str, fallback_urls: &[String], timeout: Duration) -> RpcResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::ConfigurationError(format!("failed to build HTTP client: {}", e)))?;

        let endpoints = std::iter::once(primary_url.to_string())
            .chain(fallback_urls.iter().cloned())
            .map(RpcEndpoint::new)
            .collect();

        Ok(Self {
            http,
            endpoints: Mutex::new(endpoints),
            stats: Mutex::new(RpcStats::new()),
            next_id: AtomicU64::new(1),
        })
    }

    /// Primary endpoint URL
    pub fn primary_url(&self) -> String {
        self.endpoints
            .lock()
            .first()
            .map(|e| e.url.clone())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> RpcStats {
        self.stats.lock().clone()
    }

    pub fn endpoints(&self) -> Vec<RpcEndpoint> {
        self.endpoints.lock().clone()
    }

    /// `eth_chainId`
    pub async fn chain_id(&self) -> RpcResult<u64> {
        let result = self.request("eth_chainId", serde_json::json!([])).await?;
        let quantity = result
            .as_str()
            .ok_or_else(|| RpcError::InvalidResponse(format!("eth_chainId returned {}", result)))?;
        parse_hex_quantity(quantity)
    }

    /// `eth_call` against the latest block, returning the raw return data
    pub async fn eth_call(&self, to: Address, data: &[u8]) -> RpcResult<Vec<u8>> {
        let params = serde_json::json!([
            { "to": to.to_string(), "data": encode_hex_data(data) },
            "latest"
        ]);
        let result = self.request("eth_call", params).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| RpcError::InvalidResponse(format!("eth_call returned {}", result)))?;
        decode_hex_data(hex)
    }

    /// Send one JSON-RPC request, falling back across endpoints on transport errors
    pub async fn request(&self, method: &str, params: serde_json::Value) -> RpcResult<serde_json::Value> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let urls = self.ordered_urls();
        let mut last_error = None;

        for url in &urls {
            logger::debug(LogTag::Rpc, &format!("{} #{} -> {}", method, request.id, url));

            let started = Instant::now();
            let outcome = self.send_to(url, &request).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(value) => {
                    self.record(url, method, true, elapsed_ms);
                    logger::verbose(LogTag::Rpc, &format!("{} #{} <- {}", method, request.id, value));
                    return Ok(value);
                }
                Err(e) if e.is_transient() => {
                    self.record(url, method, false, elapsed_ms);
                    logger::warning(LogTag::Rpc, &format!("{} failed on {}: {}", method, url, e));
                    last_error = Some(e);
                }
                Err(e) => {
                    // The endpoint answered; the call itself failed
                    self.record(url, method, true, elapsed_ms);
                    logger::debug(LogTag::Rpc, &format!("{} #{} error: {}", method, request.id, e));
                    return Err(e);
                }
            }
        }

        match last_error {
            Some(e) if urls.len() > 1 => Err(RpcError::AllEndpointsFailed {
                attempts: urls.len(),
                last_error: e.to_string(),
            }),
            Some(e) => Err(e),
            None => Err(RpcError::ConfigurationError("no RPC endpoints configured".to_string())),
        }
    }

    async fn send_to(&self, url: &str, request: &JsonRpcRequest<'_>) -> RpcResult<serde_json::Value> {
        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RpcError::Timeout { endpoint: url.to_string() }
                } else {
                    RpcError::ConnectionFailed { endpoint: url.to_string(), reason: e.to_string() }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::HttpStatus { endpoint: url.to_string(), status: status.as_u16() });
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("{} from {}", e, url)))?;

        body.into_result()
    }

    /// Healthy endpoints first, configuration order otherwise
    fn ordered_urls(&self) -> Vec<String> {
        let endpoints = self.endpoints.lock();
        let mut ordered: Vec<&RpcEndpoint> = endpoints.iter().collect();
        ordered.sort_by_key(|e| !e.healthy);
        ordered.into_iter().map(|e| e.url.clone()).collect()
    }

    fn record(&self, url: &str, method: &str, success: bool, elapsed_ms: u64) {
        if let Some(endpoint) = self.endpoints.lock().iter_mut().find(|e| e.url == url) {
            if success {
                endpoint.record_success(elapsed_ms);
            } else {
                endpoint.record_error();
            }
        }
        self.stats.lock().record(method, success, elapsed_ms);
    }
}
