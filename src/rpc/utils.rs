//! RPC utility functions
//!
//! Hex quantity and data helpers for the Ethereum JSON-RPC wire format.

use super::types::{RpcError, RpcResult};
use alloy_primitives::hex;

/// Decode a `0x`-prefixed hex data string (e.g. `eth_call` output)
pub fn decode_hex_data(value: &str) -> RpcResult<Vec<u8>> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("hex data without 0x prefix: {}", value)))?;
    hex::decode(digits).map_err(|e| RpcError::InvalidResponse(format!("invalid hex data: {}", e)))
}

/// Parse a `0x`-prefixed hex quantity (e.g. `eth_chainId` output)
pub fn parse_hex_quantity(value: &str) -> RpcResult<u64> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("quantity without 0x prefix: {}", value)))?;
    if digits.is_empty() {
        return Err(RpcError::InvalidResponse("empty hex quantity".to_string()));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("invalid hex quantity {}: {}", value, e)))
}

/// Encode call data as a `0x`-prefixed hex string
pub fn encode_hex_data(data: &[u8]) -> String {
    hex::encode_prefixed(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polygon_chain_id() {
        assert_eq!(parse_hex_quantity("0x89").unwrap(), 137);
        assert_eq!(parse_hex_quantity("0x1").unwrap(), 1);
    }

    #[test]
    fn test_parse_quantity_rejects_garbage() {
        assert!(parse_hex_quantity("137").is_err());
        assert!(parse_hex_quantity("0x").is_err());
        assert!(parse_hex_quantity("0xzz").is_err());
    }

    #[test]
    fn test_hex_data() {
        assert_eq!(decode_hex_data("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex_data("0x00ff").unwrap(), vec![0x00, 0xff]);
        assert!(decode_hex_data("00ff").is_err());
        assert_eq!(encode_hex_data(&[0xde, 0xad]), "0xdead");
    }
}
