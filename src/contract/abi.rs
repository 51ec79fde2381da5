use alloy_sol_types::sol;

sol! {
    /// Read-only surface of the Chainlink price feed aggregator
    interface IChainlinkPriceFeed {
        struct TokenEntry {
            address token;
            string symbol;
        }

        function getTokenList() external view returns (TokenEntry[] memory tokenList);
        function getLatestPrice(address token) external view returns (int256 price, uint8 decimals);
        function getWBTCPriceInUSDT() external view returns (int256 price, uint8 decimals);
        function feedDecimals(address token) external view returns (uint8);
    }
}

#[cfg(test)]
mod tests {
    use super::IChainlinkPriceFeed::*;
    use alloy_primitives::{address, I256, U256};
    use alloy_sol_types::{SolCall, SolValue};

    #[test]
    fn test_selectors_match_abi() {
        assert_eq!(getTokenListCall::SIGNATURE, "getTokenList()");
        assert_eq!(getLatestPriceCall::SIGNATURE, "getLatestPrice(address)");
        assert_eq!(getWBTCPriceInUSDTCall::SIGNATURE, "getWBTCPriceInUSDT()");
        assert_eq!(feedDecimalsCall::SIGNATURE, "feedDecimals(address)");
    }

    #[test]
    fn test_latest_price_call_encodes_address_argument() {
        let token = address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619");
        let data = getLatestPriceCall { token }.abi_encode();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], &getLatestPriceCall::SELECTOR);
        assert_eq!(&data[16..], token.as_slice());
    }

    #[test]
    fn test_decode_price_return() {
        let encoded = (I256::try_from(250_012_345_678i64).unwrap(), U256::from(8u8)).abi_encode_params();
        let decoded = getLatestPriceCall::abi_decode_returns(&encoded).unwrap();
        assert_eq!(decoded.price, I256::try_from(250_012_345_678i64).unwrap());
        assert_eq!(decoded.decimals, 8);
    }

    #[test]
    fn test_decode_token_list_return() {
        let entries = vec![
            TokenEntry {
                token: address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619"),
                symbol: "ETH/USD".to_string(),
            },
            TokenEntry {
                token: address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6"),
                symbol: "WBTC/USDT".to_string(),
            },
        ];
        let encoded = (entries.clone(),).abi_encode_params();
        let decoded = getTokenListCall::abi_decode_returns(&encoded).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].symbol, "WBTC/USDT");
        assert_eq!(decoded[0].token, entries[0].token);
    }

    #[test]
    fn test_empty_return_data_is_rejected() {
        assert!(getLatestPriceCall::abi_decode_returns(&[]).is_err());
    }
}
