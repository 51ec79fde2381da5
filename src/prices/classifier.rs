use super::types::{PriceReading, ReadOutcome};
use crate::contract::ContractReader;
use alloy_primitives::Address;

/// Which price entry point serves a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRead {
    /// `getLatestPrice(token)`
    Generic(Address),
    /// `getWBTCPriceInUSDT()`, no per-token argument
    Special,
}

/// Route a token address to its price read.
///
/// Addresses compare on their 20 bytes, so checksummed and lowercase
/// spellings of the special-cased token classify the same.
pub fn classify(token: Address, special: Address) -> PriceRead {
    if token == special {
        PriceRead::Special
    } else {
        PriceRead::Generic(token)
    }
}

impl PriceRead {
    pub fn function_name(&self) -> &'static str {
        match self {
            PriceRead::Generic(_) => "getLatestPrice",
            PriceRead::Special => "getWBTCPriceInUSDT",
        }
    }

    /// Issue exactly one read for this route
    pub async fn execute(&self, reader: &dyn ContractReader) -> ReadOutcome {
        let reading: PriceReading = match self {
            PriceRead::Generic(token) => reader.latest_price(*token).await?,
            PriceRead::Special => reader.special_price().await?,
        };
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::DEFAULT_SPECIAL_TOKEN;
    use crate::prices::testing::{address, ScriptedReader};
    use std::str::FromStr;

    #[test]
    fn test_special_token_matches_any_case() {
        let lower = Address::from_str("0x1bfd67037b42cf73acf2047067bd4f2c47d9bfd6").unwrap();
        let upper = Address::from_str("0x1BFD67037B42CF73ACF2047067BD4F2C47D9BFD6").unwrap();
        assert_eq!(classify(lower, DEFAULT_SPECIAL_TOKEN), PriceRead::Special);
        assert_eq!(classify(upper, DEFAULT_SPECIAL_TOKEN), PriceRead::Special);
    }

    #[test]
    fn test_other_tokens_use_generic_read() {
        let weth = address(1);
        assert_eq!(classify(weth, DEFAULT_SPECIAL_TOKEN), PriceRead::Generic(weth));
        assert_eq!(classify(weth, DEFAULT_SPECIAL_TOKEN).function_name(), "getLatestPrice");
    }

    #[tokio::test]
    async fn test_execute_issues_one_read_per_route() {
        let special = address(9);
        let reader = ScriptedReader::new()
            .with_price(address(1), 200_000_000, 8)
            .with_special_price(6_500_000_000_000, 8);

        let generic = classify(address(1), special).execute(&reader).await.unwrap();
        assert_eq!(generic, PriceReading::new(200_000_000i64.try_into().unwrap(), 8));

        let wbtc = classify(special, special).execute(&reader).await.unwrap();
        assert_eq!(wbtc.decimals, 8);

        assert_eq!(reader.calls(), vec![format!("latest:{}", address(1)), "special".to_string()]);
    }
}
