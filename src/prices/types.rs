use alloy_primitives::{Address, I256, U256};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::DashboardResult;

/// One entry of the contract's token list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    /// Full feed symbol, e.g. `ETH/USD`
    pub symbol: String,
}

/// Fixed-point price: `price / 10^decimals`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceReading {
    pub price: I256,
    pub decimals: u8,
}

impl PriceReading {
    /// Stands for "could not be read"; never a real zero price
    pub const SENTINEL: PriceReading = PriceReading {
        price: I256::ZERO,
        decimals: 8,
    };

    pub fn new(price: I256, decimals: u8) -> Self {
        Self { price, decimals }
    }

    /// Non-positive prices are valid entries but display as unavailable
    pub fn is_available(&self) -> bool {
        self.price > I256::ZERO
    }

    /// Decimal rendering rounded half-up to `places` fractional digits.
    ///
    /// Exact integer arithmetic on the 256-bit numerator; the sign is kept.
    pub fn to_decimal_string(&self, places: u8) -> String {
        let places = places.min(MAX_PLACES);
        let negative = self.price.is_negative();
        let magnitude = self.price.unsigned_abs();
        let ten = U256::from(10u8);

        let scaled = if self.decimals >= places {
            // 10^78 exceeds U256; every magnitude rounds to zero by then
            match ten.checked_pow(U256::from(self.decimals - places)) {
                Some(divisor) => {
                    let quotient = magnitude / divisor;
                    let remainder = magnitude % divisor;
                    if remainder.saturating_mul(U256::from(2u8)) >= divisor {
                        quotient.saturating_add(U256::from(1u8))
                    } else {
                        quotient
                    }
                }
                None => U256::ZERO,
            }
        } else {
            ten.checked_pow(U256::from(places - self.decimals))
                .map_or(U256::MAX, |factor| magnitude.saturating_mul(factor))
        };

        let sign = if negative && !scaled.is_zero() { "-" } else { "" };
        if places == 0 {
            return format!("{}{}", sign, scaled);
        }

        let unit = ten.pow(U256::from(places));
        let integer = scaled / unit;
        let fraction = (scaled % unit).to_string();
        format!(
            "{}{}.{:0>width$}",
            sign,
            integer,
            fraction,
            width = places as usize
        )
    }
}

/// Largest power of ten that fits in a `U256`
const MAX_PLACES: u8 = 77;

/// Token address -> latest reading
pub type PriceMapping = HashMap<Address, PriceReading>;

/// Outcome of one per-token price read
pub type ReadOutcome = DashboardResult<PriceReading>;

/// One version ("generation") of the token list
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    pub generation: u64,
    /// `None` when the list is not loaded or its read failed
    pub tokens: Option<Arc<Vec<TokenInfo>>>,
}

impl ListSnapshot {
    pub fn token(&self, address: &Address) -> Option<&TokenInfo> {
        self.tokens.as_ref()?.iter().find(|t| &t.address == address)
    }

    pub fn tokens(&self) -> Option<&[TokenInfo]> {
        self.tokens.as_deref().map(Vec::as_slice)
    }
}

/// State of the token-list read, as shown by the dashboard gate
#[derive(Debug, Clone, Default)]
pub enum ListState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Arc<Vec<TokenInfo>>),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(price: i64, decimals: u8) -> PriceReading {
        PriceReading::new(I256::try_from(price).unwrap(), decimals)
    }

    #[test]
    fn test_rounds_half_up_to_four_places() {
        assert_eq!(reading(123_456_789, 8).to_decimal_string(4), "1.2346");
        assert_eq!(reading(123_450_000, 8).to_decimal_string(4), "1.2345");
        assert_eq!(reading(123_455_000, 8).to_decimal_string(4), "1.2346");
    }

    #[test]
    fn test_pads_small_fractions() {
        assert_eq!(reading(5_000, 8).to_decimal_string(4), "0.0001");
        assert_eq!(reading(4_999, 8).to_decimal_string(4), "0.0000");
        assert_eq!(reading(7, 0).to_decimal_string(4), "7.0000");
        assert_eq!(reading(12, 2).to_decimal_string(4), "0.1200");
    }

    #[test]
    fn test_large_feed_values() {
        // BTC at 18 decimals
        let price = I256::try_from(67_123_456_789_000_000_000_000u128).unwrap();
        assert_eq!(PriceReading::new(price, 18).to_decimal_string(4), "67123.4568");
    }

    #[test]
    fn test_extreme_decimals_round_to_zero() {
        assert_eq!(PriceReading::new(I256::MAX, 255).to_decimal_string(4), "0.0000");
        assert_eq!(PriceReading::new(I256::MIN, 200).to_decimal_string(4), "0.0000");
        // 10^77 is still representable
        assert_eq!(PriceReading::new(I256::MAX, 81).to_decimal_string(4), "0.0001");
    }

    #[test]
    fn test_negative_values_keep_sign() {
        assert_eq!(reading(-150_000_000, 8).to_decimal_string(4), "-1.5000");
        assert!(!reading(-150_000_000, 8).is_available());
    }

    #[test]
    fn test_sentinel_is_unavailable() {
        assert_eq!(PriceReading::SENTINEL, reading(0, 8));
        assert!(!PriceReading::SENTINEL.is_available());
        assert!(reading(1, 8).is_available());
    }
}
