//! Pure display helpers for the price table

use crate::prices::PriceReading;
use alloy_primitives::Address;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const PRICE_UNAVAILABLE: &str = "Price unavailable";
pub const PRICE_LOADING: &str = "loading...";

/// Fractional digits shown for prices
const PRICE_PLACES: u8 = 4;

/// Text before the first `/` of a feed symbol (`ETH/USD` -> `ETH`)
pub fn base_symbol(symbol: &str) -> &str {
    symbol.split('/').next().unwrap_or(symbol)
}

/// `$` + value rounded to 4 decimals, or "Price unavailable" for `price <= 0`
pub fn format_price(reading: &PriceReading) -> String {
    if reading.is_available() {
        format!("${}", reading.to_decimal_string(PRICE_PLACES))
    } else {
        PRICE_UNAVAILABLE.to_string()
    }
}

/// Price cell content; no entry yet means the read is still pending
pub fn price_cell(reading: Option<&PriceReading>) -> String {
    match reading {
        Some(reading) => format_price(reading),
        None => PRICE_LOADING.to_string(),
    }
}

/// `0x1234...abcd` from the checksummed address
pub fn truncate_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum IconRef {
    File(PathBuf),
    Placeholder,
}

impl IconRef {
    /// Single-character marker used in the Token column
    pub fn marker(&self) -> &'static str {
        match self {
            IconRef::File(_) => "◆",
            IconRef::Placeholder => "○",
        }
    }
}

/// `<icon_dir>/<lowercase address>/logo.png` when present, else a placeholder
pub fn resolve_icon(icon_dir: &Path, address: &Address) -> IconRef {
    let path = icon_dir
        .join(address.to_string().to_lowercase())
        .join("logo.png");
    if path.is_file() {
        IconRef::File(path)
    } else {
        IconRef::Placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, I256};
    use tempfile::TempDir;

    fn reading(price: i64, decimals: u8) -> PriceReading {
        PriceReading::new(I256::try_from(price).unwrap(), decimals)
    }

    #[test]
    fn test_base_symbol() {
        assert_eq!(base_symbol("WBTC/USDT"), "WBTC");
        assert_eq!(base_symbol("ETH/USD"), "ETH");
        assert_eq!(base_symbol("MATIC"), "MATIC");
        assert_eq!(base_symbol("A/B/C"), "A");
        assert_eq!(base_symbol(""), "");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(&reading(123_456_789, 8)), "$1.2346");
        assert_eq!(format_price(&reading(250_000_000_000, 8)), "$2500.0000");
        assert_eq!(format_price(&reading(0, 8)), PRICE_UNAVAILABLE);
        assert_eq!(format_price(&reading(-5, 8)), PRICE_UNAVAILABLE);
        assert_eq!(format_price(&PriceReading::SENTINEL), PRICE_UNAVAILABLE);
    }

    #[test]
    fn test_price_cell() {
        assert_eq!(price_cell(None), PRICE_LOADING);
        assert_eq!(price_cell(Some(&reading(100_000_000, 8))), "$1.0000");
    }

    #[test]
    fn test_truncate_address() {
        let addr = address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6");
        assert_eq!(truncate_address(&addr), "0x1BFD...BfD6");
    }

    #[test]
    fn test_resolve_icon() {
        let dir = TempDir::new().unwrap();
        let addr = address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6");
        assert_eq!(resolve_icon(dir.path(), &addr), IconRef::Placeholder);

        let icon_dir = dir.path().join("0x1bfd67037b42cf73acf2047067bd4f2c47d9bfd6");
        std::fs::create_dir_all(&icon_dir).unwrap();
        std::fs::write(icon_dir.join("logo.png"), b"png").unwrap();
        assert_eq!(
            resolve_icon(dir.path(), &addr),
            IconRef::File(icon_dir.join("logo.png"))
        );

        assert_eq!(
            resolve_icon(Path::new("/does/not/exist"), &addr),
            IconRef::Placeholder
        );
    }
}
