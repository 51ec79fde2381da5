use super::types::{PriceMapping, PriceReading, ReadOutcome, TokenInfo};
use crate::logger::{self, LogTag};

/// Fold a token list and its index-aligned read outcomes into a price mapping.
///
/// Successful reads are stored verbatim, failed ones as
/// [`PriceReading::SENTINEL`]. A missing list or outcome sequence yields the
/// empty mapping, which also covers "not loaded yet" and "disconnected".
pub fn reconcile(tokens: Option<&[TokenInfo]>, outcomes: Option<&[ReadOutcome]>) -> PriceMapping {
    let (Some(tokens), Some(outcomes)) = (tokens, outcomes) else {
        return PriceMapping::new();
    };

    if outcomes.len() != tokens.len() {
        logger::warning(
            LogTag::Prices,
            &format!(
                "Got {} price outcomes for {} tokens, missing entries use the sentinel",
                outcomes.len(),
                tokens.len()
            ),
        );
    }

    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let reading = match outcomes.get(index) {
                Some(Ok(reading)) => *reading,
                Some(Err(e)) => {
                    logger::warning(
                        LogTag::Prices,
                        &format!("Error fetching price for {} ({}): {}", token.symbol, token.address, e),
                    );
                    PriceReading::SENTINEL
                }
                None => PriceReading::SENTINEL,
            };
            (token.address, reading)
        })
        .collect()
}
