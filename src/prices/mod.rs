//! Price domain: token list, price readings and their refresh flow
//!
//! - [`classifier`] routes a token to its price entry point
//! - [`reconciler`] folds per-token read outcomes into a [`PriceMapping`]
//! - [`orchestrator`] owns the mapping and drives list/single refreshes

pub mod classifier;
pub mod orchestrator;
pub mod reconciler;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use classifier::{classify, PriceRead};
pub use orchestrator::RefreshOrchestrator;
pub use reconciler::reconcile;
pub use types::{ListSnapshot, ListState, PriceMapping, PriceReading, ReadOutcome, TokenInfo};
