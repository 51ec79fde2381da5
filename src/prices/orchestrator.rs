//! Refresh orchestration for the token list and its price mapping
//!
//! The orchestrator is the only owner of the price mapping. The list path and
//! the price path are decoupled through a `watch` channel:
//!
//! ```text
//! refresh_list() ──► ListSnapshot{generation} ──watch──► price sync task
//!                                                          │
//!                                    rebuild_prices(snapshot) (one task each)
//!                                                          │
//!                          commit only if generation is still current
//! ```
//!
//! A list refresh takes its generation when it is triggered, so a slow read
//! overtaken by a newer refresh is dropped instead of published. Publishing
//! prunes mapping entries of tokens that left the list.
//!
//! `refresh_one()` patches a single entry in place and never touches the
//! others. A rebuild that finishes after a newer snapshot was published is
//! discarded, so results from a superseded list never reach the mapping.

use super::classifier::classify;
use super::reconciler::reconcile;
use super::types::{ListSnapshot, ListState, PriceMapping, PriceReading, ReadOutcome};
use crate::contract::ContractReader;
use crate::errors::DashboardResult;
use crate::logger::{self, LogTag};
use alloy_primitives::Address;
use futures::future::join_all;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Default)]
struct OrchestratorState {
    list: ListState,
    snapshot: ListSnapshot,
    /// Ticket of the most recently triggered list refresh
    requested_generation: u64,
    prices: PriceMapping,
    /// Generation of the last committed rebuild
    prices_generation: u64,
    /// A rebuild for the current generation is in flight
    prices_loading: bool,
}

struct Inner {
    reader: Arc<dyn ContractReader>,
    special_token: Address,
    state: Mutex<OrchestratorState>,
    snapshot_tx: watch::Sender<ListSnapshot>,
    committed_tx: watch::Sender<u64>,
}

#[derive(Clone)]
pub struct RefreshOrchestrator {
    inner: Arc<Inner>,
}

impl RefreshOrchestrator {
    pub fn new(reader: Arc<dyn ContractReader>, special_token: Address) -> Self {
        let (snapshot_tx, _) = watch::channel(ListSnapshot::default());
        let (committed_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                reader,
                special_token,
                state: Mutex::new(OrchestratorState::default()),
                snapshot_tx,
                committed_tx,
            }),
        }
    }

    /// Spawn the price sync task: every published list snapshot triggers a
    /// rebuild of the price mapping for that generation.
    pub fn start(&self) -> JoinHandle<()> {
        let mut snapshots = self.inner.snapshot_tx.subscribe();
        let orchestrator = self.clone();

        tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                let snapshot = snapshots.borrow_and_update().clone();
                logger::debug(
                    LogTag::Prices,
                    &format!("List generation {} published, rebuilding prices", snapshot.generation),
                );
                let worker = orchestrator.clone();
                tokio::spawn(async move {
                    worker.rebuild_prices(snapshot).await;
                });
            }
        })
    }

    /// Re-read the token list and publish it as a new generation.
    ///
    /// The generation is taken when the refresh is triggered. A read that
    /// completes after a newer refresh was triggered is dropped and `None` is
    /// returned. Publishing prunes mapping entries for tokens that left the
    /// list; the sync task rebuilds the rest.
    pub async fn refresh_list(&self) -> Option<ListSnapshot> {
        let generation = {
            let mut state = self.inner.state.lock();
            state.requested_generation += 1;
            state.list = ListState::Loading;
            state.requested_generation
        };
        logger::debug(LogTag::Prices, &format!("Refreshing token list (generation {})", generation));

        let result = self.inner.reader.list_tokens().await;

        let snapshot = {
            let mut state = self.inner.state.lock();
            if state.requested_generation != generation {
                logger::debug(
                    LogTag::Prices,
                    &format!(
                        "Dropping token list of generation {} (generation {} requested since)",
                        generation, state.requested_generation
                    ),
                );
                return None;
            }

            let tokens = match result {
                Ok(tokens) => {
                    logger::info(
                        LogTag::Prices,
                        &format!("Loaded {} tokens (generation {})", tokens.len(), generation),
                    );
                    let tokens = Arc::new(tokens);
                    state.list = ListState::Loaded(tokens.clone());
                    Some(tokens)
                }
                Err(e) => {
                    logger::error(LogTag::Prices, &format!("Error fetching token list: {}", e));
                    state.list = ListState::Failed(e.to_string());
                    None
                }
            };

            // Every mapping key must stay a member of the published list
            match tokens.as_deref() {
                Some(list) => state
                    .prices
                    .retain(|address, _| list.iter().any(|t| &t.address == address)),
                None => state.prices.clear(),
            }
            state.prices_loading = tokens.as_ref().is_some_and(|t| !t.is_empty());
            state.snapshot = ListSnapshot { generation, tokens };
            state.snapshot.clone()
        };

        self.inner.snapshot_tx.send_replace(snapshot.clone());
        Some(snapshot)
    }

    /// Read every price of `snapshot` concurrently and commit the reconciled
    /// mapping if the snapshot is still the current generation.
    ///
    /// Returns whether the mapping was committed.
    pub async fn rebuild_prices(&self, snapshot: ListSnapshot) -> bool {
        let outcomes: Option<Vec<ReadOutcome>> = match snapshot.tokens() {
            Some(tokens) if !tokens.is_empty() => {
                let reader = self.inner.reader.as_ref();
                let special = self.inner.special_token;
                let reads = tokens.iter().map(|token| async move {
                    classify(token.address, special).execute(reader).await
                });
                Some(join_all(reads).await)
            }
            _ => None,
        };

        let mapping = reconcile(snapshot.tokens(), outcomes.as_deref());

        {
            let mut state = self.inner.state.lock();
            if state.snapshot.generation != snapshot.generation {
                logger::debug(
                    LogTag::Prices,
                    &format!(
                        "Discarding prices for stale generation {} (current {})",
                        snapshot.generation, state.snapshot.generation
                    ),
                );
                return false;
            }
            state.prices = mapping;
            state.prices_generation = snapshot.generation;
            state.prices_loading = false;
        }

        self.inner.committed_tx.send_replace(snapshot.generation);
        true
    }

    /// Re-read one token's price and patch only its entry.
    ///
    /// Failures store the sentinel. Returns the stored reading, or `None` when
    /// the address is not part of the current list (no read is issued then, and
    /// a result for a token dropped meanwhile is discarded).
    pub async fn refresh_one(&self, address: Address) -> Option<PriceReading> {
        let Some(token) = self.inner.state.lock().snapshot.token(&address).cloned() else {
            logger::warning(
                LogTag::Prices,
                &format!("Token {} is not in the current list, not refreshing", address),
            );
            return None;
        };

        let read = classify(address, self.inner.special_token);
        logger::debug(
            LogTag::Prices,
            &format!("Refreshing {} via {}", token.symbol, read.function_name()),
        );

        let reading = match read.execute(self.inner.reader.as_ref()).await {
            Ok(reading) => reading,
            Err(e) => {
                logger::warning(
                    LogTag::Prices,
                    &format!("Error refetching price for {} ({}): {}", token.symbol, address, e),
                );
                PriceReading::SENTINEL
            }
        };

        let previous = {
            let mut state = self.inner.state.lock();
            if state.snapshot.token(&address).is_none() {
                logger::debug(
                    LogTag::Prices,
                    &format!("{} left the token list during refresh, dropping result", token.symbol),
                );
                return None;
            }
            state.prices.insert(address, reading)
        };

        logger::log_price_update(
            &token.symbol,
            &address.to_string(),
            previous.map(|p| display_price(&p)).as_deref(),
            &display_price(&reading),
        );

        Some(reading)
    }

    /// `feedDecimals(token)` passthrough
    pub async fn feed_decimals(&self, address: Address) -> DashboardResult<u8> {
        self.inner.reader.feed_decimals(address).await
    }

    /// Resolves once a mapping for `generation` (or newer) is committed
    pub async fn wait_for_prices(&self, generation: u64) {
        let mut committed = self.inner.committed_tx.subscribe();
        // The sender lives as long as `self`, so this cannot fail
        let _ = committed.wait_for(|g| *g >= generation).await;
    }

    pub fn prices(&self) -> PriceMapping {
        self.inner.state.lock().prices.clone()
    }

    pub fn price_of(&self, address: &Address) -> Option<PriceReading> {
        self.inner.state.lock().prices.get(address).copied()
    }

    pub fn list_state(&self) -> ListState {
        self.inner.state.lock().list.clone()
    }

    pub fn list_snapshot(&self) -> ListSnapshot {
        self.inner.state.lock().snapshot.clone()
    }

    pub fn prices_loading(&self) -> bool {
        self.inner.state.lock().prices_loading
    }

    pub fn prices_generation(&self) -> u64 {
        self.inner.state.lock().prices_generation
    }
}

fn display_price(reading: &PriceReading) -> String {
    if reading.is_available() {
        format!("${}", reading.to_decimal_string(4))
    } else {
        "unavailable".to_string()
    }
}
