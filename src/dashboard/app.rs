//! Dashboard controller: wires session, reader and orchestrator to the
//! terminal, and runs either the interactive loop or a single headless pass.

use super::commands::{parse_command, Command, Target, HELP};
use super::view::{build_view, render, render_header, DashboardView, ViewState};
use crate::config::Config;
use crate::contract::{ContractReader, RpcContractReader};
use crate::errors::DashboardResult;
use crate::logger::{self, LogTag};
use crate::prices::{ListSnapshot, RefreshOrchestrator};
use crate::rpc::RpcClient;
use crate::session::Session;
use alloy_primitives::Address;
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

pub enum CommandOutcome {
    Output(String),
    Quit,
}

pub struct Dashboard {
    rpc: Arc<RpcClient>,
    session: Arc<Session>,
    orchestrator: RefreshOrchestrator,
    icon_dir: PathBuf,
}

impl Dashboard {
    /// Builds the RPC-backed dashboard for a validated config
    pub fn new(config: &Config) -> DashboardResult<Self> {
        config.validate()?;
        let rpc = Arc::new(RpcClient::new(&config.rpc_url, &config.rpc_fallbacks, config.timeout())?);
        let session = Arc::new(Session::new(rpc.clone(), config.chain_id));
        let reader = Arc::new(RpcContractReader::new(rpc.clone(), session.clone(), config.contract()?));
        Self::from_parts(config, rpc, session, reader)
    }

    pub fn from_parts(
        config: &Config,
        rpc: Arc<RpcClient>,
        session: Arc<Session>,
        reader: Arc<dyn ContractReader>,
    ) -> DashboardResult<Self> {
        let orchestrator = RefreshOrchestrator::new(reader, config.special_token()?);
        Ok(Self {
            rpc,
            session,
            orchestrator,
            icon_dir: config.icon_directory(),
        })
    }

    /// Starts the price sync task; needs a running tokio runtime
    pub fn start(&self) -> JoinHandle<()> {
        self.orchestrator.start()
    }

    pub fn orchestrator(&self) -> &RefreshOrchestrator {
        &self.orchestrator
    }

    pub fn view(&self) -> DashboardView {
        let list = self.orchestrator.list_state();
        let prices = self.orchestrator.prices();
        build_view(&ViewState {
            session: self.session.status(),
            expected_chain_id: self.session.expected_chain_id(),
            list: &list,
            prices: &prices,
            prices_loading: self.orchestrator.prices_loading(),
            icon_dir: &self.icon_dir,
        })
    }

    pub fn render_screen(&self) -> String {
        format!("{}\n\n{}", render_header(self.session.status()), render(&self.view()))
    }

    /// Connect action; loads the list when the network is the expected one
    pub async fn connect(&self) -> DashboardResult<()> {
        self.session.connect().await?;
        if self.session.is_on_expected_network() {
            self.refresh_list().await;
        }
        Ok(())
    }

    /// Reloads the list and waits for the matching price mapping.
    ///
    /// Returns `None` without reading when the session is not ready, and
    /// when a newer refresh superseded this one.
    pub async fn refresh_list(&self) -> Option<ListSnapshot> {
        if let Err(e) = self.session.ensure_ready() {
            logger::warning(LogTag::Dashboard, &format!("Not refreshing: {}", e));
            return None;
        }
        let snapshot = self.orchestrator.refresh_list().await?;
        self.orchestrator.wait_for_prices(snapshot.generation).await;
        Some(snapshot)
    }

    fn resolve_target(&self, target: &Target) -> Result<Address, String> {
        match target {
            Target::Address(address) => Ok(*address),
            Target::Row(row) => self
                .orchestrator
                .list_snapshot()
                .tokens()
                .and_then(|tokens| row.checked_sub(1).and_then(|i| tokens.get(i)))
                .map(|token| token.address)
                .ok_or_else(|| format!("no row {} in the token list", row)),
        }
    }

    /// Why the Update action of a row is disabled, if it is
    fn update_blocker(&self, address: &Address) -> Option<String> {
        if let Err(e) = self.session.ensure_ready() {
            return Some(format!("Not refreshing: {}", e));
        }
        if self.orchestrator.list_snapshot().token(address).is_none() {
            return Some(format!("{} is not in the current token list", address));
        }
        if self.orchestrator.prices_loading() {
            return Some("Prices are still loading, try again shortly".to_string());
        }
        if self.orchestrator.price_of(address).is_none() {
            return Some(format!("{} has no price entry yet", address));
        }
        None
    }

    pub async fn execute(&self, command: Command) -> CommandOutcome {
        let output = match command {
            Command::Quit => return CommandOutcome::Quit,
            Command::Help => HELP.to_string(),
            Command::Connect => match self.connect().await {
                Ok(()) => self.render_screen(),
                Err(e) if e.is_recoverable() => format!(
                    "Connection failed: {}. Press 'c' to try again.\n\n{}",
                    e,
                    self.render_screen()
                ),
                Err(e) => format!("Connection failed: {}\n\n{}", e, self.render_screen()),
            },
            Command::RefreshList => {
                self.refresh_list().await;
                self.render_screen()
            }
            Command::RefreshOne(target) => match self.resolve_target(&target) {
                Err(message) => message,
                Ok(address) => match self.update_blocker(&address) {
                    Some(reason) => reason,
                    None if self.orchestrator.refresh_one(address).await.is_some() => {
                        self.render_screen()
                    }
                    None => format!("{} is not in the current token list", address),
                },
            },
            Command::Decimals(target) => match self.resolve_target(&target) {
                Err(message) => message,
                Ok(address) => match self.orchestrator.feed_decimals(address).await {
                    Ok(decimals) => format!("{}: feed decimals = {}", address, decimals),
                    Err(e) => format!("Failed to read feed decimals for {}: {}", address, e),
                },
            },
            Command::Stats => self.render_stats(),
        };
        CommandOutcome::Output(output)
    }

    fn render_stats(&self) -> String {
        let stats = self.rpc.stats();
        let mut out = format!(
            "RPC requests: {} ({} ok, {} failed, {:.1}% success), avg {} ms",
            stats.total_requests,
            stats.successful_requests,
            stats.failed_requests,
            stats.success_rate() * 100.0,
            stats.average_response_time_ms
        );
        let mut methods: Vec<_> = stats.calls_per_method.iter().collect();
        methods.sort();
        for (method, count) in methods {
            out.push_str(&format!("\n  {}: {}", method, count));
        }
        for endpoint in self.rpc.endpoints() {
            out.push_str(&format!(
                "\n  {} [{}] {:.0}% ok, {} ok / {} errors, last {} ms",
                endpoint.url,
                if endpoint.healthy { "healthy" } else { "unhealthy" },
                endpoint.success_rate() * 100.0,
                endpoint.success_count,
                endpoint.error_count,
                endpoint.response_time_ms
            ));
        }
        out
    }

    /// Interactive loop over stdin lines until `q` or end of input
    pub async fn run_interactive(&self, connect: bool) -> anyhow::Result<()> {
        let _sync = self.start();

        if connect {
            if let Err(e) = self.connect().await {
                logger::error(LogTag::Dashboard, &format!("Startup connect failed: {}", e));
            }
        }

        println!("{}\n", self.render_screen());
        println!("Type 'h' for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    println!("{}", message);
                    continue;
                }
            };
            logger::debug(LogTag::Dashboard, &format!("Command: {:?}", command));
            match self.execute(command).await {
                CommandOutcome::Quit => break,
                CommandOutcome::Output(text) => println!("{}\n", text),
            }
        }

        Ok(())
    }

    /// Connect, load, print once. Fails unless the table could be shown.
    pub async fn run_once(&self, json: bool) -> anyhow::Result<()> {
        let _sync = self.start();
        self.connect().await.context("Failed to connect to the RPC endpoint")?;

        match self.view() {
            DashboardView::Table(rows) if json => {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                Ok(())
            }
            view @ DashboardView::Table(_) => {
                println!("{}", render(&view));
                Ok(())
            }
            view => {
                let message = render(&view);
                println!("{}", message);
                Err(anyhow::anyhow!("Price table unavailable"))
            }
        }
    }
}
