use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use pricefeed_dashboard::config::Config;
use pricefeed_dashboard::contract::{ContractReader, RpcContractReader};
use pricefeed_dashboard::dashboard::{base_symbol, format_price};
use pricefeed_dashboard::prices::{classify, ListState, RefreshOrchestrator};
use pricefeed_dashboard::rpc::RpcClient;
use pricefeed_dashboard::session::Session;
use pricefeed_dashboard::{logger, paths};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "debug_feed")]
#[command(about = "Debug tool for the on-chain price feed contract", long_about = None)]
struct Args {
  /// Config file (defaults to the dashboard's config)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Override the RPC endpoint
  #[arg(long)]
  rpc_url: Option<String>,

  #[command(subcommand)]
  command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
  /// Query eth_chainId only
  ChainId,
  /// Read getTokenList() and every price through the refresh pipeline
  List,
  /// Read one token's price through its classified entry point
  Price { token: Address },
  /// Read feedDecimals(token)
  Decimals { token: Address },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
  let args = Args::parse();

  // clap owns the command line; the library flag helpers see none of it
  pricefeed_dashboard::arguments::set_cmd_args(vec!["debug_feed".to_string()]);
  paths::ensure_all_directories()?;
  logger::init();

  let config_path = args.config.unwrap_or_else(paths::get_config_path);
  let mut config = Config::load(&config_path)?;
  config.apply_env_overrides();
  config.apply_rpc_override(args.rpc_url);
  config.validate()?;

  println!("Price Feed Debug Tool\n");
  println!("{}", "=".repeat(80));
  println!("RPC:      {}", config.rpc_url);
  println!("Contract: {}", config.contract_address);
  println!("Chain:    {}", config.chain_id);
  println!("{}", "=".repeat(80));

  let rpc = Arc::new(RpcClient::new(&config.rpc_url, &config.rpc_fallbacks, config.timeout())?);
  let session = Arc::new(Session::new(rpc.clone(), config.chain_id));
  let chain_id = session.connect().await?;
  println!("\nConnected, endpoint reports chain {}", chain_id);

  if let Cmd::ChainId = args.command {
    return Ok(());
  }
  session.ensure_ready()?;

  let reader = Arc::new(RpcContractReader::new(rpc.clone(), session.clone(), config.contract()?));
  let special = config.special_token()?;

  match args.command {
    Cmd::ChainId => {}
    Cmd::List => {
      let orchestrator = RefreshOrchestrator::new(reader, special);
      if let Some(snapshot) = orchestrator.refresh_list().await {
        orchestrator.rebuild_prices(snapshot).await;
      }

      match orchestrator.list_state() {
        ListState::Loaded(tokens) => {
          println!("\n[TOKENS ({})]\n", tokens.len());
          let prices = orchestrator.prices();
          for (i, token) in tokens.iter().enumerate() {
            let price = prices
              .get(&token.address)
              .map(format_price)
              .unwrap_or_else(|| "-".to_string());
            println!(
              "{:>3}. {:<10} {:<12} {} ({})",
              i + 1,
              base_symbol(&token.symbol),
              token.symbol,
              price,
              token.address
            );
          }
        }
        ListState::Failed(reason) => println!("Failed to read token list: {}", reason),
        _ => println!("Token list not loaded"),
      }
    }
    Cmd::Price { token } => {
      let read = classify(token, special);
      println!("\n[PRICE via {}]", read.function_name());
      match read.execute(reader.as_ref()).await {
        Ok(reading) => println!(
          "price={} decimals={} -> {}",
          reading.price,
          reading.decimals,
          format_price(&reading)
        ),
        Err(e) => println!("Read failed: {}", e),
      }
    }
    Cmd::Decimals { token } => match reader.feed_decimals(token).await {
      Ok(decimals) => println!("\nfeedDecimals({}) = {}", token, decimals),
      Err(e) => println!("\nRead failed: {}", e),
    },
  }

  let stats = rpc.stats();
  println!("\n[RPC STATS]");
  println!("Total Requests: {}", stats.total_requests);
  println!("Successful: {}", stats.successful_requests);
  println!("Failed: {}", stats.failed_requests);
  println!("Avg Response Time: {}ms", stats.average_response_time_ms);

  logger::flush();
  Ok(())
}
