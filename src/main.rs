//! `seele-cli`: command-line access to a sharded Seele network.
//!
//! ```text
//! seele-cli [--config seele.toml] [--log-level debug] <command>
//!
//!   shard <address>                 shard owning an address
//!   pubkey                          account of SEELE_PRIVATE_KEY
//!   info <shard>                    node information
//!   nonce <address>                 account nonce
//!   balance <address>               account balance
//!   call <contract> <payload>       read-only contract call
//!   rpc <shard> <command> [params]  any registered command
//!   send <to> <amount>              build, fill, sign and submit a transfer
//!   tx <hash> <shard>               transaction by hash
//!   receipt <hash> <shard>          receipt by transaction hash
//! ```

use std::path::PathBuf;

use alloy::primitives::B256;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use seele_sdk::blockchain::{parse_address, parse_payload, SeeleClient, TxBuilder, Wallet};
use seele_sdk::config::{load_config, SdkConfig};
use seele_sdk::observability::logging;
use seele_sdk::routing::{shard_of, ShardId};

#[derive(Parser)]
#[command(name = "seele-cli")]
#[command(about = "Command-line client for the Seele sharded blockchain", long_about = None)]
struct Cli {
    /// TOML file with shard endpoints and timeouts
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the config file
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the shard owning an address
    Shard { address: String },
    /// Print the account of the key in SEELE_PRIVATE_KEY
    Pubkey,
    /// Node information of a shard
    Info { shard: u16 },
    /// Account nonce
    Nonce { address: String },
    /// Account balance
    Balance { address: String },
    /// Read-only contract call
    Call { contract: String, payload: String },
    /// Send any registered command to a shard
    Rpc {
        shard: u16,
        command: String,
        /// JSON values; anything that is not JSON is sent as a string
        params: Vec<String>,
    },
    /// Transfer from the account of SEELE_PRIVATE_KEY
    Send {
        to: String,
        amount: u64,
        #[arg(long, default_value = "")]
        payload: String,
        /// Print the signed transaction without submitting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Transaction by hash
    Tx { hash: B256, shard: u16 },
    /// Receipt by transaction hash
    Receipt { hash: B256, shard: u16 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SdkConfig::default(),
    };
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    logging::init(level);

    tracing::debug!(
        shard_count = config.network.shard_count,
        timeout_ms = config.rpc.timeout_ms,
        "Configuration loaded"
    );

    let client = SeeleClient::from_config(&config);

    let output = match cli.command {
        Commands::Shard { address } => {
            let address = parse_address(&address)?;
            let shard = shard_of(&address, config.network.shard_count);
            json!({ "address": address, "shard": shard })
        }
        Commands::Pubkey => json!({ "address": Wallet::from_env()?.address() }),
        Commands::Info { shard } => client.node_info(ShardId(shard)).await?,
        Commands::Nonce { address } => json!(client.get_nonce(&parse_address(&address)?).await?),
        Commands::Balance { address } => {
            let info = client.get_balance(&parse_address(&address)?).await?;
            json!({ "Account": info.account, "Balance": info.balance })
        }
        Commands::Call { contract, payload } => {
            client
                .call_contract(&parse_address(&contract)?, &parse_payload(&payload)?)
                .await?
        }
        Commands::Rpc {
            shard,
            command,
            params,
        } => {
            let params = params.iter().map(String::as_str).map(parse_param).collect();
            client.invoke(ShardId(shard), &command, params).await?
        }
        Commands::Send {
            to,
            amount,
            payload,
            dry_run,
        } => {
            let wallet = Wallet::from_env()?;
            let builder = TxBuilder::new(client);
            let to = parse_address(&to)?;
            let payload = parse_payload(&payload)?;
            if dry_run {
                json!(builder.prepare_async(&wallet, to, amount, payload).await?)
            } else {
                let outcome = builder.send_async(&wallet, to, amount, payload).await?;
                json!({ "hash": outcome.signed.hash, "response": outcome.response })
            }
        }
        Commands::Tx { hash, shard } => client.transaction_by_hash(&hash, ShardId(shard)).await?,
        Commands::Receipt { hash, shard } => client.receipt_by_hash(&hash, ShardId(shard)).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
