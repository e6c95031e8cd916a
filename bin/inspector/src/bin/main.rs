//! Command line inspector for the Mantle L2 contracts.
//!
//! Offline commands read the bundled contract artifacts; the others query
//! (or, for the signing commands, transact on) the configured RPC endpoints.

use action::{
    deploy_contract, Action, FeeVaultWithdrawAction, InitiateWithdrawal, InitiateWithdrawalAction,
    SendMessage, SendMessageAction, UpdateTokenRatioAction,
};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rpc_types_eth::BlockNumberOrTag;
use binding::registry;
use clap::{Parser, Subcommand};
use inspector::{
    abi_json, bytecode_hex, config::Config, contracts_table, datalayr_report,
    describe_scan_error, format_withdrawal, message_status,
    metrics::{install_prometheus_exporter, Metrics},
    selectors_table, token_report, watch_events, withdrawals_in_range,
};
use reader::{FeeVaultReader, GasOracleReader};
use serde::Serialize;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "inspector")]
#[command(about = "Inspect and operate the Mantle L2 contracts")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Private key for signing transactions (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    private_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List bound contracts and their predeploy addresses
    Contracts,

    /// Print the JSON ABI of a contract
    Abi { name: String },

    /// Print the creation bytecode of a contract
    Bytecode { name: String },

    /// Print function selectors and event topics of a contract
    Selectors { name: String },

    /// Show the gas price oracle state
    Oracle,

    /// Show the sequencer fee vault state
    FeeVault,

    /// Show ERC20 and bridge metadata of a token
    Token {
        address: Address,
        /// Also show the balance of this holder
        #[arg(long)]
        holder: Option<Address>,
    },

    /// List withdrawals initiated in a block range
    Withdrawals {
        #[arg(long, default_value_t = 0)]
        from: u64,
        /// Defaults to the latest block
        #[arg(long)]
        to: Option<u64>,
    },

    /// Show the relay status of a cross-domain message hash
    MessageStatus { hash: B256 },

    /// Show DataLayr service manager parameters
    Datalayr,

    /// Stream withdrawal and messenger events
    Watch {
        /// Start from this block instead of the chain head
        #[arg(long)]
        from: Option<u64>,
    },

    /// Sweep the sequencer fee vault (signs)
    WithdrawFees,

    /// Set the oracle token ratio (signs, operator only)
    SetTokenRatio { ratio: U256 },

    /// Initiate an L2→L1 withdrawal (signs)
    InitiateWithdrawal {
        target: Address,
        /// MNT to withdraw, in wei
        #[arg(long, default_value_t = U256::ZERO)]
        mnt: U256,
        /// ETH to withdraw, in wei
        #[arg(long, default_value_t = U256::ZERO)]
        eth: U256,
        #[arg(long, default_value_t = U256::from(100_000u64))]
        gas_limit: U256,
        #[arg(long, default_value = "0x")]
        data: Bytes,
    },

    /// Send an L2→L1 cross-domain message (signs)
    SendMessage {
        target: Address,
        #[arg(long, default_value = "0x")]
        message: Bytes,
        #[arg(long, default_value_t = 200_000)]
        min_gas_limit: u32,
        /// MNT sent with the message, in wei
        #[arg(long, default_value_t = U256::ZERO)]
        mnt: U256,
        /// ETH sent with the message, in wei
        #[arg(long, default_value_t = U256::ZERO)]
        eth: U256,
    },

    /// Deploy a bound contract on L2 (signs)
    Deploy {
        name: String,
        /// ABI-encoded constructor arguments
        #[arg(long, default_value = "0x")]
        args: Bytes,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn require_key(private_key: Option<&str>) -> eyre::Result<&str> {
    private_key.ok_or_else(|| eyre::eyre!("A private key is required (--private-key or PRIVATE_KEY)"))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    // Offline commands need neither config nor RPC.
    match &cli.command {
        Command::Contracts => {
            print!("{}", contracts_table()?);
            return Ok(());
        }
        Command::Abi { name } => {
            println!("{}", abi_json(name)?);
            return Ok(());
        }
        Command::Bytecode { name } => {
            println!("{}", bytecode_hex(name)?);
            return Ok(());
        }
        Command::Selectors { name } => {
            print!("{}", selectors_table(name)?);
            return Ok(());
        }
        _ => {}
    }

    let config = Config::from_file(&cli.config)?;
    let network = config.network_config();

    info!(
        network = ?config.network,
        l2_rpc_url = %config.l2_rpc_url,
        l2_chain_id = network.l2.chain_id,
        "Loaded config"
    );

    let l2_provider = client::create_provider(&config.l2_rpc_url)?;

    match cli.command {
        Command::Contracts | Command::Abi { .. } | Command::Bytecode { .. } | Command::Selectors { .. } => {}
        Command::Oracle => {
            let snapshot = GasOracleReader::new(l2_provider, network.l2.gas_price_oracle)
                .snapshot()
                .await?;
            print_json(&snapshot)?;
        }
        Command::FeeVault => {
            let snapshot = FeeVaultReader::new(l2_provider, network.l2.sequencer_fee_vault)
                .snapshot()
                .await?;
            print_json(&snapshot)?;
            info!(withdrawable = snapshot.is_withdrawable(), "Fee vault");
        }
        Command::Token { address, holder } => {
            let report = token_report(l2_provider, address, holder).await?;
            print_json(&report)?;
        }
        Command::Withdrawals { from, to } => {
            let to = to.map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number);
            let result = withdrawals_in_range(
                l2_provider,
                &network,
                config.scan_chunk_size,
                BlockNumberOrTag::Number(from),
                to,
            )
            .await;

            match result {
                Ok(withdrawals) => {
                    for withdrawal in &withdrawals {
                        println!("{}", format_withdrawal(withdrawal));
                    }
                    info!(count = withdrawals.len(), "Scan complete");
                }
                Err(e) => {
                    if let Some(hint) = e
                        .downcast_ref::<withdrawal::WithdrawalError>()
                        .and_then(describe_scan_error)
                    {
                        error!(hint, "Invalid block range");
                    }
                    return Err(e);
                }
            }
        }
        Command::MessageStatus { hash } => {
            let status = message_status(l2_provider, &network, hash).await?;
            println!("{hash} {status}");
        }
        Command::Datalayr => {
            let l1_provider = client::create_provider(&config.l1_rpc_url)?;
            let report = datalayr_report(l1_provider, &network).await?;
            print_json(&report)?;
        }
        Command::Watch { from } => {
            let metrics = Metrics::new();
            if let Some(port) = config.metrics_port {
                install_prometheus_exporter(port)?;
                info!(port, "Prometheus exporter listening");
            }
            watch_events(l2_provider, &network, &metrics, from).await?;
        }
        Command::WithdrawFees => {
            let key = require_key(cli.private_key.as_deref())?;
            let provider = client::create_wallet_provider(&config.l2_rpc_url, key)?;
            client::ensure_chain_id(&provider, network.l2.chain_id).await?;

            let mut action = FeeVaultWithdrawAction::new(provider, network.l2.sequencer_fee_vault);
            run(&mut action).await?;
        }
        Command::SetTokenRatio { ratio } => {
            let key = require_key(cli.private_key.as_deref())?;
            let operator = client::signer_address(key)?;
            let provider = client::create_wallet_provider(&config.l2_rpc_url, key)?;
            client::ensure_chain_id(&provider, network.l2.chain_id).await?;

            let mut action =
                UpdateTokenRatioAction::new(provider, network.l2.gas_price_oracle, operator, ratio);
            run(&mut action).await?;
        }
        Command::InitiateWithdrawal {
            target,
            mnt,
            eth,
            gas_limit,
            data,
        } => {
            let key = require_key(cli.private_key.as_deref())?;
            let source = client::signer_address(key)?;
            let provider = client::create_wallet_provider(&config.l2_rpc_url, key)?;
            client::ensure_chain_id(&provider, network.l2.chain_id).await?;

            let mut action = InitiateWithdrawalAction::new(
                provider,
                InitiateWithdrawal {
                    contract: network.l2.message_passer,
                    source,
                    target,
                    mnt_value: mnt,
                    eth_value: eth,
                    gas_limit,
                    data,
                    tx_hash: None,
                },
            );
            run(&mut action).await?;
        }
        Command::SendMessage {
            target,
            message,
            min_gas_limit,
            mnt,
            eth,
        } => {
            let key = require_key(cli.private_key.as_deref())?;
            let sender = client::signer_address(key)?;
            let provider = client::create_wallet_provider(&config.l2_rpc_url, key)?;
            client::ensure_chain_id(&provider, network.l2.chain_id).await?;

            let mut action = SendMessageAction::new(
                provider,
                SendMessage {
                    messenger: network.l2.cross_domain_messenger,
                    sender,
                    target,
                    message,
                    min_gas_limit,
                    mnt_value: mnt,
                    eth_amount: eth,
                    tx_hash: None,
                },
            );
            run(&mut action).await?;
        }
        Command::Deploy { name, args } => {
            let key = require_key(cli.private_key.as_deref())?;
            let metadata = registry::find(&name)?;
            let provider = client::create_wallet_provider(&config.l2_rpc_url, key)?;
            client::ensure_chain_id(&provider, network.l2.chain_id).await?;

            let deployment = deploy_contract(&provider, &metadata, &args).await?;
            println!("{} {}", deployment.address, deployment.tx_hash);
        }
    }

    Ok(())
}

async fn run<A: Action>(action: &mut A) -> eyre::Result<()> {
    info!(action = %action.description(), "Running action");

    if action.is_completed().await? {
        info!("Action already completed");
        return Ok(());
    }

    if !action.is_ready().await? {
        eyre::bail!("Action not ready: {}", action.description());
    }

    let result = action.execute().await?;
    info!(
        tx_hash = %result.tx_hash,
        block_number = result.block_number,
        gas_used = ?result.gas_used,
        "Action executed"
    );
    Ok(())
}
