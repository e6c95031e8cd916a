pub mod config;
pub mod metrics;

use crate::metrics::Metrics;
use alloy_primitives::{utils::format_ether, Address, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockNumberOrTag, Log};
use binding::{
    messenger::{
        L2CrossDomainMessenger::{FailedRelayedMessage, RelayedMessage, SentMessage},
        L2ToL1MessagePasser::MessagePassed,
    },
    registry, Predeploys,
};
use ::config::NetworkConfig;
use events::{EventError, LogScanner};
use futures::{stream, Stream, StreamExt};
use reader::{
    Balance, BalanceQuery, BridgedTokenInfo, DataLayrParameters, DataLayrReader,
    DataStoresForDuration, Monitor, TokenInfo, TokenMonitor,
};
use serde::Serialize;
use std::{fmt::Write, future::Future};
use tracing::{info, warn};
use withdrawal::{
    withdrawal_from_event, MessageStatus, ScannedWithdrawal, WithdrawalStateProvider,
};

/// One line per bound contract: name, predeploy address, function and event counts.
pub fn contracts_table() -> eyre::Result<String> {
    let mut out = String::new();
    for metadata in registry::ALL {
        let abi = metadata.abi()?;
        let address = Predeploys::ALL
            .iter()
            .find(|(_, name)| *name == metadata.name)
            .map_or_else(|| "-".to_string(), |(address, _)| address.to_string());

        writeln!(
            out,
            "{:<24} {:<42} functions={:<3} events={}",
            metadata.name,
            address,
            abi.functions().count(),
            abi.events().count()
        )?;
    }
    Ok(out)
}

/// Pretty-printed JSON ABI of a bound contract.
pub fn abi_json(name: &str) -> eyre::Result<String> {
    let abi = registry::find(name)?.abi()?;
    Ok(serde_json::to_string_pretty(&abi)?)
}

/// Creation bytecode of a bound contract as 0x-prefixed hex.
pub fn bytecode_hex(name: &str) -> eyre::Result<String> {
    Ok(registry::find(name)?.bytecode()?.to_string())
}

/// Function selectors and event topics of a bound contract.
pub fn selectors_table(name: &str) -> eyre::Result<String> {
    let metadata = registry::find(name)?;
    let mut out = String::new();

    for (selector, signature) in metadata.function_signatures()? {
        writeln!(out, "{selector}  {signature}")?;
    }
    for (topic, signature) in metadata.event_signatures()? {
        writeln!(out, "{topic}  {signature}")?;
    }
    Ok(out)
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenReport {
    pub info: TokenInfo,
    /// Unset for tokens that are not bridged
    pub bridged: Option<BridgedTokenInfo>,
    pub balance: Option<Balance>,
}

pub async fn token_report<P>(
    provider: P,
    token: Address,
    holder: Option<Address>,
) -> eyre::Result<TokenReport>
where
    P: Provider + Clone,
{
    let monitor = TokenMonitor::new(provider);
    let info = monitor.token_info(token).await?;

    let bridged = match monitor.bridged_token_info(token).await {
        Ok(bridged) => Some(bridged),
        Err(e) => {
            info!(%token, error = %e, "Token has no bridge metadata");
            None
        }
    };

    let balance = match holder {
        Some(holder) => Some(
            monitor
                .query_balance(BalanceQuery::Erc20 { token, holder })
                .await?,
        ),
        None => None,
    };

    Ok(TokenReport {
        info,
        bridged,
        balance,
    })
}

pub async fn withdrawals_in_range<P>(
    provider: P,
    network: &NetworkConfig,
    chunk_size: u64,
    from_block: BlockNumberOrTag,
    to_block: BlockNumberOrTag,
) -> eyre::Result<Vec<ScannedWithdrawal>>
where
    P: Provider + Clone,
{
    let state = WithdrawalStateProvider::new(
        provider,
        network.l2.message_passer,
        network.l2.cross_domain_messenger,
    )
    .with_chunk_size(chunk_size);

    Ok(state.scan_withdrawals(from_block, to_block).await?)
}

pub fn format_withdrawal(withdrawal: &ScannedWithdrawal) -> String {
    let block = withdrawal
        .l2_block
        .map_or_else(|| "pending".to_string(), |block| block.to_string());

    format!(
        "{} block={} sender={} target={} mnt={} eth={} gas_limit={}",
        withdrawal.hash,
        block,
        withdrawal.transaction.sender,
        withdrawal.transaction.target,
        format_ether(withdrawal.transaction.mntValue),
        format_ether(withdrawal.transaction.ethValue),
        withdrawal.transaction.gasLimit
    )
}

pub async fn message_status<P>(
    provider: P,
    network: &NetworkConfig,
    hash: B256,
) -> eyre::Result<MessageStatus>
where
    P: Provider + Clone,
{
    let state = WithdrawalStateProvider::new(
        provider,
        network.l2.message_passer,
        network.l2.cross_domain_messenger,
    );
    Ok(state.message_status(hash).await?)
}

#[derive(Debug, Clone, Serialize)]
pub struct DataLayrReport {
    pub address: Address,
    pub parameters: DataLayrParameters,
    pub data_stores: DataStoresForDuration,
}

pub async fn datalayr_report<P>(provider: P, network: &NetworkConfig) -> eyre::Result<DataLayrReport>
where
    P: Provider + Clone,
{
    let Some(address) = network.data_layr_service_manager else {
        eyre::bail!("No DataLayrServiceManager address configured");
    };

    let reader = DataLayrReader::new(provider, address);
    Ok(DataLayrReport {
        address,
        parameters: reader.parameters().await?,
        data_stores: reader.data_stores_for_duration().await?,
    })
}

enum WatchedEvent {
    MessagePassed(Box<MessagePassed>),
    SentMessage(Box<SentMessage>),
    Relayed(B256),
    FailedRelay(B256),
}

impl WatchedEvent {
    const fn name(&self) -> &'static str {
        match self {
            Self::MessagePassed(_) => "MessagePassed",
            Self::SentMessage(_) => "SentMessage",
            Self::Relayed(_) => "RelayedMessage",
            Self::FailedRelay(_) => "FailedRelayedMessage",
        }
    }
}

/// Stream withdrawal and messenger events until ctrl-c or until every filter has ended.
pub async fn watch_events<P>(
    provider: P,
    network: &NetworkConfig,
    metrics: &Metrics,
    from_block: Option<u64>,
) -> eyre::Result<()>
where
    P: Provider + Clone,
{
    let passer = LogScanner::new(provider.clone(), network.l2.message_passer);
    let messenger = LogScanner::new(provider, network.l2.cross_domain_messenger);

    let withdrawals = passer
        .watch::<MessagePassed>(from_block)
        .await?
        .map(|item| item.map(|(e, log)| (WatchedEvent::MessagePassed(Box::new(e)), log)));
    let sent = messenger
        .watch::<SentMessage>(from_block)
        .await?
        .map(|item| item.map(|(e, log)| (WatchedEvent::SentMessage(Box::new(e)), log)));
    let relayed = messenger
        .watch::<RelayedMessage>(from_block)
        .await?
        .map(|item| item.map(|(e, log)| (WatchedEvent::Relayed(e.msgHash), log)));
    let failed = messenger
        .watch::<FailedRelayedMessage>(from_block)
        .await?
        .map(|item| item.map(|(e, log)| (WatchedEvent::FailedRelay(e.msgHash), log)));

    let events = stream::select(stream::select(withdrawals, sent), stream::select(relayed, failed));

    info!(
        message_passer = %network.l2.message_passer,
        messenger = %network.l2.cross_domain_messenger,
        "Watching events"
    );

    handle_events(events, metrics, tokio::signal::ctrl_c()).await
}

/// Drain merged event streams until `shutdown` resolves or the merged stream ends.
async fn handle_events<S, F>(mut events: S, metrics: &Metrics, shutdown: F) -> eyre::Result<()>
where
    S: Stream<Item = Result<(WatchedEvent, Log), EventError>> + Unpin,
    F: Future,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down");
                return Ok(());
            }
            item = events.next() => match item {
                Some(Ok((event, log))) => handle_event(metrics, &event, &log),
                Some(Err(e)) => {
                    metrics.record_event_error();
                    warn!(error = %e, "Failed to decode watched log");
                }
                None => {
                    warn!("All event filters closed");
                    return Ok(());
                }
            }
        }
    }
}

fn handle_event(metrics: &Metrics, event: &WatchedEvent, log: &Log) {
    metrics.record_event(event.name(), log.block_number);

    match event {
        WatchedEvent::MessagePassed(event) => match withdrawal_from_event(event) {
            Ok((tx, hash)) => {
                metrics.record_withdrawal(tx.mntValue, tx.ethValue);
                info!(
                    withdrawal_hash = %hash,
                    block = ?log.block_number,
                    sender = %tx.sender,
                    target = %tx.target,
                    mnt = %format_ether(tx.mntValue),
                    eth = %format_ether(tx.ethValue),
                    "Withdrawal initiated"
                );
            }
            Err(e) => {
                metrics.record_event_error();
                warn!(block = ?log.block_number, error = %e, "Invalid withdrawal event");
            }
        },
        WatchedEvent::SentMessage(event) => info!(
            block = ?log.block_number,
            target = %event.target,
            sender = %event.sender,
            nonce = %event.messageNonce,
            "Message sent"
        ),
        WatchedEvent::Relayed(hash) => info!(block = ?log.block_number, %hash, "Message relayed"),
        WatchedEvent::FailedRelay(hash) => {
            warn!(block = ?log.block_number, %hash, "Message relay failed")
        }
    }
}

/// Map a scan error to the hint a user needs.
pub fn describe_scan_error(error: &withdrawal::WithdrawalError) -> Option<&'static str> {
    match error {
        withdrawal::WithdrawalError::Event(EventError::InvalidRange { .. }) => {
            Some("--from must not be after --to")
        }
        withdrawal::WithdrawalError::Event(EventError::UnsupportedTag(_)) => {
            Some("only block numbers, `earliest` and `latest` are supported")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Bytes, U256};
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use withdrawal::WithdrawalTransaction;

    fn at_block(event: WatchedEvent, block: u64) -> Result<(WatchedEvent, Log), EventError> {
        Ok((
            event,
            Log {
                block_number: Some(block),
                ..Default::default()
            },
        ))
    }

    fn counter_total(snapshotter: &Snapshotter, name: &str) -> u64 {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter(|(key, ..)| key.key().name() == name)
            .map(|(.., value)| match value {
                DebugValue::Counter(count) => count,
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn test_contracts_table_lists_every_contract() {
        let table = contracts_table().unwrap();
        assert_eq!(table.lines().count(), registry::ALL.len());
        assert!(table.contains("GasPriceOracle"));
        assert!(table.contains("0x420000000000000000000000000000000000000F"));
    }

    #[test]
    fn test_abi_json() {
        let json = abi_json("gaspriceoracle").unwrap();
        assert!(json.contains("setTokenRatio"));
        assert!(abi_json("NotAContract").is_err());
    }

    #[test]
    fn test_bytecode_hex() {
        let code = bytecode_hex("BVMETH").unwrap();
        assert!(code.starts_with("0x"));
        assert!(code.len() > 2);
    }

    #[test]
    fn test_selectors_table() {
        let table = selectors_table("SequencerFeeVault").unwrap();
        assert!(table.contains("0x3ccfd60b  withdraw()"));
    }

    #[test]
    fn test_format_withdrawal() {
        let withdrawal = ScannedWithdrawal {
            transaction: WithdrawalTransaction {
                nonce: U256::from(1),
                sender: Address::repeat_byte(0x01),
                target: Address::repeat_byte(0x02),
                mntValue: U256::from(1_500_000_000_000_000_000u128),
                ethValue: U256::ZERO,
                gasLimit: U256::from(100_000u64),
                data: Bytes::new(),
            },
            hash: B256::repeat_byte(0xab),
            l2_block: Some(42),
            tx_hash: None,
        };

        let line = format_withdrawal(&withdrawal);
        assert!(line.contains("block=42"));
        assert!(line.contains("mnt=1.500000000000000000"));
        assert!(line.contains("gas_limit=100000"));
    }

    #[test]
    fn test_describe_scan_error() {
        let error = withdrawal::WithdrawalError::Event(EventError::InvalidRange { from: 2, to: 1 });
        assert!(describe_scan_error(&error).is_some());
        assert!(describe_scan_error(&withdrawal::WithdrawalError::NotFound("x")).is_none());
    }

    #[tokio::test]
    async fn test_handle_events_runs_until_every_stream_ends() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let _guard = ::metrics::set_default_local_recorder(&recorder);
        let metrics = Metrics::new();

        let short = stream::iter(vec![at_block(WatchedEvent::Relayed(B256::repeat_byte(1)), 1)]);
        let long = stream::iter(vec![
            at_block(WatchedEvent::Relayed(B256::repeat_byte(2)), 2),
            Err(EventError::NotFound("RelayedMessage")),
            at_block(WatchedEvent::FailedRelay(B256::repeat_byte(3)), 4),
        ]);

        handle_events(stream::select(short, long), &metrics, std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(counter_total(&snapshotter, "inspector_events_total"), 3);
        assert_eq!(counter_total(&snapshotter, "inspector_event_errors_total"), 1);
    }

    #[tokio::test]
    async fn test_handle_events_stops_on_shutdown() {
        let metrics = Metrics::new();
        let events = stream::pending::<Result<(WatchedEvent, Log), EventError>>();

        handle_events(events, &metrics, async {}).await.unwrap();
    }

    #[tokio::test]
    async fn test_datalayr_report_requires_configured_address() {
        let config: crate::config::Config = toml::from_str(
            r#"
            l1_rpc_url = "http://localhost:8545"
            l2_rpc_url = "http://localhost:9545"
            "#,
        )
        .unwrap();
        let network: NetworkConfig = config.network_config();
        assert!(network.data_layr_service_manager.is_none());

        let provider = client::create_provider(&config.l1_rpc_url).unwrap();
        let err = datalayr_report(provider, &network).await.unwrap_err();
        assert!(err.to_string().contains("DataLayrServiceManager"));
    }
}
