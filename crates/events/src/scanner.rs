use crate::EventError;
use alloy_contract::Event;
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockNumberOrTag, Log};
use alloy_sol_types::SolEvent;
use futures::{Stream, StreamExt};
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, warn};

/// Historic and live event access for one contract address.
pub struct LogScanner<P> {
    provider: P,
    address: Address,
    chunk_size: u64,
    max_retries: usize,
}

impl<P> LogScanner<P>
where
    P: Provider + Clone,
{
    /// Blocks per `eth_getLogs` request (500 block margin under the common 10k limit).
    pub const DEFAULT_CHUNK_SIZE: u64 = 9_500;

    /// Attempts per chunk before the scan fails.
    pub const DEFAULT_MAX_RETRIES: usize = 5;

    pub const fn new(provider: P, address: Address) -> Self {
        Self {
            provider,
            address,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the number of blocks per request. Zero is treated as one.
    pub const fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = if chunk_size == 0 { 1 } else { chunk_size };
        self
    }

    /// Set the number of attempts per chunk.
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    /// Resolve BlockNumberOrTag to a concrete block number.
    pub async fn resolve_block_number(&self, block: BlockNumberOrTag) -> Result<u64, EventError> {
        match block {
            BlockNumberOrTag::Number(n) => Ok(n),
            BlockNumberOrTag::Earliest => Ok(0),
            BlockNumberOrTag::Latest => Ok(self.provider.get_block_number().await?),
            other => Err(EventError::UnsupportedTag(other)),
        }
    }

    /// Query every `E` event emitted in `[from_block, to_block]`.
    ///
    /// Both ends are resolved to numbers before the first request so that all
    /// chunks see the same range even behind a load balancer. Results are in
    /// block order.
    pub async fn scan<E>(
        &self,
        from_block: BlockNumberOrTag,
        to_block: BlockNumberOrTag,
    ) -> Result<Vec<(E, Log)>, EventError>
    where
        E: SolEvent,
    {
        let from = self.resolve_block_number(from_block).await?;
        let to = self.resolve_block_number(to_block).await?;

        if from > to {
            return Err(EventError::InvalidRange { from, to });
        }

        debug!(
            event = E::SIGNATURE,
            address = %self.address,
            from,
            to,
            "Scanning for events (snapshot taken)"
        );

        let mut events = Vec::new();
        let mut current = from;

        loop {
            let chunk_end = current.saturating_add(self.chunk_size - 1).min(to);

            let chunk = self.scan_chunk_with_retry::<E>(current, chunk_end).await?;
            events.extend(chunk);

            if chunk_end == to {
                break;
            }
            current = chunk_end + 1;
        }

        Ok(events)
    }

    /// Scan a single chunk with retry and exponential backoff.
    async fn scan_chunk_with_retry<E>(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<(E, Log)>, EventError>
    where
        E: SolEvent,
    {
        // 100ms, 200ms, 400ms, ...
        let retry_strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .take(self.max_retries.saturating_sub(1));

        Retry::spawn(retry_strategy, || async {
            self.scan_chunk::<E>(from_block, to_block)
                .await
                .inspect_err(|e| {
                    warn!(
                        from = from_block,
                        to = to_block,
                        error = %e,
                        "Chunk scan failed, will retry"
                    );
                })
        })
        .await
    }

    /// Scan a single chunk of blocks (no retry logic).
    async fn scan_chunk<E>(&self, from_block: u64, to_block: u64) -> Result<Vec<(E, Log)>, EventError>
    where
        E: SolEvent,
    {
        debug!(from = from_block, to = to_block, "Scanning chunk");

        let filter = Event::<&P, E>::new_sol(&self.provider, &self.address)
            .from_block(from_block)
            .to_block(to_block);

        Ok(filter.query().await?)
    }

    /// Stream `E` events as new blocks arrive, starting at `from_block`
    /// (or the chain head when unset).
    ///
    /// Each item is a decoded event or the decode error of one log; the
    /// stream ends when the underlying log filter is dropped by the node.
    pub async fn watch<E>(
        &self,
        from_block: Option<u64>,
    ) -> Result<impl Stream<Item = Result<(E, Log), EventError>> + Unpin, EventError>
    where
        E: SolEvent + 'static,
    {
        let mut filter = Event::<&P, E>::new_sol(&self.provider, &self.address);
        if let Some(from_block) = from_block {
            filter = filter.from_block(from_block);
        }

        let poller = filter.watch().await?;
        debug!(event = E::SIGNATURE, address = %self.address, "Watching for events");

        Ok(poller
            .into_stream()
            .map(|item| item.map_err(EventError::from)))
    }
}
