use crate::{
    hash::withdrawal_storage_slot,
    parse::withdrawal_from_event,
    types::{MessageStatus, WithdrawalHash, WithdrawalTransaction},
    WithdrawalError,
};
use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockId, BlockNumberOrTag};
use binding::messenger::{
    L2CrossDomainMessenger, L2ToL1MessagePasser, L2ToL1MessagePasser::MessagePassed,
};
use events::LogScanner;
use tracing::{debug, warn};

/// A withdrawal found by scanning `MessagePassed` logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedWithdrawal {
    pub transaction: WithdrawalTransaction,
    pub hash: WithdrawalHash,
    pub l2_block: Option<u64>,
    pub tx_hash: Option<B256>,
}

/// Storage proof of `sentMessages[hash]` against the message passer's
/// storage root, as needed to prove a withdrawal on L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalProof {
    pub slot: B256,
    pub storage_root: B256,
    pub proof: Vec<Bytes>,
}

/// Reads withdrawal and message state from the L2 predeploys.
pub struct WithdrawalStateProvider<P> {
    provider: P,
    message_passer: Address,
    messenger: Address,
    chunk_size: u64,
}

impl<P> WithdrawalStateProvider<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, message_passer: Address, messenger: Address) -> Self {
        Self {
            provider,
            message_passer,
            messenger,
            chunk_size: LogScanner::<P>::DEFAULT_CHUNK_SIZE,
        }
    }

    pub const fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Whether the message passer has committed to `hash`.
    pub async fn is_sent(&self, hash: WithdrawalHash) -> Result<bool, WithdrawalError> {
        let passer = L2ToL1MessagePasser::new(self.message_passer, &self.provider);
        Ok(passer.sentMessages(hash).call().await?)
    }

    /// Relay state of a cross-domain message hash on the L2 messenger.
    pub async fn message_status(&self, hash: B256) -> Result<MessageStatus, WithdrawalError> {
        let messenger = L2CrossDomainMessenger::new(self.messenger, &self.provider);

        if messenger.successfulMessages(hash).call().await? {
            return Ok(MessageStatus::Relayed);
        }
        if messenger.failedMessages(hash).call().await? {
            return Ok(MessageStatus::Failed);
        }

        Ok(MessageStatus::Unknown)
    }

    /// Get all withdrawals initiated in the given block range.
    ///
    /// Events whose `withdrawalHash` does not match their fields are logged
    /// and skipped.
    pub async fn scan_withdrawals(
        &self,
        from_block: BlockNumberOrTag,
        to_block: BlockNumberOrTag,
    ) -> Result<Vec<ScannedWithdrawal>, WithdrawalError> {
        let scanner = LogScanner::new(self.provider.clone(), self.message_passer)
            .with_chunk_size(self.chunk_size);
        let events = scanner.scan::<MessagePassed>(from_block, to_block).await?;

        let mut withdrawals = Vec::with_capacity(events.len());
        for (event, log) in events {
            match withdrawal_from_event(&event) {
                Ok((transaction, hash)) => withdrawals.push(ScannedWithdrawal {
                    transaction,
                    hash,
                    l2_block: log.block_number,
                    tx_hash: log.transaction_hash,
                }),
                Err(e) => warn!(
                    block = ?log.block_number,
                    tx_hash = ?log.transaction_hash,
                    error = %e,
                    "Skipping withdrawal event"
                ),
            }
        }

        debug!(count = withdrawals.len(), "Scanned withdrawals");
        Ok(withdrawals)
    }

    /// Storage proof of a withdrawal at the given L2 block.
    pub async fn withdrawal_proof(
        &self,
        hash: WithdrawalHash,
        block: BlockNumberOrTag,
    ) -> Result<WithdrawalProof, WithdrawalError> {
        let slot = withdrawal_storage_slot(hash);
        let response = self
            .provider
            .get_proof(self.message_passer, vec![slot])
            .block_id(BlockId::Number(block))
            .await?;

        let proof = response
            .storage_proof
            .first()
            .ok_or(WithdrawalError::MissingProof(slot))?
            .proof
            .clone();

        debug!(%hash, proof_nodes = proof.len(), "Generated storage proof");

        Ok(WithdrawalProof {
            slot,
            storage_root: response.storage_hash,
            proof,
        })
    }
}
