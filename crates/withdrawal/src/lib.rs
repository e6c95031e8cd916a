//! L2→L1 withdrawal primitives for the Mantle message passer.
//!
//! Withdrawals carry two values (MNT and ETH), so every hash here covers
//! both `mntValue` and `ethValue` and differs from the upstream OP Stack
//! encoding.

pub mod hash;
pub mod parse;
pub mod state;
pub mod types;

pub use hash::{
    compute_withdrawal_hash, decode_versioned_nonce, encode_versioned_nonce,
    hash_cross_domain_message, withdrawal_storage_slot, MESSAGE_VERSION,
};
pub use parse::{
    parse_message_passed, parse_messages_passed, parse_sent_messages, withdrawal_from_event,
};
pub use state::{ScannedWithdrawal, WithdrawalProof, WithdrawalStateProvider};
pub use types::{CrossDomainMessage, MessageStatus, WithdrawalHash, WithdrawalTransaction};

use alloy_primitives::B256;
use alloy_transport::TransportError;
use events::EventError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WithdrawalError {
    /// The event's `withdrawalHash` does not match the hash of its fields
    #[error("Withdrawal hash mismatch: event has {expected}, computed {computed}")]
    HashMismatch { expected: B256, computed: B256 },

    /// The receipt carries no event of the expected kind
    #[error("{0} event not found in receipt")]
    NotFound(&'static str),

    /// A `SentMessage` without its `SentMessageExtension1`
    #[error("SentMessage with nonce {0} has no value extension")]
    MissingExtension(alloy_primitives::U256),

    /// Message encoding version that cannot be hashed
    #[error("Unsupported message version: {0}")]
    UnsupportedVersion(u16),

    /// `eth_getProof` returned no storage proof for the slot
    #[error("No storage proof returned for slot {0}")]
    MissingProof(B256),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error("Contract error: {0}")]
    Contract(#[from] alloy_contract::Error),

    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),
}
