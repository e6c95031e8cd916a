//! Event access over any ABI event type.
//!
//! Every bound contract event implements [`alloy_sol_types::SolEvent`], so
//! filtering, watching and parsing are written once here instead of once per
//! event:
//! - [`parse_log`] decodes a single raw log
//! - [`parse_logs`] / [`parse_receipt`] collect every matching log
//! - [`LogScanner::scan`] queries a historic block range in chunks
//! - [`LogScanner::watch`] streams new events as they are emitted

pub mod parse;
pub mod scanner;

pub use parse::{first_in_receipt, parse_log, parse_logs, parse_receipt};
pub use scanner::LogScanner;

use alloy_primitives::B256;
use alloy_rpc_types_eth::BlockNumberOrTag;
use alloy_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    /// Block range with `from > to`
    #[error("from_block ({from}) must be <= to_block ({to})")]
    InvalidRange { from: u64, to: u64 },

    /// Block tag that cannot be resolved to a number
    #[error("Unsupported block tag: {0:?}")]
    UnsupportedTag(BlockNumberOrTag),

    /// The log was emitted by a different event
    #[error("Event signature mismatch: expected {expected}, got {actual:?}")]
    SignatureMismatch { expected: B256, actual: Option<B256> },

    /// No log of the expected event
    #[error("{0} event not found")]
    NotFound(&'static str),

    /// Error decoding the log body or topics
    #[error("Failed to decode log: {0}")]
    Decode(#[from] alloy_sol_types::Error),

    /// Error from the bound contract
    #[error("Contract error: {0}")]
    Contract(#[from] alloy_contract::Error),

    /// Error returned by the RPC endpoint
    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),
}
