//! Read-only views over the Mantle L2 contracts.
//!
//! Each reader wraps a provider and one contract address and turns the
//! generated call builders into typed snapshots:
//! - [`token::TokenMonitor`]: balances and ERC20 / bridged token metadata
//! - [`oracle::GasOracleReader`]: L1 fee parameters and the token ratio
//! - [`fee_vault::FeeVaultReader`]: sequencer fee vault state
//! - [`datalayr::DataLayrReader`]: DataLayr service manager parameters

pub mod datalayr;
pub mod fee_vault;
pub mod oracle;
pub mod token;

pub use datalayr::{DataLayrParameters, DataLayrReader, DataStoresForDuration};
pub use fee_vault::{FeeVaultReader, FeeVaultSnapshot};
pub use oracle::{GasOracleReader, GasOracleSnapshot};
pub use token::{Balance, BalanceQuery, BridgedTokenInfo, Monitor, TokenInfo, TokenMonitor};

use alloy_primitives::Address;
use alloy_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    /// The address is not the gas price oracle operator
    #[error("{address} is not the oracle operator ({operator})")]
    NotOperator { address: Address, operator: Address },

    /// DataLayr duration outside the supported range
    #[error("Invalid datastore duration {duration}, expected {min}..={max}")]
    InvalidDuration { duration: u8, min: u8, max: u8 },

    #[error("Contract error: {0}")]
    Contract(#[from] alloy_contract::Error),

    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),
}
