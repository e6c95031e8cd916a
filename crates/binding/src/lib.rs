//! Contract bindings for the L2 bridge and rollup contracts.
//!
//! Every binding is generated by alloy's `sol!` macro from a JSON artifact
//! under `abi/`, which carries the contract ABI and its creation bytecode:
//! - Tokens (L1TestToken, L2TestToken, BVM_ETH, LegacyERC20MNT)
//! - Messaging (L2CrossDomainMessenger, L2ToL1MessagePasser)
//! - GasPriceOracle
//! - SequencerFeeVault
//! - DataLayrServiceManager
//!
//! Each generated contract module exposes `new` (bound instance), `deploy`,
//! one call builder per ABI function (`.call()` for reads, `.send()` for
//! transactions) and one `<Event>_filter()` per ABI event.

pub mod datalayr;
pub mod fee_vault;
pub mod messenger;
pub mod metadata;
pub mod oracle;
pub mod predeploys;
pub mod token;

pub use metadata::{registry, Artifact, BindingError, ContractMetadata};
pub use predeploys::Predeploys;
