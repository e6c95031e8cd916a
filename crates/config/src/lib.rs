//! Configuration types for the L2 contract bindings.
//!
//! This crate provides:
//! - Network configurations (mainnet, testnet)
//! - Contract addresses on L1 and L2
//! - Loading partial overrides from TOML

pub mod network;

pub use network::{
    ConfigError, L1Config, L2Config, NetworkConfig, NetworkConfigBuilder, NetworkOverrides,
    NetworkType,
};
