//! Network configuration for the bound contracts.
//!
//! Provides chain ids and contract addresses for the supported networks.
//! L2 contracts are predeploys and share their addresses across networks.

use alloy_primitives::{address, Address};
use binding::Predeploys;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid network config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Network type (mainnet or testnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

/// L1 (Ethereum) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1Config {
    /// Chain ID
    pub chain_id: u64,
    /// MNT token on L1
    pub mnt_token: Address,
    /// Block time in seconds
    pub block_time_secs: u64,
}

impl L1Config {
    /// Ethereum mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 1,
            // https://etherscan.io/address/0x3c3a81e81dc49A522A592e7622A7E711c06bf354
            mnt_token: address!("0x3c3a81e81dc49A522A592e7622A7E711c06bf354"),
            block_time_secs: 12,
        }
    }

    /// Ethereum Sepolia testnet configuration.
    pub const fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            // https://sepolia.etherscan.io/address/0x65e37B558F64E2Be5768DB46DF22F93d85741A9E
            mnt_token: address!("0x65e37B558F64E2Be5768DB46DF22F93d85741A9E"),
            block_time_secs: 12,
        }
    }
}

/// L2 configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Config {
    /// Chain ID
    pub chain_id: u64,
    /// L2CrossDomainMessenger address
    pub cross_domain_messenger: Address,
    /// L2ToL1MessagePasser address
    pub message_passer: Address,
    /// GasPriceOracle address
    pub gas_price_oracle: Address,
    /// SequencerFeeVault address
    pub sequencer_fee_vault: Address,
    /// BVM_ETH token address
    pub bvm_eth: Address,
    /// LegacyERC20MNT token address
    pub legacy_mnt: Address,
    /// Block time in seconds
    pub block_time_secs: u64,
}

impl L2Config {
    const fn with_chain_id(chain_id: u64) -> Self {
        Self {
            chain_id,
            cross_domain_messenger: Predeploys::L2_CROSS_DOMAIN_MESSENGER,
            message_passer: Predeploys::L2_TO_L1_MESSAGE_PASSER,
            gas_price_oracle: Predeploys::GAS_PRICE_ORACLE,
            sequencer_fee_vault: Predeploys::SEQUENCER_FEE_VAULT,
            bvm_eth: Predeploys::BVM_ETH,
            legacy_mnt: Predeploys::LEGACY_ERC20_MNT,
            block_time_secs: 2,
        }
    }

    /// L2 mainnet configuration.
    pub const fn mainnet() -> Self {
        Self::with_chain_id(5000)
    }

    /// L2 Sepolia testnet configuration.
    pub const fn sepolia() -> Self {
        Self::with_chain_id(5003)
    }
}

/// Complete network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type (mainnet or testnet)
    pub network_type: NetworkType,
    /// L1 configuration
    pub l1: L1Config,
    /// L2 configuration
    pub l2: L2Config,
    /// DataLayrServiceManager on L1, when the network runs one
    pub data_layr_service_manager: Option<Address>,
}

impl NetworkConfig {
    /// Create mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            l1: L1Config::mainnet(),
            l2: L2Config::mainnet(),
            data_layr_service_manager: None,
        }
    }

    /// Create testnet (Sepolia) configuration.
    pub const fn sepolia() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            l1: L1Config::sepolia(),
            l2: L2Config::sepolia(),
            data_layr_service_manager: None,
        }
    }

    /// Create configuration from network type.
    pub const fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::sepolia(),
        }
    }
}

/// Partial address overrides, as written in a config file.
///
/// Every field is optional; unset fields keep the network default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkOverrides {
    pub l1_mnt_token: Option<Address>,
    pub cross_domain_messenger: Option<Address>,
    pub message_passer: Option<Address>,
    pub gas_price_oracle: Option<Address>,
    pub sequencer_fee_vault: Option<Address>,
    pub data_layr_service_manager: Option<Address>,
}

impl NetworkOverrides {
    /// Parse overrides from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read overrides from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start with mainnet defaults.
    pub const fn mainnet() -> Self {
        Self {
            config: NetworkConfig::mainnet(),
        }
    }

    /// Start with testnet defaults.
    pub const fn testnet() -> Self {
        Self {
            config: NetworkConfig::sepolia(),
        }
    }

    /// Start with the defaults of a network type.
    pub const fn from_network_type(network_type: NetworkType) -> Self {
        Self {
            config: NetworkConfig::from_network_type(network_type),
        }
    }

    /// Override the L1 MNT token address.
    pub const fn l1_mnt_token(mut self, address: Address) -> Self {
        self.config.l1.mnt_token = address;
        self
    }

    /// Override the L2CrossDomainMessenger address.
    pub const fn cross_domain_messenger(mut self, address: Address) -> Self {
        self.config.l2.cross_domain_messenger = address;
        self
    }

    /// Override the L2ToL1MessagePasser address.
    pub const fn message_passer(mut self, address: Address) -> Self {
        self.config.l2.message_passer = address;
        self
    }

    /// Override the GasPriceOracle address.
    pub const fn gas_price_oracle(mut self, address: Address) -> Self {
        self.config.l2.gas_price_oracle = address;
        self
    }

    /// Override the SequencerFeeVault address.
    pub const fn sequencer_fee_vault(mut self, address: Address) -> Self {
        self.config.l2.sequencer_fee_vault = address;
        self
    }

    /// Set the DataLayrServiceManager address.
    pub const fn data_layr_service_manager(mut self, address: Address) -> Self {
        self.config.data_layr_service_manager = Some(address);
        self
    }

    /// Apply every override that is set.
    pub fn apply(mut self, overrides: &NetworkOverrides) -> Self {
        if let Some(address) = overrides.l1_mnt_token {
            self = self.l1_mnt_token(address);
        }
        if let Some(address) = overrides.cross_domain_messenger {
            self = self.cross_domain_messenger(address);
        }
        if let Some(address) = overrides.message_passer {
            self = self.message_passer(address);
        }
        if let Some(address) = overrides.gas_price_oracle {
            self = self.gas_price_oracle(address);
        }
        if let Some(address) = overrides.sequencer_fee_vault {
            self = self.sequencer_fee_vault(address);
        }
        if let Some(address) = overrides.data_layr_service_manager {
            self = self.data_layr_service_manager(address);
        }
        self
    }

    /// Build the network configuration.
    pub const fn build(self) -> NetworkConfig {
        self.config
    }
}
