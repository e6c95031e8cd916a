use ::config::{NetworkConfig, NetworkConfigBuilder, NetworkOverrides, NetworkType};
use serde::{Deserialize, Serialize};
use std::path::Path;

const fn default_network() -> NetworkType {
    NetworkType::Mainnet
}

const fn default_scan_chunk_size() -> u64 {
    9_500
}

/// Top-level inspector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// L1 RPC endpoint url
    pub l1_rpc_url: String,

    /// L2 RPC endpoint url
    pub l2_rpc_url: String,

    /// Network preset the addresses are taken from
    #[serde(default = "default_network")]
    pub network: NetworkType,

    /// Per-contract address overrides
    #[serde(default)]
    pub overrides: NetworkOverrides,

    /// Blocks per `eth_getLogs` request when scanning
    #[serde(default = "default_scan_chunk_size")]
    pub scan_chunk_size: u64,

    /// Prometheus exporter port for `watch`; disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Network preset with the configured overrides applied.
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfigBuilder::from_network_type(self.network)
            .apply(&self.overrides)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use binding::Predeploys;

    #[test]
    fn test_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            l1_rpc_url = "http://localhost:8545"
            l2_rpc_url = "http://localhost:9545"
            "#,
        )
        .unwrap();

        assert_eq!(config.network, NetworkType::Mainnet);
        assert_eq!(config.scan_chunk_size, 9_500);
        assert_eq!(config.metrics_port, None);

        let network = config.network_config();
        assert_eq!(network.l2.chain_id, 5000);
        assert_eq!(network.l2.gas_price_oracle, Predeploys::GAS_PRICE_ORACLE);
    }

    #[test]
    fn test_config_with_overrides() {
        let config: Config = toml::from_str(
            r#"
            l1_rpc_url = "http://localhost:8545"
            l2_rpc_url = "http://localhost:9545"
            network = "testnet"
            scan_chunk_size = 2000
            metrics_port = 9090

            [overrides]
            data_layr_service_manager = "0x1111111111111111111111111111111111111111"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan_chunk_size, 2_000);
        assert_eq!(config.metrics_port, Some(9090));

        let network = config.network_config();
        assert_eq!(network.l2.chain_id, 5003);
        assert_eq!(
            network.data_layr_service_manager,
            Some(Address::repeat_byte(0x11))
        );
    }

    #[test]
    fn test_unknown_override_is_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            l1_rpc_url = "http://localhost:8545"
            l2_rpc_url = "http://localhost:9545"

            [overrides]
            spoke_pool = "0x1111111111111111111111111111111111111111"
            "#,
        );
        assert!(result.is_err());
    }
}
