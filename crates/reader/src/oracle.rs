use crate::ReaderError;
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::Provider;
use binding::oracle::GasPriceOracle;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// All fee parameters published by the `GasPriceOracle` predeploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasOracleSnapshot {
    pub owner: Address,
    /// Account allowed to update the token ratio
    pub operator: Address,
    /// MNT/ETH price ratio applied to the L1 fee
    pub token_ratio: U256,
    pub gas_price: U256,
    pub base_fee: U256,
    pub l1_base_fee: U256,
    pub overhead: U256,
    pub scalar: U256,
    pub decimals: U256,
    pub version: String,
}

pub struct GasOracleReader<P> {
    provider: P,
    address: Address,
}

impl<P> GasOracleReader<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }

    pub async fn snapshot(&self) -> Result<GasOracleSnapshot, ReaderError> {
        let oracle = GasPriceOracle::new(self.address, &self.provider);

        let snapshot = GasOracleSnapshot {
            owner: oracle.owner().call().await?,
            operator: oracle.operator().call().await?,
            token_ratio: oracle.tokenRatio().call().await?,
            gas_price: oracle.gasPrice().call().await?,
            base_fee: oracle.baseFee().call().await?,
            l1_base_fee: oracle.l1BaseFee().call().await?,
            overhead: oracle.overhead().call().await?,
            scalar: oracle.scalar().call().await?,
            decimals: oracle.decimals().call().await?,
            version: oracle.version().call().await?,
        };

        debug!(
            oracle = %self.address,
            token_ratio = %snapshot.token_ratio,
            l1_base_fee = %snapshot.l1_base_fee,
            "Queried gas price oracle"
        );

        Ok(snapshot)
    }

    pub async fn token_ratio(&self) -> Result<U256, ReaderError> {
        let oracle = GasPriceOracle::new(self.address, &self.provider);
        Ok(oracle.tokenRatio().call().await?)
    }

    pub async fn operator(&self) -> Result<Address, ReaderError> {
        let oracle = GasPriceOracle::new(self.address, &self.provider);
        Ok(oracle.operator().call().await?)
    }

    /// L1 data fee the sequencer charges for a transaction with this RLP payload.
    pub async fn l1_fee(&self, data: Bytes) -> Result<U256, ReaderError> {
        let oracle = GasPriceOracle::new(self.address, &self.provider);
        Ok(oracle.getL1Fee(data).call().await?)
    }

    pub async fn l1_gas_used(&self, data: Bytes) -> Result<U256, ReaderError> {
        let oracle = GasPriceOracle::new(self.address, &self.provider);
        Ok(oracle.getL1GasUsed(data).call().await?)
    }

    /// Fail unless `address` is the current oracle operator.
    pub async fn ensure_operator(&self, address: Address) -> Result<(), ReaderError> {
        let operator = self.operator().await?;
        if operator != address {
            return Err(ReaderError::NotOperator { address, operator });
        }
        Ok(())
    }
}
