use crate::{Action, ActionResult};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use binding::oracle::GasPriceOracle;
use reader::GasOracleReader;
use tracing::info;

/// Set the MNT/ETH token ratio on the gas price oracle.
///
/// Only the oracle operator may update the ratio.
pub struct UpdateTokenRatioAction<P> {
    provider: P,
    oracle: Address,
    operator: Address,
    target_ratio: U256,
}

impl<P> UpdateTokenRatioAction<P>
where
    P: Provider + Clone,
{
    /// `operator` is the account signing for `provider`.
    pub const fn new(provider: P, oracle: Address, operator: Address, target_ratio: U256) -> Self {
        Self {
            provider,
            oracle,
            operator,
            target_ratio,
        }
    }

    fn reader(&self) -> GasOracleReader<P> {
        GasOracleReader::new(self.provider.clone(), self.oracle)
    }
}

impl<P> Action for UpdateTokenRatioAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        if self.target_ratio.is_zero() {
            return Ok(false);
        }

        let operator = self.reader().operator().await?;
        Ok(operator == self.operator)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let current = self.reader().token_ratio().await?;
        Ok(current == self.target_ratio)
    }

    async fn execute(&mut self) -> eyre::Result<ActionResult> {
        if self.is_completed().await? {
            eyre::bail!("Token ratio already set to {}", self.target_ratio);
        }

        if self.target_ratio.is_zero() {
            eyre::bail!("Token ratio must not be zero");
        }
        self.reader().ensure_operator(self.operator).await?;

        let contract = GasPriceOracle::new(self.oracle, &self.provider);
        let tx = contract.setTokenRatio(self.target_ratio).send().await?;
        let receipt = tx.get_receipt().await?;
        let result = ActionResult::from_receipt(&receipt)?;

        info!(
            tx_hash = %result.tx_hash,
            block_number = result.block_number,
            token_ratio = %self.target_ratio,
            "Token ratio updated."
        );

        Ok(result)
    }

    fn description(&self) -> String {
        format!(
            "Set token ratio on {} to {}",
            self.oracle, self.target_ratio
        )
    }
}
