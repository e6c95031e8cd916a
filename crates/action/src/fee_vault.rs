use crate::{Action, ActionResult};
use alloy_primitives::{utils::format_ether, Address};
use alloy_provider::Provider;
use binding::fee_vault::SequencerFeeVault;
use reader::FeeVaultReader;
use tracing::info;

/// Sweep the sequencer fee vault to its L1 recipient.
///
/// `withdraw()` is permissionless but reverts while the vault holds less
/// than `MIN_WITHDRAWAL_AMOUNT`.
pub struct FeeVaultWithdrawAction<P> {
    provider: P,
    vault: Address,
}

impl<P> FeeVaultWithdrawAction<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, vault: Address) -> Self {
        Self { provider, vault }
    }

    fn reader(&self) -> FeeVaultReader<P> {
        FeeVaultReader::new(self.provider.clone(), self.vault)
    }
}

impl<P> Action for FeeVaultWithdrawAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        let reader = self.reader();
        let minimum = reader.min_withdrawal_amount().await?;
        let balance = reader.balance().await?;
        Ok(balance >= minimum)
    }

    /// A sweep can always be repeated once fees accumulate again.
    async fn is_completed(&self) -> eyre::Result<bool> {
        Ok(false)
    }

    async fn execute(&mut self) -> eyre::Result<ActionResult> {
        let reader = self.reader();
        let minimum = reader.min_withdrawal_amount().await?;
        let balance = reader.balance().await?;
        if balance < minimum {
            eyre::bail!(
                "Vault balance {} MNT is below the minimum withdrawal amount {} MNT",
                format_ether(balance),
                format_ether(minimum)
            );
        }

        let contract = SequencerFeeVault::new(self.vault, &self.provider);
        let tx = contract.withdraw().send().await?;
        let receipt = tx.get_receipt().await?;
        let result = ActionResult::from_receipt(&receipt)?;

        info!(
            tx_hash = %result.tx_hash,
            block_number = result.block_number,
            amount = %format_ether(balance),
            "Fee vault withdrawn."
        );

        Ok(result)
    }

    fn description(&self) -> String {
        format!("Withdraw sequencer fees from {}", self.vault)
    }
}
