use crate::ReaderError;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use binding::fee_vault::SequencerFeeVault;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeVaultSnapshot {
    pub address: Address,
    /// L1 account receiving withdrawn fees
    pub recipient: Address,
    pub l1_fee_wallet: Address,
    pub min_withdrawal_amount: U256,
    pub total_processed: U256,
    pub balance: U256,
    pub version: String,
}

impl FeeVaultSnapshot {
    /// `withdraw()` reverts below the minimum amount.
    pub fn is_withdrawable(&self) -> bool {
        self.balance >= self.min_withdrawal_amount
    }
}

pub struct FeeVaultReader<P> {
    provider: P,
    address: Address,
}

impl<P> FeeVaultReader<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }

    pub async fn snapshot(&self) -> Result<FeeVaultSnapshot, ReaderError> {
        let vault = SequencerFeeVault::new(self.address, &self.provider);

        let snapshot = FeeVaultSnapshot {
            address: self.address,
            recipient: vault.RECIPIENT().call().await?,
            l1_fee_wallet: vault.l1FeeWallet().call().await?,
            min_withdrawal_amount: vault.MIN_WITHDRAWAL_AMOUNT().call().await?,
            total_processed: vault.totalProcessed().call().await?,
            balance: self.provider.get_balance(self.address).await?,
            version: vault.version().call().await?,
        };

        debug!(
            vault = %self.address,
            balance = %snapshot.balance,
            min_withdrawal_amount = %snapshot.min_withdrawal_amount,
            "Queried fee vault"
        );

        Ok(snapshot)
    }

    pub async fn balance(&self) -> Result<U256, ReaderError> {
        Ok(self.provider.get_balance(self.address).await?)
    }

    pub async fn min_withdrawal_amount(&self) -> Result<U256, ReaderError> {
        let vault = SequencerFeeVault::new(self.address, &self.provider);
        Ok(vault.MIN_WITHDRAWAL_AMOUNT().call().await?)
    }
}
