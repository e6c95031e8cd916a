use crate::{Action, ActionResult};
use alloy_primitives::{utils::format_ether, Address, Bytes, B256, U256};
use alloy_provider::Provider;
use binding::{messenger::L2ToL1MessagePasser, Predeploys};
use reader::{BalanceQuery, Monitor, TokenMonitor};
use tracing::info;
use withdrawal::{parse_message_passed, WithdrawalTransaction};

/// Withdraw input data.
#[derive(Debug, Clone)]
pub struct InitiateWithdrawal {
    /// L2ToL1MessagePasser address
    pub contract: Address,
    pub source: Address,
    pub target: Address,
    /// Native MNT sent as `msg.value`
    pub mnt_value: U256,
    /// BVM_ETH burned from the sender
    pub eth_value: U256,
    pub gas_limit: U256,
    pub data: Bytes,
    /// Optional: only exists on initiated withdrawal
    /// transaction hash from execution
    pub tx_hash: Option<B256>,
}

impl InitiateWithdrawal {
    fn matches(&self, tx: &WithdrawalTransaction) -> bool {
        tx.sender == self.source
            && tx.target == self.target
            && tx.mntValue == self.mnt_value
            && tx.ethValue == self.eth_value
            && tx.gasLimit == self.gas_limit
            && tx.data == self.data
    }
}

pub struct InitiateWithdrawalAction<P> {
    provider: P,
    action: InitiateWithdrawal,
}

impl<P: Provider + Clone> InitiateWithdrawalAction<P> {
    pub const fn new(provider: P, action: InitiateWithdrawal) -> Self {
        Self { provider, action }
    }

    pub const fn tx_hash(&self) -> Option<B256> {
        self.action.tx_hash
    }
}

impl<P> Action for InitiateWithdrawalAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        if self.action.target == Address::ZERO {
            return Ok(false);
        }

        if self.action.mnt_value.is_zero() && self.action.eth_value.is_zero() {
            return Ok(false);
        }

        let balance = self.provider.get_balance(self.action.source).await?;
        if balance < self.action.mnt_value {
            return Ok(false);
        }

        if !self.action.eth_value.is_zero() {
            let eth = TokenMonitor::new(self.provider.clone())
                .query_balance(BalanceQuery::Erc20 {
                    token: Predeploys::BVM_ETH,
                    holder: self.action.source,
                })
                .await?;
            return Ok(eth.amount >= self.action.eth_value);
        }

        Ok(true)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let Some(tx_hash) = self.action.tx_hash else {
            return Ok(false);
        };

        // Transaction must exist and be mined
        let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? else {
            return Ok(false);
        };

        let Ok((withdrawal_tx, _)) = parse_message_passed(&receipt) else {
            return Ok(false);
        };

        Ok(self.action.matches(&withdrawal_tx))
    }

    async fn execute(&mut self) -> eyre::Result<ActionResult> {
        if self.is_completed().await? {
            eyre::bail!("Withdrawal already initiated")
        }

        let contract = L2ToL1MessagePasser::new(self.action.contract, &self.provider);

        let tx = contract
            .initiateWithdrawal(
                self.action.eth_value,
                self.action.target,
                self.action.gas_limit,
                self.action.data.clone(),
            )
            .value(self.action.mnt_value)
            .send()
            .await?;

        let receipt = tx.get_receipt().await?;
        let result = ActionResult::from_receipt(&receipt)?;
        self.action.tx_hash = Some(result.tx_hash);

        let (withdrawal_tx, withdrawal_hash) = parse_message_passed(&receipt)?;
        info!(
            tx_hash = %result.tx_hash,
            block_number = result.block_number,
            gas_used = receipt.gas_used,
            withdrawal_hash = %withdrawal_hash,
            withdrawal_tx = ?withdrawal_tx,
            "Withdrawal initiated."
        );

        Ok(result)
    }

    fn description(&self) -> String {
        format!(
            "Withdrawing {} MNT and {} ETH to {} on L1",
            format_ether(self.action.mnt_value),
            format_ether(self.action.eth_value),
            self.action.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{log, mocked, push_return, receipt};
    use alloy_sol_types::SolEvent;
    use withdrawal::{compute_withdrawal_hash, encode_versioned_nonce, MESSAGE_VERSION};

    fn withdraw() -> InitiateWithdrawal {
        InitiateWithdrawal {
            contract: Predeploys::L2_TO_L1_MESSAGE_PASSER,
            source: Address::repeat_byte(0x01),
            target: Address::repeat_byte(0x02),
            mnt_value: U256::from(1_000u64),
            eth_value: U256::ZERO,
            gas_limit: U256::from(100_000u64),
            data: Bytes::new(),
            tx_hash: None,
        }
    }

    fn message_passed(withdraw: &InitiateWithdrawal) -> L2ToL1MessagePasser::MessagePassed {
        let tx = WithdrawalTransaction {
            nonce: encode_versioned_nonce(U256::from(1), MESSAGE_VERSION),
            sender: withdraw.source,
            target: withdraw.target,
            mntValue: withdraw.mnt_value,
            ethValue: withdraw.eth_value,
            gasLimit: withdraw.gas_limit,
            data: withdraw.data.clone(),
        };
        L2ToL1MessagePasser::MessagePassed {
            nonce: tx.nonce,
            sender: tx.sender,
            target: tx.target,
            mntValue: tx.mntValue,
            ethValue: tx.ethValue,
            gasLimit: tx.gasLimit,
            data: tx.data.clone(),
            withdrawalHash: compute_withdrawal_hash(&tx),
        }
    }

    #[tokio::test]
    async fn test_is_ready() {
        let (provider, asserter) = mocked();
        let action = InitiateWithdrawalAction::new(provider, withdraw());

        asserter.push_success(&U256::from(1_000u64));
        assert!(action.is_ready().await.unwrap());

        asserter.push_success(&U256::from(999u64));
        assert!(!action.is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn test_is_ready_checks_bvm_eth_balance() {
        let (provider, asserter) = mocked();
        let mut input = withdraw();
        input.eth_value = U256::from(50u64);
        let action = InitiateWithdrawalAction::new(provider, input);

        asserter.push_success(&U256::from(1_000u64));
        push_return(&asserter, U256::from(49u64));
        assert!(!action.is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn test_is_ready_rejects_empty_withdrawal() {
        let (provider, _asserter) = mocked();
        let mut input = withdraw();
        input.mnt_value = U256::ZERO;
        let action = InitiateWithdrawalAction::new(provider, input);

        assert!(!action.is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn test_is_completed_matches_receipt() {
        let (provider, asserter) = mocked();
        let mut input = withdraw();
        input.tx_hash = Some(B256::repeat_byte(0x99));
        let event = message_passed(&input);
        let action = InitiateWithdrawalAction::new(provider, input.clone());

        let logs = vec![log(Predeploys::L2_TO_L1_MESSAGE_PASSER, event.encode_log_data())];
        asserter.push_success(&receipt(true, logs));
        assert!(action.is_completed().await.unwrap());
    }

    #[tokio::test]
    async fn test_is_completed_rejects_other_withdrawal() {
        let (provider, asserter) = mocked();
        let mut input = withdraw();
        input.tx_hash = Some(B256::repeat_byte(0x99));

        let mut other = input.clone();
        other.mnt_value = U256::from(1u64);
        let event = message_passed(&other);
        let action = InitiateWithdrawalAction::new(provider, input);

        let logs = vec![log(Predeploys::L2_TO_L1_MESSAGE_PASSER, event.encode_log_data())];
        asserter.push_success(&receipt(true, logs));
        assert!(!action.is_completed().await.unwrap());
    }

    #[tokio::test]
    async fn test_is_completed_without_tx_hash() {
        let (provider, _asserter) = mocked();
        let action = InitiateWithdrawalAction::new(provider, withdraw());
        assert!(!action.is_completed().await.unwrap());
    }
}
