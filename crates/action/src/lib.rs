pub mod deploy;
pub mod fee_vault;
pub mod send_message;
pub mod token_ratio;
pub mod withdraw;

pub use deploy::{deploy_contract, Deployment};
pub use fee_vault::FeeVaultWithdrawAction;
pub use send_message::{SendMessage, SendMessageAction};
pub use token_ratio::UpdateTokenRatioAction;
pub use withdraw::{InitiateWithdrawal, InitiateWithdrawalAction};

use alloy_primitives::{TxHash, U256};
use alloy_rpc_types_eth::TransactionReceipt;
use std::future::Future;

/// Trait for executable onchain actions.
pub trait Action: Send + Sync {
    /// Check to see if the action is ready to be executed.
    ///
    /// Returns true if all preconditions are met.
    fn is_ready(&self) -> impl Future<Output = eyre::Result<bool>> + Send;

    /// Check if the action has already been completed.
    ///
    /// Returns true if the action was already executed successfully.
    fn is_completed(&self) -> impl Future<Output = eyre::Result<bool>> + Send;

    /// Execute the action.
    ///
    /// Returns the transaction hash of the executed action.
    fn execute(&mut self) -> impl Future<Output = eyre::Result<ActionResult>> + Send;

    /// Get a human-readable description of this action.
    fn description(&self) -> String;
}

/// Result of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: Option<U256>,
}

impl ActionResult {
    /// Build the result of a mined transaction; reverted receipts are errors.
    pub fn from_receipt(receipt: &TransactionReceipt) -> eyre::Result<Self> {
        if !receipt.status() {
            eyre::bail!("Transaction {} reverted", receipt.transaction_hash);
        }

        Ok(Self {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: Some(U256::from(receipt.gas_used)),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use alloy_primitives::{Address, Bytes, LogData, B256};
    use alloy_provider::{Provider, ProviderBuilder};
    use alloy_rpc_types_eth::{Log, TransactionReceipt};
    use alloy_sol_types::SolValue;
    use alloy_transport::mock::Asserter;

    pub(crate) fn mocked() -> (impl Provider + Clone, Asserter) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        (provider, asserter)
    }

    /// Queue the ABI encoding of `value` as the next `eth_call` result.
    pub(crate) fn push_return<T: SolValue>(asserter: &Asserter, value: T) {
        asserter.push_success(&Bytes::from(value.abi_encode()));
    }

    pub(crate) fn log(address: Address, data: LogData) -> Log {
        Log {
            inner: alloy_primitives::Log { address, data },
            ..Default::default()
        }
    }

    pub(crate) fn receipt(success: bool, logs: Vec<Log>) -> TransactionReceipt {
        let json = serde_json::json!({
            "transactionHash": B256::repeat_byte(0x99),
            "transactionIndex": "0x0",
            "blockHash": B256::repeat_byte(0x88),
            "blockNumber": "0x10",
            "from": Address::repeat_byte(0x01),
            "to": Address::repeat_byte(0x02),
            "cumulativeGasUsed": "0x5208",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x1",
            "contractAddress": null,
            "logs": logs,
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "status": if success { "0x1" } else { "0x0" },
            "type": "0x2",
        });
        serde_json::from_value(json).unwrap()
    }
}
