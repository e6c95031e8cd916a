use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use binding::ContractMetadata;
use tracing::info;

/// A contract created from its artifact bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: TxHash,
}

impl Deployment {
    fn from_receipt(receipt: &TransactionReceipt) -> eyre::Result<Self> {
        if !receipt.status() {
            eyre::bail!("Deployment {} reverted", receipt.transaction_hash);
        }

        let Some(address) = receipt.contract_address else {
            eyre::bail!(
                "Deployment {} has no contract address",
                receipt.transaction_hash
            );
        };

        Ok(Self {
            address,
            tx_hash: receipt.transaction_hash,
        })
    }
}

/// Deploy a bound contract with ABI-encoded constructor arguments.
///
/// The provider must be able to sign for its default sender.
pub async fn deploy_contract<P>(
    provider: &P,
    metadata: &ContractMetadata,
    constructor_args: &[u8],
) -> eyre::Result<Deployment>
where
    P: Provider,
{
    let code = metadata.deploy_code(constructor_args)?;
    let tx = TransactionRequest::default().with_deploy_code(code);

    let pending = provider.send_transaction(tx).await?;
    let receipt = pending.get_receipt().await?;
    let deployment = Deployment::from_receipt(&receipt)?;

    info!(
        contract = metadata.name,
        address = %deployment.address,
        tx_hash = %deployment.tx_hash,
        gas_used = receipt.gas_used,
        "Contract deployed."
    );

    Ok(deployment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::receipt;

    #[test]
    fn test_deployment_from_receipt() {
        let mut receipt = receipt(true, vec![]);
        receipt.contract_address = Some(Address::repeat_byte(0xcc));

        let deployment = Deployment::from_receipt(&receipt).unwrap();
        assert_eq!(deployment.address, Address::repeat_byte(0xcc));
        assert_eq!(deployment.tx_hash, receipt.transaction_hash);
    }

    #[test]
    fn test_deployment_without_contract_address() {
        let err = Deployment::from_receipt(&receipt(true, vec![])).unwrap_err();
        assert!(err.to_string().contains("no contract address"));
    }

    #[test]
    fn test_deployment_reverted() {
        let mut receipt = receipt(false, vec![]);
        receipt.contract_address = Some(Address::repeat_byte(0xcc));

        let err = Deployment::from_receipt(&receipt).unwrap_err();
        assert!(err.to_string().contains("reverted"));
    }
}
