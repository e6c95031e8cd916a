//! RPC provider construction shared by the readers, actions and the inspector.

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::TransportError;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The endpoint serves a different chain than configured
    #[error("Wrong chain id: expected {expected}, endpoint reports {actual}")]
    WrongChainId { expected: u64, actual: u64 },

    /// Error returned by the RPC endpoint
    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),
}

/// Create a read-only HTTP provider from an RPC url.
pub fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}

/// Create a provider with wallet signing capability from a private key.
pub fn create_wallet_provider(
    rpc_url: &str,
    private_key: &str,
) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    let signer = parse_signer(private_key)?;
    debug!(address = %signer.address(), "Created wallet signer");
    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok(provider)
}

/// Address controlled by a private key (hex, with or without `0x`).
pub fn signer_address(private_key: &str) -> Result<Address, ClientError> {
    Ok(parse_signer(private_key)?.address())
}

/// Fail unless the provider serves the expected chain.
pub async fn ensure_chain_id<P>(provider: &P, expected: u64) -> Result<(), ClientError>
where
    P: Provider,
{
    let actual = provider.get_chain_id().await?;
    if actual != expected {
        return Err(ClientError::WrongChainId { expected, actual });
    }

    Ok(())
}

fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, ClientError> {
    private_key
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U64};
    use alloy_transport::mock::Asserter;

    // Anvil's first dev account
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_invalid_url() {
        let result = create_provider("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_private_key() {
        let result = create_wallet_provider("http://localhost:8545", "0x1234");
        assert!(matches!(result, Err(ClientError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_signer_address() {
        let address = signer_address(DEV_KEY).unwrap();
        assert_eq!(address, address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));

        // the 0x prefix is optional
        assert_eq!(signer_address(&DEV_KEY[2..]).unwrap(), address);
    }

    #[tokio::test]
    async fn test_ensure_chain_id() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());

        asserter.push_success(&U64::from(5000));
        assert!(ensure_chain_id(&provider, 5000).await.is_ok());

        asserter.push_success(&U64::from(5003));
        let err = ensure_chain_id(&provider, 5000).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::WrongChainId {
                expected: 5000,
                actual: 5003
            }
        ));
    }
}
