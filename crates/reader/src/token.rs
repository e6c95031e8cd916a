use crate::ReaderError;
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_provider::Provider;
use binding::token::{
    L2TestToken, ERC165_INTERFACE_ID, LEGACY_MINTABLE_ERC20_INTERFACE_ID,
    OPTIMISM_MINTABLE_ERC20_INTERFACE_ID,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// Represents a blockchain balance at a specific point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// The address holding the balance
    pub holder: Address,
    /// The asset address (zero address for native MNT)
    pub asset: Address,
    /// The balance amount
    pub amount: U256,
}

/// Type of balance query to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceQuery {
    /// ERC20 balance, including the BVM_ETH and legacy MNT predeploys
    Erc20 {
        /// Token contract address
        token: Address,
        /// Holder address
        holder: Address,
    },
    /// Native MNT balance
    Native {
        /// Account address
        address: Address,
    },
}

/// Trait for monitoring balances on a blockchain.
pub trait Monitor: Send + Sync {
    /// Query a single balance.
    fn query_balance(
        &self,
        query: BalanceQuery,
    ) -> impl Future<Output = Result<Balance, ReaderError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
}

/// Bridge metadata of an `OptimismMintableERC20` style token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgedTokenInfo {
    pub address: Address,
    /// Token on the other chain
    pub remote_token: Address,
    /// Bridge allowed to mint and burn
    pub bridge: Address,
    pub version: String,
    pub supports_erc165: bool,
    pub optimism_mintable: bool,
    pub legacy_mintable: bool,
}

pub struct TokenMonitor<P> {
    provider: P,
}

impl<P> TokenMonitor<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    async fn query_native(&self, address: Address) -> Result<Balance, ReaderError> {
        debug!(%address, "Querying native balance");

        let balance = self.provider.get_balance(address).await?;

        Ok(Balance {
            holder: address,
            asset: Address::ZERO,
            amount: balance,
        })
    }

    async fn query_erc20(&self, token: Address, holder: Address) -> Result<Balance, ReaderError> {
        debug!(%token, %holder, "Querying erc20 balance");

        let contract = L2TestToken::new(token, &self.provider);
        let amount = contract.balanceOf(holder).call().await?;

        Ok(Balance {
            holder,
            asset: token,
            amount,
        })
    }

    /// ERC20 metadata and supply.
    pub async fn token_info(&self, token: Address) -> Result<TokenInfo, ReaderError> {
        let contract = L2TestToken::new(token, &self.provider);

        let name = contract.name().call().await?;
        let symbol = contract.symbol().call().await?;
        let decimals = contract.decimals().call().await?;
        let total_supply = contract.totalSupply().call().await?;

        Ok(TokenInfo {
            address: token,
            name,
            symbol,
            decimals,
            total_supply,
        })
    }

    /// Bridge metadata and ERC165 interface support of a bridged token.
    pub async fn bridged_token_info(&self, token: Address) -> Result<BridgedTokenInfo, ReaderError> {
        let contract = L2TestToken::new(token, &self.provider);

        let remote_token = contract.remoteToken().call().await?;
        let bridge = contract.bridge().call().await?;
        let version = contract.version().call().await?;

        let supports_erc165 = self.supports_interface(token, ERC165_INTERFACE_ID).await?;
        let optimism_mintable = self
            .supports_interface(token, OPTIMISM_MINTABLE_ERC20_INTERFACE_ID)
            .await?;
        let legacy_mintable = self
            .supports_interface(token, LEGACY_MINTABLE_ERC20_INTERFACE_ID)
            .await?;

        debug!(
            %token,
            %remote_token,
            %bridge,
            optimism_mintable,
            legacy_mintable,
            "Queried bridged token"
        );

        Ok(BridgedTokenInfo {
            address: token,
            remote_token,
            bridge,
            version,
            supports_erc165,
            optimism_mintable,
            legacy_mintable,
        })
    }

    async fn supports_interface(
        &self,
        token: Address,
        interface_id: [u8; 4],
    ) -> Result<bool, ReaderError> {
        let contract = L2TestToken::new(token, &self.provider);
        Ok(contract
            .supportsInterface(FixedBytes(interface_id))
            .call()
            .await?)
    }
}

impl<P> Monitor for TokenMonitor<P>
where
    P: Provider + Clone,
{
    async fn query_balance(&self, query: BalanceQuery) -> Result<Balance, ReaderError> {
        match query {
            BalanceQuery::Erc20 { token, holder } => self.query_erc20(token, holder).await,
            BalanceQuery::Native { address } => self.query_native(address).await,
        }
    }
}
