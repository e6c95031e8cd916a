use crate::{Action, ActionResult};
use alloy_primitives::{utils::format_ether, Address, Bytes, B256, U256};
use alloy_provider::Provider;
use binding::{messenger::L2CrossDomainMessenger, Predeploys};
use reader::{BalanceQuery, Monitor, TokenMonitor};
use tracing::{info, warn};
use withdrawal::{hash_cross_domain_message, parse_sent_messages, CrossDomainMessage};

/// Input for a cross-domain message sent from L2.
#[derive(Debug, Clone)]
pub struct SendMessage {
    /// L2CrossDomainMessenger address
    pub messenger: Address,
    pub sender: Address,
    pub target: Address,
    pub message: Bytes,
    pub min_gas_limit: u32,
    /// Native MNT sent as `msg.value`
    pub mnt_value: U256,
    /// BVM_ETH bridged with the message
    pub eth_amount: U256,
    /// Set once the message has been sent
    pub tx_hash: Option<B256>,
}

impl SendMessage {
    fn matches(&self, msg: &CrossDomainMessage) -> bool {
        msg.sender == self.sender
            && msg.target == self.target
            && msg.message == self.message
            && msg.mnt_value == self.mnt_value
            && msg.eth_value == self.eth_amount
    }
}

pub struct SendMessageAction<P> {
    provider: P,
    action: SendMessage,
}

impl<P: Provider + Clone> SendMessageAction<P> {
    pub const fn new(provider: P, action: SendMessage) -> Self {
        Self { provider, action }
    }
}

impl<P> Action for SendMessageAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        if self.action.target == Address::ZERO {
            return Ok(false);
        }

        let balance = self.provider.get_balance(self.action.sender).await?;
        if balance < self.action.mnt_value {
            return Ok(false);
        }

        if !self.action.eth_amount.is_zero() {
            let eth = TokenMonitor::new(self.provider.clone())
                .query_balance(BalanceQuery::Erc20 {
                    token: Predeploys::BVM_ETH,
                    holder: self.action.sender,
                })
                .await?;
            return Ok(eth.amount >= self.action.eth_amount);
        }

        Ok(true)
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let Some(tx_hash) = self.action.tx_hash else {
            return Ok(false);
        };

        let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? else {
            return Ok(false);
        };

        let Ok(messages) = parse_sent_messages(&receipt) else {
            return Ok(false);
        };

        Ok(messages.iter().any(|msg| self.action.matches(msg)))
    }

    async fn execute(&mut self) -> eyre::Result<ActionResult> {
        if self.is_completed().await? {
            eyre::bail!("Message already sent")
        }

        let contract = L2CrossDomainMessenger::new(self.action.messenger, &self.provider);

        let tx = contract
            .sendMessage(
                self.action.eth_amount,
                self.action.target,
                self.action.message.clone(),
                self.action.min_gas_limit,
            )
            .value(self.action.mnt_value)
            .send()
            .await?;

        let receipt = tx.get_receipt().await?;
        let result = ActionResult::from_receipt(&receipt)?;
        self.action.tx_hash = Some(result.tx_hash);

        for msg in parse_sent_messages(&receipt)? {
            match hash_cross_domain_message(&msg) {
                Ok(message_hash) => info!(
                    tx_hash = %result.tx_hash,
                    block_number = result.block_number,
                    message_hash = %message_hash,
                    target = %msg.target,
                    "Cross-domain message sent."
                ),
                Err(e) => warn!(
                    tx_hash = %result.tx_hash,
                    error = %e,
                    "Sent message cannot be hashed"
                ),
            }
        }

        Ok(result)
    }

    fn description(&self) -> String {
        format!(
            "Sending message to {} with {} MNT and {} ETH",
            self.action.target,
            format_ether(self.action.mnt_value),
            format_ether(self.action.eth_amount)
        )
    }
}
