use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::sol;
use binding::messenger::L2ToL1MessagePasser::MessagePassed;

pub type WithdrawalHash = B256;

sol! {
    /// A withdrawal as committed to by `L2ToL1MessagePasser`.
    #[derive(Debug, PartialEq, Eq)]
    struct WithdrawalTransaction {
        uint256 nonce;
        address sender;
        address target;
        uint256 mntValue;
        uint256 ethValue;
        uint256 gasLimit;
        bytes data;
    }
}

impl From<&MessagePassed> for WithdrawalTransaction {
    fn from(event: &MessagePassed) -> Self {
        Self {
            nonce: event.nonce,
            sender: event.sender,
            target: event.target,
            mntValue: event.mntValue,
            ethValue: event.ethValue,
            gasLimit: event.gasLimit,
            data: event.data.clone(),
        }
    }
}

/// A message sent through `L2CrossDomainMessenger`, rebuilt from the
/// `SentMessage` and `SentMessageExtension1` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossDomainMessage {
    /// Versioned nonce as emitted.
    pub nonce: U256,
    pub sender: Address,
    pub target: Address,
    pub mnt_value: U256,
    pub eth_value: U256,
    pub gas_limit: U256,
    pub message: Bytes,
}

/// Relay state of a cross-domain message on the receiving messenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    /// Neither relayed nor failed; possibly not yet delivered.
    Unknown,
    /// Delivered but the call reverted; can be replayed.
    Failed,
    Relayed,
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Failed => write!(f, "failed"),
            Self::Relayed => write!(f, "relayed"),
        }
    }
}
