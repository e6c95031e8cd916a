use crate::{
    hash::compute_withdrawal_hash,
    types::{CrossDomainMessage, WithdrawalHash, WithdrawalTransaction},
    WithdrawalError,
};
use alloy_rpc_types_eth::TransactionReceipt;
use alloy_sol_types::SolEvent;
use binding::messenger::{
    L2CrossDomainMessenger::{SentMessage, SentMessageExtension1},
    L2ToL1MessagePasser::MessagePassed,
};
use events::{parse_log, parse_receipt};

/// Decode a `MessagePassed` event and check its `withdrawalHash` against the
/// hash of its own fields.
pub fn withdrawal_from_event(
    event: &MessagePassed,
) -> Result<(WithdrawalTransaction, WithdrawalHash), WithdrawalError> {
    let tx = WithdrawalTransaction::from(event);
    let computed = compute_withdrawal_hash(&tx);
    if computed != event.withdrawalHash {
        return Err(WithdrawalError::HashMismatch {
            expected: event.withdrawalHash,
            computed,
        });
    }

    Ok((tx, computed))
}

/// The first withdrawal initiated in a transaction.
pub fn parse_message_passed(
    receipt: &TransactionReceipt,
) -> Result<(WithdrawalTransaction, WithdrawalHash), WithdrawalError> {
    parse_messages_passed(receipt)?
        .into_iter()
        .next()
        .ok_or(WithdrawalError::NotFound(MessagePassed::SIGNATURE))
}

/// Every withdrawal initiated in a transaction, in log order.
pub fn parse_messages_passed(
    receipt: &TransactionReceipt,
) -> Result<Vec<(WithdrawalTransaction, WithdrawalHash)>, WithdrawalError> {
    let events = parse_receipt::<MessagePassed>(receipt, None)?;
    if events.is_empty() {
        return Err(WithdrawalError::NotFound(MessagePassed::SIGNATURE));
    }

    events.iter().map(withdrawal_from_event).collect()
}

/// Every cross-domain message sent in a transaction.
///
/// The messenger emits `SentMessage` immediately followed by
/// `SentMessageExtension1` carrying the values, so each extension is paired
/// with the message before it.
pub fn parse_sent_messages(
    receipt: &TransactionReceipt,
) -> Result<Vec<CrossDomainMessage>, WithdrawalError> {
    let mut messages = Vec::new();
    let mut pending: Option<SentMessage> = None;

    for log in receipt.logs() {
        let topic0 = log.inner.data.topics().first().copied();
        if topic0 == Some(SentMessage::SIGNATURE_HASH) {
            if let Some(unpaired) = pending.take() {
                return Err(WithdrawalError::MissingExtension(unpaired.messageNonce));
            }
            pending = Some(parse_log::<SentMessage>(log)?);
        } else if topic0 == Some(SentMessageExtension1::SIGNATURE_HASH) {
            let extension = parse_log::<SentMessageExtension1>(log)?;
            let Some(sent) = pending.take() else {
                continue;
            };
            messages.push(CrossDomainMessage {
                nonce: sent.messageNonce,
                sender: sent.sender,
                target: sent.target,
                mnt_value: extension.mntValue,
                eth_value: extension.ethValue,
                gas_limit: sent.gasLimit,
                message: sent.message,
            });
        }
    }

    if let Some(unpaired) = pending {
        return Err(WithdrawalError::MissingExtension(unpaired.messageNonce));
    }

    Ok(messages)
}
