use crate::EventError;
use alloy_primitives::Address;
use alloy_rpc_types_eth::{Log, TransactionReceipt};
use alloy_sol_types::SolEvent;

/// Decode a single log as event `E`.
///
/// The first topic must be the event signature hash; anonymous events are
/// decoded without this check.
pub fn parse_log<E: SolEvent>(log: &Log) -> Result<E, EventError> {
    let topic0 = log.inner.data.topics().first().copied();
    if !E::ANONYMOUS && topic0 != Some(E::SIGNATURE_HASH) {
        return Err(EventError::SignatureMismatch {
            expected: E::SIGNATURE_HASH,
            actual: topic0,
        });
    }

    Ok(E::decode_log_data(&log.inner.data)?)
}

/// Decode every log of event `E`, optionally restricted to one emitter.
///
/// Logs of other events are skipped; a matching log that fails to decode is
/// an error.
pub fn parse_logs<'a, E, I>(logs: I, emitter: Option<Address>) -> Result<Vec<E>, EventError>
where
    E: SolEvent,
    I: IntoIterator<Item = &'a Log>,
{
    let mut events = Vec::new();
    for log in logs {
        if emitter.is_some_and(|address| address != log.inner.address) {
            continue;
        }
        if log.inner.data.topics().first() != Some(&E::SIGNATURE_HASH) {
            continue;
        }
        events.push(parse_log(log)?);
    }

    Ok(events)
}

/// Decode every log of event `E` in a receipt.
pub fn parse_receipt<E: SolEvent>(
    receipt: &TransactionReceipt,
    emitter: Option<Address>,
) -> Result<Vec<E>, EventError> {
    parse_logs(receipt.logs(), emitter)
}

/// Decode the first log of event `E` in a receipt.
pub fn first_in_receipt<E: SolEvent>(
    receipt: &TransactionReceipt,
    emitter: Option<Address>,
) -> Result<E, EventError> {
    parse_receipt(receipt, emitter)?
        .into_iter()
        .next()
        .ok_or(EventError::NotFound(E::SIGNATURE))
}
