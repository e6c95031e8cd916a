use crate::{
    types::{CrossDomainMessage, WithdrawalHash, WithdrawalTransaction},
    WithdrawalError,
};
use alloy_primitives::{keccak256, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use binding::messenger::L2CrossDomainMessenger::relayMessageCall;

/// Encoding version of messages sent by the current messengers.
pub const MESSAGE_VERSION: u16 = 1;

/// Bits below the version in a versioned nonce.
const NONCE_BITS: usize = 240;

pub fn compute_withdrawal_hash(tx: &WithdrawalTransaction) -> WithdrawalHash {
    // keccak256(abi.encode(nonce, sender, target, mntValue, ethValue, gasLimit, data))
    let encoded = (
        &tx.nonce,
        &tx.sender,
        &tx.target,
        &tx.mntValue,
        &tx.ethValue,
        &tx.gasLimit,
        &tx.data,
    )
        .abi_encode_sequence();

    keccak256(encoded)
}

/// Storage slot of `sentMessages[hash]` in `L2ToL1MessagePasser`.
///
/// The mapping sits at slot 0, so the slot is `keccak256(hash ++ uint256(0))`.
pub fn withdrawal_storage_slot(withdrawal_hash: WithdrawalHash) -> B256 {
    let mut data = [0u8; 64];
    data[0..32].copy_from_slice(withdrawal_hash.as_slice());
    keccak256(data)
}

/// Pack a message version into the top two bytes of a nonce.
pub fn encode_versioned_nonce(nonce: U256, version: u16) -> U256 {
    (U256::from(version) << NONCE_BITS) | nonce
}

/// Split a versioned nonce into `(nonce, version)`.
pub fn decode_versioned_nonce(versioned: U256) -> (U256, u16) {
    let nonce = versioned & (U256::MAX >> (256 - NONCE_BITS));
    let version = (versioned >> NONCE_BITS).to::<u16>();
    (nonce, version)
}

/// Hash a cross-domain message the way the messengers key
/// `successfulMessages` and `failedMessages`: keccak256 of the
/// `relayMessage` calldata.
///
/// Only version 1 messages are supported; the legacy version 0 encoding
/// carries no value fields.
pub fn hash_cross_domain_message(msg: &CrossDomainMessage) -> Result<B256, WithdrawalError> {
    let (_, version) = decode_versioned_nonce(msg.nonce);
    if version != MESSAGE_VERSION {
        return Err(WithdrawalError::UnsupportedVersion(version));
    }

    let calldata = relayMessageCall {
        _nonce: msg.nonce,
        _sender: msg.sender,
        _target: msg.target,
        _mntValue: msg.mnt_value,
        _ethValue: msg.eth_value,
        _minGasLimit: msg.gas_limit,
        _message: msg.message.clone(),
    }
    .abi_encode();

    Ok(keccak256(calldata))
}
