//! Addresses of the L2 predeploys bound by this crate.

use alloy_primitives::{address, Address};

/// Container for predeploy contract addresses
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Predeploys;

impl Predeploys {
    /// Every predeploy with its contract name.
    pub const ALL: [(Address, &'static str); 7] = [
        (Self::L2_CROSS_DOMAIN_MESSENGER, "L2CrossDomainMessenger"),
        (Self::L2_STANDARD_BRIDGE, "L2StandardBridge"),
        (Self::SEQUENCER_FEE_VAULT, "SequencerFeeVault"),
        (Self::GAS_PRICE_ORACLE, "GasPriceOracle"),
        (Self::L2_TO_L1_MESSAGE_PASSER, "L2ToL1MessagePasser"),
        (Self::BVM_ETH, "BVM_ETH"),
        (Self::LEGACY_ERC20_MNT, "LegacyERC20MNT"),
    ];

    /// Higher level API for sending cross domain messages.
    pub const L2_CROSS_DOMAIN_MESSENGER: Address =
        address!("0x4200000000000000000000000000000000000007");

    /// Standard bridge, the only minter of bridged tokens.
    pub const L2_STANDARD_BRIDGE: Address = address!("0x4200000000000000000000000000000000000010");

    /// Collects the sequencer share of transaction fees.
    pub const SEQUENCER_FEE_VAULT: Address = address!("0x4200000000000000000000000000000000000011");

    /// L1 fee parameters and token ratio.
    pub const GAS_PRICE_ORACLE: Address = address!("0x420000000000000000000000000000000000000F");

    /// Stores commitments to withdrawal transactions.
    pub const L2_TO_L1_MESSAGE_PASSER: Address =
        address!("0x4200000000000000000000000000000000000016");

    /// Bridged ETH.
    pub const BVM_ETH: Address = address!("0xdEAddEaDdeadDEadDEADDEAddEADDEAddead1111");

    /// Legacy MNT token, kept for balance compatibility.
    pub const LEGACY_ERC20_MNT: Address = address!("0xDeadDeAddeAddEAddeadDEaDDEAdDeaDDeAD0000");

    /// Contract name of a predeploy, if the address is one.
    pub fn name_of(address: Address) -> Option<&'static str> {
        Self::ALL
            .iter()
            .find(|(predeploy, _)| *predeploy == address)
            .map(|(_, name)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_predeploys_are_unique() {
        let unique: HashSet<_> = Predeploys::ALL.iter().map(|(address, _)| address).collect();
        assert_eq!(unique.len(), Predeploys::ALL.len());
    }

    #[test]
    fn test_name_of() {
        for (address, name) in Predeploys::ALL {
            assert_eq!(Predeploys::name_of(address), Some(name));
        }
        assert_eq!(Predeploys::name_of(Address::ZERO), None);
    }

    #[test]
    fn test_names_match_metadata() {
        use crate::metadata::registry;

        for address in [
            Predeploys::L2_CROSS_DOMAIN_MESSENGER,
            Predeploys::L2_TO_L1_MESSAGE_PASSER,
            Predeploys::GAS_PRICE_ORACLE,
            Predeploys::SEQUENCER_FEE_VAULT,
            Predeploys::BVM_ETH,
            Predeploys::LEGACY_ERC20_MNT,
        ] {
            let name = Predeploys::name_of(address).unwrap();
            assert!(registry::find(name).is_ok(), "{name} is not bound");
        }
    }
}
