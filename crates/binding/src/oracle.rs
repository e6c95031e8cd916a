//! Gas price oracle binding.
//!
//! The L2 `GasPriceOracle` predeploy exposes the L1 fee parameters and the
//! MNT/ETH token ratio maintained by the oracle operator.

use alloy_sol_types::sol;

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    GasPriceOracle,
    "abi/GasPriceOracle.json"
);

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{b256, U256};
    use alloy_sol_types::{SolCall, SolEvent};

    #[test]
    fn test_token_ratio_entrypoints() {
        assert_eq!(GasPriceOracle::setTokenRatioCall::SELECTOR, [0xe3, 0x8e, 0x91, 0xf9]);
        assert_eq!(GasPriceOracle::getL1FeeCall::SELECTOR, [0x49, 0x94, 0x8e, 0x0e]);
    }

    #[test]
    fn test_token_ratio_updated_has_indexed_values() {
        let event = GasPriceOracle::TokenRatioUpdated {
            previousTokenRatio: U256::from(1_000u64),
            newTokenRatio: U256::from(2_000u64),
        };
        let data = event.encode_log_data();

        // both values are indexed, the body is empty
        assert_eq!(data.topics().len(), 3);
        assert!(data.data.is_empty());
        assert_eq!(
            data.topics()[0],
            b256!("5d6ae9db2d6725497bed0302a8212c0db5fdb3bd7d14f188a83b5589089caafd")
        );
    }

    #[test]
    fn test_set_token_ratio_calldata() {
        let call = GasPriceOracle::setTokenRatioCall {
            _tokenRatio: U256::from(3_000u64),
        };
        let encoded = call.abi_encode();
        assert_eq!(encoded.len(), 4 + 32);
        assert_eq!(&encoded[..4], &GasPriceOracle::setTokenRatioCall::SELECTOR);
        assert_eq!(U256::from_be_slice(&encoded[4..]), U256::from(3_000u64));
    }
}
