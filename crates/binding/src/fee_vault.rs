//! Sequencer fee vault binding.

use alloy_sol_types::sol;

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    SequencerFeeVault,
    "abi/SequencerFeeVault.json"
);
