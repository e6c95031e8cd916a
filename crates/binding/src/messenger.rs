//! Cross-domain messaging bindings.
//!
//! Includes the L2 predeploys used for L2→L1 communication:
//! - L2CrossDomainMessenger (high level message API, replay protection)
//! - L2ToL1MessagePasser (low level withdrawal commitments)

use alloy_sol_types::sol;

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    L2CrossDomainMessenger,
    "abi/L2CrossDomainMessenger.json"
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    L2ToL1MessagePasser,
    "abi/L2ToL1MessagePasser.json"
);
