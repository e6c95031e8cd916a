//! Token contract bindings.
//!
//! - `L1TestToken`: plain ERC20 with an open `mint`, used on L1 in devnets
//! - `L2TestToken`: bridged ERC20 minted/burned by the L2 standard bridge
//! - `BVMETH`: bridged ETH predeploy on L2
//! - `LegacyERC20MNT`: legacy MNT predeploy on L2, all mutating methods revert

use alloy_sol_types::sol;

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    L1TestToken,
    "abi/L1TestToken.json"
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    L2TestToken,
    "abi/L2TestToken.json"
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    BVMETH,
    "abi/BVM_ETH.json"
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    LegacyERC20MNT,
    "abi/LegacyERC20MNT.json"
);

/// ERC165 interface id of `IERC165` itself.
pub const ERC165_INTERFACE_ID: [u8; 4] = [0x01, 0xff, 0xc9, 0xa7];

/// ERC165 interface id of `IOptimismMintableERC20`.
pub const OPTIMISM_MINTABLE_ERC20_INTERFACE_ID: [u8; 4] = [0xec, 0x4f, 0xc8, 0xe3];

/// ERC165 interface id of `ILegacyMintableERC20`.
pub const LEGACY_MINTABLE_ERC20_INTERFACE_ID: [u8; 4] = [0x1d, 0x1d, 0x8b, 0x63];
