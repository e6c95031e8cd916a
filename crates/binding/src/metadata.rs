//! Contract metadata: the ABI and creation bytecode of every bound contract.
//!
//! The same JSON artifacts feed the `sol!` bindings, so the metadata and the
//! generated types can never disagree.

use alloy_json_abi::JsonAbi;
use alloy_primitives::{Bytes, Selector, B256};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindingError {
    /// The artifact is not valid JSON or does not match the artifact layout
    #[error("Invalid artifact for {contract}: {source}")]
    InvalidArtifact {
        contract: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The artifact carries an empty ABI
    #[error("No ABI for {0}")]
    MissingAbi(&'static str),

    /// The artifact carries no creation bytecode
    #[error("No bytecode for {0}")]
    MissingBytecode(&'static str),

    /// No contract with this name is bound
    #[error("Unknown contract: {0}")]
    UnknownContract(String),
}

/// Parsed contents of a contract artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    /// Contract ABI
    pub abi: JsonAbi,
    /// Creation bytecode
    #[serde(default)]
    pub bytecode: Bytes,
}

/// Static metadata for one bound contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractMetadata {
    /// Contract name, as used in the artifact file name
    pub name: &'static str,
    /// Raw JSON artifact
    pub artifact: &'static str,
}

impl ContractMetadata {
    /// Parse the embedded artifact.
    pub fn artifact(&self) -> Result<Artifact, BindingError> {
        serde_json::from_str(self.artifact).map_err(|source| BindingError::InvalidArtifact {
            contract: self.name,
            source,
        })
    }

    /// Contract ABI.
    pub fn abi(&self) -> Result<JsonAbi, BindingError> {
        let abi = self.artifact()?.abi;
        if abi.is_empty() {
            return Err(BindingError::MissingAbi(self.name));
        }
        Ok(abi)
    }

    /// Creation bytecode, without constructor arguments.
    pub fn bytecode(&self) -> Result<Bytes, BindingError> {
        let bytecode = self.artifact()?.bytecode;
        if bytecode.is_empty() {
            return Err(BindingError::MissingBytecode(self.name));
        }
        Ok(bytecode)
    }

    /// Creation bytecode with ABI-encoded constructor arguments appended.
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Result<Bytes, BindingError> {
        let mut code = self.bytecode()?.to_vec();
        code.extend_from_slice(constructor_args);
        Ok(code.into())
    }

    /// `(selector, signature)` of every function, sorted by signature.
    pub fn function_signatures(&self) -> Result<Vec<(Selector, String)>, BindingError> {
        let abi = self.abi()?;
        let mut signatures: Vec<_> = abi
            .functions()
            .map(|function| (function.selector(), function.signature()))
            .collect();
        signatures.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(signatures)
    }

    /// `(topic0, signature)` of every event, sorted by signature.
    pub fn event_signatures(&self) -> Result<Vec<(B256, String)>, BindingError> {
        let abi = self.abi()?;
        let mut signatures: Vec<_> = abi
            .events()
            .map(|event| (event.selector(), event.signature()))
            .collect();
        signatures.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(signatures)
    }
}

pub const L1_TEST_TOKEN: ContractMetadata = ContractMetadata {
    name: "L1TestToken",
    artifact: include_str!("../abi/L1TestToken.json"),
};

pub const L2_TEST_TOKEN: ContractMetadata = ContractMetadata {
    name: "L2TestToken",
    artifact: include_str!("../abi/L2TestToken.json"),
};

pub const BVM_ETH: ContractMetadata = ContractMetadata {
    name: "BVM_ETH",
    artifact: include_str!("../abi/BVM_ETH.json"),
};

pub const LEGACY_ERC20_MNT: ContractMetadata = ContractMetadata {
    name: "LegacyERC20MNT",
    artifact: include_str!("../abi/LegacyERC20MNT.json"),
};

pub const L2_CROSS_DOMAIN_MESSENGER: ContractMetadata = ContractMetadata {
    name: "L2CrossDomainMessenger",
    artifact: include_str!("../abi/L2CrossDomainMessenger.json"),
};

pub const L2_TO_L1_MESSAGE_PASSER: ContractMetadata = ContractMetadata {
    name: "L2ToL1MessagePasser",
    artifact: include_str!("../abi/L2ToL1MessagePasser.json"),
};

pub const GAS_PRICE_ORACLE: ContractMetadata = ContractMetadata {
    name: "GasPriceOracle",
    artifact: include_str!("../abi/GasPriceOracle.json"),
};

pub const SEQUENCER_FEE_VAULT: ContractMetadata = ContractMetadata {
    name: "SequencerFeeVault",
    artifact: include_str!("../abi/SequencerFeeVault.json"),
};

pub const DATA_LAYR_SERVICE_MANAGER: ContractMetadata = ContractMetadata {
    name: "DataLayrServiceManager",
    artifact: include_str!("../abi/DataLayrServiceManager.json"),
};

/// Lookup over all bound contracts.
pub mod registry {
    use super::*;

    /// Every bound contract.
    pub const ALL: [ContractMetadata; 9] = [
        L1_TEST_TOKEN,
        L2_TEST_TOKEN,
        BVM_ETH,
        LEGACY_ERC20_MNT,
        L2_CROSS_DOMAIN_MESSENGER,
        L2_TO_L1_MESSAGE_PASSER,
        GAS_PRICE_ORACLE,
        SEQUENCER_FEE_VAULT,
        DATA_LAYR_SERVICE_MANAGER,
    ];

    /// Find a contract by name, ignoring case and underscores.
    pub fn find(name: &str) -> Result<ContractMetadata, BindingError> {
        let wanted = normalize(name);
        ALL.iter()
            .find(|metadata| normalize(metadata.name) == wanted)
            .copied()
            .ok_or_else(|| BindingError::UnknownContract(name.to_string()))
    }

    fn normalize(name: &str) -> String {
        name.chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{datalayr, fee_vault, messenger, oracle, token};
    use alloy_primitives::hex;
    use alloy_sol_types::SolEvent;
    use serde_json::Value;

    /// Collect `(type, internalType)` of every parameter, nested components included.
    fn internal_types(value: &Value, out: &mut Vec<(String, String)>) {
        match value {
            Value::Object(map) => {
                if let (Some(Value::String(ty)), Some(Value::String(internal))) =
                    (map.get("type"), map.get("internalType"))
                {
                    out.push((ty.clone(), internal.clone()));
                }
                map.values().for_each(|v| internal_types(v, out));
            }
            Value::Array(items) => items.iter().for_each(|v| internal_types(v, out)),
            _ => {}
        }
    }

    #[test]
    fn test_all_artifacts_parse() {
        for metadata in registry::ALL {
            let artifact = metadata.artifact().unwrap();
            assert!(!artifact.abi.is_empty(), "{} has an empty abi", metadata.name);
            assert!(!artifact.bytecode.is_empty(), "{} has no bytecode", metadata.name);
        }
    }

    #[test]
    fn test_internal_types_are_well_formed() {
        for metadata in registry::ALL {
            let json: Value = serde_json::from_str(metadata.artifact).unwrap();
            let mut params = Vec::new();
            internal_types(&json["abi"], &mut params);

            for (ty, internal) in params {
                for keyword in ["struct", "contract", "enum"] {
                    if let Some(rest) = internal.strip_prefix(keyword) {
                        assert!(
                            rest.starts_with(' '),
                            "{}: malformed internalType {internal:?}",
                            metadata.name
                        );
                    }
                }
                if ty.starts_with("tuple") {
                    assert!(
                        internal.starts_with("struct "),
                        "{}: tuple with internalType {internal:?}",
                        metadata.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_metadata_bytecode_matches_bindings() {
        assert_eq!(L1_TEST_TOKEN.bytecode().unwrap(), token::L1TestToken::BYTECODE);
        assert_eq!(BVM_ETH.bytecode().unwrap(), token::BVMETH::BYTECODE);
        assert_eq!(
            L2_CROSS_DOMAIN_MESSENGER.bytecode().unwrap(),
            messenger::L2CrossDomainMessenger::BYTECODE
        );
        assert_eq!(GAS_PRICE_ORACLE.bytecode().unwrap(), oracle::GasPriceOracle::BYTECODE);
        assert_eq!(
            SEQUENCER_FEE_VAULT.bytecode().unwrap(),
            fee_vault::SequencerFeeVault::BYTECODE
        );
        assert_eq!(
            DATA_LAYR_SERVICE_MANAGER.bytecode().unwrap(),
            datalayr::DataLayrServiceManager::BYTECODE
        );
    }

    #[test]
    fn test_registry_find() {
        assert_eq!(registry::find("GasPriceOracle").unwrap(), GAS_PRICE_ORACLE);
        assert_eq!(registry::find("gaspriceoracle").unwrap(), GAS_PRICE_ORACLE);
        assert_eq!(registry::find("BVMETH").unwrap(), BVM_ETH);
        assert_eq!(registry::find("bvm_eth").unwrap(), BVM_ETH);

        let err = registry::find("OptimismPortal").unwrap_err();
        assert!(matches!(err, BindingError::UnknownContract(name) if name == "OptimismPortal"));
    }

    #[test]
    fn test_function_signatures() {
        let signatures = SEQUENCER_FEE_VAULT.function_signatures().unwrap();
        let names: Vec<_> = signatures.iter().map(|(_, sig)| sig.as_str()).collect();
        assert_eq!(
            names,
            [
                "MIN_WITHDRAWAL_AMOUNT()",
                "RECIPIENT()",
                "l1FeeWallet()",
                "totalProcessed()",
                "version()",
                "withdraw()",
            ]
        );

        let (selector, _) = signatures.iter().find(|(_, sig)| sig == "withdraw()").unwrap();
        assert_eq!(*selector, Selector::from(hex!("3ccfd60b")));
    }

    #[test]
    fn test_event_signatures() {
        let events = L2_TO_L1_MESSAGE_PASSER.event_signatures().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].0,
            messenger::L2ToL1MessagePasser::MessagePassed::SIGNATURE_HASH
        );
        assert_eq!(events[1].1, "WithdrawerBalanceBurnt(uint256)");
    }

    #[test]
    fn test_overloads_are_listed_separately() {
        let signatures = DATA_LAYR_SERVICE_MANAGER.function_signatures().unwrap();
        let paused: Vec<_> = signatures
            .iter()
            .filter(|(_, sig)| sig.starts_with("paused("))
            .collect();
        assert_eq!(paused.len(), 2);
    }

    #[test]
    fn test_deploy_code_appends_constructor_args() {
        let args = [0xab; 32];
        let code = SEQUENCER_FEE_VAULT.deploy_code(&args).unwrap();
        let bytecode = SEQUENCER_FEE_VAULT.bytecode().unwrap();

        assert_eq!(code.len(), bytecode.len() + 32);
        assert!(code.starts_with(&bytecode));
        assert!(code.ends_with(&args));
    }

    #[test]
    fn test_missing_abi() {
        let empty = ContractMetadata {
            name: "Empty",
            artifact: r#"{"abi": [], "bytecode": "0x00"}"#,
        };
        assert!(matches!(empty.abi(), Err(BindingError::MissingAbi("Empty"))));
    }

    #[test]
    fn test_missing_bytecode() {
        let interface_only = ContractMetadata {
            name: "Interface",
            artifact: r#"{"abi": [{"type": "function", "name": "f", "inputs": [], "outputs": [], "stateMutability": "view"}]}"#,
        };
        assert!(interface_only.abi().is_ok());
        assert!(matches!(
            interface_only.bytecode(),
            Err(BindingError::MissingBytecode("Interface"))
        ));
    }

    #[test]
    fn test_invalid_artifact() {
        let broken = ContractMetadata {
            name: "Broken",
            artifact: "not json",
        };
        assert!(matches!(
            broken.artifact(),
            Err(BindingError::InvalidArtifact { contract: "Broken", .. })
        ));
    }
}
