//! DataLayr service manager binding.
//!
//! Structs referenced by the ABI are generated in their declaring namespaces:
//! - `IDataLayrServiceManager::{DataStoreMetadata, DataStoreSearchData}`
//! - `BLSSignatureChecker::SignatoryTotals`

use alloy_sol_types::sol;

sol!(
    #[allow(missing_docs, clippy::too_many_arguments)]
    #[sol(rpc)]
    #[derive(Debug, PartialEq, Eq)]
    DataLayrServiceManager,
    "abi/DataLayrServiceManager.json"
);

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{aliases::U96, b256, Address, Bytes, B256, U256};
    use alloy_sol_types::{SolCall, SolEvent};

    fn metadata() -> IDataLayrServiceManager::DataStoreMetadata {
        IDataLayrServiceManager::DataStoreMetadata {
            headerHash: B256::repeat_byte(0x42),
            durationDataStoreId: 3,
            globalDataStoreId: 17,
            referenceBlockNumber: 1_000,
            blockNumber: 1_005,
            fee: U96::from(5_000u64),
            confirmer: Address::repeat_byte(0x0c),
            signatoryRecordHash: B256::ZERO,
        }
    }

    #[test]
    fn test_overloaded_paused_getters() {
        assert_eq!(DataLayrServiceManager::paused_0Call::SIGNATURE, "paused(uint8)");
        assert_eq!(DataLayrServiceManager::paused_1Call::SIGNATURE, "paused()");
        assert_eq!(DataLayrServiceManager::paused_0Call::SELECTOR, [0x5a, 0xc8, 0x6a, 0xb7]);
        assert_eq!(DataLayrServiceManager::paused_1Call::SELECTOR, [0x5c, 0x97, 0x5a, 0xbb]);
    }

    #[test]
    fn test_calculate_fee_selector() {
        assert_eq!(
            DataLayrServiceManager::calculateFeeCall::SELECTOR,
            [0x39, 0xfe, 0x2e, 0x71]
        );
    }

    #[test]
    fn test_confirm_data_store_topic() {
        assert_eq!(
            DataLayrServiceManager::ConfirmDataStore::SIGNATURE_HASH,
            b256!("fbb7f4f1b0b9ad9e75d69d22c364e13089418d86fcb5106792a53046c0fb33aa")
        );
    }

    #[test]
    fn test_init_data_store_event_with_nested_tuple() {
        let event = DataLayrServiceManager::InitDataStore {
            feePayer: Address::repeat_byte(0xfe),
            searchData: IDataLayrServiceManager::DataStoreSearchData {
                metadata: metadata(),
                duration: 2,
                timestamp: U256::from(1_700_000_000u64),
                index: 4,
            },
            header: Bytes::from_static(b"header"),
        };
        let data = event.encode_log_data();
        assert_eq!(data.topics().len(), 1);

        let decoded = DataLayrServiceManager::InitDataStore::decode_log_data(&data).unwrap();
        assert_eq!(decoded.searchData.metadata, metadata());
        assert_eq!(decoded.header, Bytes::from_static(b"header"));
    }
}
