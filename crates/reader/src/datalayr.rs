use crate::ReaderError;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use binding::datalayr::{DataLayrServiceManager, IDataLayrServiceManager::DataStoreMetadata};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest storage duration accepted by the service manager.
pub const MIN_DATASTORE_DURATION: u8 = 1;

/// Longest storage duration accepted by the service manager.
pub const MAX_DATASTORE_DURATION: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLayrParameters {
    pub min_duration: u8,
    pub max_duration: u8,
    /// Seconds per duration unit
    pub duration_scale: U256,
    pub num_data_stores_per_block_per_duration: U256,
    pub block_stale_measure: u32,
    pub confirm_data_store_timeout: u32,
    pub fee_per_byte_per_time: U256,
    pub quorum_threshold_bps: u16,
    pub adversary_threshold_bps: u16,
    pub task_number: u32,
    pub latest_time: u32,
    /// Pause bitmap
    pub paused: U256,
}

/// Data store counters, one per duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStoresForDuration {
    pub per_duration: [u32; 7],
    pub data_store_id: u32,
    pub latest_time: u32,
}

impl DataStoresForDuration {
    pub const fn for_duration(&self, duration: u8) -> Option<u32> {
        if duration < MIN_DATASTORE_DURATION || duration > MAX_DATASTORE_DURATION {
            return None;
        }
        Some(self.per_duration[(duration - MIN_DATASTORE_DURATION) as usize])
    }
}

pub struct DataLayrReader<P> {
    provider: P,
    address: Address,
}

impl<P> DataLayrReader<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }

    pub async fn parameters(&self) -> Result<DataLayrParameters, ReaderError> {
        let manager = DataLayrServiceManager::new(self.address, &self.provider);

        let parameters = DataLayrParameters {
            min_duration: manager.MIN_DATASTORE_DURATION().call().await?,
            max_duration: manager.MAX_DATASTORE_DURATION().call().await?,
            duration_scale: manager.DURATION_SCALE().call().await?,
            num_data_stores_per_block_per_duration: manager
                .NUM_DS_PER_BLOCK_PER_DURATION()
                .call()
                .await?,
            block_stale_measure: manager.BLOCK_STALE_MEASURE().call().await?,
            confirm_data_store_timeout: manager.confirmDataStoreTimeout().call().await?,
            fee_per_byte_per_time: manager.feePerBytePerTime().call().await?,
            quorum_threshold_bps: manager.quorumThresholdBasisPoints().call().await?,
            adversary_threshold_bps: manager.adversaryThresholdBasisPoints().call().await?,
            task_number: manager.taskNumber().call().await?,
            latest_time: manager.latestTime().call().await?,
            paused: manager.paused_1().call().await?,
        };

        debug!(
            manager = %self.address,
            task_number = parameters.task_number,
            latest_time = parameters.latest_time,
            "Queried DataLayr parameters"
        );

        Ok(parameters)
    }

    pub async fn data_stores_for_duration(&self) -> Result<DataStoresForDuration, ReaderError> {
        let manager = DataLayrServiceManager::new(self.address, &self.provider);
        let counters = manager.dataStoresForDuration().call().await?;

        Ok(DataStoresForDuration {
            per_duration: [
                counters.one_duration,
                counters.two_duration,
                counters.three_duration,
                counters.four_duration,
                counters.five_duration,
                counters.six_duration,
                counters.seven_duration,
            ],
            data_store_id: counters.dataStoreId,
            latest_time: counters.latestTime,
        })
    }

    pub async fn num_data_stores_for_duration(&self, duration: u8) -> Result<u32, ReaderError> {
        check_duration(duration)?;
        let manager = DataLayrServiceManager::new(self.address, &self.provider);
        Ok(manager.getNumDataStoresForDuration(duration).call().await?)
    }

    /// Fee for storing `total_bytes` for `store_period_length` seconds.
    pub async fn calculate_fee(
        &self,
        total_bytes: U256,
        fee_per_byte_per_time: U256,
        store_period_length: u32,
    ) -> Result<U256, ReaderError> {
        let manager = DataLayrServiceManager::new(self.address, &self.provider);
        Ok(manager
            .calculateFee(total_bytes, fee_per_byte_per_time, store_period_length)
            .call()
            .await?)
    }

    /// Hash committed for the `index`th data store of `duration` at `timestamp`.
    pub async fn data_store_hash(
        &self,
        duration: u8,
        timestamp: U256,
        index: u32,
    ) -> Result<B256, ReaderError> {
        check_duration(duration)?;
        let manager = DataLayrServiceManager::new(self.address, &self.provider);
        Ok(manager
            .getDataStoreHashesForDurationAtTimestamp(duration, timestamp, index)
            .call()
            .await?)
    }

    pub async fn verify_metadata(
        &self,
        duration: u8,
        timestamp: U256,
        index: u32,
        metadata: DataStoreMetadata,
    ) -> Result<bool, ReaderError> {
        check_duration(duration)?;
        let manager = DataLayrServiceManager::new(self.address, &self.provider);
        Ok(manager
            .verifyDataStoreMetadata(duration, timestamp, index, metadata)
            .call()
            .await?)
    }
}

const fn check_duration(duration: u8) -> Result<(), ReaderError> {
    if duration < MIN_DATASTORE_DURATION || duration > MAX_DATASTORE_DURATION {
        return Err(ReaderError::InvalidDuration {
            duration,
            min: MIN_DATASTORE_DURATION,
            max: MAX_DATASTORE_DURATION,
        });
    }
    Ok(())
}
