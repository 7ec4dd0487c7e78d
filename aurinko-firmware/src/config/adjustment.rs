//! Adjustment table persistence
//!
//! The table is stored as a postcard-encoded `AdjustmentRecord` under
//! `StorageKey::Adjustment`, guarded by magic, version and CRC.

use defmt::*;

use aurinko_core::config::{AdjustmentRecord, AdjustmentTable};
use aurinko_hal_rp2040::flash::{FlashError, StorageKey};
use aurinko_hal_rp2040::FlashStorageTrait;

/// Maximum serialized record size
const MAX_RECORD_SIZE: usize = 256;

/// Adjustment persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// Serialization failed
    Serialize,
    /// CRC check failed
    CrcMismatch,
    /// Invalid magic or version
    InvalidFormat,
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

/// Load the adjustment table from flash
///
/// Falls back to the factory table when nothing valid is stored.
pub async fn load_adjustment<S: FlashStorageTrait>(storage: &mut S) -> AdjustmentTable {
    match load_record(storage).await {
        Ok(record) => {
            info!("Loaded adjustment table from flash");
            record.table
        }
        Err(StoreError::Flash(FlashError::NotFound)) => {
            debug!("No adjustment in flash, using factory values");
            AdjustmentTable::factory()
        }
        Err(e) => {
            warn!("Failed to load adjustment: {:?}, using factory values", e);
            AdjustmentTable::factory()
        }
    }
}

async fn load_record<S: FlashStorageTrait>(storage: &mut S) -> Result<AdjustmentRecord, StoreError> {
    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let len = storage.read(StorageKey::Adjustment, &mut buffer).await?;

    debug!("Read {} bytes of adjustment from flash", len);

    let record: AdjustmentRecord =
        postcard::from_bytes(&buffer[..len]).map_err(|_| StoreError::Deserialize)?;

    if !record.is_valid() {
        return Err(StoreError::InvalidFormat);
    }

    if !record.verify_crc() {
        warn!("Adjustment CRC mismatch");
        return Err(StoreError::CrcMismatch);
    }

    Ok(record)
}

/// Save the adjustment table to flash
pub async fn save_adjustment<S: FlashStorageTrait>(
    storage: &mut S,
    table: &AdjustmentTable,
) -> Result<(), StoreError> {
    let record = AdjustmentRecord::new(*table);

    let mut buffer = [0u8; MAX_RECORD_SIZE];
    let bytes = postcard::to_slice(&record, &mut buffer).map_err(|_| StoreError::Serialize)?;

    debug!("Saving {} bytes of adjustment to flash", bytes.len());

    storage.write(StorageKey::Adjustment, bytes).await?;

    info!("Saved adjustment table to flash");
    Ok(())
}
