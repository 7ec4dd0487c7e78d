//! Adjustment storage task
//!
//! Owns the flash. Publishes the stored adjustment table at boot and on
//! every reload, and persists tables the cycle task asks to save.

use defmt::*;

use aurinko_core::controller::StorageRequest;
use aurinko_hal_rp2040::flash::Rp2040FlashStorage;

use crate::channels::{ADJUSTMENT_TABLE, STORAGE_REQUEST};
use crate::config::{load_adjustment, save_adjustment};

#[embassy_executor::task]
pub async fn adjustment_task(mut storage: Rp2040FlashStorage<'static>) {
    info!("Adjustment task started");

    ADJUSTMENT_TABLE.signal(load_adjustment(&mut storage).await);

    loop {
        match STORAGE_REQUEST.receive().await {
            StorageRequest::Save(table) => {
                if let Err(e) = save_adjustment(&mut storage, &table).await {
                    error!("Failed to save adjustment: {:?}", e);
                }
            }
            StorageRequest::Reload => {
                ADJUSTMENT_TABLE.signal(load_adjustment(&mut storage).await);
            }
        }
    }
}
