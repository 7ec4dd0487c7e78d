//! Inter-task communication channels
//!
//! The cycle task owns all application state; the LCD and adjustment tasks
//! own their peripherals and talk to it through these statics.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use aurinko_core::config::AdjustmentTable;
use aurinko_core::controller::StorageRequest;
use aurinko_display::PageLine;

/// Storage requests queued while a flash write is in progress
const STORAGE_CHANNEL_SIZE: usize = 2;

/// Work for the LCD task
#[derive(Clone)]
pub enum LcdRequest {
    /// Send the controller init sequence
    Init,
    /// Write one composed page
    Page { page: u8, line: PageLine },
}

/// Single-slot hand-over of display work to the LCD task
pub static LCD_REQUEST: Channel<CriticalSectionRawMutex, LcdRequest, 1> = Channel::new();

/// Raised by the LCD task once a request has been written out
pub static PAGE_CONSUMED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Save/reload requests for the adjustment task
pub static STORAGE_REQUEST: Channel<CriticalSectionRawMutex, StorageRequest, STORAGE_CHANNEL_SIZE> =
    Channel::new();

/// Adjustment table loaded from flash (at boot and after a reload)
pub static ADJUSTMENT_TABLE: Signal<CriticalSectionRawMutex, AdjustmentTable> = Signal::new();
