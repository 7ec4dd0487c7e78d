//! Persistent configuration
//!
//! The adjustment table is the only thing kept in flash.

mod adjustment;

pub use adjustment::{load_adjustment, save_adjustment, StoreError};
