//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod adjustment;
pub mod cycle;
pub mod lcd;

pub use adjustment::adjustment_task;
pub use cycle::cycle_task;
pub use lcd::{lcd_task, Lcd};
