//! Menu state machine
//!
//! One button drives a handful of fixed views. Short clicks move the
//! selection, long clicks confirm it. Each view is a table of text fields;
//! live fields draw their text from slots the machine refreshes every
//! cycle.

pub mod calibration_view;
pub mod events;
pub mod machine;
pub mod slots;
pub mod view;

pub use calibration_view::CalibrationViewBuilder;
pub use events::{ButtonEvent, TaskCode};
pub use machine::{MenuState, ResolvedField};
pub use slots::{format_measurement, LiveSlots, LiveText};
pub use view::{FieldContent, TextField, ViewId};
