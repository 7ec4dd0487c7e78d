//! Calibration point view labels
//!
//! Both calibration point views share one layout. On entry the static part
//! of their live slots is filled with the channel being calibrated and the
//! reference value the user has to apply.

use crate::config::calibration::CALIBRATION_POINTS;
use crate::measurement::{Channel, Source};

use super::slots::{self, format_measurement, LiveSlots};
use super::view::{calibration_slot, ViewId};

/// Fills the channel-dependent slots of a calibration point view
pub struct CalibrationViewBuilder;

impl CalibrationViewBuilder {
    /// Write source, panel, quantity, progress and reference slots
    ///
    /// Views other than the two calibration point views are left alone.
    pub fn build(view: ViewId, channel: Channel, live: &mut LiveSlots) {
        let point = match view {
            ViewId::CalibChannel1 => 0,
            ViewId::CalibChannel2 => 1,
            _ => return,
        };

        match channel.source() {
            Source::Panel(number) => {
                live.set(calibration_slot::SOURCE, slots::text("PANEELI"));
                let digit = [b'0' + number];
                live.set(
                    calibration_slot::PANEL,
                    slots::text(core::str::from_utf8(&digit).unwrap_or(" ")),
                );
            }
            Source::Battery => {
                live.set(calibration_slot::SOURCE, slots::text("  AKKU "));
                live.set(calibration_slot::PANEL, slots::blank());
            }
        }

        let quantity = channel.quantity();
        live.set(calibration_slot::QUANTITY, slots::text(quantity.label()));
        live.set(
            calibration_slot::PROGRESS,
            slots::text(if point == 0 { "1/2" } else { "2/2" }),
        );
        live.set(
            calibration_slot::REFERENCE,
            format_measurement(CALIBRATION_POINTS[quantity.index()][point], quantity.unit()),
        );
    }
}
