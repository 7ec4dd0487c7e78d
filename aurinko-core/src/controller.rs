//! Control cycle
//!
//! One call per cycle runs the whole pipeline: record the raw sweep,
//! convert it, run charge control, detect clicks, update the menu and act
//! on the task code it returns. Storage work is handed back to the caller
//! as a request since flash access is asynchronous.

use crate::charging::{ChargeController, ChargeOutput};
use crate::config::calibration::{AdjustmentError, AdjustmentTable, CalibrationContext};
use crate::config::ChargerConfig;
use crate::input::ClickDetector;
use crate::measurement::{Measurements, RawSweep, SampleHistory, CHANNEL_COUNT};
use crate::menu::{ButtonEvent, MenuState, TaskCode};

/// Work for the storage owner
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageRequest {
    /// Persist this table
    Save(AdjustmentTable),
    /// Load the stored table again, discarding unsaved changes
    Reload,
}

/// What happened during one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// Charge control output to apply
    pub charge: ChargeOutput,
    /// Button event seen this cycle
    pub event: ButtonEvent,
    /// Task code the menu produced
    pub task: TaskCode,
    /// Storage work to carry out
    pub storage: Option<StorageRequest>,
    /// Result of a two-point adjustment, when one was applied
    pub adjustment: Option<Result<(), AdjustmentError>>,
}

/// Charger application state
#[derive(Debug, Clone)]
pub struct Controller {
    history: SampleHistory,
    table: AdjustmentTable,
    calibration: CalibrationContext,
    charger: ChargeController,
    clicks: ClickDetector,
    menu: MenuState,
    measurements: Measurements,
}

impl Controller {
    /// Create the controller with the factory adjustment
    pub fn new(config: &ChargerConfig) -> Self {
        Self {
            history: SampleHistory::new(),
            table: AdjustmentTable::factory(),
            calibration: CalibrationContext::default(),
            charger: ChargeController::default(),
            clicks: ClickDetector::new(config.long_click_cycles),
            menu: MenuState::new(),
            measurements: [0.0; CHANNEL_COUNT],
        }
    }

    /// Replace the adjustment table (after loading from storage)
    pub fn set_adjustment(&mut self, table: AdjustmentTable) {
        self.table = table;
    }

    /// Adjustment table in use
    pub fn adjustment(&self) -> &AdjustmentTable {
        &self.table
    }

    /// Calibration in progress
    pub fn calibration(&self) -> &CalibrationContext {
        &self.calibration
    }

    /// Menu state
    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    /// Measurements of the last cycle
    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    /// Run one cycle
    ///
    /// `sweep` is `None` when sampling failed; the previous sweeps are
    /// used then.
    pub fn cycle(&mut self, sweep: Option<&RawSweep>, pressed: bool) -> CycleReport {
        if let Some(sweep) = sweep {
            self.history.push(sweep);
        }
        self.measurements = self.history.convert(&self.table);

        let charge = self.charger.update(&self.measurements);
        let event = self.clicks.poll(pressed);
        let task = self.menu.update(event, &self.measurements, &self.calibration);

        let mut report = CycleReport {
            charge,
            event,
            task,
            storage: None,
            adjustment: None,
        };
        self.dispatch(&mut report);
        report
    }

    fn dispatch(&mut self, report: &mut CycleReport) {
        match report.task {
            TaskCode::Calibrate(channel) => self.calibration.begin(channel),
            TaskCode::MeasureFirstPoint => {
                self.calibration.samples[0] = self.history.channel_average(self.calibration.channel);
            }
            TaskCode::MeasureSecondPoint => {
                self.calibration.samples[1] = self.history.channel_average(self.calibration.channel);
                report.adjustment = Some(self.table.apply_two_point(&self.calibration));
            }
            TaskCode::Save => report.storage = Some(StorageRequest::Save(self.table)),
            TaskCode::Cancel => {
                self.table = AdjustmentTable::factory();
                report.storage = Some(StorageRequest::Reload);
            }
            TaskCode::NoAction => {}
        }
    }
}
