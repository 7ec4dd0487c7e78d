//! Button events and menu task codes

use crate::measurement::Channel;

/// Debounced button event for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Nothing happened
    #[default]
    NoClick,
    /// Button released before the long-click threshold
    ShortClick,
    /// Button held for the long-click threshold
    LongClick,
}

/// Work the menu asks the firmware to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskCode {
    /// Start calibrating a channel
    Calibrate(Channel),
    /// Persist the adjustment table
    Save,
    /// Drop unsaved adjustments
    Cancel,
    /// Nothing to do
    #[default]
    NoAction,
    /// Latch the sample for the first calibration point
    MeasureFirstPoint,
    /// Latch the sample for the second point and apply the adjustment
    MeasureSecondPoint,
}

impl TaskCode {
    /// Numeric task code (0-9 calibrate, 10 save, 11 cancel, 12 none,
    /// 13/14 measure)
    pub const fn code(self) -> u8 {
        match self {
            TaskCode::Calibrate(channel) => channel as u8,
            TaskCode::Save => 10,
            TaskCode::Cancel => 11,
            TaskCode::NoAction => 12,
            TaskCode::MeasureFirstPoint => 13,
            TaskCode::MeasureSecondPoint => 14,
        }
    }

    /// Parse a numeric task code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0..=9 => Channel::from_index(code).map(TaskCode::Calibrate),
            10 => Some(TaskCode::Save),
            11 => Some(TaskCode::Cancel),
            12 => Some(TaskCode::NoAction),
            13 => Some(TaskCode::MeasureFirstPoint),
            14 => Some(TaskCode::MeasureSecondPoint),
            _ => None,
        }
    }
}
