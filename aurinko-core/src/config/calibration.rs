//! Channel adjustment (linear calibration)
//!
//! Every measurement channel converts its averaged raw ADC value with
//! `value = raw * coefficient + offset`. The coefficients come from the
//! factory table and can be replaced per channel by a two-point
//! calibration. The resulting table is persisted to flash.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::measurement::{Channel, CHANNEL_COUNT};

/// Magic number to identify a valid adjustment record
pub const ADJUSTMENT_MAGIC: u32 = 0x41444A55; // "ADJU"

/// Current adjustment record version
pub const ADJUSTMENT_VERSION: u8 = 1;

/// Reference values applied during calibration, `[quantity][point]`
///
/// Row 0 is volts, row 1 amperes.
pub const CALIBRATION_POINTS: [[f32; 2]; 2] = [[2.0, 15.0], [1.0, 5.0]];

const PANEL_VOLTAGE_COEFF_BITS: u32 = 0x3D13_E93F;
const PANEL_VOLTAGE_OFFSET_BITS: u32 = 0xBD6E_EF00;
const BATTERY_VOLTAGE_COEFF_BITS: u32 = 0x3CB2_E93F;

/// Adjustment errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdjustmentError {
    /// Both calibration samples were equal
    DegenerateSamples,
}

/// Calibration in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationContext {
    /// Channel being calibrated
    pub channel: Channel,
    /// Raw samples latched at the first and second calibration point
    pub samples: [u16; 2],
}

impl CalibrationContext {
    /// Start calibrating a channel, clearing old samples
    pub fn begin(&mut self, channel: Channel) {
        self.channel = channel;
        self.samples = [0; 2];
    }

    /// Reference value of a calibration point (0 or 1) for this channel
    pub fn point(&self, point: usize) -> f32 {
        CALIBRATION_POINTS[self.channel.quantity().index()][point & 1]
    }
}

/// Coefficient and offset per measurement channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdjustmentTable {
    /// Multiplier per channel
    pub coefficients: [f32; CHANNEL_COUNT],
    /// Additive offset per channel
    pub offsets: [f32; CHANNEL_COUNT],
}

impl Default for AdjustmentTable {
    fn default() -> Self {
        Self::factory()
    }
}

impl AdjustmentTable {
    /// Factory adjustment
    ///
    /// Only the voltage dividers have known ratios; current channels read
    /// zero until calibrated.
    pub fn factory() -> Self {
        let mut table = Self {
            coefficients: [0.0; CHANNEL_COUNT],
            offsets: [0.0; CHANNEL_COUNT],
        };
        for channel in &Channel::ALL[..Channel::BatteryVoltage.index()] {
            if channel.index() % 2 == 0 {
                table.coefficients[channel.index()] = f32::from_bits(PANEL_VOLTAGE_COEFF_BITS);
                table.offsets[channel.index()] = f32::from_bits(PANEL_VOLTAGE_OFFSET_BITS);
            }
        }
        table.coefficients[Channel::BatteryVoltage.index()] =
            f32::from_bits(BATTERY_VOLTAGE_COEFF_BITS);
        table
    }

    /// Convert a raw value of a channel, never returning a negative value
    pub fn convert(&self, channel: Channel, raw: u16) -> f32 {
        let i = channel.index();
        let value = raw as f32 * self.coefficients[i] + self.offsets[i];
        value.max(0.0)
    }

    /// Replace a channel's adjustment from the two latched samples
    pub fn apply_two_point(&mut self, context: &CalibrationContext) -> Result<(), AdjustmentError> {
        let [raw0, raw1] = context.samples;
        if raw0 == raw1 {
            return Err(AdjustmentError::DegenerateSamples);
        }

        let p0 = context.point(0);
        let p1 = context.point(1);
        let coefficient = (p1 - p0) / (raw1 as f32 - raw0 as f32);
        let offset = p0 - coefficient * raw0 as f32;

        let i = context.channel.index();
        self.coefficients[i] = coefficient;
        self.offsets[i] = offset;
        Ok(())
    }
}

/// Adjustment table as stored in flash
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdjustmentRecord {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Adjustment values
    pub table: AdjustmentTable,
    /// CRC32 checksum (calculated over magic..table)
    pub crc: u32,
}

impl Default for AdjustmentRecord {
    fn default() -> Self {
        Self::new(AdjustmentTable::factory())
    }
}

impl AdjustmentRecord {
    /// Wrap a table, computing its checksum
    pub fn new(table: AdjustmentTable) -> Self {
        let mut record = Self {
            magic: ADJUSTMENT_MAGIC,
            version: ADJUSTMENT_VERSION,
            table,
            crc: 0,
        };
        record.update_crc();
        record
    }

    /// Check if the header matches this firmware
    pub fn is_valid(&self) -> bool {
        self.magic == ADJUSTMENT_MAGIC && self.version == ADJUSTMENT_VERSION
    }

    /// Calculate CRC32 over everything but the crc field
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFF_FFFF;
        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        for value in self.table.coefficients.iter().chain(self.table.offsets.iter()) {
            crc = crc32_update(crc, &value.to_bits().to_le_bytes());
        }
        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }
}

/// CRC32 update (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
