//! Measurement channels
//!
//! The charger samples 15 raw ADC inputs per sweep, of which 10 carry a
//! panel or battery voltage/current. Raw sweeps are averaged over the last
//! few cycles and converted to volts/amperes with the channel adjustment.

use crate::config::calibration::AdjustmentTable;

/// Number of converted measurement channels
pub const CHANNEL_COUNT: usize = 10;

/// Number of raw ADC inputs converted per sweep
pub const RAW_CHANNEL_COUNT: usize = 15;

/// Number of sweeps kept for averaging
pub const SAMPLE_DEPTH: usize = 3;

/// Converted measurement vector, indexed by [`Channel::index`]
pub type Measurements = [f32; CHANNEL_COUNT];

/// One raw ADC sweep
pub type RawSweep = [u16; RAW_CHANNEL_COUNT];

/// Raw sweep position of each measurement channel
///
/// The converter walks its inputs from the highest down, so panel 1 voltage
/// sits at the top of the sweep and battery current at the bottom.
const RAW_LOOKUP: [usize; CHANNEL_COUNT] = [14, 13, 12, 11, 10, 9, 8, 7, 2, 0];

/// Measured quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantity {
    /// Volts
    Voltage,
    /// Amperes
    Current,
}

impl Quantity {
    /// Unit letter shown after a value
    pub const fn unit(self) -> char {
        match self {
            Quantity::Voltage => 'V',
            Quantity::Current => 'A',
        }
    }

    /// On-screen label ('a' renders as "ä")
    pub const fn label(self) -> &'static str {
        match self {
            Quantity::Voltage => "JaNNITE",
            Quantity::Current => "VIRTA",
        }
    }

    /// Row in the calibration point table
    pub const fn index(self) -> usize {
        match self {
            Quantity::Voltage => 0,
            Quantity::Current => 1,
        }
    }
}

/// Where a channel is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// Solar panel 1-4
    Panel(u8),
    /// Battery
    Battery,
}

/// Measurement channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Channel {
    #[default]
    Panel1Voltage = 0,
    Panel1Current = 1,
    Panel2Voltage = 2,
    Panel2Current = 3,
    Panel3Voltage = 4,
    Panel3Current = 5,
    Panel4Voltage = 6,
    Panel4Current = 7,
    BatteryVoltage = 8,
    BatteryCurrent = 9,
}

impl Channel {
    /// All channels in measurement-vector order
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Panel1Voltage,
        Channel::Panel1Current,
        Channel::Panel2Voltage,
        Channel::Panel2Current,
        Channel::Panel3Voltage,
        Channel::Panel3Current,
        Channel::Panel4Voltage,
        Channel::Panel4Current,
        Channel::BatteryVoltage,
        Channel::BatteryCurrent,
    ];

    /// Channel for a measurement-vector index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Position in the measurement vector
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Even channels measure voltage, odd ones current
    pub const fn quantity(self) -> Quantity {
        if self.index() % 2 == 0 {
            Quantity::Voltage
        } else {
            Quantity::Current
        }
    }

    /// Panel number or battery
    pub const fn source(self) -> Source {
        match self {
            Channel::BatteryVoltage | Channel::BatteryCurrent => Source::Battery,
            _ => Source::Panel((self.index() / 2) as u8 + 1),
        }
    }

    /// Position of this channel in a raw ADC sweep
    pub const fn raw_index(self) -> usize {
        RAW_LOOKUP[self.index()]
    }
}

/// Ring of recent raw sweeps
#[derive(Debug, Clone)]
pub struct SampleHistory {
    sweeps: [RawSweep; SAMPLE_DEPTH],
    next: usize,
    filled: usize,
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleHistory {
    /// Create an empty history
    pub const fn new() -> Self {
        Self {
            sweeps: [[0; RAW_CHANNEL_COUNT]; SAMPLE_DEPTH],
            next: 0,
            filled: 0,
        }
    }

    /// Record a new sweep, replacing the oldest one
    pub fn push(&mut self, sweep: &RawSweep) {
        self.sweeps[self.next] = *sweep;
        self.next = (self.next + 1) % SAMPLE_DEPTH;
        if self.filled < SAMPLE_DEPTH {
            self.filled += 1;
        }
    }

    /// Number of sweeps currently held
    pub fn len(&self) -> usize {
        self.filled
    }

    /// Check if no sweep has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Mean of one raw input over the held sweeps (0 when empty)
    pub fn average(&self, raw_index: usize) -> u16 {
        if self.filled == 0 || raw_index >= RAW_CHANNEL_COUNT {
            return 0;
        }
        let sum: u32 = self.sweeps[..self.filled]
            .iter()
            .map(|sweep| sweep[raw_index] as u32)
            .sum();
        (sum / self.filled as u32) as u16
    }

    /// Averaged raw value of a measurement channel
    pub fn channel_average(&self, channel: Channel) -> u16 {
        self.average(channel.raw_index())
    }

    /// Convert the averaged sweep into volts and amperes
    pub fn convert(&self, table: &AdjustmentTable) -> Measurements {
        let mut out = [0.0; CHANNEL_COUNT];
        for channel in Channel::ALL {
            out[channel.index()] = table.convert(channel, self.channel_average(channel));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_quantity_alternates() {
        assert_eq!(Channel::Panel1Voltage.quantity(), Quantity::Voltage);
        assert_eq!(Channel::Panel1Current.quantity(), Quantity::Current);
        assert_eq!(Channel::BatteryVoltage.quantity(), Quantity::Voltage);
        assert_eq!(Channel::BatteryCurrent.quantity(), Quantity::Current);
    }

    #[test]
    fn test_channel_source() {
        assert_eq!(Channel::Panel1Current.source(), Source::Panel(1));
        assert_eq!(Channel::Panel3Voltage.source(), Source::Panel(3));
        assert_eq!(Channel::Panel4Current.source(), Source::Panel(4));
        assert_eq!(Channel::BatteryCurrent.source(), Source::Battery);
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(Channel::from_index(0), Some(Channel::Panel1Voltage));
        assert_eq!(Channel::from_index(9), Some(Channel::BatteryCurrent));
        assert_eq!(Channel::from_index(10), None);
    }

    #[test]
    fn test_raw_lookup() {
        assert_eq!(Channel::Panel1Voltage.raw_index(), 14);
        assert_eq!(Channel::Panel4Current.raw_index(), 7);
        assert_eq!(Channel::BatteryVoltage.raw_index(), 2);
        assert_eq!(Channel::BatteryCurrent.raw_index(), 0);
    }

    #[test]
    fn test_history_averages_filled_sweeps_only() {
        let mut history = SampleHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.average(0), 0);

        let mut sweep = [0u16; RAW_CHANNEL_COUNT];
        sweep[0] = 300;
        history.push(&sweep);
        assert_eq!(history.average(0), 300);

        sweep[0] = 600;
        history.push(&sweep);
        assert_eq!(history.average(0), 450);
    }

    #[test]
    fn test_history_drops_oldest() {
        let mut history = SampleHistory::new();
        for value in [100u16, 200, 300, 400] {
            let mut sweep = [0u16; RAW_CHANNEL_COUNT];
            sweep[14] = value;
            history.push(&sweep);
        }
        assert_eq!(history.len(), SAMPLE_DEPTH);
        assert_eq!(history.channel_average(Channel::Panel1Voltage), 300);
    }
}
