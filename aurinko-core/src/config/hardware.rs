//! Hardware constants and firmware tunables

/// Control cycle period in milliseconds
pub const CYCLE_PERIOD_MS: u64 = 20;

/// Cycles the button must be held before a long click fires
pub const LONG_CLICK_CYCLES: u16 = 20;

/// Cycles between display init sequence re-sends
pub const DISPLAY_REINIT_CYCLES: u16 = 100;

/// PWM counter top value
pub const PWM_TOP: u16 = 128;

/// Highest duty the charge controller may request
pub const PWM_MAX_DUTY: u8 = 125;

/// Lowest battery voltage accepted for charging (inclusive)
pub const BATTERY_MIN_V: f32 = 9.5;

/// Highest battery voltage accepted for charging (exclusive)
pub const BATTERY_MAX_V: f32 = 14.5;

/// Number of solar panel inputs
pub const PANEL_COUNT: usize = 4;

/// Firmware tunables passed to the control tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargerConfig {
    /// Control cycle period in milliseconds
    pub cycle_period_ms: u64,
    /// Long click threshold in cycles
    pub long_click_cycles: u16,
    /// Display re-init interval in cycles (0 disables)
    pub display_reinit_cycles: u16,
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            cycle_period_ms: CYCLE_PERIOD_MS,
            long_click_cycles: LONG_CLICK_CYCLES,
            display_reinit_cycles: DISPLAY_REINIT_CYCLES,
        }
    }
}

impl ChargerConfig {
    /// Check if the display should be re-initialized on this cycle
    pub fn display_reinit_due(&self, cycle: u32) -> bool {
        self.display_reinit_cycles != 0
            && cycle % self.display_reinit_cycles as u32 == 0
    }
}
