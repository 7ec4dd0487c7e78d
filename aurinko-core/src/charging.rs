//! Charge control
//!
//! The battery is charged from the panel PWM outputs. Charging only runs
//! while the battery voltage lies inside the accepted window; the start-up
//! law drives panel 4 with a duty derived from the battery/panel ratio.

use crate::config::{BATTERY_MAX_V, BATTERY_MIN_V, PANEL_COUNT, PWM_MAX_DUTY, PWM_TOP};
use crate::measurement::{Channel, Measurements};

/// Charge controller configuration
#[derive(Debug, Clone, Copy)]
pub struct ChargeConfig {
    /// Lowest accepted battery voltage (inclusive)
    pub battery_min_v: f32,
    /// Highest accepted battery voltage (exclusive)
    pub battery_max_v: f32,
    /// Panel must exceed the battery by this much before driving it
    pub headroom_v: f32,
    /// Voltage lost across the switching stage
    pub panel_drop_v: f32,
    /// Duty gain over the ideal ratio
    pub duty_gain: f32,
    /// Duty clamp
    pub max_duty: u8,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            battery_min_v: BATTERY_MIN_V,
            battery_max_v: BATTERY_MAX_V,
            headroom_v: 1.5,
            panel_drop_v: 1.0,
            duty_gain: 1.05,
            max_duty: PWM_MAX_DUTY,
        }
    }
}

/// Charging state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargingState {
    /// Battery missing or outside the accepted window
    #[default]
    WrongBatteryVoltage,
    /// Charging from panel 4
    StartUp,
}

/// Result of one control step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeOutput {
    /// State after this step
    pub state: ChargingState,
    /// Duty per panel output, out of the PWM top value
    pub duties: [u8; PANEL_COUNT],
}

/// Charge controller
#[derive(Debug, Clone)]
pub struct ChargeController {
    config: ChargeConfig,
    state: ChargingState,
}

impl Default for ChargeController {
    fn default() -> Self {
        Self::new(ChargeConfig::default())
    }
}

impl ChargeController {
    /// Create a controller in the wrong-battery state
    pub const fn new(config: ChargeConfig) -> Self {
        Self {
            config,
            state: ChargingState::WrongBatteryVoltage,
        }
    }

    /// Current state
    pub fn state(&self) -> ChargingState {
        self.state
    }

    /// Run one control step
    pub fn update(&mut self, measurements: &Measurements) -> ChargeOutput {
        let battery = measurements[Channel::BatteryVoltage.index()];
        let in_window = battery >= self.config.battery_min_v && battery < self.config.battery_max_v;

        self.state = if in_window {
            ChargingState::StartUp
        } else {
            ChargingState::WrongBatteryVoltage
        };

        let mut output = ChargeOutput {
            state: self.state,
            duties: [0; PANEL_COUNT],
        };
        if self.state == ChargingState::StartUp {
            let panel = measurements[Channel::Panel4Voltage.index()];
            output.duties[3] = self.startup_duty(battery, panel);
        }
        output
    }

    fn startup_duty(&self, battery: f32, panel: f32) -> u8 {
        if panel <= battery + self.config.headroom_v {
            return 0;
        }
        let ratio = battery / (panel - self.config.panel_drop_v);
        let duty = PWM_TOP as f32 * ratio * self.config.duty_gain;
        // Float to int casts saturate; NaN becomes 0
        (duty as u32).min(self.config.max_duty as u32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(battery: f32, panel4: f32) -> Measurements {
        let mut m = [0.0; 10];
        m[Channel::BatteryVoltage.index()] = battery;
        m[Channel::Panel4Voltage.index()] = panel4;
        m
    }

    #[test]
    fn test_starts_in_wrong_battery_state() {
        let controller = ChargeController::default();
        assert_eq!(controller.state(), ChargingState::WrongBatteryVoltage);
    }

    #[test]
    fn test_battery_window() {
        let mut controller = ChargeController::default();
        for battery in [0.0, 9.49, 14.5, 20.0] {
            let out = controller.update(&measurements(battery, 20.0));
            assert_eq!(out.state, ChargingState::WrongBatteryVoltage);
            assert_eq!(out.duties, [0; 4]);
        }
        let out = controller.update(&measurements(9.5, 0.0));
        assert_eq!(out.state, ChargingState::StartUp);
    }

    #[test]
    fn test_startup_duty() {
        let mut controller = ChargeController::default();
        // 128 * (12 / 17) * 1.05 = 94.87
        let out = controller.update(&measurements(12.0, 18.0));
        assert_eq!(out.state, ChargingState::StartUp);
        assert_eq!(out.duties, [0, 0, 0, 94]);
    }

    #[test]
    fn test_startup_needs_headroom() {
        let mut controller = ChargeController::default();
        let out = controller.update(&measurements(12.0, 13.5));
        assert_eq!(out.duties[3], 0);
    }

    #[test]
    fn test_startup_duty_clamped() {
        let mut controller = ChargeController::default();
        // 128 * (14 / 14.6) * 1.05 = 128.9
        let out = controller.update(&measurements(14.0, 15.6));
        assert_eq!(out.duties[3], PWM_MAX_DUTY);
    }

    #[test]
    fn test_leaving_window_stops_output() {
        let mut controller = ChargeController::default();
        controller.update(&measurements(12.0, 18.0));
        let out = controller.update(&measurements(15.0, 18.0));
        assert_eq!(out.state, ChargingState::WrongBatteryVoltage);
        assert_eq!(out.duties, [0; 4]);
    }
}
