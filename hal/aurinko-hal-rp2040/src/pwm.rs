//! Panel PWM outputs
//!
//! Panels 1/2 use channels A/B of one PWM slice, panels 3/4 those of a
//! second slice. Both slices count to the same top value.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use aurinko_hal::pwm::ChargeOutputs;

/// Panel switch PWM outputs
pub struct PanelPwm<'d> {
    low: Pwm<'d>,
    high: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PanelPwm<'d> {
    /// Configure both slices with the given top value, all outputs off
    pub fn new(mut low: Pwm<'d>, mut high: Pwm<'d>, top: u16) -> Self {
        let mut config = PwmConfig::default();
        config.top = top;
        config.compare_a = 0;
        config.compare_b = 0;
        low.set_config(&config);
        high.set_config(&config);
        Self { low, high, config }
    }
}

impl<'d> ChargeOutputs for PanelPwm<'d> {
    fn set_duties(&mut self, duties: &[u8; 4]) {
        let top = self.config.top;
        let mut config = self.config.clone();

        config.compare_a = (duties[0] as u16).min(top);
        config.compare_b = (duties[1] as u16).min(top);
        self.low.set_config(&config);

        config.compare_a = (duties[2] as u16).min(top);
        config.compare_b = (duties[3] as u16).min(top);
        self.high.set_config(&config);
    }
}
