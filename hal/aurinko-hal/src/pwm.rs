//! Charge PWM outputs

/// Four panel switch outputs
pub trait ChargeOutputs {
    /// Apply one duty per panel, out of the PWM top value
    fn set_duties(&mut self, duties: &[u8; 4]);

    /// Switch all outputs off
    fn disable(&mut self) {
        self.set_duties(&[0; 4]);
    }
}
