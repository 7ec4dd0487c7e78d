//! EA DOGL128-6 LCD driver
//!
//! 128x64 LCD with an ST7565R controller on SPI. The A0 pin selects
//! between command (low) and display data (high) bytes. Pages are written
//! whole, starting at column 0.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiDevice;

use crate::backend::{DisplayError, DisplayTransport};
use crate::render::{PageLine, PAGE_COUNT};

/// ST7565R commands
#[allow(dead_code)]
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const ADC_REVERSE: u8 = 0xA1;
    pub const COM_NORMAL: u8 = 0xC0;
    pub const DISPLAY_NORMAL: u8 = 0xA6;
    pub const BIAS_1_9: u8 = 0xA2;
    pub const POWER_ALL_ON: u8 = 0x2F;
    pub const SET_BOOSTER: u8 = 0xF8;
    pub const BOOSTER_4X: u8 = 0x00;
    pub const REGULATOR_RATIO: u8 = 0x27;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const STATIC_INDICATOR_OFF: u8 = 0xAC;
    pub const NOP: u8 = 0xE3;
}

/// Controller init sequence, sent as one command burst
pub const INIT_SEQUENCE: [u8; 15] = [
    cmd::SET_START_LINE,
    cmd::ADC_REVERSE,
    cmd::COM_NORMAL,
    cmd::DISPLAY_NORMAL,
    cmd::BIAS_1_9,
    cmd::POWER_ALL_ON,
    cmd::SET_BOOSTER,
    cmd::BOOSTER_4X,
    cmd::REGULATOR_RATIO,
    cmd::SET_CONTRAST,
    0x0F,
    cmd::STATIC_INDICATOR_OFF,
    0x01,
    cmd::DISPLAY_ON,
    cmd::NOP,
];

/// Page and column address command for the next data bytes
pub const fn page_address_command(page: u8, column: u8) -> [u8; 3] {
    [
        cmd::SET_PAGE_ADDR | (page & 0x0F),
        cmd::SET_HIGH_COLUMN | (column >> 4),
        cmd::SET_LOW_COLUMN | (column & 0x0F),
    ]
}

/// DOGL128 driver
pub struct Dogl128<SPI, A0> {
    spi: SPI,
    a0: A0,
}

impl<SPI, A0> Dogl128<SPI, A0>
where
    SPI: SpiDevice,
    A0: OutputPin,
{
    /// Create a driver; call `init` before sending pages
    pub fn new(spi: SPI, a0: A0) -> Self {
        Self { spi, a0 }
    }

    /// Send command bytes
    async fn command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.a0.set_low().map_err(|_| DisplayError::Communication)?;
        self.spi
            .write(bytes)
            .await
            .map_err(|_| DisplayError::Communication)
    }

    /// Send display data bytes
    async fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.a0.set_high().map_err(|_| DisplayError::Communication)?;
        self.spi
            .write(bytes)
            .await
            .map_err(|_| DisplayError::Communication)
    }

    /// Release the bus and pin
    pub fn release(self) -> (SPI, A0) {
        (self.spi, self.a0)
    }
}

impl<SPI, A0> DisplayTransport for Dogl128<SPI, A0>
where
    SPI: SpiDevice,
    A0: OutputPin,
{
    async fn init(&mut self) -> Result<(), DisplayError> {
        self.command(&INIT_SEQUENCE).await
    }

    async fn begin_page(&mut self, page: u8) -> Result<(), DisplayError> {
        if page as usize >= PAGE_COUNT {
            return Err(DisplayError::InvalidPage);
        }
        self.command(&page_address_command(page, 0)).await
    }

    async fn send_line(&mut self, line: &PageLine) -> Result<(), DisplayError> {
        self.data(line).await
    }

    fn is_ready(&self) -> bool {
        // Writes complete before the futures resolve
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_sequence() {
        assert_eq!(
            INIT_SEQUENCE,
            [
                0x40, 0xA1, 0xC0, 0xA6, 0xA2, 0x2F, 0xF8, 0x00, 0x27, 0x81, 0x0F, 0xAC, 0x01,
                0xAF, 0xE3
            ]
        );
    }

    #[test]
    fn test_page_address_command() {
        assert_eq!(page_address_command(0, 0), [0xB0, 0x10, 0x00]);
        assert_eq!(page_address_command(7, 0), [0xB7, 0x10, 0x00]);
        assert_eq!(page_address_command(3, 0x2A), [0xB3, 0x12, 0x0A]);
    }
}
