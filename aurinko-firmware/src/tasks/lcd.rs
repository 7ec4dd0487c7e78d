//! LCD task
//!
//! Owns the DOGL128 and writes out whatever the cycle task hands over.
//! Every request is acknowledged through `PAGE_CONSUMED`, failed or not.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;

use aurinko_display::{DisplayError, DisplayTransport, Dogl128};

use crate::channels::{LcdRequest, LCD_REQUEST, PAGE_CONSUMED};

/// The board's display: DOGL128 on SPI0 with its own chip select and A0
pub type Lcd =
    Dogl128<ExclusiveDevice<Spi<'static, SPI0, Async>, Output<'static>, Delay>, Output<'static>>;

#[embassy_executor::task]
pub async fn lcd_task(mut lcd: Lcd) {
    info!("LCD task started");

    loop {
        let request = LCD_REQUEST.receive().await;
        let result = write(&mut lcd, &request).await;

        if let Err(e) = result {
            warn!("LCD write failed: {:?}", e);
        }

        PAGE_CONSUMED.signal(());
    }
}

async fn write(lcd: &mut Lcd, request: &LcdRequest) -> Result<(), DisplayError> {
    match request {
        LcdRequest::Init => {
            debug!("LCD init");
            lcd.init().await
        }
        LcdRequest::Page { page, line } => {
            trace!("LCD page {}", page);
            lcd.begin_page(*page).await?;
            lcd.send_line(line).await
        }
    }
}
