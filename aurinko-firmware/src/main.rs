//! Aurinko - Solar Charger Firmware
//!
//! Firmware for an RP2040-based four-panel solar charger with a one-button
//! menu on an EA DOGL128 display.
//!
//! Board wiring:
//! - Analog multiplexer output on GPIO26 (ADC0), select lines GPIO6..GPIO9
//! - Panel switches on PWM slices 5 (GPIO10/11) and 6 (GPIO12/13)
//! - Menu button on GPIO15, active low
//! - DOGL128 on SPI0: SCK GPIO18, MOSI GPIO19, CS GPIO17, A0 GPIO20

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Config as SpiConfig, Phase, Polarity, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use aurinko_core::config::{ChargerConfig, PWM_TOP};
use aurinko_display::Dogl128;
use aurinko_hal_rp2040::analog::MuxAnalog;
use aurinko_hal_rp2040::flash::Rp2040FlashStorage;
use aurinko_hal_rp2040::pwm::PanelPwm;

mod channels;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// DOGL128 SPI clock
const LCD_SPI_FREQUENCY: u32 = 4_000_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Aurinko firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = ChargerConfig::default();

    // Flash storage for the adjustment table
    let storage = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);

    // Analog front end
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let input = Channel::new_pin(p.PIN_26, Pull::None);
    let select = [
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
    ];
    let analog = MuxAnalog::new(adc, input, select);

    // Panel switches, all off until the first cycle
    let low = Pwm::new_output_ab(p.PWM_SLICE5, p.PIN_10, p.PIN_11, PwmConfig::default());
    let high = Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, PwmConfig::default());
    let outputs = PanelPwm::new(low, high, PWM_TOP);

    let button = Input::new(p.PIN_15, Pull::Up);

    // Display
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = LCD_SPI_FREQUENCY;
    // ST7565R latches on the rising edge with the clock idling high
    spi_config.phase = Phase::CaptureOnSecondTransition;
    spi_config.polarity = Polarity::IdleHigh;
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH1, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let a0 = Output::new(p.PIN_20, Level::Low);
    let lcd = Dogl128::new(ExclusiveDevice::new(spi, cs, Delay).unwrap(), a0);
    info!("Display bus initialized");

    spawner.spawn(tasks::adjustment_task(storage)).unwrap();
    spawner.spawn(tasks::lcd_task(lcd)).unwrap();
    spawner
        .spawn(tasks::cycle_task(analog, outputs, button, config))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
