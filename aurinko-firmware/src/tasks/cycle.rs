//! Control cycle task
//!
//! Runs the charger at a fixed rate: sample the analog front end, run the
//! controller (charge control, button, menu, task dispatch), drive the
//! panel outputs and render the current view. Rendering waits for the LCD
//! task page by page, so a stuck display stalls the cycle.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use heapless::Vec;

use aurinko_core::charging::ChargingState;
use aurinko_core::config::ChargerConfig;
use aurinko_core::controller::{Controller, CycleReport};
use aurinko_core::menu::view::MAX_FIELDS;
use aurinko_core::menu::TaskCode;
use aurinko_display::{DisplayTransport, PlacedText, Renderer};
use aurinko_hal_rp2040::analog::MuxAnalog;
use aurinko_hal_rp2040::pwm::PanelPwm;
use aurinko_hal_rp2040::{AnalogFrontEnd, ChargeOutputs};

use crate::channels::{ADJUSTMENT_TABLE, STORAGE_REQUEST};
use crate::display::ChannelTransport;

#[embassy_executor::task]
pub async fn cycle_task(
    mut analog: MuxAnalog<'static>,
    mut outputs: PanelPwm<'static>,
    button: Input<'static>,
    config: ChargerConfig,
) {
    info!("Cycle task started ({} ms)", config.cycle_period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(config.cycle_period_ms));
    let mut controller = Controller::new(&config);
    let mut renderer = Renderer::new();
    let mut transport = ChannelTransport::new();
    let mut charging = ChargingState::default();
    let mut cycle: u32 = 0;

    outputs.disable();

    loop {
        if let Some(table) = ADJUSTMENT_TABLE.try_take() {
            debug!("Adjustment table updated");
            controller.set_adjustment(table);
        }

        let sweep = match analog.sweep().await {
            Ok(sweep) => Some(sweep),
            Err(e) => {
                warn!("Analog sweep failed: {:?}", e);
                None
            }
        };

        // Button pulls the input low
        let report = controller.cycle(sweep.as_ref(), button.is_low());
        outputs.set_duties(&report.charge.duties);

        if report.charge.state != charging {
            charging = report.charge.state;
            info!("Charging state: {:?}", charging);
        }

        handle_report(&report);

        if config.display_reinit_due(cycle) {
            if let Err(e) = transport.init().await {
                warn!("Display init failed: {:?}", e);
            }
        }

        let mut texts: Vec<PlacedText<'_>, MAX_FIELDS> = Vec::new();
        for field in controller.menu().fields() {
            if texts.push(PlacedText::new(field.text, field.x, field.y)).is_err() {
                break;
            }
        }
        if let Err(e) = renderer.render(&texts, &mut transport).await {
            warn!("Render failed: {:?}", e);
        }

        cycle = cycle.wrapping_add(1);
        ticker.next().await;
    }
}

fn handle_report(report: &CycleReport) {
    if report.task != TaskCode::NoAction {
        info!("Menu task: {:?}", report.task);
    }

    if let Some(Err(e)) = report.adjustment {
        warn!("Adjustment not applied: {:?}", e);
    }

    if let Some(request) = report.storage {
        if STORAGE_REQUEST.try_send(request).is_err() {
            warn!("Storage busy, dropped {:?}", request);
        }
    }
}
