use pesca_light_core::color;

use crate::infrastructure::drivers::EspLedDriver;
use crate::infrastructure::services::light::LightStateReceiver;

/// Task driving the LED strip.
/// Receives resolved states and writes the matching color over RMT.
#[embassy_executor::task]
pub(crate) async fn light_render_task(
    mut driver: EspLedDriver<'static>,
    states: LightStateReceiver,
) {
    loop {
        let state = states.receive().await;
        driver.fill(color::render(&state));
    }
}
