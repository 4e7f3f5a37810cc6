use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use esp_hal::{gpio::interconnect::PeripheralOutput, peripherals::RMT};

use super::state::AtomicLightState;
use crate::{
    domain::{
        LightChangeIntent, LightState,
        ports::{LightError, LightStateChanger, LightStateHandler, LightStateReader},
    },
    infrastructure::{drivers::EspLedDriver, tasks::light_render_task},
};

const LIGHT_STATE_CHANNEL_SIZE: usize = 10;

pub(crate) type LightStateReceiver =
    Receiver<'static, CriticalSectionRawMutex, LightState, LIGHT_STATE_CHANNEL_SIZE>;

/// Channel feeding resolved states to the render task
static LIGHT_STATE_CHANNEL: Channel<
    CriticalSectionRawMutex,
    LightState,
    LIGHT_STATE_CHANNEL_SIZE,
> = Channel::new();

/// Global thread-safe lock-free light state
static LIGHT_STATE: AtomicLightState = AtomicLightState::from_state(&LightState::new());

#[derive(Debug, Default, Clone)]
pub struct LightStateService;

impl LightStateReader for LightStateService {
    fn get_light_state(&self) -> LightState {
        LIGHT_STATE.get()
    }
}

impl LightStateChanger for LightStateService {
    fn apply_light_intent(&self, intent: LightChangeIntent) -> Result<(), LightError> {
        let state = intent.apply_to(&LIGHT_STATE.get());
        LIGHT_STATE_CHANNEL
            .try_send(state.clone())
            .map_err(|_| LightError::Busy)?;
        LIGHT_STATE.set(&state);
        Ok(())
    }
}

impl LightStateHandler for LightStateService {}

pub fn init_light_service<O>(spawner: Spawner, rmt: RMT<'static>, pin: O) -> LightStateService
where
    O: PeripheralOutput<'static>,
{
    let driver = EspLedDriver::new(rmt, pin);

    spawner
        .spawn(light_render_task(driver, LIGHT_STATE_CHANNEL.receiver()))
        .expect("Failed to spawn light render task");

    // Show the power-on state without waiting for the first write.
    let _ = LIGHT_STATE_CHANNEL.try_send(LIGHT_STATE.get());

    LightStateService
}
