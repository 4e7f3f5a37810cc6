mod ble;
mod led_ws2812;
mod random;

pub use ble::{BleController, init_ble_controller};
pub(crate) use led_ws2812::EspLedDriver;
pub use random::get_prng_key;
