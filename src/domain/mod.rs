//! Domain layer - entities and ports
//!
//! The entities themselves live in the platform-free `pesca-light-core`
//! crate so they stay testable on the host.

pub mod ports;

pub use pesca_light_core::intent::LightChangeIntent;
pub use pesca_light_core::state::{FanState, LightState, RotationDirection};
