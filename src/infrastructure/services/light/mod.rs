mod service;
mod state;

pub use service::{LightStateService, init_light_service};
pub(crate) use service::LightStateReceiver;
