pub(crate) mod light;

pub use light::{LightStateService, init_light_service};
pub use pesca_light_hap::PairStore;
