//! Accessory glue: GATT service definitions, characteristic dispatch and
//! the advertise/serve loop.

#[cfg(feature = "fan")]
pub mod fan;
#[cfg(not(feature = "fan"))]
pub mod lightbulb;

use micro_hap::{AccessoryInformationStatic, DeviceId, SetupId};
use trouble_host::prelude::*;

use crate::config;

/// Max number of connections
pub(crate) const CONNECTIONS_MAX: usize = 3;

/// Max number of L2CAP channels.
pub(crate) const L2CAP_CHANNELS_MAX: usize = 5; // Signal + att

pub(crate) fn accessory_information() -> AccessoryInformationStatic {
    AccessoryInformationStatic {
        name: config::DEVICE.name,
        model: config::DEVICE.model,
        manufacturer: config::DEVICE.manufacturer,
        serial_number: config::DEVICE.serial_number,
        firmware_revision: config::BUILD_VERSION,
        hardware_revision: config::DEVICE.hardware_revision,
        category: config::DEVICE.category,
        device_id: DeviceId(config::HAP.device_id),
        setup_id: SetupId(config::HAP.setup_id),
    }
}

/// This is a background task that is required to run forever alongside any
/// other BLE tasks. It is generic over the controller, so it cannot be a
/// static embassy task.
pub(crate) async fn ble_task<C: Controller, P: PacketPool>(mut runner: Runner<'_, C, P>) {
    loop {
        if let Err(e) = runner.run().await {
            panic!("[ble_task] error: {:?}", e);
        }
    }
}
