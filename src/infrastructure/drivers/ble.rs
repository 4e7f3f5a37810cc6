use esp_hal::peripherals::BT;
use esp_radio::ble::controller::BleConnector;
use static_cell::make_static;
use trouble_host::prelude::ExternalController;

const BLE_SLOTS: usize = 20;

pub type BleController = ExternalController<BleConnector<'static>, BLE_SLOTS>;

/// Bring up the radio and hand its HCI transport to the BLE host.
pub fn init_ble_controller(bt: BT<'static>) -> BleController {
    let esp_radio_ctrl = &*make_static!(esp_radio::init().unwrap());
    let connector = BleConnector::new(esp_radio_ctrl, bt, Default::default()).unwrap();
    ExternalController::new(connector)
}
