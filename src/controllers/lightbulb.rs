//! The light bulb accessory: one Lightbulb service with On, Hue,
//! Saturation and Brightness characteristics, dispatching writes into the
//! light usecases.

use embassy_futures::join::join;
use log::{error, info};
use static_cell::StaticCell;
use trouble_host::prelude::*;

use micro_hap::{
    AccessoryInterface, BleProperties, CharId, Characteristic, CharacteristicProperties,
    CharacteristicResponse, DataSource, InterfaceError, IntoBytesForAccessoryInterface, Service,
    ServiceProperties, SvcId,
    ble::{FacadeDummyType, HapBleError, HapBleService, TimedWrite, sig},
    characteristic, descriptor, service,
    uuid::HomekitUuid16,
};

use pesca_light_core::command::{self, LightCharacteristic, instance};

use super::{CONNECTIONS_MAX, L2CAP_CHANNELS_MAX, ble_task};
use crate::config;
use crate::domain::ports::{LightStateChanger, LightStateReader};
use crate::infrastructure::services::PairStore;
use crate::mk_static;

const SERVICE_ID_LIGHTBULB: SvcId = SvcId(0x30);
const CHAR_ID_LIGHTBULB_SIGNATURE: CharId = CharId(0x31);
const CHAR_ID_LIGHTBULB_NAME: CharId = CharId(0x32);
const CHAR_ID_LIGHTBULB_ON: CharId = CharId(instance::LIGHTBULB_ON);
const CHAR_ID_LIGHTBULB_HUE: CharId = CharId(instance::LIGHTBULB_HUE);
const CHAR_ID_LIGHTBULB_SATURATION: CharId = CharId(instance::LIGHTBULB_SATURATION);
const CHAR_ID_LIGHTBULB_BRIGHTNESS: CharId = CharId(instance::LIGHTBULB_BRIGHTNESS);

const CHARACTERISTIC_HUE: HomekitUuid16 = HomekitUuid16::new(0x0013); // f32, 0..360, step=1, arcdegrees
const CHARACTERISTIC_SATURATION: HomekitUuid16 = HomekitUuid16::new(0x002F); // f32, 0..100, step=1, percentage
const CHARACTERISTIC_BRIGHTNESS: HomekitUuid16 = HomekitUuid16::new(0x0008); // int, 0..100, step=1, percentage

#[gatt_service(uuid = service::LIGHTBULB)]
struct LightbulbService {
    #[characteristic(uuid=characteristic::SERVICE_INSTANCE, read, value = SERVICE_ID_LIGHTBULB.0)]
    service_instance: u16,

    /// Service signature, only two bytes.
    #[characteristic(uuid=characteristic::SERVICE_SIGNATURE, read, write)]
    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_LIGHTBULB_SIGNATURE.0.to_le_bytes())]
    service_signature: FacadeDummyType,

    /// Name for the device.
    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_LIGHTBULB_NAME.0.to_le_bytes())]
    #[characteristic(uuid=characteristic::NAME, read, write)]
    name: FacadeDummyType,

    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_LIGHTBULB_ON.0.to_le_bytes())]
    #[characteristic(uuid=characteristic::ON, read, write)]
    on: FacadeDummyType,

    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_LIGHTBULB_HUE.0.to_le_bytes())]
    #[characteristic(uuid=CHARACTERISTIC_HUE, read, write)]
    hue: FacadeDummyType,

    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_LIGHTBULB_SATURATION.0.to_le_bytes())]
    #[characteristic(uuid=CHARACTERISTIC_SATURATION, read, write)]
    saturation: FacadeDummyType,

    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_LIGHTBULB_BRIGHTNESS.0.to_le_bytes())]
    #[characteristic(uuid=CHARACTERISTIC_BRIGHTNESS, read, write)]
    brightness: FacadeDummyType,
}

impl HapBleService for LightbulbService {
    fn populate_support(&self) -> Result<Service, HapBleError> {
        let mut service = Service {
            ble_handle: Some(self.handle),
            uuid: service::LIGHTBULB.into(),
            iid: SERVICE_ID_LIGHTBULB,
            characteristics: Default::default(),
            properties: ServiceProperties::new().with_primary(true),
        };

        service
            .characteristics
            .push(
                Characteristic::new(
                    characteristic::SERVICE_SIGNATURE.into(),
                    CHAR_ID_LIGHTBULB_SIGNATURE,
                )
                .with_properties(CharacteristicProperties::new().with_read(true))
                .with_ble_properties(
                    BleProperties::from_characteristic(self.service_signature)
                        .with_format_opaque(),
                ),
            )
            .map_err(|_| HapBleError::AllocationOverrun)?;

        service
            .characteristics
            .push(
                Characteristic::new(characteristic::NAME.into(), CHAR_ID_LIGHTBULB_NAME)
                    .with_properties(CharacteristicProperties::new().with_read(true))
                    .with_ble_properties(
                        BleProperties::from_characteristic(self.name)
                            .with_format(sig::Format::StringUtf8),
                    )
                    .with_data(DataSource::AccessoryInterface),
            )
            .map_err(|_| HapBleError::AllocationOverrun)?;

        service
            .characteristics
            .push(
                Characteristic::new(characteristic::ON.into(), CHAR_ID_LIGHTBULB_ON)
                    .with_properties(
                        CharacteristicProperties::new()
                            .with_rw(true)
                            .with_supports_event_notification(true)
                            .with_supports_disconnect_notification(true)
                            .with_supports_broadcast_notification(true),
                    )
                    .with_ble_properties(
                        BleProperties::from_characteristic(self.on)
                            .with_format(sig::Format::Boolean),
                    )
                    .with_data(DataSource::AccessoryInterface),
            )
            .map_err(|_| HapBleError::AllocationOverrun)?;

        service
            .characteristics
            .push(
                Characteristic::new(CHARACTERISTIC_HUE.into(), CHAR_ID_LIGHTBULB_HUE)
                    .with_properties(
                        CharacteristicProperties::new()
                            .with_rw(true)
                            .with_supports_event_notification(true)
                            .with_supports_disconnect_notification(true)
                            .with_supports_broadcast_notification(true),
                    )
                    .with_range(micro_hap::VariableRange {
                        start: micro_hap::VariableUnion::F32(0.0),
                        end: micro_hap::VariableUnion::F32(360.0),
                        inclusive: true,
                    })
                    .with_step(micro_hap::VariableUnion::F32(1.0))
                    .with_ble_properties(
                        BleProperties::from_characteristic(self.hue)
                            .with_format(sig::Format::F32)
                            .with_unit(sig::Unit::Other(0x2763)), // arcdegrees
                    )
                    .with_data(DataSource::AccessoryInterface),
            )
            .map_err(|_| HapBleError::AllocationOverrun)?;

        service
            .characteristics
            .push(
                Characteristic::new(
                    CHARACTERISTIC_SATURATION.into(),
                    CHAR_ID_LIGHTBULB_SATURATION,
                )
                .with_properties(
                    CharacteristicProperties::new()
                        .with_rw(true)
                        .with_supports_event_notification(true)
                        .with_supports_disconnect_notification(true)
                        .with_supports_broadcast_notification(true),
                )
                .with_range(micro_hap::VariableRange {
                    start: micro_hap::VariableUnion::F32(0.0),
                    end: micro_hap::VariableUnion::F32(100.0),
                    inclusive: true,
                })
                .with_step(micro_hap::VariableUnion::F32(1.0))
                .with_ble_properties(
                    BleProperties::from_characteristic(self.saturation)
                        .with_format(sig::Format::F32)
                        .with_unit(sig::Unit::Percentage),
                )
                .with_data(DataSource::AccessoryInterface),
            )
            .map_err(|_| HapBleError::AllocationOverrun)?;

        service
            .characteristics
            .push(
                Characteristic::new(
                    CHARACTERISTIC_BRIGHTNESS.into(),
                    CHAR_ID_LIGHTBULB_BRIGHTNESS,
                )
                .with_properties(
                    CharacteristicProperties::new()
                        .with_rw(true)
                        .with_supports_event_notification(true)
                        .with_supports_disconnect_notification(true)
                        .with_supports_broadcast_notification(true),
                )
                .with_range(micro_hap::VariableRange {
                    start: micro_hap::VariableUnion::U32(0),
                    end: micro_hap::VariableUnion::U32(100),
                    inclusive: true,
                })
                .with_step(micro_hap::VariableUnion::U32(1))
                .with_ble_properties(
                    BleProperties::from_characteristic(self.brightness)
                        .with_format(sig::Format::U32)
                        .with_unit(sig::Unit::Percentage),
                )
                .with_data(DataSource::AccessoryInterface),
            )
            .map_err(|_| HapBleError::AllocationOverrun)?;

        Ok(service)
    }
}

// GATT Server definition
#[gatt_server]
struct BulbServer {
    accessory_information: micro_hap::ble::AccessoryInformationService,
    protocol: micro_hap::ble::ProtocolInformationService,
    pairing: micro_hap::ble::PairingService,
    lightbulb: LightbulbService,
}

impl BulbServer<'_> {
    fn as_hap(&self) -> micro_hap::ble::HapServices<'_> {
        micro_hap::ble::HapServices {
            information: &self.accessory_information,
            protocol: &self.protocol,
            pairing: &self.pairing,
        }
    }
}

/// State for this specific accessory: everything flows through the light
/// state ports.
struct BulbAccessory<L> {
    name: HeaplessString<32>,
    light: L,
}

impl<L> AccessoryInterface for BulbAccessory<L>
where
    L: LightStateReader + LightStateChanger,
{
    async fn read_characteristic<'a>(
        &self,
        char_id: CharId,
        output: &'a mut [u8],
    ) -> Result<&'a [u8], InterfaceError> {
        let state = self.light.get_light_state();
        if char_id == CHAR_ID_LIGHTBULB_NAME {
            self.name.read_characteristic_into(char_id, output)
        } else if char_id == CHAR_ID_LIGHTBULB_ON {
            state.power.read_characteristic_into(char_id, output)
        } else if char_id == CHAR_ID_LIGHTBULB_HUE {
            state.hue.read_characteristic_into(char_id, output)
        } else if char_id == CHAR_ID_LIGHTBULB_SATURATION {
            state.saturation.read_characteristic_into(char_id, output)
        } else if char_id == CHAR_ID_LIGHTBULB_BRIGHTNESS {
            u32::from(state.brightness).read_characteristic_into(char_id, output)
        } else {
            Err(InterfaceError::CharacteristicUnknown(char_id))
        }
    }

    async fn write_characteristic(
        &mut self,
        char_id: CharId,
        data: &[u8],
    ) -> Result<CharacteristicResponse, InterfaceError> {
        let Some(kind) = LightCharacteristic::for_instance(char_id.0) else {
            return Err(InterfaceError::CharacteristicUnknown(char_id));
        };

        let intent = command::light_intent_for(kind, data)
            .map_err(|_| InterfaceError::CharacteristicWriteInvalid)?;

        let before = self.light.get_light_state();
        let after = intent.apply_to(&before);
        let response = if after == before {
            CharacteristicResponse::Unmodified
        } else {
            CharacteristicResponse::Modified
        };

        self.light
            .apply_light_intent(intent)
            .map_err(|_| InterfaceError::CharacteristicWriteInvalid)?;
        info!("bulb: wrote characteristic 0x{:04x}", char_id.0);

        Ok(response)
    }
}

/// Run the BLE stack and serve the accessory until the end of time.
pub async fn run<C, L>(controller: C, light: L, support: &mut PairStore)
where
    C: Controller,
    L: LightStateReader + LightStateChanger,
{
    let address: Address = Address::random(config::HAP.device_id);

    let mut resources: HostResources<DefaultPacketPool, CONNECTIONS_MAX, L2CAP_CHANNELS_MAX> =
        HostResources::new();

    let stack = trouble_host::new(controller, &mut resources).set_random_address(address);
    let Host {
        mut peripheral,
        runner,
        ..
    } = stack.build();

    info!("bulb: starting advertising and GATT service");
    let server = BulbServer::new_with_config(GapConfig::Peripheral(PeripheralConfig {
        name: config::DEVICE.name,
        appearance: &appearance::power_device::GENERIC_POWER_DEVICE,
    }))
    .expect("Failed to create GATT server");

    let static_information = super::accessory_information();

    let pair_ctx = {
        static STATE: StaticCell<micro_hap::AccessoryContext> = StaticCell::new();
        STATE.init_with(micro_hap::AccessoryContext::default)
    };
    pair_ctx.accessory = static_information;
    pair_ctx.info.salt = config::HAP.setup_salt;
    pair_ctx.info.verifier = config::HAP.setup_verifier;

    let out_buffer: &mut [u8] = mk_static!([u8; 2048], [0u8; 2048]);
    let in_buffer: &mut [u8] = mk_static!([u8; 1024], [0u8; 1024]);

    const TIMED_WRITE_SLOTS: usize = 8;
    const TIMED_WRITE_SLOTS_DATA: usize = 128;

    let timed_write_data = mk_static!(
        [u8; TIMED_WRITE_SLOTS * TIMED_WRITE_SLOTS_DATA],
        [0u8; TIMED_WRITE_SLOTS * TIMED_WRITE_SLOTS_DATA]
    );
    let timed_write = mk_static!(
        [Option<TimedWrite>; TIMED_WRITE_SLOTS],
        [None; TIMED_WRITE_SLOTS]
    );

    type ControlMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    const CONTROL_CHANNEL_N: usize = 16;
    let control_channel = mk_static!(
        micro_hap::HapControlChannel<ControlMutex, CONTROL_CHANNEL_N>,
        micro_hap::HapControlChannel::new()
    );
    let control_receiver = control_channel.get_receiver();

    let mut hap_context = micro_hap::ble::HapPeripheralContext::new(
        out_buffer,
        in_buffer,
        pair_ctx,
        timed_write_data,
        timed_write,
        &server.accessory_information,
        &server.protocol,
        &server.pairing,
        control_receiver,
    )
    .expect("Failed to create peripheral context");
    hap_context
        .add_service(
            server
                .lightbulb
                .populate_support()
                .expect("Failed to describe lightbulb service"),
        )
        .expect("Failed to register lightbulb service");

    hap_context.assign_static_data(&static_information);

    let mut accessory = BulbAccessory {
        name: config::DEVICE
            .name
            .try_into()
            .expect("Accessory name too long"),
        light,
    };

    join(ble_task(runner), async {
        loop {
            match hap_context
                .advertise(&mut accessory, support, &mut peripheral)
                .await
            {
                Ok(conn) => {
                    let conn = conn
                        .with_attribute_server(&server)
                        .expect("Failed to create attribute server");
                    let hap_services = server.as_hap();
                    // Run until the connection closes, then return to
                    // advertising.
                    if let Err(e) = hap_context
                        .gatt_events_task(&mut accessory, support, &hap_services, &conn)
                        .await
                    {
                        error!("bulb: error processing connection: {:?}", e);
                    }
                }
                Err(e) => {
                    panic!("[adv] error: {:?}", e);
                }
            }
        }
    })
    .await;
}
