//! The fan accessory variant: one Fan service with On and Rotation
//! Direction characteristics. The hardware side is a stand-in, writes only
//! update the cached state.

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_futures::join::join;
use log::{error, info};
use static_cell::StaticCell;
use trouble_host::prelude::*;

use micro_hap::{
    AccessoryInterface, BleProperties, CharId, Characteristic, CharacteristicProperties,
    CharacteristicResponse, DataSource, InterfaceError, IntoBytesForAccessoryInterface, Service,
    ServiceProperties, SvcId,
    ble::{FacadeDummyType, HapBleError, HapBleService, TimedWrite, sig},
    characteristic, descriptor,
    uuid::HomekitUuid16,
};

use pesca_light_core::command::{self, FanCharacteristic, FanWrite, instance};
use pesca_light_core::state::FanState;

use super::{CONNECTIONS_MAX, L2CAP_CHANNELS_MAX, ble_task};
use crate::config;
use crate::infrastructure::services::PairStore;
use crate::mk_static;

const SERVICE_ID_FAN: SvcId = SvcId(0x30);
const CHAR_ID_FAN_SIGNATURE: CharId = CharId(0x31);
const CHAR_ID_FAN_NAME: CharId = CharId(0x32);
const CHAR_ID_FAN_ON: CharId = CharId(instance::FAN_ON);
const CHAR_ID_FAN_ROTATION_DIRECTION: CharId = CharId(instance::FAN_ROTATION_DIRECTION);

const SERVICE_FAN: HomekitUuid16 = HomekitUuid16::new(0x0040);
const CHARACTERISTIC_ROTATION_DIRECTION: HomekitUuid16 = HomekitUuid16::new(0x0028); // int, 0..1, step=1

#[gatt_service(uuid = SERVICE_FAN)]
struct FanService {
    #[characteristic(uuid=characteristic::SERVICE_INSTANCE, read, value = SERVICE_ID_FAN.0)]
    service_instance: u16,

    /// Service signature, only two bytes.
    #[characteristic(uuid=characteristic::SERVICE_SIGNATURE, read, write)]
    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_FAN_SIGNATURE.0.to_le_bytes())]
    service_signature: FacadeDummyType,

    /// Name for the device.
    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_FAN_NAME.0.to_le_bytes())]
    #[characteristic(uuid=characteristic::NAME, read, write)]
    name: FacadeDummyType,

    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_FAN_ON.0.to_le_bytes())]
    #[characteristic(uuid=characteristic::ON, read, write)]
    on: FacadeDummyType,

    #[descriptor(uuid=descriptor::CHARACTERISTIC_INSTANCE_UUID, read, value=CHAR_ID_FAN_ROTATION_DIRECTION.0.to_le_bytes())]
    #[characteristic(uuid=CHARACTERISTIC_ROTATION_DIRECTION, read, write)]
    rotation_direction: FacadeDummyType,
}

impl HapBleService for FanService {
    fn populate_support(&self) -> Result<Service, HapBleError> {
        let mut service = Service {
            ble_handle: Some(self.handle),
            uuid: SERVICE_FAN.into(),
            iid: SERVICE_ID_FAN,
            characteristics: Default::default(),
            properties: ServiceProperties::new().with_primary(true),
        };

        service
            .characteristics
            .push(
                Characteristic::new(
                    characteristic::SERVICE_SIGNATURE.into(),
                    CHAR_ID_FAN_SIGNATURE,
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
                Characteristic::new(characteristic::NAME.into(), CHAR_ID_FAN_NAME)
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
                Characteristic::new(characteristic::ON.into(), CHAR_ID_FAN_ON)
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
                Characteristic::new(
                    CHARACTERISTIC_ROTATION_DIRECTION.into(),
                    CHAR_ID_FAN_ROTATION_DIRECTION,
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
                    end: micro_hap::VariableUnion::U32(1),
                    inclusive: true,
                })
                .with_step(micro_hap::VariableUnion::U32(1))
                .with_ble_properties(
                    BleProperties::from_characteristic(self.rotation_direction)
                        .with_format(sig::Format::U32),
                )
                .with_data(DataSource::AccessoryInterface),
            )
            .map_err(|_| HapBleError::AllocationOverrun)?;

        Ok(service)
    }
}

// GATT Server definition
#[gatt_server]
struct FanServer {
    accessory_information: micro_hap::ble::AccessoryInformationService,
    protocol: micro_hap::ble::ProtocolInformationService,
    pairing: micro_hap::ble::PairingService,
    fan: FanService,
}

impl FanServer<'_> {
    fn as_hap(&self) -> micro_hap::ble::HapServices<'_> {
        micro_hap::ble::HapServices {
            information: &self.accessory_information,
            protocol: &self.protocol,
            pairing: &self.pairing,
        }
    }
}

/// State for the fan accessory. The direction is atomic because reads
/// mutate it through a shared reference.
struct FanAccessory {
    name: HeaplessString<32>,
    power: bool,
    direction: AtomicU8,
}

impl AccessoryInterface for FanAccessory {
    async fn read_characteristic<'a>(
        &self,
        char_id: CharId,
        output: &'a mut [u8],
    ) -> Result<&'a [u8], InterfaceError> {
        if char_id == CHAR_ID_FAN_NAME {
            self.name.read_characteristic_into(char_id, output)
        } else if char_id == CHAR_ID_FAN_ON {
            self.power.read_characteristic_into(char_id, output)
        } else if char_id == CHAR_ID_FAN_ROTATION_DIRECTION {
            // Reads report an alternating direction, there is no real motor
            // to ask.
            let flipped = self.direction.load(Ordering::Relaxed) ^ 1;
            self.direction.store(flipped, Ordering::Relaxed);
            u32::from(flipped).read_characteristic_into(char_id, output)
        } else {
            Err(InterfaceError::CharacteristicUnknown(char_id))
        }
    }

    async fn write_characteristic(
        &mut self,
        char_id: CharId,
        data: &[u8],
    ) -> Result<CharacteristicResponse, InterfaceError> {
        let Some(kind) = FanCharacteristic::for_instance(char_id.0) else {
            return Err(InterfaceError::CharacteristicUnknown(char_id));
        };

        // Out-of-range directions are rejected here, before any state moves.
        let write = command::fan_write_for(kind, data)
            .map_err(|_| InterfaceError::CharacteristicWriteInvalid)?;

        match write {
            FanWrite::Power(on) => {
                let response = if self.power == on {
                    CharacteristicResponse::Unmodified
                } else {
                    CharacteristicResponse::Modified
                };
                self.power = on;
                info!("fan: set power to {}", on);
                Ok(response)
            }
            FanWrite::Direction(direction) => {
                let raw = direction.as_u8();
                let response = if self.direction.load(Ordering::Relaxed) == raw {
                    CharacteristicResponse::Unmodified
                } else {
                    CharacteristicResponse::Modified
                };
                self.direction.store(raw, Ordering::Relaxed);
                info!("fan: set rotation direction to {}", raw);
                Ok(response)
            }
        }
    }
}

/// Run the BLE stack and serve the accessory until the end of time.
pub async fn run<C>(controller: C, support: &mut PairStore)
where
    C: Controller,
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

    info!("fan: starting advertising and GATT service");
    let server = FanServer::new_with_config(GapConfig::Peripheral(PeripheralConfig {
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
                .fan
                .populate_support()
                .expect("Failed to describe fan service"),
        )
        .expect("Failed to register fan service");

    hap_context.assign_static_data(&static_information);

    let defaults = FanState::new();
    let mut accessory = FanAccessory {
        name: config::DEVICE
            .name
            .try_into()
            .expect("Accessory name too long"),
        power: defaults.power,
        direction: AtomicU8::new(defaults.direction.as_u8()),
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
                        error!("fan: error processing connection: {:?}", e);
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
