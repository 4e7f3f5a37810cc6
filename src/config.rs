pub(crate) const BUILD_VERSION: &str = env!("BUILD_VERSION");

pub(crate) struct DeviceConfig {
    pub manufacturer: &'static str,
    pub name: &'static str,
    pub model: &'static str,
    pub serial_number: &'static str,
    pub hardware_revision: &'static str,
    /// HAP accessory category (5 = lighting, 3 = fan)
    pub category: u16,
}

pub(crate) struct HapConfig {
    /// Device id, doubles as the random BLE address.
    pub device_id: [u8; 6],
    pub setup_id: [u8; 4],
    /// SRP salt for the setup code.
    pub setup_salt: [u8; 16],
    /// SRP verifier for the setup code.
    pub setup_verifier: [u8; 384],
}

pub(crate) struct LightConfig {
    pub led_count: usize,
}

pub(crate) const DEVICE_MANUFACTURER: &str = "PescaDev";

#[cfg(not(feature = "fan"))]
pub(crate) const DEVICE: DeviceConfig = DeviceConfig {
    manufacturer: DEVICE_MANUFACTURER,
    name: "PescaLight",
    model: "PescaLight",
    serial_number: "1337",
    hardware_revision: "1.0",
    category: 5,
};
#[cfg(feature = "fan")]
pub(crate) const DEVICE: DeviceConfig = DeviceConfig {
    manufacturer: DEVICE_MANUFACTURER,
    name: "PescaFan",
    model: "PescaFan",
    serial_number: "1337",
    hardware_revision: "1.0",
    category: 3,
};

// The salt and verifier below belong to the fixed test setup code
// `111-22-333`. Commissioning with a per-device code would replace these.
pub(crate) const HAP: HapConfig = HapConfig {
    device_id: [0xfa, 0x2c, 0x51, 0x10, 0xe4, 0x01],
    setup_id: *b"ES32",
    setup_salt: [
        0xb3, 0x5b, 0x84, 0xc4, 0x04, 0x8b, 0x2d, 0x91, 0x35, 0xc4, 0xaf, 0xa3, 0x6d, 0xf6, 0x2b,
        0x29,
    ],
    setup_verifier: [
        0x84, 0x3e, 0x54, 0xd4, 0x61, 0xd8, 0xbd, 0xee, 0x78, 0xcf, 0x96, 0xb3, 0x30, 0x85, 0x4c,
        0xba, 0x90, 0x89, 0xb6, 0x8a, 0x10, 0x7c, 0x51, 0xd6, 0xde, 0x2f, 0xc3, 0xe2, 0x9e, 0xdb,
        0x55, 0xd0, 0xe1, 0xa3, 0xc3, 0x80, 0x6a, 0x1c, 0xae, 0xa3, 0x4d, 0x8b, 0xbe, 0xae, 0x91,
        0x51, 0xe1, 0x78, 0xf6, 0x48, 0x9e, 0xa5, 0x09, 0x73, 0x91, 0xcd, 0xc4, 0xae, 0x12, 0xad,
        0x09, 0x04, 0xdf, 0x44, 0x6d, 0xbe, 0x10, 0x15, 0x58, 0x02, 0xb2, 0x1e, 0x9e, 0xff, 0xfe,
        0xa4, 0x91, 0xf4, 0xb7, 0xa6, 0xb5, 0x12, 0xaa, 0x04, 0xbc, 0xff, 0xe1, 0x86, 0xeb, 0x27,
        0x6a, 0xef, 0xe5, 0xc3, 0x9f, 0x18, 0x6f, 0xe3, 0x53, 0xc7, 0x56, 0x2b, 0x58, 0x4a, 0xa9,
        0x16, 0x12, 0x79, 0x04, 0x81, 0x22, 0x2f, 0xb8, 0xf1, 0xce, 0xb0, 0xb9, 0xda, 0x6b, 0x0e,
        0x39, 0x24, 0xcc, 0xf2, 0x1d, 0xf3, 0xfc, 0x47, 0x58, 0xce, 0x16, 0xd4, 0x08, 0xfe, 0x9d,
        0x77, 0x20, 0xa3, 0x43, 0x3a, 0x45, 0xb0, 0xd4, 0xfb, 0xab, 0x3b, 0xad, 0x36, 0x13, 0xe0,
        0xb3, 0xc2, 0x2a, 0x6a, 0x22, 0x5a, 0xc3, 0xd6, 0xdc, 0x49, 0x41, 0x0c, 0xd6, 0x48, 0x26,
        0x8d, 0x07, 0xe8, 0x57, 0x84, 0xa9, 0xda, 0xb0, 0xe0, 0x54, 0xed, 0x59, 0xe9, 0xcf, 0x03,
        0x26, 0x1f, 0x46, 0x3a, 0x41, 0x01, 0xa9, 0xf8, 0x44, 0x60, 0xc3, 0x5d, 0x9c, 0xb4, 0x66,
        0x42, 0xe7, 0x9f, 0x98, 0x7c, 0xbb, 0x0f, 0x08, 0x7e, 0x36, 0x04, 0x12, 0xcc, 0x7b, 0x4f,
        0x05, 0x44, 0x3b, 0xdd, 0x35, 0x3d, 0x44, 0x2a, 0x47, 0x1d, 0xe0, 0x3e, 0x03, 0xe2, 0x51,
        0xeb, 0x12, 0x96, 0xad, 0x08, 0x46, 0x07, 0xfd, 0xc4, 0x94, 0x9f, 0xc2, 0x59, 0x9d, 0x0f,
        0x79, 0x93, 0x51, 0x0b, 0xb5, 0xe8, 0xfd, 0xbc, 0xd4, 0x5a, 0xcf, 0xf0, 0x08, 0xf7, 0xd6,
        0x44, 0x6a, 0x63, 0x86, 0x88, 0x56, 0x13, 0xcf, 0x5c, 0x51, 0x68, 0xfb, 0xa9, 0xb7, 0x63,
        0x6a, 0xce, 0x64, 0xe1, 0xe1, 0x5a, 0x55, 0xea, 0xb1, 0x0c, 0x0a, 0x82, 0xe9, 0x23, 0x61,
        0x2f, 0x0d, 0xa9, 0x09, 0xb3, 0x48, 0xd4, 0xcf, 0x19, 0x53, 0x81, 0x38, 0x5d, 0x74, 0x4d,
        0xf8, 0x9d, 0x66, 0xaf, 0x52, 0xaf, 0xab, 0xef, 0x22, 0xce, 0x6f, 0xbe, 0xbe, 0xa1, 0x40,
        0x44, 0xd0, 0x01, 0xef, 0x9e, 0x8e, 0xed, 0xd7, 0x99, 0xa0, 0x1f, 0x6f, 0x89, 0x48, 0x98,
        0xa7, 0x61, 0x01, 0x18, 0x77, 0x58, 0x82, 0xfe, 0x5f, 0x8f, 0x5e, 0xf6, 0xf3, 0x25, 0xb0,
        0xda, 0xd2, 0xbf, 0xb0, 0x9e, 0x08, 0x3b, 0x6b, 0x07, 0xff, 0x54, 0x0d, 0xc7, 0x45, 0xcf,
        0x75, 0x51, 0x16, 0x5d, 0x08, 0xe0, 0xea, 0x98, 0xc8, 0xd7, 0xab, 0x21, 0x4a, 0x08, 0x17,
        0xd0, 0x97, 0x13, 0x49, 0xd7, 0xe7, 0xbe, 0xf1, 0x8f,
    ],
};

pub(crate) const LIGHT: LightConfig = LightConfig { led_count: 6 };

#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO25
    };
}
