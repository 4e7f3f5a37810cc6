//! Translation of characteristic writes into state changes.
//!
//! The transport layer resolves instance ids to these characteristic kinds
//! and hands the raw payload over. Each successful write touches exactly one
//! field.

use crate::intent::LightChangeIntent;
use crate::state::RotationDirection;
use crate::value::{self, ValueError};

/// Characteristic instance ids, shared with the GATT service definition.
pub mod instance {
    pub const LIGHTBULB_ON: u16 = 0x33;
    pub const LIGHTBULB_HUE: u16 = 0x34;
    pub const LIGHTBULB_SATURATION: u16 = 0x35;
    pub const LIGHTBULB_BRIGHTNESS: u16 = 0x36;

    pub const FAN_ON: u16 = 0x33;
    pub const FAN_ROTATION_DIRECTION: u16 = 0x34;
}

/// Writable characteristics of the light bulb service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCharacteristic {
    On,
    Brightness,
    Hue,
    Saturation,
}

impl LightCharacteristic {
    /// Resolve an instance id to a writable characteristic.
    pub const fn for_instance(iid: u16) -> Option<Self> {
        match iid {
            instance::LIGHTBULB_ON => Some(Self::On),
            instance::LIGHTBULB_HUE => Some(Self::Hue),
            instance::LIGHTBULB_SATURATION => Some(Self::Saturation),
            instance::LIGHTBULB_BRIGHTNESS => Some(Self::Brightness),
            _ => None,
        }
    }
}

/// Decode a write payload into an intent for the addressed characteristic.
#[allow(clippy::cast_possible_truncation)]
pub fn light_intent_for(
    characteristic: LightCharacteristic,
    data: &[u8],
) -> Result<LightChangeIntent, ValueError> {
    let intent = LightChangeIntent::new();
    Ok(match characteristic {
        LightCharacteristic::On => intent.with_power(value::decode_bool(data)?),
        LightCharacteristic::Brightness => {
            // Range enforcement is the protocol layer's job, clamp regardless.
            intent.with_brightness(value::decode_u32_le(data)?.min(100) as u8)
        }
        LightCharacteristic::Hue => intent.with_hue(value::decode_f32_le(data)?),
        LightCharacteristic::Saturation => intent.with_saturation(value::decode_f32_le(data)?),
    })
}

/// Writable characteristics of the fan service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanCharacteristic {
    On,
    RotationDirection,
}

impl FanCharacteristic {
    /// Resolve an instance id to a writable characteristic.
    pub const fn for_instance(iid: u16) -> Option<Self> {
        match iid {
            instance::FAN_ON => Some(Self::On),
            instance::FAN_ROTATION_DIRECTION => Some(Self::RotationDirection),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanWrite {
    Power(bool),
    Direction(RotationDirection),
}

/// Decode a fan write payload. Direction values above 1 are rejected.
pub fn fan_write_for(
    characteristic: FanCharacteristic,
    data: &[u8],
) -> Result<FanWrite, ValueError> {
    match characteristic {
        FanCharacteristic::On => Ok(FanWrite::Power(value::decode_bool(data)?)),
        FanCharacteristic::RotationDirection => {
            let raw = value::decode_u32_le(data)?;
            let direction = u8::try_from(raw)
                .ok()
                .and_then(RotationDirection::from_u8)
                .ok_or(ValueError::OutOfRange(raw))?;
            Ok(FanWrite::Direction(direction))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LightState;

    #[derive(Debug, PartialEq)]
    enum WriteFailure {
        Unknown(u16),
        Invalid,
    }

    /// Hardware stand-in recording which setter each dispatch hits,
    /// mirroring the transport glue's write path.
    #[derive(Default)]
    struct RecordingLight {
        state: LightState,
        setters: Vec<&'static str>,
    }

    impl RecordingLight {
        fn write_characteristic(&mut self, iid: u16, data: &[u8]) -> Result<(), WriteFailure> {
            let kind =
                LightCharacteristic::for_instance(iid).ok_or(WriteFailure::Unknown(iid))?;
            let intent = light_intent_for(kind, data).map_err(|_| WriteFailure::Invalid)?;
            if let Some(on) = intent.power {
                self.setters.push("set_power");
                self.state.power = on;
            }
            if let Some(brightness) = intent.brightness {
                self.setters.push("set_brightness");
                self.state.brightness = brightness;
            }
            if let Some(hue) = intent.hue {
                self.setters.push("set_hue");
                self.state.hue = hue;
            }
            if let Some(saturation) = intent.saturation {
                self.setters.push("set_saturation");
                self.state.saturation = saturation;
            }
            Ok(())
        }
    }

    #[test]
    fn each_instance_id_hits_exactly_one_setter() {
        crate::test::init();
        let mut light = RecordingLight::default();

        light
            .write_characteristic(instance::LIGHTBULB_ON, &[1])
            .unwrap();
        assert_eq!(light.setters, ["set_power"]);
        assert!(light.state.power);

        light.setters.clear();
        light
            .write_characteristic(instance::LIGHTBULB_BRIGHTNESS, &[80, 0, 0, 0])
            .unwrap();
        assert_eq!(light.setters, ["set_brightness"]);
        assert_eq!(light.state.brightness, 80);

        light.setters.clear();
        light
            .write_characteristic(instance::LIGHTBULB_HUE, &30.0_f32.to_le_bytes())
            .unwrap();
        assert_eq!(light.setters, ["set_hue"]);

        light.setters.clear();
        light
            .write_characteristic(instance::LIGHTBULB_SATURATION, &60.0_f32.to_le_bytes())
            .unwrap();
        assert_eq!(light.setters, ["set_saturation"]);
    }

    #[test]
    fn unknown_instance_id_has_no_hardware_effect() {
        crate::test::init();
        let mut light = RecordingLight::default();
        assert_eq!(
            light.write_characteristic(0x99, &[1]),
            Err(WriteFailure::Unknown(0x99))
        );
        assert!(light.setters.is_empty());
        assert_eq!(light.state, LightState::default());
    }

    #[test]
    fn invalid_payload_has_no_hardware_effect() {
        crate::test::init();
        let mut light = RecordingLight::default();
        assert_eq!(
            light.write_characteristic(instance::LIGHTBULB_HUE, &[1, 2]),
            Err(WriteFailure::Invalid)
        );
        assert!(light.setters.is_empty());
        assert_eq!(light.state, LightState::default());
    }

    #[test]
    fn fan_instance_resolution() {
        crate::test::init();
        assert_eq!(
            FanCharacteristic::for_instance(instance::FAN_ON),
            Some(FanCharacteristic::On)
        );
        assert_eq!(
            FanCharacteristic::for_instance(instance::FAN_ROTATION_DIRECTION),
            Some(FanCharacteristic::RotationDirection)
        );
        assert_eq!(FanCharacteristic::for_instance(0x99), None);
    }

    #[test]
    fn on_write_sets_only_power() {
        crate::test::init();
        let intent = light_intent_for(LightCharacteristic::On, &[1]).unwrap();
        assert_eq!(intent.power, Some(true));
        assert_eq!(intent.brightness, None);
        assert_eq!(intent.hue, None);
        assert_eq!(intent.saturation, None);
    }

    #[test]
    fn brightness_write_sets_only_brightness() {
        crate::test::init();
        let intent = light_intent_for(LightCharacteristic::Brightness, &[75, 0, 0, 0]).unwrap();
        assert_eq!(intent.brightness, Some(75));
        assert_eq!(intent.power, None);
        assert_eq!(intent.hue, None);
        assert_eq!(intent.saturation, None);
    }

    #[test]
    fn brightness_clamps_to_percent() {
        crate::test::init();
        let intent = light_intent_for(LightCharacteristic::Brightness, &[200, 0, 0, 0]).unwrap();
        assert_eq!(intent.brightness, Some(100));
    }

    #[test]
    fn hue_and_saturation_are_f32() {
        crate::test::init();
        let intent =
            light_intent_for(LightCharacteristic::Hue, &240.0_f32.to_le_bytes()).unwrap();
        assert_eq!(intent.hue, Some(240.0));
        assert_eq!(intent.power, None);

        let intent =
            light_intent_for(LightCharacteristic::Saturation, &25.0_f32.to_le_bytes()).unwrap();
        assert_eq!(intent.saturation, Some(25.0));
        assert_eq!(intent.hue, None);
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        crate::test::init();
        assert!(light_intent_for(LightCharacteristic::On, &[]).is_err());
        assert!(light_intent_for(LightCharacteristic::Brightness, &[75]).is_err());
        assert!(light_intent_for(LightCharacteristic::Hue, &[0, 0]).is_err());
    }

    #[test]
    fn fan_direction_accepts_zero_and_one() {
        crate::test::init();
        assert_eq!(
            fan_write_for(FanCharacteristic::RotationDirection, &[0, 0, 0, 0]),
            Ok(FanWrite::Direction(RotationDirection::Clockwise))
        );
        assert_eq!(
            fan_write_for(FanCharacteristic::RotationDirection, &[1, 0, 0, 0]),
            Ok(FanWrite::Direction(RotationDirection::CounterClockwise))
        );
    }

    #[test]
    fn fan_direction_rejects_values_above_one() {
        crate::test::init();
        assert_eq!(
            fan_write_for(FanCharacteristic::RotationDirection, &[2, 0, 0, 0]),
            Err(ValueError::OutOfRange(2))
        );
        assert_eq!(
            fan_write_for(FanCharacteristic::RotationDirection, &[0, 1, 0, 0]),
            Err(ValueError::OutOfRange(256))
        );
    }

    #[test]
    fn fan_on_write() {
        crate::test::init();
        assert_eq!(
            fan_write_for(FanCharacteristic::On, &[1]),
            Ok(FanWrite::Power(true))
        );
        assert!(fan_write_for(FanCharacteristic::On, &[]).is_err());
    }
}
