/// Rotation direction of the fan variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub const fn as_u8(self) -> u8 {
        match self {
            RotationDirection::Clockwise => 0,
            RotationDirection::CounterClockwise => 1,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(RotationDirection::Clockwise),
            1 => Some(RotationDirection::CounterClockwise),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Represents the light state.
#[derive(Debug, Clone, PartialEq)]
pub struct LightState {
    pub power: bool,
    /// Brightness in percent (0-100)
    pub brightness: u8,
    /// Hue in degrees (0-360)
    pub hue: f32,
    /// Saturation in percent (0-100)
    pub saturation: f32,
}

impl LightState {
    /// Power-on defaults. The bulb starts switched on.
    pub const fn new() -> Self {
        Self {
            power: true,
            brightness: 50,
            hue: 180.0,
            saturation: 100.0,
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

/// Represents the fan state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanState {
    pub power: bool,
    pub direction: RotationDirection,
}

impl FanState {
    pub const fn new() -> Self {
        Self {
            power: false,
            direction: RotationDirection::Clockwise,
        }
    }
}

impl Default for FanState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_direction_raw_values() {
        crate::test::init();
        assert_eq!(RotationDirection::from_u8(0), Some(RotationDirection::Clockwise));
        assert_eq!(
            RotationDirection::from_u8(1),
            Some(RotationDirection::CounterClockwise)
        );
        assert_eq!(RotationDirection::from_u8(2), None);
        assert_eq!(RotationDirection::from_u8(255), None);

        assert_eq!(RotationDirection::Clockwise.as_u8(), 0);
        assert_eq!(RotationDirection::CounterClockwise.as_u8(), 1);
    }

    #[test]
    fn rotation_direction_toggles() {
        crate::test::init();
        let d = RotationDirection::Clockwise;
        assert_eq!(d.toggled(), RotationDirection::CounterClockwise);
        assert_eq!(d.toggled().toggled(), d);
    }

    #[test]
    fn light_state_defaults() {
        crate::test::init();
        let state = LightState::new();
        assert!(state.power);
        assert_eq!(state.brightness, 50);
        assert_eq!(state.hue, 180.0);
        assert_eq!(state.saturation, 100.0);
    }
}
