use crate::state::LightState;

/// Represents a request to change part of the light state.
///
/// Fields left as `None` keep their current value. Characteristic writes
/// arrive one value at a time, so most intents carry a single field.
#[derive(Debug, Clone, Default)]
pub struct LightChangeIntent {
    pub power: Option<bool>,
    /// Set brightness to this value (0-100)
    pub brightness: Option<u8>,
    /// Set hue to this value (0-360)
    pub hue: Option<f32>,
    /// Set saturation to this value (0-100)
    pub saturation: Option<f32>,
}

impl LightChangeIntent {
    /// Create a new empty intent (no changes)
    pub const fn new() -> Self {
        Self {
            power: None,
            brightness: None,
            hue: None,
            saturation: None,
        }
    }

    #[must_use]
    pub const fn with_power(mut self, on: bool) -> Self {
        self.power = Some(on);
        self
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    #[must_use]
    pub const fn with_hue(mut self, hue: f32) -> Self {
        self.hue = Some(hue);
        self
    }

    #[must_use]
    pub const fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = Some(saturation);
        self
    }

    /// Apply this intent on top of an existing state.
    pub fn apply_to(&self, state: &LightState) -> LightState {
        LightState {
            power: self.power.unwrap_or(state.power),
            brightness: self.brightness.unwrap_or(state.brightness),
            hue: self.hue.unwrap_or(state.hue),
            saturation: self.saturation.unwrap_or(state.saturation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_intent_keeps_state() {
        crate::test::init();
        let state = LightState {
            power: true,
            brightness: 42,
            hue: 10.0,
            saturation: 90.0,
        };
        assert_eq!(LightChangeIntent::new().apply_to(&state), state);
    }

    #[test]
    fn partial_update_leaves_other_fields() {
        crate::test::init();
        let state = LightState {
            power: true,
            brightness: 42,
            hue: 10.0,
            saturation: 90.0,
        };

        let next = LightChangeIntent::new().with_hue(300.0).apply_to(&state);
        assert_eq!(next.hue, 300.0);
        assert!(next.power);
        assert_eq!(next.brightness, 42);
        assert_eq!(next.saturation, 90.0);

        let next = LightChangeIntent::new().with_power(false).apply_to(&next);
        assert!(!next.power);
        assert_eq!(next.hue, 300.0);
    }

    #[test]
    fn combined_update_applies_all_fields() {
        crate::test::init();
        let next = LightChangeIntent::new()
            .with_power(true)
            .with_brightness(100)
            .with_saturation(0.0)
            .apply_to(&LightState::new());
        assert!(next.power);
        assert_eq!(next.brightness, 100);
        assert_eq!(next.saturation, 0.0);
        assert_eq!(next.hue, LightState::new().hue);
    }
}
