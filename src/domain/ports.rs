use crate::domain::{LightChangeIntent, LightState};

#[derive(Debug)]
pub enum LightError {
    /// Service processing to many requests at the same time
    Busy,
}

/// Reader interface for the light state
pub trait LightStateReader {
    /// Get the current light state
    fn get_light_state(&self) -> LightState;
}

/// Applier interface for the light intent
pub trait LightStateChanger {
    /// Apply a light change intent
    fn apply_light_intent(&self, intent: LightChangeIntent) -> Result<(), LightError>;
}

/// Trait for the light usecases state handler
pub trait LightStateHandler: LightStateReader + LightStateChanger + Sync + Send {}
