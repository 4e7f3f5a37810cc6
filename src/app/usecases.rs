use crate::domain::{
    LightChangeIntent, LightState,
    ports::{LightError, LightStateChanger, LightStateHandler, LightStateReader},
};

/// Usecases over the light state handler.
///
/// The protocol glue talks to this instead of the state service directly,
/// keeping the transport unaware of how state is stored.
pub struct LightUsecases<S: LightStateHandler> {
    state: S,
}

impl<S: LightStateHandler> LightUsecases<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }
}

impl<S: LightStateHandler> LightStateChanger for LightUsecases<S> {
    fn apply_light_intent(&self, intent: LightChangeIntent) -> Result<(), LightError> {
        self.state.apply_light_intent(intent)?;
        Ok(())
    }
}

impl<S: LightStateHandler> LightStateReader for LightUsecases<S> {
    fn get_light_state(&self) -> LightState {
        self.state.get_light_state()
    }
}

impl<S: LightStateHandler> LightStateHandler for LightUsecases<S> {}
