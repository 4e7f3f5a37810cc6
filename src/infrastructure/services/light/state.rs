use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::domain::LightState;

/// Atomic light state
/// Uses atomics for lock-free thread-safe access.
/// Hue and saturation are stored as their f32 bit patterns.
#[derive(Debug)]
pub(super) struct AtomicLightState {
    power: AtomicU8,
    brightness: AtomicU8,
    hue: AtomicU32,
    saturation: AtomicU32,
}

impl AtomicLightState {
    pub(super) const fn from_state(state: &LightState) -> Self {
        Self {
            power: AtomicU8::new(if state.power { 1 } else { 0 }),
            brightness: AtomicU8::new(state.brightness),
            hue: AtomicU32::new(state.hue.to_bits()),
            saturation: AtomicU32::new(state.saturation.to_bits()),
        }
    }

    pub(super) fn get(&self) -> LightState {
        LightState {
            power: self.power.load(Ordering::Relaxed) != 0,
            brightness: self.brightness.load(Ordering::Relaxed),
            hue: f32::from_bits(self.hue.load(Ordering::Relaxed)),
            saturation: f32::from_bits(self.saturation.load(Ordering::Relaxed)),
        }
    }

    pub(super) fn set(&self, state: &LightState) {
        self.power.store(u8::from(state.power), Ordering::Relaxed);
        self.brightness.store(state.brightness, Ordering::Relaxed);
        self.hue.store(state.hue.to_bits(), Ordering::Relaxed);
        self.saturation
            .store(state.saturation.to_bits(), Ordering::Relaxed);
    }
}
