use esp_hal::rng::Rng;

/// Seed for the session CSPRNG from the hardware RNG.
pub fn get_prng_key() -> [u8; 32] {
    let rng = Rng::new();
    let mut key = [0u8; 32];
    for chunk in key.chunks_exact_mut(4) {
        chunk.copy_from_slice(&rng.random().to_le_bytes());
    }
    key
}
