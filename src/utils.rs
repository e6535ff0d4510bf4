// Utility functions for Nim Core

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate a unique ID (UUID v4)
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Create a deterministic RNG from a seed string
pub fn seeded_rng(seed: &str) -> ChaCha8Rng {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let bytes = hasher.finish().to_le_bytes();

    // Repeat the 8 hash bytes across the 32-byte seed
    let mut seed_array = [0u8; 32];
    for chunk in seed_array.chunks_mut(8) {
        chunk.copy_from_slice(&bytes);
    }

    ChaCha8Rng::from_seed(seed_array)
}

/// RNG for dealing a round: seeded when a seed is given, entropy otherwise
pub fn round_rng(seed: Option<&str>) -> Box<dyn rand::RngCore> {
    match seed {
        Some(seed_str) => Box::new(seeded_rng(seed_str)),
        None => Box::new(rand::thread_rng()),
    }
}

/// Uniform integer in `[min, max]`, both inclusive
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    rng.gen_range(min..=max)
}

/// Write a line to the browser console (no-op off the browser)
pub fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}
