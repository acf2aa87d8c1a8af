//! Random source shared by every combat instance.
//!
//! Each encounter owns its own seeded generator; nothing in the engine
//! draws from a process-wide source.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator every engine crate is tested against.
pub type CombatRng = ChaCha8Rng;

/// Build a generator for one combat instance. Same seed = same combat.
pub fn seeded(seed: u64) -> CombatRng {
    ChaCha8Rng::seed_from_u64(seed)
}
