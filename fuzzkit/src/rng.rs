//! Raw randomness source and RNG construction.
//!
//! Every fuzzer bottoms out in [`unit`]: one uniformly distributed `f64` in
//! `[0, 1)` drawn from a [`rand::RngCore`]. Primitives call it once per draw
//! they document; combinators never call it themselves.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Draw one raw sample, uniform in the half-open interval `[0, 1)`.
pub(crate) fn unit(rng: &mut dyn rand::RngCore) -> f64 {
    use rand::Rng;
    rng.r#gen::<f64>()
}

/// Create an RNG seeded from OS entropy.
///
/// The harness uses a fresh one of these per batched test body and per
/// explained registration, so no two tests share a stream.
pub(crate) fn create_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Create a deterministic RNG for the given seed. Only in-crate tests use
/// this; the harness never records or replays seeds.
#[cfg(test)]
pub(crate) fn create_seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
