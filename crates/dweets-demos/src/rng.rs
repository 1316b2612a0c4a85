//! Seedable randomness for the demos that need it.

use rand::SeedableRng;
use rand_pcg::Pcg64;

/// The random generator owned by randomized demos.
pub type DemoRng = Pcg64;

/// Build a generator from a fixed seed, or from OS entropy when `None`.
pub fn demo_rng(seed: Option<u64>) -> DemoRng {
    match seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_rng(&mut rand::rng()),
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = demo_rng(Some(7));
        let mut b = demo_rng(Some(7));
        for _ in 0..8 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }
}
