use blake2::{digest::consts::U32, Blake2b, Digest};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

type Blake2b256 = Blake2b<U32>;

/// Turn any string into a 32 byte seed, so people can pass seeds like "advent-2025" on the command line.
pub fn hash_str(input: &str) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(input.as_bytes());
    let seed = hasher.finalize();
    seed.into()
}

/// The random source for one run: reproducible when a seed string is given, otherwise seeded from system
/// entropy once.
pub fn rng_from_seed(seed: Option<&str>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::from_seed(hash_str(seed)),
        None => ChaCha20Rng::from_entropy(),
    }
}
