//! Random instance generation.
//!
//! ## Stream Layout
//!
//! One seeded ChaCha8 stream produces, in order:
//!
//! 1. one uniformly random permutation of hospital ids per resident
//! 2. one uniformly random permutation of resident ids per hospital
//!
//! Capacities default to `ceil(num_residents / num_hospitals)`.
//!
//! The same seed always yields the same instance with this crate. Other
//! implementations using a different PRNG will produce different
//! permutations for the same seed.
//!
//! ## Seeds
//!
//! [`generate`] takes an optional seed; without one a seed is drawn from
//! system entropy, logged, and stored on the instance ([`Instance::seed`]).
//! [`RandomInstanceGenerator`] derives a sequence of per-instance seeds from
//! a master seed, for sweeps that need many independent instances.
//!
//! ## Example
//!
//! ```
//! use hospital_resident::generator::generate;
//!
//! let a = generate(12, 4, Some(42)).unwrap();
//! let b = generate(12, 4, Some(42)).unwrap();
//!
//! assert_eq!(a, b);
//! assert_eq!(a.seed(), Some(42));
//! assert_eq!(a.capacities(), &[3, 3, 3, 3]);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::error::{HrError, Result};
use crate::types::Instance;

/// Generate a random instance from a seed (or from entropy if `None`).
///
/// # Errors
///
/// `InvalidArgument` if either count is zero.
pub fn generate(num_residents: usize, num_hospitals: usize, seed: Option<u64>) -> Result<Instance> {
    let seed = match seed {
        Some(seed) => seed,
        None => {
            let seed = entropy_seed();
            info!(seed, "drew instance seed from system entropy");
            seed
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let instance = generate_with_rng(&mut rng, num_residents, num_hospitals)?;
    info!(seed, num_residents, num_hospitals, "generated instance");
    Ok(instance.with_seed(seed))
}

/// Generate a random instance by drawing from a caller-owned RNG.
///
/// The instance carries no seed; callers that know it can attach it with
/// [`Instance::with_seed`].
pub fn generate_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    num_residents: usize,
    num_hospitals: usize,
) -> Result<Instance> {
    if num_residents == 0 {
        return Err(HrError::invalid_argument("number of residents must be positive"));
    }
    if num_hospitals == 0 {
        return Err(HrError::invalid_argument("number of hospitals must be positive"));
    }

    let resident_prefs = (0..num_residents)
        .map(|_| random_permutation(rng, num_hospitals))
        .collect();
    let hospital_prefs = (0..num_hospitals)
        .map(|_| random_permutation(rng, num_residents))
        .collect();

    Instance::new(resident_prefs, hospital_prefs)
}

fn random_permutation<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..len).collect();
    perm.shuffle(rng);
    perm
}

fn entropy_seed() -> u64 {
    rand::thread_rng().next_u64()
}

// ============================================================================
// Seed sequence
// ============================================================================

/// Produces a reproducible sequence of independent instances.
///
/// Each instance gets its own seed, drawn from a master stream; any single
/// instance can later be regenerated from its seed alone with [`generate`].
///
/// ```
/// use hospital_resident::generator::{generate, RandomInstanceGenerator};
///
/// let mut seeds = RandomInstanceGenerator::new(Some(1));
/// let first = seeds.next_instance(20, 5).unwrap();
///
/// let again = generate(20, 5, first.seed()).unwrap();
/// assert_eq!(first, again);
/// ```
#[derive(Debug, Clone)]
pub struct RandomInstanceGenerator {
    master_seed: u64,
    rng: ChaCha8Rng,
}

impl RandomInstanceGenerator {
    /// Create a generator from a master seed (or from entropy if `None`)
    pub fn new(master_seed: Option<u64>) -> Self {
        let master_seed = master_seed.unwrap_or_else(|| {
            let seed = entropy_seed();
            info!(seed, "drew master seed from system entropy");
            seed
        });
        Self {
            master_seed,
            rng: ChaCha8Rng::seed_from_u64(master_seed),
        }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Next per-instance seed from the master stream
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Generate the next instance of the sequence
    pub fn next_instance(&mut self, num_residents: usize, num_hospitals: usize) -> Result<Instance> {
        let seed = self.next_seed();
        debug!(master_seed = self.master_seed, seed, "next instance");
        generate(num_residents, num_hospitals, Some(seed))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
