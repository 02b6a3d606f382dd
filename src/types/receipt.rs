//! Solve receipt: a summary of one deferred-acceptance run.
//!
//! A receipt is the per-run record an outer simulation sweep aggregates
//! (unmatched counts per capacity / preference-length setting). The
//! `matching_root` is the digest of the resulting matching, so two receipts
//! with equal roots describe identical matchings.

use serde::{Deserialize, Serialize};

use crate::types::{Instance, Matching};

/// Summary statistics of a single solve.
///
/// ## Example
///
/// ```
/// use hospital_resident::{DeferredAcceptance, Instance};
///
/// let instance = Instance::new(vec![vec![0], vec![0]], vec![vec![1, 0]])
///     .unwrap()
///     .with_capacities(Some(1))
///     .unwrap();
/// let (_, receipt) = DeferredAcceptance::new().solve_with_receipt(&instance);
///
/// assert_eq!(receipt.matched, 1);
/// assert_eq!(receipt.unmatched, 1);
/// assert_eq!(receipt.proposals, 2);
/// assert_eq!(receipt.evictions, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolveReceipt {
    /// Seed of the solved instance, if it was generated
    pub seed: Option<u64>,

    pub num_residents: u64,
    pub num_hospitals: u64,

    /// Sum of all hospital capacities
    pub total_seats: u64,

    /// Residents holding a seat at the end
    pub matched: u64,

    /// Residents whose preference list ran out
    pub unmatched: u64,

    /// Applications made (one per resident/hospital pair at most)
    pub proposals: u64,

    /// Residents displaced from a full roster
    pub evictions: u64,

    /// SHA-256 digest of the matching (32 bytes)
    pub matching_root: [u8; 32],
}

impl SolveReceipt {
    /// Create a receipt from a solved instance and run counters
    pub fn new(instance: &Instance, matching: &Matching, proposals: u64, evictions: u64) -> Self {
        Self {
            seed: instance.seed(),
            num_residents: instance.num_residents() as u64,
            num_hospitals: instance.num_hospitals() as u64,
            total_seats: instance.total_seats() as u64,
            matched: matching.matched_count() as u64,
            unmatched: matching.unmatched_count() as u64,
            proposals,
            evictions,
            matching_root: matching.digest(),
        }
    }

    /// Get the matching root as a hex string
    pub fn matching_root_hex(&self) -> String {
        hex::encode(self.matching_root)
    }

    /// Fraction of residents that ended up matched.
    ///
    /// Returns None if there are no residents.
    pub fn match_rate(&self) -> Option<f64> {
        if self.num_residents == 0 {
            None
        } else {
            Some(self.matched as f64 / self.num_residents as f64)
        }
    }

    /// True if every resident holds a seat
    pub fn is_complete(&self) -> bool {
        self.unmatched == 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
