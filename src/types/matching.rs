//! Solver output: resident assignments plus per-hospital rosters.
//!
//! The two views are redundant and kept consistent: resident `r` is assigned
//! to `h` iff `h`'s roster contains `r`. Rosters are ordered from most to
//! least preferred by their hospital.

use sha2::{Digest, Sha256};

use crate::error::{HrError, Result};
use crate::types::{HospitalId, Instance, ResidentId};

/// A many-to-one matching of residents to hospitals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    /// Resident -> hospital, `None` when unmatched
    assignments: Vec<Option<HospitalId>>,

    /// Hospital -> admitted residents, best-ranked first
    rosters: Vec<Vec<ResidentId>>,
}

impl Matching {
    /// Assemble a matching from rosters already ordered by hospital rank.
    ///
    /// The solver is the only caller; it guarantees consistency.
    pub(crate) fn from_rosters(num_residents: usize, rosters: Vec<Vec<ResidentId>>) -> Self {
        let mut assignments = vec![None; num_residents];
        for (h, roster) in rosters.iter().enumerate() {
            for &r in roster {
                assignments[r] = Some(h);
            }
        }
        Self { assignments, rosters }
    }

    /// Build a matching from an arbitrary assignment vector.
    ///
    /// Rosters are derived and ordered by each hospital's rank table. Useful
    /// for checking externally produced matchings with [`Matching::is_stable`].
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on a length mismatch, an unknown hospital id, or a
    /// hospital assigned more residents than its capacity.
    pub fn from_assignments(
        instance: &Instance,
        assignments: Vec<Option<HospitalId>>,
    ) -> Result<Self> {
        if assignments.len() != instance.num_residents() {
            return Err(HrError::invalid_argument(format!(
                "expected {} assignments, got {}",
                instance.num_residents(),
                assignments.len()
            )));
        }

        let mut rosters = vec![Vec::new(); instance.num_hospitals()];
        for (r, assigned) in assignments.iter().enumerate() {
            if let Some(h) = *assigned {
                let roster = rosters.get_mut(h).ok_or_else(|| {
                    HrError::invalid_argument(format!("resident {r} assigned to unknown hospital {h}"))
                })?;
                roster.push(r);
            }
        }

        for (h, roster) in rosters.iter_mut().enumerate() {
            if roster.len() > instance.capacity(h) {
                return Err(HrError::invalid_argument(format!(
                    "hospital {h} holds {} residents but has capacity {}",
                    roster.len(),
                    instance.capacity(h)
                )));
            }
            let ranks = instance.rank_row(h);
            roster.sort_unstable_by_key(|&r| ranks[r]);
        }

        Ok(Self { assignments, rosters })
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Hospital assigned to resident `r`, if any
    #[inline]
    pub fn hospital_of(&self, r: ResidentId) -> Option<HospitalId> {
        self.assignments[r]
    }

    /// Residents admitted to hospital `h`, best-ranked first
    #[inline]
    pub fn roster(&self, h: HospitalId) -> &[ResidentId] {
        &self.rosters[h]
    }

    pub fn assignments(&self) -> &[Option<HospitalId>] {
        &self.assignments
    }

    pub fn rosters(&self) -> &[Vec<ResidentId>] {
        &self.rosters
    }

    pub fn num_residents(&self) -> usize {
        self.assignments.len()
    }

    pub fn num_hospitals(&self) -> usize {
        self.rosters.len()
    }

    pub fn matched_count(&self) -> usize {
        self.rosters.iter().map(Vec::len).sum()
    }

    pub fn unmatched_count(&self) -> usize {
        self.num_residents() - self.matched_count()
    }

    pub fn unmatched_residents(&self) -> impl Iterator<Item = ResidentId> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(r, h)| h.is_none().then_some(r))
    }

    /// Assignments as plain integers with `-1` for unmatched residents.
    ///
    /// ```
    /// use hospital_resident::{solve, Instance};
    ///
    /// let instance = Instance::new(vec![vec![0], vec![0]], vec![vec![1, 0]])
    ///     .unwrap()
    ///     .with_capacities(Some(1))
    ///     .unwrap();
    /// assert_eq!(solve(&instance).to_sentinel_vec(), vec![-1, 0]);
    /// ```
    pub fn to_sentinel_vec(&self) -> Vec<i64> {
        self.assignments
            .iter()
            .map(|h| h.map_or(-1, |h| h as i64))
            .collect()
    }

    // ========================================================================
    // Stability
    // ========================================================================

    /// All resident/hospital pairs that block this matching.
    ///
    /// `(r, h)` blocks if `r` ranks `h` above its assignment (or is unmatched
    /// and ranks `h` at all) and `h` has a free seat or admits a resident it
    /// ranks below `r`. Checked directly from the instance, independently of
    /// how the matching was produced.
    pub fn blocking_pairs(&self, instance: &Instance) -> Vec<(ResidentId, HospitalId)> {
        let mut pairs = Vec::new();

        for r in 0..instance.num_residents() {
            let assigned = self.assignments[r];
            for &h in instance.resident_preferences(r) {
                if Some(h) == assigned {
                    break;
                }
                let roster = &self.rosters[h];
                let has_room = roster.len() < instance.capacity(h);
                let displaces_worst = roster
                    .last()
                    .is_some_and(|&worst| instance.prefers(h, r, worst));
                if has_room || displaces_worst {
                    pairs.push((r, h));
                }
            }
        }

        pairs
    }

    /// True if no blocking pair exists
    pub fn is_stable(&self, instance: &Instance) -> bool {
        self.blocking_pairs(instance).is_empty()
    }

    // ========================================================================
    // Digest
    // ========================================================================

    /// SHA-256 over the assignment vector (little-endian `i64`, `-1` unmatched).
    ///
    /// Identical matchings always hash identically; used to compare runs.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.assignments.len() as u64).to_le_bytes());
        for value in self.to_sentinel_vec() {
            hasher.update(value.to_le_bytes());
        }
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Digest as a hex string
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
