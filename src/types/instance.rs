//! The Hospital/Resident instance model.
//!
//! ## Invariants
//!
//! An [`Instance`] is validated once, at construction, and every mutator
//! preserves the invariants:
//!
//! - every resident preference list holds distinct hospital ids in range
//! - every hospital preference list is a permutation of all resident ids
//! - every capacity is at least 1
//!
//! ## Rank Table
//!
//! Hospital preferences never change after construction, so the rank table
//! (hospital, resident) -> position is built once and cached. It is a flat
//! `num_hospitals * num_residents` vector; this quadratic term is the
//! dominant memory cost of the model.

use std::fmt;

use crate::error::{HrError, Result};
use crate::types::{HospitalId, InstanceExport, ResidentId};

/// Uniform default capacity: `ceil(num_residents / num_hospitals)`, at least 1.
///
/// # Errors
///
/// `InvalidArgument` if `num_hospitals` is zero.
///
/// # Example
///
/// ```
/// use hospital_resident::types::default_capacity;
///
/// assert_eq!(default_capacity(12, 4).unwrap(), 3);
/// assert_eq!(default_capacity(13, 4).unwrap(), 4);
/// assert!(default_capacity(12, 0).is_err());
/// ```
pub fn default_capacity(num_residents: usize, num_hospitals: usize) -> Result<usize> {
    if num_hospitals == 0 {
        return Err(HrError::invalid_argument(
            "cannot derive a capacity for zero hospitals",
        ));
    }
    Ok(num_residents.div_ceil(num_hospitals).max(1))
}

/// A Hospital/Resident instance: preferences on both sides plus capacities.
///
/// ## Example
///
/// ```
/// use hospital_resident::Instance;
///
/// let instance = Instance::new(
///     vec![vec![0, 1], vec![1], vec![1, 0]],
///     vec![vec![2, 0, 1], vec![0, 1, 2]],
/// ).unwrap();
///
/// assert_eq!(instance.num_residents(), 3);
/// assert_eq!(instance.capacity(0), 2);
/// assert!(instance.prefers(0, 2, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Resident -> hospitals, most preferred first (may be truncated)
    resident_prefs: Vec<Vec<HospitalId>>,

    /// Hospital -> all residents, most preferred first
    hospital_prefs: Vec<Vec<ResidentId>>,

    /// Seat count per hospital
    capacities: Vec<usize>,

    /// Flat rank table, indexed by `hospital * num_residents + resident`
    ranks: Vec<usize>,

    /// Seed the instance was generated from, if any
    seed: Option<u64>,
}

impl Instance {
    /// Build a validated instance with uniform default capacities.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if there are no residents or no hospitals
    /// - `InvalidInstance` if a preference list breaks the invariants
    pub fn new(
        resident_prefs: Vec<Vec<HospitalId>>,
        hospital_prefs: Vec<Vec<ResidentId>>,
    ) -> Result<Self> {
        let num_residents = resident_prefs.len();
        let num_hospitals = hospital_prefs.len();

        if num_residents == 0 {
            return Err(HrError::invalid_argument("an instance needs at least one resident"));
        }
        if num_hospitals == 0 {
            return Err(HrError::invalid_argument("an instance needs at least one hospital"));
        }

        for (r, prefs) in resident_prefs.iter().enumerate() {
            validate_resident_preferences(r, prefs, num_hospitals)?;
        }
        let ranks = build_rank_table(&hospital_prefs, num_residents)?;

        let capacity = default_capacity(num_residents, num_hospitals)?;
        Ok(Self {
            resident_prefs,
            hospital_prefs,
            capacities: vec![capacity; num_hospitals],
            ranks,
            seed: None,
        })
    }

    /// Attach the seed this instance was generated from.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder form of [`Instance::set_capacities`].
    pub fn with_capacities(mut self, value: Option<usize>) -> Result<Self> {
        self.set_capacities(value)?;
        Ok(self)
    }

    /// Builder form of [`Instance::truncate_resident_preferences`].
    pub fn with_preference_limit(mut self, k: usize) -> Self {
        self.truncate_resident_preferences(k);
        self
    }

    // ========================================================================
    // Mutators (instance preparation, before solving)
    // ========================================================================

    /// Set every hospital's capacity.
    ///
    /// `None` restores the uniform default `ceil(num_residents / num_hospitals)`;
    /// `Some(c)` sets every hospital to `c`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `c` is zero.
    pub fn set_capacities(&mut self, value: Option<usize>) -> Result<()> {
        let capacity = match value {
            Some(0) => {
                return Err(HrError::invalid_argument("capacity must be positive"));
            }
            Some(c) => c,
            None => default_capacity(self.num_residents(), self.num_hospitals())?,
        };
        self.capacities = vec![capacity; self.num_hospitals()];
        Ok(())
    }

    /// Set an explicit capacity per hospital.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the length differs from the hospital count or
    /// any entry is zero. The previous capacities are kept on error.
    pub fn set_capacity_vector(&mut self, capacities: Vec<usize>) -> Result<()> {
        if capacities.len() != self.num_hospitals() {
            return Err(HrError::invalid_argument(format!(
                "expected {} capacities, got {}",
                self.num_hospitals(),
                capacities.len()
            )));
        }
        if let Some(h) = capacities.iter().position(|&c| c == 0) {
            return Err(HrError::invalid_argument(format!(
                "capacity of hospital {h} must be positive"
            )));
        }
        self.capacities = capacities;
        Ok(())
    }

    /// Keep only the first `k` entries of every resident's preference list.
    ///
    /// Entries are discarded, never reordered. `k = 0` leaves every
    /// resident without options.
    pub fn truncate_resident_preferences(&mut self, k: usize) {
        for prefs in &mut self.resident_prefs {
            prefs.truncate(k);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn num_residents(&self) -> usize {
        self.resident_prefs.len()
    }

    #[inline]
    pub fn num_hospitals(&self) -> usize {
        self.hospital_prefs.len()
    }

    /// Hospitals ranked by resident `r`, most preferred first
    #[inline]
    pub fn resident_preferences(&self, r: ResidentId) -> &[HospitalId] {
        &self.resident_prefs[r]
    }

    /// Residents ranked by hospital `h`, most preferred first
    #[inline]
    pub fn hospital_preferences(&self, h: HospitalId) -> &[ResidentId] {
        &self.hospital_prefs[h]
    }

    pub fn all_resident_preferences(&self) -> &[Vec<HospitalId>] {
        &self.resident_prefs
    }

    pub fn all_hospital_preferences(&self) -> &[Vec<ResidentId>] {
        &self.hospital_prefs
    }

    #[inline]
    pub fn capacity(&self, h: HospitalId) -> usize {
        self.capacities[h]
    }

    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    /// Total number of seats over all hospitals
    pub fn total_seats(&self) -> usize {
        self.capacities.iter().fold(0, |total, &c| total.saturating_add(c))
    }

    /// True if every hospital has the uniform default capacity, i.e. the
    /// capacities would survive a save/load round trip.
    pub fn has_default_capacities(&self) -> bool {
        match default_capacity(self.num_residents(), self.num_hospitals()) {
            Ok(c) => self.capacities.iter().all(|&x| x == c),
            Err(_) => false,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Position of resident `r` in hospital `h`'s order (0 = best)
    #[inline]
    pub fn rank(&self, h: HospitalId, r: ResidentId) -> usize {
        self.ranks[h * self.num_residents() + r]
    }

    /// Rank row of hospital `h`, indexed by resident id
    #[inline]
    pub fn rank_row(&self, h: HospitalId) -> &[usize] {
        let n = self.num_residents();
        &self.ranks[h * n..(h + 1) * n]
    }

    /// True if hospital `h` strictly prefers resident `a` over `b`
    #[inline]
    pub fn prefers(&self, h: HospitalId, a: ResidentId, b: ResidentId) -> bool {
        self.rank(h, a) < self.rank(h, b)
    }

    /// Id-keyed view of preferences and capacities for interop.
    pub fn export(&self) -> InstanceExport {
        InstanceExport::from(self)
    }
}

fn validate_resident_preferences(
    r: ResidentId,
    prefs: &[HospitalId],
    num_hospitals: usize,
) -> Result<()> {
    let mut seen = vec![false; num_hospitals];
    for &h in prefs {
        if h >= num_hospitals {
            return Err(HrError::invalid_instance(format!(
                "resident {r} ranks hospital {h}, but only {num_hospitals} hospitals exist"
            )));
        }
        if seen[h] {
            return Err(HrError::invalid_instance(format!(
                "resident {r} ranks hospital {h} more than once"
            )));
        }
        seen[h] = true;
    }
    Ok(())
}

/// Validate hospital lists as permutations and build the flat rank table.
fn build_rank_table(hospital_prefs: &[Vec<ResidentId>], num_residents: usize) -> Result<Vec<usize>> {
    const UNSET: usize = usize::MAX;
    let mut ranks = vec![UNSET; hospital_prefs.len() * num_residents];

    for (h, prefs) in hospital_prefs.iter().enumerate() {
        if prefs.len() != num_residents {
            return Err(HrError::invalid_instance(format!(
                "hospital {h} ranks {} residents, expected all {num_residents}",
                prefs.len()
            )));
        }
        let row = &mut ranks[h * num_residents..(h + 1) * num_residents];
        for (k, &r) in prefs.iter().enumerate() {
            if r >= num_residents {
                return Err(HrError::invalid_instance(format!(
                    "hospital {h} ranks resident {r}, but only {num_residents} residents exist"
                )));
            }
            if row[r] != UNSET {
                return Err(HrError::invalid_instance(format!(
                    "hospital {h} ranks resident {r} more than once"
                )));
            }
            row[r] = k;
        }
    }

    Ok(ranks)
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Residents: {}", self.num_residents())?;
        writeln!(f, "Hospitals: {}", self.num_hospitals())?;
        for (r, prefs) in self.resident_prefs.iter().enumerate() {
            writeln!(f, "r{r}: {prefs:?}")?;
        }
        for (h, prefs) in self.hospital_prefs.iter().enumerate() {
            writeln!(f, "h{h}: {prefs:?} (capacity {})", self.capacities[h])?;
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
