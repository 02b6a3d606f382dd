//! Tentative admission list of a single hospital.
//!
//! ## Design
//!
//! A `Roster` holds the residents a hospital currently admits, sorted by
//! that hospital's rank table (best first). Insertion is a binary search
//! over ranks; on overflow the tail (worst-ranked resident) is evicted.
//!
//! ```text
//! best <-> ... <-> worst      admit(r): insert by rank, pop tail if > capacity
//! ```
//!
//! Ranks are a strict order, so the insertion point is unique and the
//! roster content never depends on arrival order.

use crate::types::ResidentId;

/// Rank-ordered, capacity-bounded admission list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    /// Seat count of the hospital
    capacity: usize,

    /// Admitted residents, best-ranked first
    residents: Vec<ResidentId>,
}

impl Roster {
    /// Create an empty roster
    ///
    /// # Arguments
    ///
    /// * `capacity` - Seat count (at least 1 for any valid instance)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            residents: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.residents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.residents.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Worst-ranked admitted resident
    #[inline]
    pub fn worst(&self) -> Option<ResidentId> {
        self.residents.last().copied()
    }

    pub fn residents(&self) -> &[ResidentId] {
        &self.residents
    }

    pub fn into_residents(self) -> Vec<ResidentId> {
        self.residents
    }

    /// Tentatively admit resident `r`.
    ///
    /// # Arguments
    ///
    /// * `r` - The applying resident
    /// * `ranks` - The hospital's rank row, indexed by resident id
    ///
    /// # Returns
    ///
    /// The resident that does not keep a seat: the previous worst when the
    /// roster overflows, `r` itself when the roster is full of residents
    /// ranked above it, or `None` if `r` took a free seat.
    pub fn admit(&mut self, r: ResidentId, ranks: &[usize]) -> Option<ResidentId> {
        let rank = ranks[r];

        // Full and r is worse than everyone: reject without touching the list
        if self.is_full() && self.worst().is_some_and(|w| ranks[w] < rank) {
            return Some(r);
        }

        let pos = self.residents.partition_point(|&x| ranks[x] < rank);
        self.residents.insert(pos, r);

        if self.residents.len() > self.capacity {
            self.residents.pop()
        } else {
            None
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
