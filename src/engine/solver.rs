//! Resident-proposing deferred acceptance (McVitie–Wilson).
//!
//! ## Algorithm
//!
//! Free residents are drawn one at a time from a [`Worklist`]:
//!
//! 1. a resident whose preference list is exhausted stays unmatched
//! 2. otherwise it applies to the next hospital on its list and its cursor
//!    advances past that hospital
//! 3. the hospital admits it into its [`Roster`] by rank; on overflow the
//!    worst-ranked resident is evicted and returns to the worklist
//!
//! ## Termination
//!
//! Cursors only move forward, so each resident/hospital pair produces at most
//! one application. The loop runs at most `sum(|prefs(r)|)` proposals plus
//! one final draw per resident.
//!
//! ## Order Invariance
//!
//! The result is the resident-optimal stable matching whatever order free
//! residents are drawn in; [`ProposalOrder`] only changes the path taken.

use tracing::{debug, instrument, trace};

use crate::engine::{ProposalOrder, Roster, Worklist};
use crate::types::{Instance, Matching, SolveReceipt};

/// Deferred-acceptance solver for Hospital/Resident instances.
///
/// ## Example
///
/// ```
/// use hospital_resident::{DeferredAcceptance, Instance, ProposalOrder};
///
/// let instance = Instance::new(
///     vec![vec![0, 1], vec![0, 1], vec![0]],
///     vec![vec![2, 1, 0], vec![0, 1, 2]],
/// ).unwrap().with_capacities(Some(1)).unwrap();
///
/// let fifo = DeferredAcceptance::new().solve(&instance);
/// let lifo = DeferredAcceptance::with_order(ProposalOrder::Lifo).solve(&instance);
///
/// assert_eq!(fifo, lifo);
/// assert_eq!(fifo.hospital_of(2), Some(0));
/// assert_eq!(fifo.hospital_of(0), Some(1));
/// assert_eq!(fifo.hospital_of(1), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeferredAcceptance {
    order: ProposalOrder,
}

impl DeferredAcceptance {
    /// Solver drawing free residents in queue order
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver drawing free residents in the given order
    pub fn with_order(order: ProposalOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> ProposalOrder {
        self.order
    }

    /// Compute the resident-optimal stable matching.
    ///
    /// The instance is only read.
    pub fn solve(&self, instance: &Instance) -> Matching {
        self.solve_with_receipt(instance).0
    }

    /// Compute the matching along with a summary of the run.
    #[instrument(
        skip_all,
        fields(
            residents = instance.num_residents(),
            hospitals = instance.num_hospitals(),
            order = ?self.order,
        )
    )]
    pub fn solve_with_receipt(&self, instance: &Instance) -> (Matching, SolveReceipt) {
        let num_residents = instance.num_residents();

        // Proposals made so far, per resident
        let mut cursors = vec![0usize; num_residents];
        let mut rosters: Vec<Roster> = instance
            .capacities()
            .iter()
            .map(|&capacity| Roster::new(capacity))
            .collect();
        let mut free = Worklist::new(self.order, num_residents);

        let mut proposals: u64 = 0;
        let mut evictions: u64 = 0;

        while let Some(r) = free.pop() {
            let Some(&h) = instance.resident_preferences(r).get(cursors[r]) else {
                trace!(resident = r, "preference list exhausted");
                continue;
            };
            cursors[r] += 1;
            proposals += 1;

            if let Some(evicted) = rosters[h].admit(r, instance.rank_row(h)) {
                trace!(resident = r, hospital = h, evicted, "roster overflow");
                evictions += 1;
                free.push(evicted);
            }
        }

        let idle_hospitals = rosters.iter().filter(|roster| roster.is_empty()).count();
        let matching = Matching::from_rosters(
            num_residents,
            rosters.into_iter().map(Roster::into_residents).collect(),
        );
        let receipt = SolveReceipt::new(instance, &matching, proposals, evictions);

        debug!(
            proposals,
            evictions,
            matched = receipt.matched,
            unmatched = receipt.unmatched,
            idle_hospitals,
            "deferred acceptance finished"
        );

        (matching, receipt)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
