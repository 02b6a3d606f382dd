//! Matching engine for Hospital/Resident instances.
//!
//! ## Design Principles
//!
//! The engine is designed for:
//!
//! 1. **Determinism**: Same instance always produces the same matching
//! 2. **Order Invariance**: The draw order of free residents never changes the result
//! 3. **Read-only Input**: Solving never mutates the instance
//! 4. **Single-threaded**: The worklist and rosters belong to one solve call
//!
//! ## Matching Rules
//!
//! - **Residents** apply to hospitals in their own preference order
//! - **Hospitals** keep the best-ranked applicants up to capacity
//! - **Evicted residents** move on to their next choice
//! - **Exhausted residents** stay unmatched
//!
//! ## Complexity
//!
//! | Part | Cost |
//! |------|------|
//! | Proposals | O(sum of resident list lengths) |
//! | Admission | O(log capacity) search + O(capacity) shift |
//! | Rank table | O(residents * hospitals) memory |
//!
//! ## Example
//!
//! ```
//! use hospital_resident::engine::solve;
//! use hospital_resident::generator::generate;
//!
//! let instance = generate(60, 4, Some(9)).unwrap();
//! let matching = solve(&instance);
//!
//! assert!(matching.is_stable(&instance));
//! ```

pub mod roster;
pub mod worklist;
pub mod solver;

pub use roster::Roster;
pub use worklist::{ProposalOrder, Worklist};
pub use solver::DeferredAcceptance;

use crate::types::{Instance, Matching};

/// Solve with the default (queue-order) solver.
pub fn solve(instance: &Instance) -> Matching {
    DeferredAcceptance::new().solve(instance)
}
