//! # Hospital/Resident
//!
//! Resident-optimal stable matching for the Hospital/Resident problem:
//! residents rank a subset of hospitals, hospitals rank every resident and
//! have a seat capacity.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: Core data structures (Instance, Matching, SolveReceipt)
//! - **Generator**: Seeded random instances
//! - **Engine**: Deferred acceptance solver
//! - **Codec**: Plain-text persistence of instances
//!
//! Data flows generator/codec -> [`Instance`] -> [`DeferredAcceptance`] ->
//! [`Matching`]. The solver never mutates its input.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same seed, same instance; same instance, same matching
//! 2. **Validation at the boundary**: Instances are checked once, at construction or load
//! 3. **No global state**: Random streams are explicit, seeded objects
//! 4. **Synchronous Execution**: Solving is a single-threaded loop
//!
//! ## Example
//!
//! ```
//! use hospital_resident::{generate, solve};
//!
//! let instance = generate(12, 4, Some(12345678)).unwrap();
//! let matching = solve(&instance);
//!
//! assert!(matching.is_stable(&instance));
//! for h in 0..instance.num_hospitals() {
//!     assert!(matching.roster(h).len() <= instance.capacity(h));
//! }
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error type and Result alias
pub mod error;

/// Instance generation parameters
pub mod config;

/// Core data types: Instance, Matching, InstanceExport, SolveReceipt
pub mod types;

/// Random instance generation
pub mod generator;

/// Matching engine: deferred acceptance
pub mod engine;

/// Text format: save / load
pub mod codec;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{HrError, Result};
pub use config::InstanceConfig;
pub use types::{HospitalId, Instance, InstanceExport, Matching, ResidentId, SolveReceipt};
pub use generator::{generate, RandomInstanceGenerator};
pub use engine::{solve, DeferredAcceptance, ProposalOrder};
pub use codec::{load, save};
