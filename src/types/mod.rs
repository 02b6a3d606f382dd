//! Core data types for the Hospital/Resident model
//!
//! ## Types
//!
//! - [`Instance`]: preferences on both sides plus hospital capacities
//! - [`Matching`]: resident assignments and hospital rosters
//! - [`InstanceExport`]: id-keyed maps for interop with other solvers
//! - [`SolveReceipt`]: summary of one solver run
//!
//! ## Identifiers
//!
//! Residents and hospitals are dense integer ids: residents in
//! `0..num_residents`, hospitals in `0..num_hospitals`.

mod instance;
mod matching;
mod export;
mod receipt;

/// Resident identifier, in `0..num_residents`
pub type ResidentId = usize;

/// Hospital identifier, in `0..num_hospitals`
pub type HospitalId = usize;

pub use instance::{default_capacity, Instance};
pub use matching::Matching;
pub use export::InstanceExport;
pub use receipt::SolveReceipt;
