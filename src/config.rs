//! # Instance Configuration
//!
//! Parameters for producing a ready-to-solve instance: counts, seed, and the
//! two preparation steps (capacity override, preference truncation). An
//! outer sweep builds one `InstanceConfig` per run and can persist it with
//! serde next to its results.
//!
//! ## Validation
//! - `num_residents > 0` and `num_hospitals > 0`
//! - `capacity`, when given, is positive
//!
//! ## Example
//! ```
//! use hospital_resident::config::InstanceConfig;
//!
//! let instance = InstanceConfig::new(60, 4)
//!     .with_seed(7)
//!     .with_capacity(10)
//!     .with_preference_limit(2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(instance.capacities(), &[10, 10, 10, 10]);
//! assert!(instance.all_resident_preferences().iter().all(|p| p.len() == 2));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{HrError, Result};
use crate::generator::generate;
use crate::types::Instance;

/// Generation and preparation parameters for one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub num_residents: usize,
    pub num_hospitals: usize,

    /// Generation seed (entropy when absent)
    pub seed: Option<u64>,

    /// Uniform capacity override (default `ceil(residents / hospitals)`)
    pub capacity: Option<usize>,

    /// Keep only this many preferences per resident
    pub preference_limit: Option<usize>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self::new(12, 4)
    }
}

impl InstanceConfig {
    pub fn new(num_residents: usize, num_hospitals: usize) -> Self {
        Self {
            num_residents,
            num_hospitals,
            seed: None,
            capacity: None,
            preference_limit: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_preference_limit(mut self, k: usize) -> Self {
        self.preference_limit = Some(k);
        self
    }

    /// Check the parameters without generating anything.
    pub fn validate(&self) -> Result<()> {
        if self.num_residents == 0 {
            return Err(HrError::invalid_argument("number of residents must be positive"));
        }
        if self.num_hospitals == 0 {
            return Err(HrError::invalid_argument("number of hospitals must be positive"));
        }
        if self.capacity == Some(0) {
            return Err(HrError::invalid_argument("capacity must be positive"));
        }
        Ok(())
    }

    /// Generate the instance, then apply capacity and truncation.
    pub fn build(&self) -> Result<Instance> {
        self.validate()?;

        let mut instance = generate(self.num_residents, self.num_hospitals, self.seed)?;
        if self.capacity.is_some() {
            instance.set_capacities(self.capacity)?;
        }
        if let Some(k) = self.preference_limit {
            instance.truncate_resident_preferences(k);
        }
        Ok(instance)
    }
}
