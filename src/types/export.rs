//! Id-keyed export view of an instance.
//!
//! External stable-matching implementations usually take three dictionaries:
//! resident preferences, hospital preferences, and capacities, each keyed by
//! id. [`InstanceExport`] is that shape, serializable with serde, and can be
//! converted back into a validated [`Instance`] (capacities included).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HrError, Result};
use crate::types::{HospitalId, Instance, ResidentId};

/// Three ordered, id-keyed maps describing an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceExport {
    pub resident_prefs: BTreeMap<ResidentId, Vec<HospitalId>>,
    pub hospital_prefs: BTreeMap<HospitalId, Vec<ResidentId>>,
    pub capacities: BTreeMap<HospitalId, usize>,
}

impl From<&Instance> for InstanceExport {
    fn from(instance: &Instance) -> Self {
        Self {
            resident_prefs: instance
                .all_resident_preferences()
                .iter()
                .cloned()
                .enumerate()
                .collect(),
            hospital_prefs: instance
                .all_hospital_preferences()
                .iter()
                .cloned()
                .enumerate()
                .collect(),
            capacities: instance.capacities().iter().copied().enumerate().collect(),
        }
    }
}

impl TryFrom<InstanceExport> for Instance {
    type Error = HrError;

    /// Keys must be exactly `0..n` / `0..m`; capacities must cover every hospital.
    fn try_from(export: InstanceExport) -> Result<Self> {
        let resident_prefs = dense_values(export.resident_prefs, "resident")?;
        let hospital_prefs = dense_values(export.hospital_prefs, "hospital")?;
        let capacities = dense_values(export.capacities, "capacity")?;

        let mut instance = Instance::new(resident_prefs, hospital_prefs)?;
        instance.set_capacity_vector(capacities)?;
        Ok(instance)
    }
}

fn dense_values<T>(map: BTreeMap<usize, T>, what: &str) -> Result<Vec<T>> {
    let mut values = Vec::with_capacity(map.len());
    for (expected, (key, value)) in map.into_iter().enumerate() {
        if key != expected {
            return Err(HrError::invalid_instance(format!(
                "{what} keys must be contiguous from 0, missing {expected}"
            )));
        }
        values.push(value);
    }
    Ok(values)
}
