use crate::apportion::{Allocation, AllocationMethod};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod generator;
pub mod render;

pub use generator::generate_report;
pub use render::{render_report, PartyPalette};

/// Seats per party summed over every successfully allocated district.
pub type AggregateResult = BTreeMap<String, u64>;

/// Outcome of one district, in the interchange shape
/// `{ "district": string, "removed": int, "allocations": { party: int } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictReport {
    pub district: String,
    pub removed: u64,
    pub allocations: Allocation,
}

impl DistrictReport {
    pub fn seats(&self) -> u32 {
        self.allocations.values().sum()
    }
}

/// A district whose allocation could not be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictFailure {
    pub district: String,
    pub removed: u64,
    pub reason: String,
}

/// Full result of an apportionment run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApportionmentReport {
    pub method: AllocationMethod,
    pub districts: Vec<DistrictReport>,
    pub failures: Vec<DistrictFailure>,
    pub aggregate: AggregateResult,
    #[serde(rename = "totalSeats")]
    pub total_seats: u64,
    #[serde(rename = "totalRemoved")]
    pub total_removed: u64,
}

impl ApportionmentReport {
    /// True when every district was allocated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn district(&self, district: &str) -> Option<&DistrictReport> {
        self.districts.iter().find(|d| d.district == district)
    }
}
