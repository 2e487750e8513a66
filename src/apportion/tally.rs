use super::{ApportionError, Result};
use crate::model::election::{Barrier, VoteRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Vote counts of one district after the barrier has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictTally {
    pub district: String,
    /// Filtered votes per party; parties under the threshold are kept at 0.
    pub votes: BTreeMap<String, u64>,
    pub total: u64,
    pub threshold: u64,
    /// Sum of the votes of excluded parties.
    pub removed: u64,
}

impl DistrictTally {
    fn new(district: &str) -> Self {
        Self {
            district: district.to_string(),
            votes: BTreeMap::new(),
            total: 0,
            threshold: 0,
            removed: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tally {
    pub districts: BTreeMap<String, DistrictTally>,
}

impl Tally {
    pub fn district(&self, district: &str) -> Option<&DistrictTally> {
        self.districts.get(district)
    }

    /// Removed votes over every district. `tally` rejects records whose
    /// overall vote count exceeds `u64`, so this sum cannot overflow.
    pub fn total_removed(&self) -> u64 {
        self.districts.values().map(|d| d.removed).sum()
    }
}

/// Vote threshold for a district: `floor(total * barrier)`.
///
/// The float-to-int cast saturates, so negative or NaN products become 0 and
/// oversized ones become `u64::MAX`. Vote counts are never negative, which
/// keeps `votes < threshold` equivalent to the unclamped comparison.
pub fn threshold(total: u64, barrier: f64) -> u64 {
    (total as f64 * barrier).floor() as u64
}

/// Group votes by district and zero out parties below the district barrier.
pub fn tally(votes: &VoteRecord, barrier: &Barrier) -> Result<Tally> {
    let mut districts: BTreeMap<String, DistrictTally> = BTreeMap::new();
    let mut overall: u64 = 0;

    for (party, district, count) in votes.entries() {
        // District totals and removed votes are bounded by this sum
        overall = overall.checked_add(count).ok_or_else(|| {
            ApportionError::MalformedInput(format!(
                "vote total overflows adding {} in {}",
                party, district
            ))
        })?;
        let entry = districts
            .entry(district.to_string())
            .or_insert_with(|| DistrictTally::new(district));
        entry.total += count;
        *entry.votes.entry(party.to_string()).or_insert(0) += count;
    }

    for (district, summary) in districts.iter_mut() {
        let fraction = barrier
            .get(district)
            .copied()
            .ok_or_else(|| ApportionError::MissingBarrier(district.clone()))?;
        summary.threshold = threshold(summary.total, fraction);

        let limit = summary.threshold;
        let mut removed = 0;
        for (party, count) in summary.votes.iter_mut() {
            if *count < limit {
                debug!(
                    district = district.as_str(),
                    party = party.as_str(),
                    votes = *count,
                    threshold = limit,
                    "party below barrier"
                );
                removed += *count;
                *count = 0;
            }
        }
        summary.removed = removed;
    }

    Ok(Tally { districts })
}
