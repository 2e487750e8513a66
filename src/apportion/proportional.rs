use super::Allocation;
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::debug;

/// Largest-share rounding allocation.
///
/// Parties are visited by votes descending (ties by identifier). Each visited
/// party receives `floor(votes * seats / total)` seats, but never fewer than one,
/// and visiting stops once the running total reaches `seats`. Nothing trims or
/// tops up the result afterwards: if every party is visited before the cutoff,
/// fewer than `seats` seats are handed out.
pub fn allocate(votes: &BTreeMap<String, u64>, seats: u32) -> Allocation {
    if seats == 0 {
        return Allocation::new();
    }
    let mut allocation: Allocation = votes.keys().map(|p| (p.clone(), 0)).collect();

    let total: u128 = votes.values().map(|v| u128::from(*v)).sum();
    let mut awarded: u32 = 0;

    // sorted_by is stable, so equal counts keep identifier order
    for (party, count) in votes.iter().sorted_by(|a, b| b.1.cmp(a.1)) {
        let won = share(*count, total, seats).max(1);
        debug!(party = party.as_str(), votes = *count, won, "proportional share");

        allocation.insert(party.clone(), won);
        awarded = awarded.saturating_add(won);
        if awarded >= seats {
            break;
        }
    }

    allocation
}

/// `floor(votes / total * seats)`, computed exactly. Zero when `total` is zero.
fn share(votes: u64, total: u128, seats: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let exact = u128::from(votes) * u128::from(seats) / total;
    // votes <= total, so exact <= seats
    exact as u32
}
