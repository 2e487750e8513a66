use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type PartyId = String;
pub type DistrictId = String;

/// Seat count value meaning "not fixed yet, to be supplied externally".
pub const UNRESOLVED_SEATS: i64 = -1;

/// Raw vote counts, keyed by party and then by district.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteRecord {
    parties: BTreeMap<PartyId, BTreeMap<DistrictId, u64>>,
}

impl VoteRecord {
    pub fn new() -> VoteRecord {
        VoteRecord {
            parties: BTreeMap::new(),
        }
    }

    /// Set the vote count of `party` in `district`, replacing any previous value.
    pub fn insert(&mut self, party: &str, district: &str, votes: u64) {
        self.parties
            .entry(party.to_string())
            .or_insert_with(BTreeMap::new)
            .insert(district.to_string(), votes);
    }

    pub fn parties(&self) -> impl Iterator<Item = &str> {
        self.parties.keys().map(|p| p.as_str())
    }

    /// Every district mentioned by at least one party.
    pub fn districts(&self) -> BTreeSet<&str> {
        self.parties
            .values()
            .flat_map(|districts| districts.keys().map(|d| d.as_str()))
            .collect()
    }

    /// Iterate `(party, district, votes)` triples in identifier order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.parties.iter().flat_map(|(party, districts)| {
            districts
                .iter()
                .map(move |(district, votes)| (party.as_str(), district.as_str(), *votes))
        })
    }
}

/// Minimum vote share per district, as a fraction of the district total.
pub type Barrier = BTreeMap<DistrictId, f64>;

/// Seats per district. Negative values are unresolved.
pub type SeatCount = BTreeMap<DistrictId, i64>;

/// The three read-only inputs of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectionData {
    pub votes: VoteRecord,
    pub barrier: Barrier,
    pub seats: SeatCount,
}

impl ElectionData {
    pub fn new(votes: VoteRecord, barrier: Barrier, seats: SeatCount) -> ElectionData {
        ElectionData {
            votes,
            barrier,
            seats,
        }
    }

    /// Replace seat counts with externally supplied values.
    pub fn with_seat_overrides<I>(mut self, overrides: I) -> ElectionData
    where
        I: IntoIterator<Item = (DistrictId, u32)>,
    {
        for (district, seats) in overrides {
            self.seats.insert(district, i64::from(seats));
        }
        self
    }

    /// Districts whose seat count is missing or still the sentinel.
    pub fn unresolved_districts(&self) -> Vec<&str> {
        self.votes
            .districts()
            .into_iter()
            .filter(|d| self.seats.get(*d).map_or(true, |s| *s < 0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_districts_across_parties() {
        let mut votes = VoteRecord::new();
        votes.insert("A", "north", 10);
        votes.insert("B", "south", 4);
        votes.insert("B", "north", 7);

        let districts: Vec<_> = votes.districts().into_iter().collect();
        assert_eq!(districts, vec!["north", "south"]);
        assert_eq!(votes.entries().count(), 3);
    }

    #[test]
    fn overrides_resolve_sentinel_seats() {
        let mut votes = VoteRecord::new();
        votes.insert("A", "north", 10);
        votes.insert("A", "south", 10);
        let mut seats = SeatCount::new();
        seats.insert("north".to_string(), UNRESOLVED_SEATS);

        let data = ElectionData::new(votes, Barrier::new(), seats);
        assert_eq!(data.unresolved_districts(), vec!["north", "south"]);

        let data = data.with_seat_overrides(vec![("north".to_string(), 3)]);
        assert_eq!(data.unresolved_districts(), vec!["south"]);
        assert_eq!(data.seats["north"], 3);
    }
}
