//! Seat apportionment: barrier filtering and the two seat allocators.
//!
//! Every map is a `BTreeMap`, so parties are always visited in lexicographic
//! identifier order. Both allocators use that order to break ties: when two
//! parties are indistinguishable, the lower identifier is served first.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;

pub mod dhondt;
pub mod proportional;
pub mod tally;

pub use tally::{tally, DistrictTally, Tally};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApportionError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Unresolved seat count for district {district}: {value}")]
    UnresolvedSeatCount { district: String, value: String },
    #[error("No barrier configured for district: {0}")]
    MissingBarrier(String),
    #[error("No parties to receive {seats} seats in district: {district}")]
    NoParties { district: String, seats: u32 },
}

pub type Result<T> = std::result::Result<T, ApportionError>;

/// Seats won per party within one district.
pub type Allocation = BTreeMap<String, u32>;

/// Seat allocation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationMethod {
    /// Highest averages, one seat at a time.
    DHondt,
    /// Floored vote share with a one-seat minimum, largest parties first.
    Proportional,
}

impl Default for AllocationMethod {
    fn default() -> Self {
        AllocationMethod::DHondt
    }
}

impl fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationMethod::DHondt => write!(f, "D'Hondt"),
            AllocationMethod::Proportional => write!(f, "proportional"),
        }
    }
}

/// Options for an apportionment run
#[derive(Debug, Clone, Default)]
pub struct ApportionOptions {
    pub method: AllocationMethod,
}

impl ApportionOptions {
    pub fn from_flag(proportional: bool) -> Self {
        let method = if proportional {
            AllocationMethod::Proportional
        } else {
            AllocationMethod::DHondt
        };
        Self { method }
    }
}

/// Turn a raw seat count into a usable one, rejecting missing and sentinel values.
pub fn resolve_seats(district: &str, raw: Option<i64>) -> Result<u32> {
    match raw {
        None => Err(ApportionError::UnresolvedSeatCount {
            district: district.to_string(),
            value: "missing".to_string(),
        }),
        Some(value) => u32::try_from(value).map_err(|_| ApportionError::UnresolvedSeatCount {
            district: district.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Allocate `seats` in `district` with the chosen method.
pub fn allocate(
    method: AllocationMethod,
    district: &str,
    votes: &BTreeMap<String, u64>,
    seats: u32,
) -> Result<Allocation> {
    if seats == 0 {
        return Ok(Allocation::new());
    }
    if votes.is_empty() {
        return Err(ApportionError::NoParties {
            district: district.to_string(),
            seats,
        });
    }

    let allocation = match method {
        AllocationMethod::DHondt => dhondt::allocate(votes, seats),
        AllocationMethod::Proportional => proportional::allocate(votes, seats),
    };
    Ok(allocation)
}

#[cfg(test)]
pub(crate) fn votes_of(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs.iter().map(|(p, v)| (p.to_string(), *v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seats_is_an_empty_allocation() {
        let votes = votes_of(&[("A", 10), ("B", 5)]);
        for method in &[AllocationMethod::DHondt, AllocationMethod::Proportional] {
            let allocation = allocate(*method, "north", &votes, 0).unwrap();
            assert!(allocation.is_empty());
        }
    }

    #[test]
    fn seats_without_parties_fail() {
        let err = allocate(AllocationMethod::DHondt, "north", &BTreeMap::new(), 2).unwrap_err();
        assert_eq!(
            err,
            ApportionError::NoParties {
                district: "north".to_string(),
                seats: 2
            }
        );
    }

    #[test]
    fn sentinel_and_missing_seats_are_unresolved() {
        assert!(matches!(
            resolve_seats("north", Some(-1)),
            Err(ApportionError::UnresolvedSeatCount { .. })
        ));
        assert!(matches!(
            resolve_seats("north", None),
            Err(ApportionError::UnresolvedSeatCount { .. })
        ));
        assert!(resolve_seats("north", Some(i64::from(u32::MAX) + 1)).is_err());
        assert_eq!(resolve_seats("north", Some(7)), Ok(7));
    }

    #[test]
    fn flag_selects_method() {
        assert_eq!(ApportionOptions::default().method, AllocationMethod::DHondt);
        assert_eq!(
            ApportionOptions::from_flag(true).method,
            AllocationMethod::Proportional
        );
    }
}
