use super::Allocation;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// A party's current average, `votes / (won + 1)`, kept as an exact fraction.
#[derive(Debug, Clone, Copy)]
struct Quotient {
    votes: u64,
    won: u32,
}

impl Quotient {
    /// Compare `a.votes / (a.won + 1)` with `b.votes / (b.won + 1)` without division.
    fn compare(&self, other: &Quotient) -> Ordering {
        let lhs = u128::from(self.votes) * (u128::from(other.won) + 1);
        let rhs = u128::from(other.votes) * (u128::from(self.won) + 1);
        lhs.cmp(&rhs)
    }
}

/// Highest averages allocation.
///
/// Seats are awarded one at a time to the party with the highest quotient.
/// On equal quotients the party with the lowest identifier wins, so a district
/// where every party was filtered to zero hands all seats to its first party.
/// Every party present in `votes` appears in the result, with 0 if it won nothing.
pub fn allocate(votes: &BTreeMap<String, u64>, seats: u32) -> Allocation {
    let mut quotients: Vec<(&str, Quotient)> = votes
        .iter()
        .map(|(party, votes)| (party.as_str(), Quotient { votes: *votes, won: 0 }))
        .collect();

    if quotients.is_empty() {
        return Allocation::new();
    }

    for seat in 1..=seats {
        let mut winner = 0;
        for (i, (_, quotient)) in quotients.iter().enumerate().skip(1) {
            // Strictly greater only, so earlier identifiers keep ties.
            if quotient.compare(&quotients[winner].1) == Ordering::Greater {
                winner = i;
            }
        }

        let (party, quotient) = &mut quotients[winner];
        quotient.won += 1;
        debug!(seat, party = *party, won = quotient.won, "d'hondt seat awarded");
    }

    quotients
        .into_iter()
        .map(|(party, quotient)| (party.to_string(), quotient.won))
        .collect()
}
