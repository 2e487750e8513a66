//! Results file: a JSON object keyed by party, plus the reserved `Seats` and
//! `Barrier` keys.
//!
//! ```json
//! {
//!     "Seats": { "north": 3, "south": -1 },
//!     "Barrier": { "north": 0.03, "south": 0.03 },
//!     "Party A": { "north": 1200, "south": "850" }
//! }
//! ```
//!
//! Counts may be written as numbers or numeric strings.

use super::{FormatError, Result};
use crate::apportion::ApportionError;
use crate::model::election::{Barrier, ElectionData, SeatCount, VoteRecord};
use crate::util::read_serialized;
use serde_json::{Map, Number, Value};
use std::path::Path;

pub const SEATS_KEY: &str = "Seats";
pub const BARRIER_KEY: &str = "Barrier";

fn malformed(what: String) -> FormatError {
    FormatError::Core(ApportionError::MalformedInput(what))
}

fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(format!("{} must be an object, found {}", context, value)))
}

/// Parse a whole number from a JSON number or numeric string.
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_votes(value: &Value, party: &str, district: &str) -> Result<u64> {
    if let Value::Number(n) = value {
        if let Some(votes) = n.as_u64() {
            return Ok(votes);
        }
    }
    match parse_integer(value) {
        Some(votes) if votes >= 0 => Ok(votes as u64),
        _ => Err(malformed(format!(
            "vote count for {} in {} is not a non-negative integer: {}",
            party, district, value
        ))),
    }
}

fn parse_fraction(value: &Value, district: &str) -> Result<f64> {
    let fraction = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    fraction
        .filter(|f| f.is_finite())
        .ok_or_else(|| malformed(format!("barrier for {} is not a number: {}", district, value)))
}

fn parse_seats(value: &Value, district: &str) -> Result<i64> {
    parse_integer(value)
        .ok_or_else(|| malformed(format!("seat count for {} is not an integer: {}", district, value)))
}

/// Build election data from an already parsed results document.
pub fn results_from_value(value: &Value) -> Result<ElectionData> {
    let root = as_object(value, "results file")?;

    let mut seats = SeatCount::new();
    let seat_map = root.get(SEATS_KEY).ok_or(FormatError::MissingKey(SEATS_KEY))?;
    for (district, raw) in as_object(seat_map, SEATS_KEY)? {
        seats.insert(district.clone(), parse_seats(raw, district)?);
    }

    let mut barrier = Barrier::new();
    let barrier_map = root
        .get(BARRIER_KEY)
        .ok_or(FormatError::MissingKey(BARRIER_KEY))?;
    for (district, raw) in as_object(barrier_map, BARRIER_KEY)? {
        barrier.insert(district.clone(), parse_fraction(raw, district)?);
    }

    let mut votes = VoteRecord::new();
    for (party, districts) in root {
        if party == SEATS_KEY || party == BARRIER_KEY {
            continue;
        }
        for (district, raw) in as_object(districts, party)? {
            votes.insert(party, district, parse_votes(raw, party, district)?);
        }
    }

    Ok(ElectionData::new(votes, barrier, seats))
}

/// Read and validate a results file.
pub fn read_results(path: &Path) -> Result<ElectionData> {
    let value: Value = read_serialized(path)?;
    results_from_value(&value)
}

/// Inverse of [`results_from_value`].
pub fn results_to_value(data: &ElectionData) -> Value {
    let mut root = Map::new();

    let seats: Map<String, Value> = data
        .seats
        .iter()
        .map(|(d, s)| (d.clone(), Value::from(*s)))
        .collect();
    root.insert(SEATS_KEY.to_string(), Value::Object(seats));

    let barrier: Map<String, Value> = data
        .barrier
        .iter()
        .map(|(d, b)| {
            let number = Number::from_f64(*b).map_or(Value::Null, Value::Number);
            (d.clone(), number)
        })
        .collect();
    root.insert(BARRIER_KEY.to_string(), Value::Object(barrier));

    for (party, district, votes) in data.votes.entries() {
        let entry = root
            .entry(party.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(districts) = entry {
            districts.insert(district.to_string(), Value::from(votes));
        }
    }

    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn reads_reserved_keys_and_parties() {
        let value = json!({
            "Seats": { "north": 3, "south": -1 },
            "Barrier": { "north": 0.03, "south": "0.05" },
            "A": { "north": 1200, "south": "850" },
            "B": { "north": 300 }
        });

        let data = results_from_value(&value).unwrap();

        assert_eq!(data.seats["north"], 3);
        assert_eq!(data.seats["south"], -1);
        assert_eq!(data.barrier["south"], 0.05);
        assert_eq!(data.votes.parties().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(data.votes.entries().count(), 3);
        assert_eq!(data.unresolved_districts(), vec!["south"]);
    }

    #[test]
    fn rejects_negative_and_non_numeric_votes() {
        for bad in &[json!(-4), json!("many"), json!(2.5), json!(true)] {
            let value = json!({
                "Seats": { "north": 1 },
                "Barrier": { "north": 0.0 },
                "A": { "north": bad }
            });
            let err = results_from_value(&value).unwrap_err();
            assert!(
                matches!(err, FormatError::Core(ApportionError::MalformedInput(_))),
                "{:?} accepted",
                bad
            );
        }
    }

    #[test]
    fn requires_seats_and_barrier() {
        let err = results_from_value(&json!({ "Barrier": {} })).unwrap_err();
        assert!(matches!(err, FormatError::MissingKey(SEATS_KEY)));

        let err = results_from_value(&json!({ "Seats": {} })).unwrap_err();
        assert!(matches!(err, FormatError::MissingKey(BARRIER_KEY)));
    }

    #[test]
    fn writes_back_what_it_reads() {
        let value = json!({
            "Seats": { "north": 2 },
            "Barrier": { "north": 0.03 },
            "A": { "north": 10 },
            "B": { "north": 7 }
        });
        let data = results_from_value(&value).unwrap();
        assert_eq!(results_to_value(&data), value);
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Seats": {{"north": 1}}, "Barrier": {{"north": 0.1}}, "A": {{"north": 5}}}}"#
        )
        .unwrap();

        let data = read_results(file.path()).unwrap();
        assert_eq!(data.seats["north"], 1);
    }
}
