use super::{AggregateResult, ApportionmentReport, DistrictFailure, DistrictReport};
use crate::apportion::{self, ApportionOptions, Result};
use crate::model::election::ElectionData;
use tracing::{info, warn};

/// Tally every district, allocate its seats and sum the allocations per party.
///
/// Input errors that affect the whole run (a missing barrier) abort with an
/// error. Errors confined to one district (unresolved seat count, seats with no
/// parties) are recorded as failures; that district contributes nothing to the
/// aggregate and the remaining districts are still reported.
pub fn generate_report(
    data: &ElectionData,
    options: &ApportionOptions,
) -> Result<ApportionmentReport> {
    let tally = apportion::tally(&data.votes, &data.barrier)?;

    let mut districts = Vec::new();
    let mut failures = Vec::new();
    let mut aggregate = AggregateResult::new();
    let mut total_seats: u64 = 0;

    for (district, summary) in &tally.districts {
        let allocation = apportion::resolve_seats(district, data.seats.get(district).copied())
            .and_then(|seats| apportion::allocate(options.method, district, &summary.votes, seats));

        let allocations = match allocation {
            Ok(allocations) => allocations,
            Err(e) => {
                warn!(district = district.as_str(), error = %e, "district not allocated");
                failures.push(DistrictFailure {
                    district: district.clone(),
                    removed: summary.removed,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        for (party, seats) in &allocations {
            *aggregate.entry(party.clone()).or_insert(0) += u64::from(*seats);
            total_seats += u64::from(*seats);
        }

        info!(
            district = district.as_str(),
            method = %options.method,
            removed = summary.removed,
            seats = allocations.values().sum::<u32>(),
            "district allocated"
        );

        districts.push(DistrictReport {
            district: district.clone(),
            removed: summary.removed,
            allocations,
        });
    }

    Ok(ApportionmentReport {
        method: options.method,
        districts,
        failures,
        aggregate,
        total_seats,
        total_removed: tally.total_removed(),
    })
}
