use super::CommandResult;
use apportionment::apportion::tally::threshold;
use apportionment::formats::read_results;
use apportionment::ApportionError;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;

pub fn info(input: &Path) -> CommandResult {
    let data = read_results(input)?;

    let mut totals: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for (_, district, votes) in data.votes.entries() {
        let entry = totals.entry(district).or_insert((0, 0));
        entry.0 = entry.0.checked_add(votes).ok_or_else(|| {
            ApportionError::MalformedInput(format!("district total overflows in {}", district))
        })?;
        entry.1 += 1;
    }

    println!(
        "📋 {} parties across {} districts",
        data.votes.parties().count().to_string().bright_yellow(),
        totals.len().to_string().bright_yellow()
    );

    for (district, (votes, parties)) in &totals {
        let seats = match data.seats.get(*district) {
            Some(seats) if *seats >= 0 => seats.to_string().green(),
            Some(_) | None => "unresolved".red(),
        };
        let barrier = match data.barrier.get(*district) {
            Some(fraction) => format!(
                "{:.2}% ({} votes)",
                fraction * 100.0,
                threshold(*votes, *fraction)
            )
            .normal(),
            None => "missing".red(),
        };
        println!(
            "  {} {} votes, {} parties, seats: {}, barrier: {}",
            district.bright_cyan(),
            votes,
            parties,
            seats,
            barrier
        );
    }

    let unresolved = data.unresolved_districts();
    if unresolved.is_empty() {
        println!("✅ All seat counts resolved");
    } else {
        println!(
            "⚠️  {} district(s) need a seat count: {}",
            unresolved.len(),
            unresolved.join(", ")
        );
    }

    Ok(())
}
