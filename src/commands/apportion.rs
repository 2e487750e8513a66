use super::CommandResult;
use apportionment::formats::read_results;
use apportionment::reports::{generate_report, render_report, PartyPalette};
use apportionment::util::read_serialized;
use apportionment::ApportionOptions;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;

pub fn apportion(
    input: &Path,
    options: &ApportionOptions,
    seat_overrides: &[(String, u32)],
    palette_file: Option<&Path>,
    json: bool,
) -> CommandResult {
    if !json {
        println!(
            "🗳  Apportioning {} with the {} method",
            input.display().to_string().cyan(),
            options.method.to_string().cyan()
        );
    }

    let data = read_results(input)?.with_seat_overrides(seat_overrides.iter().cloned());

    let palette = match palette_file {
        Some(path) => {
            let names: BTreeMap<String, String> = read_serialized(path)?;
            PartyPalette::from_names(&names)?
        }
        None => PartyPalette::new(),
    };

    let report = generate_report(&data, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report, &palette));
    }

    if report.is_complete() {
        Ok(())
    } else {
        Err(format!(
            "{} district(s) could not be allocated; supply their seat counts with --seats",
            report.failures.len()
        )
        .into())
    }
}
