use super::ApportionmentReport;
use colored::{Color, ColoredString, Colorize};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::str::FromStr;

const BAR: &str = "█";
/// Longest bar drawn; larger delegations are truncated with `…`.
const MAX_BAR: u64 = 60;

/// Display colors per party, supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct PartyPalette {
    colors: BTreeMap<String, Color>,
}

impl PartyPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from color names such as `"red"` or `"bright blue"`.
    pub fn from_names(names: &BTreeMap<String, String>) -> Result<Self, String> {
        let mut colors = BTreeMap::new();
        for (party, name) in names {
            let color = Color::from_str(name)
                .map_err(|_| format!("Unknown color {:?} for party {}", name, party))?;
            colors.insert(party.clone(), color);
        }
        Ok(Self { colors })
    }

    pub fn color(&self, party: &str) -> Option<Color> {
        self.colors.get(party).copied()
    }

    fn paint(&self, party: &str, text: &str) -> ColoredString {
        match self.color(party) {
            Some(color) => text.color(color),
            None => text.normal(),
        }
    }
}

fn seat_bar(won: u64) -> String {
    if won > MAX_BAR {
        format!("{}…", BAR.repeat(MAX_BAR as usize))
    } else {
        BAR.repeat(won as usize)
    }
}

fn seat_lines<T>(
    out: &mut String,
    seats: &BTreeMap<String, T>,
    palette: &PartyPalette,
    indent: &str,
) where
    T: Copy + Into<u64>,
{
    let width = seats.keys().map(|p| p.chars().count()).max().unwrap_or(0);
    // Largest delegations first, then by name
    for (party, won) in seats
        .iter()
        .map(|(party, won)| (party, Into::<u64>::into(*won)))
        .sorted_by(|a, b| b.1.cmp(&a.1))
    {
        let bar = seat_bar(won);
        let _ = writeln!(
            out,
            "{}{:<width$} {:>4} {}",
            indent,
            party,
            won,
            palette.paint(party, &bar),
            width = width
        );
    }
}

/// Render a report as the text printed by the `apportion` command.
pub fn render_report(report: &ApportionmentReport, palette: &PartyPalette) -> String {
    let mut out = String::new();

    for district in &report.districts {
        let _ = writeln!(out, "\n🏛  District: {}", district.district.bright_cyan());
        let _ = writeln!(
            out,
            "   Votes under threshold: {}",
            district.removed.to_string().bright_yellow()
        );
        let _ = writeln!(out, "   Allocations");
        seat_lines(&mut out, &district.allocations, palette, "      ");
    }

    for failure in &report.failures {
        let _ = writeln!(
            out,
            "\n❌ District {} not allocated: {}",
            failure.district.bright_red(),
            failure.reason
        );
    }

    let _ = writeln!(out, "\n📊 Aggregate results ({})", report.method);
    seat_lines(&mut out, &report.aggregate, palette, "      ");
    let _ = writeln!(
        out,
        "\n   Seats allocated: {}   Votes under threshold: {}",
        report.total_seats.to_string().bright_green().bold(),
        report.total_removed.to_string().bright_yellow()
    );
    if !report.failures.is_empty() {
        let _ = writeln!(
            out,
            "   Unallocated districts: {}",
            report.failures.iter().map(|f| f.district.as_str()).join(", ")
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apportion::AllocationMethod;
    use crate::reports::{DistrictFailure, DistrictReport};

    fn seats_of(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(p, s)| (p.to_string(), *s)).collect()
    }

    #[test]
    fn palette_rejects_unknown_colors() {
        let mut names = BTreeMap::new();
        names.insert("A".to_string(), "red".to_string());
        let palette = PartyPalette::from_names(&names).unwrap();
        assert_eq!(palette.color("A"), Some(Color::Red));
        assert_eq!(palette.color("B"), None);

        names.insert("B".to_string(), "chartreuse-ish".to_string());
        assert!(PartyPalette::from_names(&names).is_err());
    }

    #[test]
    fn lists_districts_failures_and_totals() {
        let report = ApportionmentReport {
            method: AllocationMethod::DHondt,
            districts: vec![DistrictReport {
                district: "north".to_string(),
                removed: 12,
                allocations: seats_of(&[("A", 2), ("B", 1)]),
            }],
            failures: vec![DistrictFailure {
                district: "south".to_string(),
                removed: 0,
                reason: "Unresolved seat count for district south: -1".to_string(),
            }],
            aggregate: vec![("A".to_string(), 2), ("B".to_string(), 1)]
                .into_iter()
                .collect(),
            total_seats: 3,
            total_removed: 12,
        };

        let text = render_report(&report, &PartyPalette::new());

        assert!(text.contains("north"));
        assert!(text.contains("12"));
        assert!(text.contains("Aggregate results (D'Hondt)"));
        assert!(text.contains("Unallocated districts: south"));
        assert!(text.contains(&BAR.repeat(2)));
    }

    #[test]
    fn huge_delegations_get_a_truncated_bar() {
        assert_eq!(seat_bar(3), BAR.repeat(3));
        let bar = seat_bar(u64::from(u32::MAX) + 1);
        assert_eq!(bar.chars().count(), MAX_BAR as usize + 1);
        assert!(bar.ends_with('…'));
    }
}
