use super::CommandResult;
use apportionment::formats::{read_vote_sheet, results_to_value, SheetOptions};
use apportionment::util::write_serialized;
use colored::Colorize;
use std::path::Path;

pub fn convert(sheet: &Path, output: &Path, options: &SheetOptions) -> CommandResult {
    println!("🔍 Reading vote sheet {}", sheet.display().to_string().cyan());

    let data = read_vote_sheet(sheet, options)?;

    println!(
        "📁 Found {} districts and {} parties",
        data.seats.len().to_string().bright_yellow(),
        data.votes.parties().count().to_string().bright_yellow()
    );

    write_serialized(output, &results_to_value(&data))?;

    println!(
        "✅ Wrote {} (seat counts are -1 until filled in)",
        output.display().to_string().bright_green()
    );

    Ok(())
}
