//! Per-district vote sheets, as published in official results tables.
//!
//! Layout: the first row names the parties (column 0 holds the district name),
//! the second row is a sub-header, and the final two rows are totals. Every
//! other row is one district. Cells may use `,` as a thousands separator.

use super::{FormatError, Result};
use crate::apportion::ApportionError;
use crate::model::election::{Barrier, ElectionData, SeatCount, VoteRecord, UNRESOLVED_SEATS};
use calamine::{open_workbook_auto, DataType, Reader};
use csv::ReaderBuilder;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_BARRIER: f64 = 0.03;

const HEADER_ROWS: usize = 2;
const FOOTER_ROWS: usize = 2;

#[derive(Debug, Clone)]
pub struct SheetOptions {
    /// Barrier written for every district.
    pub barrier: f64,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            barrier: DEFAULT_BARRIER,
        }
    }
}

/// Column index of every named party.
fn party_columns(header: &[String]) -> BTreeMap<String, usize> {
    header
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(i, name)| {
            let name = name.trim();
            if name.is_empty() {
                None
            } else {
                Some((name.to_string(), i))
            }
        })
        .collect()
}

fn parse_cell(cell: &str, party: &str, district: &str) -> Result<u64> {
    lazy_static! {
        static ref COUNT_RX: Regex = Regex::new(r"^(\d+|\d{1,3}(,\d{3})+)$").unwrap();
    }

    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(0);
    }
    if !COUNT_RX.is_match(cell) {
        return Err(FormatError::Core(ApportionError::MalformedInput(format!(
            "vote cell for {} in {} is not a count: {:?}",
            party, district, cell
        ))));
    }
    cell.replace(',', "").parse::<u64>().map_err(|e| {
        FormatError::Core(ApportionError::MalformedInput(format!(
            "vote cell for {} in {}: {}",
            party, district, e
        )))
    })
}

/// Turn sheet rows into election data with unresolved seat counts.
pub fn convert_rows(rows: &[Vec<String>], options: &SheetOptions) -> Result<ElectionData> {
    if rows.len() < HEADER_ROWS + FOOTER_ROWS {
        return Err(FormatError::Malformed(format!(
            "vote sheet needs at least {} rows, found {}",
            HEADER_ROWS + FOOTER_ROWS,
            rows.len()
        )));
    }

    let parties = party_columns(&rows[0]);
    let mut votes = VoteRecord::new();
    let mut barrier = Barrier::new();
    let mut seats = SeatCount::new();

    for row in &rows[HEADER_ROWS..rows.len() - FOOTER_ROWS] {
        let district = row.get(0).map(|d| d.trim()).unwrap_or("");
        if district.is_empty() {
            return Err(FormatError::Malformed(format!(
                "row without a district name: {:?}",
                row
            )));
        }

        barrier.insert(district.to_string(), options.barrier);
        seats.insert(district.to_string(), UNRESOLVED_SEATS);

        for (party, column) in &parties {
            let cell = row.get(*column).map(String::as_str).unwrap_or("");
            let count = parse_cell(cell, party, district)?;
            if count > 0 {
                votes.insert(party, district, count);
            }
        }
        debug!(district, "vote sheet row converted");
    }

    Ok(ElectionData::new(votes, barrier, seats))
}

/// Split CSV text into rows. Rows may differ in length.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(String::from).collect());
    }
    Ok(rows)
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => String::new(),
        other => format!("{:?}", other),
    }
}

fn read_spreadsheet_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FormatError::Malformed(format!("{} has no sheets", path.display())))?;
    let sheet = workbook
        .worksheet_range(&first_sheet)
        .ok_or_else(|| FormatError::Malformed(format!("{} has no sheet {}", path.display(), first_sheet)))??;

    Ok(sheet
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Read a `.csv` file or any spreadsheet calamine can open.
pub fn read_vote_sheet(path: &Path, options: &SheetOptions) -> Result<ElectionData> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));

    let rows = if is_csv {
        parse_csv(&fs::read_to_string(path)?)?
    } else {
        read_spreadsheet_rows(path)?
    };

    convert_rows(&rows, options)
}
