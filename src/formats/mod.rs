use crate::apportion::ApportionError;

pub mod results_json;
pub mod vote_sheet;

pub use results_json::{read_results, results_from_value, results_to_value};
pub use vote_sheet::{read_vote_sheet, SheetOptions};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Malformed input: {0}")]
    Malformed(String),
    #[error("Missing required key: {0}")]
    MissingKey(&'static str),
    #[error(transparent)]
    Core(#[from] ApportionError),
}

pub type Result<T> = std::result::Result<T, FormatError>;
