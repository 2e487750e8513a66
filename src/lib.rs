//! Legislative seat apportionment across electoral districts.
//!
//! Raw per-party vote counts are filtered against each district's barrier
//! ([`apportion::tally`]), seats are allocated per district with D'Hondt or
//! proportional rounding ([`apportion::allocate`]), and the district results
//! are summed into per-party totals ([`reports::generate_report`]).

pub mod apportion;
pub mod formats;
pub mod model;
pub mod reports;
pub mod util;

pub use apportion::{Allocation, AllocationMethod, ApportionError, ApportionOptions};
pub use model::election::{Barrier, ElectionData, SeatCount, VoteRecord};
pub use reports::{generate_report, ApportionmentReport, DistrictReport};
