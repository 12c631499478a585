//! Cleaning and analysis of the video game sales dataset
//!
//! This crate turns the raw sales CSV (one row per title and platform, with
//! regional sales, review scores and an age rating) into an analysis-ready
//! table and computes the aggregates and user-score comparisons built on it.
//!
//! # Overview
//!
//! Data flows one way through the crate:
//!
//! 1. **Load** ([`table::RawTable`]): read the CSV as untyped text cells
//! 2. **Clean** ([`clean::clean`]): normalize headers, coerce types, repair the
//!    nameless rows, drop duplicate releases and derive `total_sales`
//! 3. **Filter** ([`filter::FilteredTable`]): keep recent releases on
//!    platforms that sold enough
//! 4. **Summarize** ([`summary`]): releases per year and platform, platform
//!    lifespans, per-group sales distributions, score correlations
//! 5. **Compare** ([`compare`]): Welch's t-test on the user scores of two
//!    groups
//!
//! [`report::AnalysisReport`] bundles steps 3 to 5 into one serializable
//! value. All thresholds come from [`params::AnalysisParams`].
//!
//! # Examples
//!
//! ```no_run
//! use vgsales_data::{
//!     clean, filter::FilteredTable, params::AnalysisParams, report::AnalysisReport,
//!     table::RawTable,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let cleaned = clean::clean(RawTable::from_path("games.csv")?)?;
//! let params = AnalysisParams::default();
//! let filtered = FilteredTable::from_cleaned(&cleaned, &params);
//!
//! let report = AnalysisReport::build(&cleaned, &filtered, &params);
//! for outcome in &report.hypotheses {
//!     println!("{}: {:?}", outcome.hypothesis, outcome.outcome.as_ref().map(|o| o.verdict));
//! }
//! # Ok(())
//! # }
//! ```

pub mod clean;
pub mod compare;
pub mod error;
pub mod filter;
pub mod params;
pub mod record;
pub mod report;
pub mod summary;
pub mod table;

#[cfg(test)]
mod test_util;
