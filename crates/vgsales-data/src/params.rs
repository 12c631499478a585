//! Analysis parameters
//!
//! All thresholds of the analysis live in [`AnalysisParams`]. Every field has
//! a default, so a JSON parameter file only needs the fields it changes:
//!
//! ```json
//! {
//!   "min_year": 2000,
//!   "alpha": 0.01
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vgsales_stats::hypothesis::DEFAULT_ALPHA;

use crate::{compare::Hypothesis, record::GroupColumn};

/// Error returned when parameters are out of their valid range.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamsError {
    #[display("alpha must be within (0, 1), got {alpha}")]
    Alpha { alpha: f64 },
    #[display("{field} must be a non-negative finite number, got {value}")]
    NegativeThreshold { field: &'static str, value: f64 },
    #[display("era cutoffs must satisfy mid < new, got mid={mid} new={new}")]
    EraCutoffs { mid: i32, new: i32 },
}

/// Last-release-year boundaries between platform eras.
///
/// A platform whose last release is before `mid` is old, before `new` is
/// mid, otherwise new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraCutoffs {
    pub mid: i32,
    pub new: i32,
}

impl Default for EraCutoffs {
    fn default() -> Self {
        Self {
            mid: 2000,
            new: 2010,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Earliest release year kept in the filtered table
    pub min_year: i32,
    /// Platforms selling less than this (within the year window) are excluded
    pub min_platform_total_sales: f64,
    /// Significance threshold for hypothesis tests
    pub alpha: f64,
    /// Total sales at or above which a platform counts as high revenue
    pub high_revenue_platform_sales: f64,
    pub era_cutoffs: EraCutoffs,
    /// Corrected first release year for platforms with stray early records
    pub first_year_overrides: BTreeMap<String, i32>,
    /// Platforms whose score/sales correlations are reported
    pub correlation_platforms: Vec<String>,
    /// Platforms checked for titles released on more than one of them
    pub multiplatform_platforms: Vec<String>,
    /// User-score comparisons to run
    pub hypotheses: Vec<Hypothesis>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            min_year: 1994,
            min_platform_total_sales: 10.0,
            alpha: DEFAULT_ALPHA,
            high_revenue_platform_sales: 400.0,
            era_cutoffs: EraCutoffs::default(),
            // one DS title is dated 1985, long before the console existed
            first_year_overrides: BTreeMap::from([("DS".to_owned(), 2004)]),
            correlation_platforms: ["Wii", "X360", "PS4"].map(str::to_owned).to_vec(),
            multiplatform_platforms: ["X360", "PS3", "PS4", "Wii", "XOne"]
                .map(str::to_owned)
                .to_vec(),
            hypotheses: vec![
                Hypothesis::new(GroupColumn::Platform, "XOne", "PC"),
                Hypothesis::new(GroupColumn::Genre, "Action", "Sports"),
            ],
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ParamsError::Alpha { alpha: self.alpha });
        }
        for (field, value) in [
            ("min_platform_total_sales", self.min_platform_total_sales),
            ("high_revenue_platform_sales", self.high_revenue_platform_sales),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::NegativeThreshold { field, value });
            }
        }
        let EraCutoffs { mid, new } = self.era_cutoffs;
        if mid >= new {
            return Err(ParamsError::EraCutoffs { mid, new });
        }
        Ok(())
    }
}
