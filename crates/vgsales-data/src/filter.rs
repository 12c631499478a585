//! Analysis-ready subset of the cleaned table
//!
//! The filtered table keeps releases from `min_year` onwards (rows without a
//! year are dropped) and then removes platforms whose total sales within
//! that window fall below `min_platform_total_sales`. The cleaned table is
//! left untouched.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{params::AnalysisParams, table::GameTable};

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    pub table: GameTable,
    /// Platforms removed for low sales, with their total within the year window
    pub excluded_platforms: BTreeMap<String, f64>,
}

/// Counts describing what the filter removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSummary {
    pub input_rows: usize,
    pub rows_before_min_year: usize,
    pub rows_without_year: usize,
    pub rows_on_excluded_platforms: usize,
    pub output_rows: usize,
    pub excluded_platforms: BTreeMap<String, f64>,
}

impl FilteredTable {
    /// Builds the filtered table from the cleaned table.
    #[must_use]
    pub fn from_cleaned(cleaned: &GameTable, params: &AnalysisParams) -> Self {
        let recent = cleaned.filter(|g| g.year_of_release.is_some_and(|y| y >= params.min_year));

        let mut platform_totals = BTreeMap::<&str, f64>::new();
        for game in &recent {
            *platform_totals.entry(&game.platform).or_default() += game.total_sales;
        }
        let excluded_platforms = platform_totals
            .into_iter()
            .filter(|(_, total)| *total < params.min_platform_total_sales)
            .map(|(platform, total)| (platform.to_owned(), total))
            .collect::<BTreeMap<_, _>>();

        let table = recent.filter(|g| !excluded_platforms.contains_key(&g.platform));
        tracing::info!(
            rows = table.len(),
            min_year = params.min_year,
            excluded = ?excluded_platforms.keys().collect::<Vec<_>>(),
            "built filtered table"
        );

        Self {
            table,
            excluded_platforms,
        }
    }

    #[must_use]
    pub fn summary(&self, cleaned: &GameTable, params: &AnalysisParams) -> FilterSummary {
        let excluded = self.excluded_platforms.keys().collect::<BTreeSet<_>>();
        let rows_without_year = cleaned
            .iter()
            .filter(|g| g.year_of_release.is_none())
            .count();
        let rows_before_min_year = cleaned
            .iter()
            .filter(|g| g.year_of_release.is_some_and(|y| y < params.min_year))
            .count();
        let rows_on_excluded_platforms = cleaned
            .iter()
            .filter(|g| g.year_of_release.is_some_and(|y| y >= params.min_year))
            .filter(|g| excluded.contains(&g.platform))
            .count();

        FilterSummary {
            input_rows: cleaned.len(),
            rows_before_min_year,
            rows_without_year,
            rows_on_excluded_platforms,
            output_rows: self.table.len(),
            excluded_platforms: self.excluded_platforms.clone(),
        }
    }
}
