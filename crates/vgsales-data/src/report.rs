//! Serializable bundle of every aggregate of one analysis run

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    compare::{self, ComparisonOutcome, Hypothesis},
    filter::{FilterSummary, FilteredTable},
    params::AnalysisParams,
    record::{GroupColumn, Region, RegionalSales, SalesMetric},
    summary::{
        self, Era, GroupSalesSummary, MissingValues, PlatformLifespan, PlatformYearSales,
        ReleaseSummary, ScoreCorrelations,
    },
    table::GameTable,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisReport {
    pub hypothesis: Hypothesis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ComparisonOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sales summaries of one grouping column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub total: Vec<GroupSalesSummary>,
    pub by_region: BTreeMap<Region, Vec<GroupSalesSummary>>,
}

impl GroupReport {
    fn new(table: &GameTable, column: GroupColumn) -> Self {
        Self {
            total: summary::sales_summary(table, column, SalesMetric::Total),
            by_region: summary::regional_sales_summaries(table, column),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub params: AnalysisParams,
    pub cleaned_rows: usize,
    pub missing_values: MissingValues,
    pub releases_by_year: BTreeMap<i32, ReleaseSummary>,
    pub releases_by_platform: BTreeMap<String, ReleaseSummary>,
    pub high_revenue_platforms: Vec<String>,
    pub high_revenue_yearly_sales: Vec<PlatformYearSales>,
    pub platform_lifespans: Vec<PlatformLifespan>,
    pub mean_permanence_by_era: BTreeMap<Era, f64>,
    pub filter: FilterSummary,
    pub platforms: GroupReport,
    /// Platform totals restricted to platforms of the newest era
    pub new_era_platforms: Vec<GroupSalesSummary>,
    pub genres: GroupReport,
    pub ratings: GroupReport,
    pub regional_totals: RegionalSales,
    pub score_correlations: Vec<ScoreCorrelations>,
    pub multiplatform_titles: BTreeMap<String, BTreeSet<String>>,
    pub hypotheses: Vec<HypothesisReport>,
}

impl AnalysisReport {
    /// Computes every aggregate.
    ///
    /// History-wide aggregates (releases, lifespans) use the cleaned table;
    /// sales summaries, correlations and comparisons use the filtered one.
    #[must_use]
    pub fn build(cleaned: &GameTable, filtered: &FilteredTable, params: &AnalysisParams) -> Self {
        let releases_by_platform = summary::releases_by_platform(cleaned);
        let high_revenue_platforms = summary::high_revenue_platforms(
            &releases_by_platform,
            params.high_revenue_platform_sales,
        );
        let high_revenue_yearly_sales =
            summary::platform_yearly_sales(cleaned, &high_revenue_platforms);
        let platform_lifespans = summary::platform_lifespans(cleaned, params);
        let mean_permanence_by_era = summary::mean_permanence_by_era(&platform_lifespans);

        let table = &filtered.table;
        let platforms = GroupReport::new(table, GroupColumn::Platform);
        let new_era = platform_lifespans
            .iter()
            .filter(|l| l.era == Era::New)
            .map(|l| l.platform.as_str())
            .collect::<BTreeSet<_>>();
        let new_era_platforms = summary::restrict_groups(platforms.total.clone(), &new_era);

        let multiplatform_titles =
            summary::multiplatform_titles(table, &params.multiplatform_platforms);

        let hypotheses = compare::run_comparisons(table, &params.hypotheses, params.alpha)
            .into_iter()
            .map(|(hypothesis, result)| match result {
                Ok(outcome) => HypothesisReport {
                    hypothesis,
                    outcome: Some(outcome),
                    error: None,
                },
                Err(e) => HypothesisReport {
                    hypothesis,
                    outcome: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            params: params.clone(),
            cleaned_rows: cleaned.len(),
            missing_values: MissingValues::from_table(cleaned),
            releases_by_year: summary::releases_by_year(cleaned),
            releases_by_platform,
            high_revenue_platforms,
            high_revenue_yearly_sales,
            platform_lifespans,
            mean_permanence_by_era,
            filter: filtered.summary(cleaned, params),
            platforms,
            new_era_platforms,
            genres: GroupReport::new(table, GroupColumn::Genre),
            ratings: GroupReport::new(table, GroupColumn::Rating),
            regional_totals: summary::regional_totals(table),
            score_correlations: params
                .correlation_platforms
                .iter()
                .map(|platform| summary::score_correlations(table, platform))
                .collect(),
            multiplatform_titles,
            hypotheses,
        }
    }
}
