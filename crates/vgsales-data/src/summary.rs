//! Descriptive aggregations over a cleaned or filtered table
//!
//! All functions here are read-only passes over a [`GameTable`].
//!
//! # Overview
//!
//! - [`MissingValues`]: null counts of the nullable columns
//! - [`releases_by_year`], [`releases_by_platform`]: games released and sales
//! - [`high_revenue_platforms`], [`platform_yearly_sales`]: the best sellers over time
//! - [`platform_lifespans`]: first/last release year and era per platform
//! - [`sales_summary`]: count/sum/mean/median/std of a sales metric per group
//! - [`regional_totals`]: overall sales per region
//! - [`score_correlations`]: how review scores track sales on one platform
//! - [`multiplatform_titles`]: titles released on more than one platform of a set
//!
//! Rows with a missing grouping value (unknown year, missing rating) belong
//! to no group and are skipped.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::Serialize;
use vgsales_stats::{correlation, descriptive::DescriptiveStats};

use crate::{
    params::{AnalysisParams, EraCutoffs},
    record::{Game, GroupColumn, Region, RegionalSales, SalesMetric},
    table::GameTable,
};

/// Number of missing values per nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingValues {
    pub year_of_release: usize,
    pub critic_score: usize,
    pub user_score: usize,
    pub rating: usize,
}

impl MissingValues {
    #[must_use]
    pub fn from_table(table: &GameTable) -> Self {
        table.iter().fold(Self::default(), |mut acc, game| {
            acc.year_of_release += usize::from(game.year_of_release.is_none());
            acc.critic_score += usize::from(game.critic_score.is_none());
            acc.user_score += usize::from(game.user_score.is_none());
            acc.rating += usize::from(game.rating.is_none());
            acc
        })
    }
}

/// Games released and their combined sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReleaseSummary {
    pub games_released: usize,
    pub total_sales: f64,
}

impl ReleaseSummary {
    fn add(&mut self, game: &Game) {
        self.games_released += 1;
        self.total_sales += game.total_sales;
    }
}

fn collect_releases<'a, K, F>(table: &'a GameTable, mut key: F) -> BTreeMap<K, ReleaseSummary>
where
    K: Ord,
    F: FnMut(&'a Game) -> Option<K>,
{
    let mut map = BTreeMap::<K, ReleaseSummary>::new();
    for game in table {
        if let Some(key) = key(game) {
            map.entry(key).or_default().add(game);
        }
    }
    map
}

/// Releases per year. Rows without a year are skipped.
#[must_use]
pub fn releases_by_year(table: &GameTable) -> BTreeMap<i32, ReleaseSummary> {
    collect_releases(table, |g| g.year_of_release)
}

#[must_use]
pub fn releases_by_platform(table: &GameTable) -> BTreeMap<String, ReleaseSummary> {
    collect_releases(table, |g| Some(g.platform.clone()))
}

/// Platforms with total sales of at least `threshold`, best seller first.
#[must_use]
pub fn high_revenue_platforms(
    by_platform: &BTreeMap<String, ReleaseSummary>,
    threshold: f64,
) -> Vec<String> {
    let mut platforms = by_platform
        .iter()
        .filter(|(_, summary)| summary.total_sales >= threshold)
        .collect::<Vec<_>>();
    platforms.sort_by(|(_, a), (_, b)| b.total_sales.total_cmp(&a.total_sales));
    platforms.into_iter().map(|(p, _)| p.clone()).collect()
}

/// Releases of one platform in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformYearSales {
    pub platform: String,
    pub year: i32,
    #[serde(flatten)]
    pub summary: ReleaseSummary,
}

/// Per-year releases of the given platforms, ordered by platform then year.
#[must_use]
pub fn platform_yearly_sales(table: &GameTable, platforms: &[String]) -> Vec<PlatformYearSales> {
    collect_releases(table, |g| {
        platforms
            .contains(&g.platform)
            .then_some((g.platform.as_str(), g.year_of_release?))
    })
    .into_iter()
    .map(|((platform, year), summary)| PlatformYearSales {
        platform: platform.to_owned(),
        year,
        summary,
    })
    .collect()
}

/// Market era of a platform, by its last release year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Old,
    Mid,
    New,
}

impl Era {
    #[must_use]
    pub fn from_last_year(last_year: i32, cutoffs: EraCutoffs) -> Self {
        if last_year < cutoffs.mid {
            Era::Old
        } else if last_year < cutoffs.new {
            Era::Mid
        } else {
            Era::New
        }
    }

    fn to_str(self) -> &'static str {
        match self {
            Era::Old => "old",
            Era::Mid => "mid",
            Era::New => "new",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformLifespan {
    pub platform: String,
    pub first_year: i32,
    pub last_year: i32,
    /// Years between the first and last release
    pub permanence: i32,
    pub era: Era,
}

/// First and last release year of every platform.
///
/// `first_year_overrides` replaces the observed first year of the listed
/// platforms. Sorted newest era first, then by permanence descending.
#[must_use]
pub fn platform_lifespans(table: &GameTable, params: &AnalysisParams) -> Vec<PlatformLifespan> {
    let mut ranges = BTreeMap::<&str, (i32, i32)>::new();
    for game in table {
        let Some(year) = game.year_of_release else {
            continue;
        };
        ranges
            .entry(&game.platform)
            .and_modify(|(first, last)| {
                *first = (*first).min(year);
                *last = (*last).max(year);
            })
            .or_insert((year, year));
    }

    let mut lifespans = ranges
        .into_iter()
        .map(|(platform, (first_year, last_year))| {
            let first_year = params
                .first_year_overrides
                .get(platform)
                .copied()
                .unwrap_or(first_year);
            PlatformLifespan {
                platform: platform.to_owned(),
                first_year,
                last_year,
                permanence: last_year - first_year,
                era: Era::from_last_year(last_year, params.era_cutoffs),
            }
        })
        .collect::<Vec<_>>();
    lifespans.sort_by(|a, b| {
        b.era
            .cmp(&a.era)
            .then(b.permanence.cmp(&a.permanence))
            .then_with(|| a.platform.cmp(&b.platform))
    });
    lifespans
}

/// Mean permanence of the platforms in each era.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_permanence_by_era(lifespans: &[PlatformLifespan]) -> BTreeMap<Era, f64> {
    let mut acc = BTreeMap::<Era, (i64, usize)>::new();
    for lifespan in lifespans {
        let (sum, count) = acc.entry(lifespan.era).or_default();
        *sum += i64::from(lifespan.permanence);
        *count += 1;
    }
    acc.into_iter()
        .map(|(era, (sum, count))| (era, sum as f64 / count as f64))
        .collect()
}

/// Distribution of one sales metric within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSalesSummary {
    pub group: String,
    pub games_released: usize,
    pub sales: f64,
    pub mean_sales: f64,
    pub median_sales: f64,
    /// Sample standard deviation, `None` for a single release
    pub std_sales: Option<f64>,
}

/// Summarizes `metric` per value of `column`.
///
/// Sorted by median then mean, both descending.
#[must_use]
pub fn sales_summary(
    table: &GameTable,
    column: GroupColumn,
    metric: SalesMetric,
) -> Vec<GroupSalesSummary> {
    let mut groups = BTreeMap::<&str, Vec<f64>>::new();
    for game in table {
        if let Some(group) = column.value(game) {
            groups.entry(group).or_default().push(metric.value(game));
        }
    }

    let mut summaries = groups
        .into_iter()
        .filter_map(|(group, values)| {
            let stats = DescriptiveStats::new(values)?;
            Some(GroupSalesSummary {
                group: group.to_owned(),
                games_released: stats.count,
                sales: stats.sum,
                mean_sales: stats.mean,
                median_sales: stats.median,
                std_sales: stats.std_dev,
            })
        })
        .collect::<Vec<_>>();
    summaries.sort_by(|a, b| {
        b.median_sales
            .total_cmp(&a.median_sales)
            .then(b.mean_sales.total_cmp(&a.mean_sales))
            .then_with(|| a.group.cmp(&b.group))
    });
    summaries
}

/// Sales summaries of `column` for each region.
#[must_use]
pub fn regional_sales_summaries(
    table: &GameTable,
    column: GroupColumn,
) -> BTreeMap<Region, Vec<GroupSalesSummary>> {
    [Region::Na, Region::Eu, Region::Jp]
        .into_iter()
        .map(|region| (region, sales_summary(table, column, SalesMetric::Region(region))))
        .collect()
}

/// Keeps only the summaries whose group is in `groups`, preserving order.
#[must_use]
pub fn restrict_groups(
    summaries: Vec<GroupSalesSummary>,
    groups: &BTreeSet<&str>,
) -> Vec<GroupSalesSummary> {
    summaries
        .into_iter()
        .filter(|s| groups.contains(s.group.as_str()))
        .collect()
}

/// Sum of every regional sales column.
#[must_use]
pub fn regional_totals(table: &GameTable) -> RegionalSales {
    let mut totals = RegionalSales::default();
    for game in table {
        for region in Region::ALL {
            *totals.get_mut(region) += game.sales(region);
        }
    }
    totals
}

/// Pearson correlations between sales and review scores on one platform.
///
/// Each coefficient uses the rows where both of its values are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCorrelations {
    pub platform: String,
    pub games: usize,
    pub sales_vs_critic: Option<f64>,
    pub sales_vs_user: Option<f64>,
    pub critic_vs_user: Option<f64>,
}

#[must_use]
pub fn score_correlations(table: &GameTable, platform: &str) -> ScoreCorrelations {
    let games = table
        .iter()
        .filter(|g| g.platform == platform)
        .collect::<Vec<_>>();
    let pairs = |x: fn(&Game) -> Option<f64>, y: fn(&Game) -> Option<f64>| {
        correlation::pearson(games.iter().map(|g| (x(g), y(g))))
    };
    ScoreCorrelations {
        platform: platform.to_owned(),
        games: games.len(),
        sales_vs_critic: pairs(|g| Some(g.total_sales), |g| g.critic_score),
        sales_vs_user: pairs(|g| Some(g.total_sales), |g| g.user_score),
        critic_vs_user: pairs(|g| g.critic_score, |g| g.user_score),
    }
}

/// Titles released on more than one of `platforms`, with those platforms.
#[must_use]
pub fn multiplatform_titles(
    table: &GameTable,
    platforms: &[String],
) -> BTreeMap<String, BTreeSet<String>> {
    let mut titles = BTreeMap::<String, BTreeSet<String>>::new();
    for game in table.iter().filter(|g| platforms.contains(&g.platform)) {
        titles
            .entry(game.name.clone())
            .or_default()
            .insert(game.platform.clone());
    }
    titles.retain(|_, on| on.len() > 1);
    titles
}
