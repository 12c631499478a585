//! User-score comparisons between two groups of a table
//!
//! A [`Hypothesis`] names a categorical column and two of its values. The
//! user scores of both groups (missing scores dropped) are fed to Welch's
//! t-test and the p-value is classified against `alpha`.
//!
//! The null hypothesis is always "the mean user scores are equal". Each
//! comparison is judged on its own; no correction for running several
//! comparisons is applied.

use std::fmt;

use serde::{Deserialize, Serialize};
use vgsales_stats::hypothesis::{TTestError, Verdict, WelchTTest};

use crate::{record::GroupColumn, table::GameTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub column: GroupColumn,
    pub first: String,
    pub second: String,
}

impl Hypothesis {
    #[must_use]
    pub fn new(column: GroupColumn, first: &str, second: &str) -> Self {
        Self {
            column,
            first: first.to_owned(),
            second: second.to_owned(),
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} vs {}", self.column, self.first, self.second)
    }
}

/// Non-missing user scores of the rows where `column == value`.
#[must_use]
pub fn user_scores(table: &GameTable, column: GroupColumn, value: &str) -> Vec<f64> {
    table
        .iter()
        .filter(|g| column.value(g) == Some(value))
        .filter_map(|g| g.user_score)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonOutcome {
    pub first_count: usize,
    pub second_count: usize,
    #[serde(flatten)]
    pub test: WelchTTest,
    pub alpha: f64,
    pub verdict: Verdict,
}

/// Compares the mean user scores of the two groups named by `hypothesis`.
pub fn compare_user_scores(
    table: &GameTable,
    hypothesis: &Hypothesis,
    alpha: f64,
) -> Result<ComparisonOutcome, TTestError> {
    let first = user_scores(table, hypothesis.column, &hypothesis.first);
    let second = user_scores(table, hypothesis.column, &hypothesis.second);
    let test = WelchTTest::new(&first, &second)?;
    let verdict = test.verdict(alpha);
    tracing::info!(
        %hypothesis,
        p_value = test.p_value,
        %verdict,
        "compared user scores"
    );
    Ok(ComparisonOutcome {
        first_count: first.len(),
        second_count: second.len(),
        test,
        alpha,
        verdict,
    })
}

/// Runs every comparison. A failing comparison does not stop the others.
#[must_use]
pub fn run_comparisons(
    table: &GameTable,
    hypotheses: &[Hypothesis],
    alpha: f64,
) -> Vec<(Hypothesis, Result<ComparisonOutcome, TTestError>)> {
    hypotheses
        .iter()
        .map(|hypothesis| {
            let result = compare_user_scores(table, hypothesis, alpha);
            if let Err(e) = &result {
                tracing::warn!(%hypothesis, error = %e, "comparison failed");
            }
            (hypothesis.clone(), result)
        })
        .collect()
}
