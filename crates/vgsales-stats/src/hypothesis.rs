//! Two-sample hypothesis testing
//!
//! Welch's t-test compares the means of two independent samples without
//! assuming equal variances. The test statistic is
//!
//! ```text
//! t = (mean1 - mean2) / sqrt(var1 / n1 + var2 / n2)
//! ```
//!
//! and the degrees of freedom follow the Welch-Satterthwaite approximation.
//! The two-tailed p-value is read off Student's t distribution.

use std::fmt;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::descriptive::DescriptiveStats;

/// Default significance threshold.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Error returned when the t-test cannot be computed.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TTestError {
    #[display(
        "insufficient data: samples have {first_len} and {second_len} observations, at least 2 each required"
    )]
    InsufficientData { first_len: usize, second_len: usize },
    #[display("both samples have zero variance, test statistic is undefined")]
    ZeroVariance,
}

/// Outcome of comparing a p-value against the significance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// `p < alpha`: the means are declared different.
    Rejected,
    /// `p >= alpha`: not enough evidence for a difference.
    ///
    /// This is not evidence that the means are equal.
    NotRejected,
}

impl Verdict {
    /// Classifies a p-value against `alpha`.
    #[must_use]
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha {
            Verdict::Rejected
        } else {
            Verdict::NotRejected
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Rejected => "REJECTED",
            Verdict::NotRejected => "NOT_REJECTED",
        };
        fmt::Display::fmt(s, f)
    }
}

/// Result of Welch's two-sample t-test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WelchTTest {
    /// Mean of the first sample
    pub first_mean: f64,
    /// Mean of the second sample
    pub second_mean: f64,
    /// The t statistic (positive when the first mean is larger)
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value in `[0, 1]`
    pub p_value: f64,
}

impl WelchTTest {
    /// Runs Welch's t-test on two samples.
    ///
    /// Both samples must already have missing values removed and contain at
    /// least two observations each.
    ///
    /// # Examples
    ///
    /// ```
    /// use vgsales_stats::hypothesis::{Verdict, WelchTTest};
    ///
    /// let test = WelchTTest::new(&[8.0, 9.0, 7.0, 8.0, 9.0], &[5.0, 4.0, 6.0, 5.0, 4.0]).unwrap();
    /// assert!(test.p_value < 0.05);
    /// assert_eq!(test.verdict(0.05), Verdict::Rejected);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new(first: &[f64], second: &[f64]) -> Result<Self, TTestError> {
        let insufficient = || TTestError::InsufficientData {
            first_len: first.len(),
            second_len: second.len(),
        };
        let first_stats = DescriptiveStats::new(first.iter().copied()).ok_or_else(insufficient)?;
        let second_stats =
            DescriptiveStats::new(second.iter().copied()).ok_or_else(insufficient)?;
        let (Some(var1), Some(var2)) = (first_stats.variance, second_stats.variance) else {
            return Err(insufficient());
        };

        let n1 = first_stats.count as f64;
        let n2 = second_stats.count as f64;
        let se1 = var1 / n1;
        let se2 = var2 / n2;
        let se_sum = se1 + se2;
        if se_sum <= 0.0 {
            return Err(TTestError::ZeroVariance);
        }

        let statistic = (first_stats.mean - second_stats.mean) / se_sum.sqrt();
        let degrees_of_freedom =
            se_sum.powi(2) / (se1.powi(2) / (n1 - 1.0) + se2.powi(2) / (n2 - 1.0));

        // location 0 and scale 1 with positive finite freedom are always valid
        let p_value = match StudentsT::new(0.0, 1.0, degrees_of_freedom) {
            Ok(dist) => (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0),
            Err(_) => return Err(TTestError::ZeroVariance),
        };

        Ok(Self {
            first_mean: first_stats.mean,
            second_mean: second_stats.mean,
            statistic,
            degrees_of_freedom,
            p_value,
        })
    }

    /// Classifies this result against the significance threshold.
    #[must_use]
    pub fn verdict(&self, alpha: f64) -> Verdict {
        Verdict::from_p_value(self.p_value, alpha)
    }
}
