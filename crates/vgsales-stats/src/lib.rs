//! Statistical utilities for the video game sales analysis.
//!
//! This crate provides the numeric building blocks used by `vgsales-data`:
//!
//! - **Descriptive statistics**: count, sum, mean, median, sample variance and standard deviation
//! - **Hypothesis testing**: Welch's two-sample t-test with a significance verdict
//! - **Correlation**: Pearson correlation over pairwise-complete observations
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`hypothesis`]: Welch's t-test and [`hypothesis::Verdict`]
//! - [`correlation`]: Pearson correlation coefficient
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use vgsales_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```
//!
//! ## Comparing two samples
//!
//! ```
//! use vgsales_stats::hypothesis::{DEFAULT_ALPHA, Verdict, WelchTTest};
//!
//! let action = [7.0, 8.1, 6.5, 7.7, 8.4];
//! let sports = [7.2, 6.1, 7.9, 6.8, 7.5];
//! let test = WelchTTest::new(&action, &sports).unwrap();
//! assert_eq!(test.verdict(DEFAULT_ALPHA), Verdict::NotRejected);
//! ```

pub mod correlation;
pub mod descriptive;
pub mod hypothesis;
