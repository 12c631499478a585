use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use vgsales_data::params::AnalysisParams;

use crate::util;

use self::{
    clean::CleanArg, filter::FilterArg, report::ReportArg, test_hypotheses::TestHypothesesArg,
};

mod clean;
mod filter;
mod report;
mod test_hypotheses;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Clean the raw sales CSV and write the cleaned table
    Clean(#[clap(flatten)] CleanArg),
    /// Clean and filter the sales CSV, writing the analysis-ready table
    Filter(#[clap(flatten)] FilterArg),
    /// Compute every aggregate and write them as a JSON report
    Report(#[clap(flatten)] ReportArg),
    /// Compare user scores between groups with Welch's t-test
    TestHypotheses(#[clap(flatten)] TestHypothesesArg),
}

/// Options shared by the commands that depend on analysis parameters
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ParamsArg {
    /// Path to a JSON file with analysis parameters
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Override the significance threshold
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Override the earliest release year kept in the filtered table
    #[arg(long)]
    pub min_year: Option<i32>,
}

impl ParamsArg {
    pub(crate) fn resolve(&self) -> anyhow::Result<AnalysisParams> {
        let mut params = util::read_params_file(self.params.as_ref())?;
        if let Some(alpha) = self.alpha {
            params.alpha = alpha;
        }
        if let Some(min_year) = self.min_year {
            params.min_year = min_year;
        }
        params.validate().context("Invalid analysis parameters")?;
        Ok(params)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Clean(arg) => clean::run(&arg)?,
        Mode::Filter(arg) => filter::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
        Mode::TestHypotheses(arg) => test_hypotheses::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_overrides() {
        let arg = ParamsArg {
            params: None,
            alpha: Some(0.01),
            min_year: Some(2000),
        };
        let params = arg.resolve().unwrap();
        assert_eq!(params.alpha, 0.01);
        assert_eq!(params.min_year, 2000);
        assert_eq!(params.min_platform_total_sales, 10.0);
    }

    #[test]
    fn test_invalid_alpha_is_rejected() {
        let arg = ParamsArg {
            alpha: Some(1.5),
            ..ParamsArg::default()
        };
        assert!(arg.resolve().is_err());
    }

    #[test]
    fn test_parse_subcommands() {
        let args = CommandArgs::try_parse_from([
            "vgsales",
            "test-hypotheses",
            "games.csv",
            "--alpha",
            "0.1",
        ])
        .unwrap();
        let Mode::TestHypotheses(arg) = args.mode else {
            panic!("expected test-hypotheses");
        };
        assert_eq!(arg.params.alpha, Some(0.1));

        let args =
            CommandArgs::try_parse_from(["vgsales", "clean", "games.csv", "-o", "out.csv"])
                .unwrap();
        assert!(matches!(args.mode, Mode::Clean(_)));
    }
}
