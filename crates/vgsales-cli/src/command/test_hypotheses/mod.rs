//! User-score hypothesis tests
//!
//! Runs every configured comparison on the filtered table and prints one
//! row per comparison. A comparison that cannot be computed is reported in
//! its row and does not stop the others.

mod table;

use std::path::PathBuf;

use clap::Args;
use vgsales_data::{compare, filter::FilteredTable};

use crate::{command::ParamsArg, util};

use self::table::ComparisonRow;

#[derive(Debug, Clone, Args)]
pub(crate) struct TestHypothesesArg {
    /// Path to the raw sales CSV file
    pub input: PathBuf,

    #[clap(flatten)]
    pub params: ParamsArg,
}

pub(crate) fn run(arg: &TestHypothesesArg) -> anyhow::Result<()> {
    let params = arg.params.resolve()?;
    let cleaned = util::load_cleaned_table(&arg.input)?;
    let filtered = FilteredTable::from_cleaned(&cleaned, &params);

    let results = compare::run_comparisons(&filtered.table, &params.hypotheses, params.alpha);

    println!(
        "User Score Comparisons (Welch's t-test, alpha={}, {} games)",
        params.alpha,
        filtered.table.len()
    );
    println!("==========================================\n");
    table::print_comparison_table(results.iter().map(|(hypothesis, result)| ComparisonRow {
        hypothesis,
        result: result.as_ref(),
    }));
    println!();
    table::print_legend();

    Ok(())
}
