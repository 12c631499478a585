//! Comparison table display

use vgsales_data::compare::{ComparisonOutcome, Hypothesis};
use vgsales_stats::hypothesis::TTestError;

/// A row in the comparison table
pub(super) struct ComparisonRow<'a> {
    pub hypothesis: &'a Hypothesis,
    pub result: Result<&'a ComparisonOutcome, &'a TTestError>,
}

fn format_header() -> String {
    format!(
        "  {:<28} {:>6} {:>6} {:>8} {:>8} {:>9} {:>8} {:>11} {:>13}",
        "Comparison", "N1", "N2", "Mean1", "Mean2", "t", "df", "p-value", "Verdict",
    )
}

// label(28) + n(6) * 2 + mean(8) * 2 + t(9) + df(8) + p(11) + verdict(13) + spaces(8)
const TABLE_WIDTH: usize = 105;

fn format_row(row: &ComparisonRow) -> String {
    let label = row.hypothesis.to_string();
    match row.result {
        Ok(outcome) => {
            let test = &outcome.test;
            format!(
                "  {:<28} {:>6} {:>6} {:>8.3} {:>8.3} {:>9.3} {:>8.1} {:>11.3e} {:>13}",
                label,
                outcome.first_count,
                outcome.second_count,
                test.first_mean,
                test.second_mean,
                test.statistic,
                test.degrees_of_freedom,
                test.p_value,
                outcome.verdict,
            )
        }
        Err(e) => format!("  {label:<28} error: {e}"),
    }
}

/// Print a formatted comparison table
pub(super) fn print_comparison_table<'a, I>(rows: I)
where
    I: IntoIterator<Item = ComparisonRow<'a>>,
{
    println!("{}", format_header());
    println!("  {}", "-".repeat(TABLE_WIDTH));
    for row in rows {
        println!("{}", format_row(&row));
    }
}

/// Print legend explaining table columns
pub(super) fn print_legend() {
    println!("Legend:");
    println!("  N1, N2       : Games with a user score in each group");
    println!("  t, df        : Welch t statistic and Welch-Satterthwaite degrees of freedom");
    println!("  REJECTED     : p < alpha, mean user scores differ");
    println!("  NOT_REJECTED : p >= alpha, no evidence of a difference (not proof of equality)");
}
