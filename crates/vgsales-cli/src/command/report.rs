use std::path::PathBuf;

use clap::Args;
use vgsales_data::{filter::FilteredTable, report::AnalysisReport};

use crate::{
    command::ParamsArg,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    /// Path to the raw sales CSV file
    pub input: PathBuf,

    #[clap(flatten)]
    pub params: ParamsArg,

    /// Output JSON file path (stdout if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let params = arg.params.resolve()?;
    let cleaned = util::load_cleaned_table(&arg.input)?;
    let filtered = FilteredTable::from_cleaned(&cleaned, &params);

    tracing::info!("computing report");
    let report = AnalysisReport::build(&cleaned, &filtered, &params);
    Output::save_json(&report, arg.output.clone())
}
