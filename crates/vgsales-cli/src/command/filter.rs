use std::path::PathBuf;

use clap::Args;
use vgsales_data::filter::FilteredTable;

use crate::{
    command::ParamsArg,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct FilterArg {
    /// Path to the raw sales CSV file
    pub input: PathBuf,

    #[clap(flatten)]
    pub params: ParamsArg,

    /// Output CSV file path (stdout if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FilterArg) -> anyhow::Result<()> {
    let params = arg.params.resolve()?;
    let cleaned = util::load_cleaned_table(&arg.input)?;
    let filtered = FilteredTable::from_cleaned(&cleaned, &params);
    for (platform, total) in &filtered.excluded_platforms {
        tracing::info!(%platform, total, "excluded low-sales platform");
    }
    Output::save_csv(&filtered.table, arg.output.clone())
}
