use std::path::PathBuf;

use clap::Args;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct CleanArg {
    /// Path to the raw sales CSV file
    pub input: PathBuf,

    /// Output CSV file path (stdout if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CleanArg) -> anyhow::Result<()> {
    let cleaned = util::load_cleaned_table(&arg.input)?;
    Output::save_csv(&cleaned, arg.output.clone())
}
