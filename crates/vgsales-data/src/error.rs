/// The input cannot be read under the documented schema.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SchemaError {
    #[display("failed to read CSV input")]
    #[from]
    Csv(csv::Error),
    #[display("missing required column '{column}'")]
    MissingColumn { column: &'static str },
    #[display("row {row}: required column '{column}' is empty")]
    MissingValue { row: usize, column: &'static str },
    #[display("row {row}: invalid {column} value '{value}': {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// A cleaning step's precondition does not hold.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PreconditionError {
    #[display("identity repair expects exactly two rows without a name, found {} at rows {rows:?}", rows.len())]
    UnexpectedNamelessRows { rows: Vec<usize> },
    #[display("identity repair: nameless rows {first} and {second} differ in platform or year")]
    NamelessRowsDisagree { first: usize, second: usize },
    #[display("identity repair: row {row} not found")]
    RowNotFound { row: usize },
    #[display("row {row}: name is still missing after identity repair")]
    MissingName { row: usize },
    #[display("row {row}: genre is missing")]
    MissingGenre { row: usize },
}

/// Any error that aborts the cleaning pipeline.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CleanError {
    #[display("input does not match the expected schema")]
    Schema(SchemaError),
    #[display("cleaning precondition failed")]
    Precondition(PreconditionError),
}
