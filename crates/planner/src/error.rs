use thiserror::Error;

/// Errors raised while turning a record into SQL.
#[derive(Debug, Error)]
pub enum QueryBuildError {
    #[error("No data values provided")]
    EmptyRecord,

    #[error("Number of configured columns ({columns}) does not match number of values ({values})")]
    ColumnCountMismatch { columns: usize, values: usize },

    #[error("Configured column '{0}' is missing from the record")]
    MissingColumn(String),
}
