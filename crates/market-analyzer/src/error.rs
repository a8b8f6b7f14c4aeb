use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline errors; row-level problems are dropped, not raised
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("no column containing both \"Price\" and \"Cents\" (available columns: {available:?})")]
    MissingPriceColumn { available: Vec<String> },

    #[error("missing required columns {missing:?} (available columns: {available:?})")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("no rows matched game {0:?}")]
    NoMatchingRows(String),

    #[error("no purchase or sale transactions after filtering")]
    NoValidTransactions,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
