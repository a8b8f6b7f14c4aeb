use std::path::Path;

pub mod category;
pub mod error;
pub mod loader;
pub mod report;
pub mod transaction;

pub use category::Category;
pub use error::AnalyzeError;
pub use report::Report;
pub use transaction::{Transaction, TransactionKind};

/// The only title the report covers; rows for anything else are ignored.
pub const TARGET_GAME: &str = "Counter-Strike 2";

/// Runs the whole pipeline over the export at `path`: load, filter,
/// normalize, aggregate.
pub fn analyze(path: impl AsRef<Path>) -> Result<Report, AnalyzeError> {
    let transactions = loader::load_transactions(path, TARGET_GAME)?;

    Ok(Report::build(&transactions))
}
