use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::AnalyzeError;
use crate::transaction::{parse_date, parse_price, Transaction, TransactionKind};

/// Headers every export must carry besides the price column.
const REQUIRED_COLUMNS: [&str; 4] = ["Game Name", "Acted On", "Type", "Market Name"];

/// Strips surrounding whitespace and quote characters from a header name.
/// Applying it twice changes nothing.
pub fn clean_header(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

/// Resolved indices of the columns the pipeline reads
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    game_name: usize,
    acted_on: usize,
    kind: usize,
    market_name: usize,
    price_cents: usize,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, AnalyzeError> {
        let cleaned: Vec<String> = headers.iter().map(|h| clean_header(h).to_string()).collect();
        debug!("cleaned column names: {cleaned:?}");

        // The monetary column name varies between exports; match it by
        // substring, first hit wins.
        let price_cents = cleaned
            .iter()
            .position(|h| h.contains("Price") && h.contains("Cents"))
            .ok_or_else(|| AnalyzeError::MissingPriceColumn {
                available: cleaned.clone(),
            })?;

        let mut indices = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();
        for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            match cleaned.iter().position(|h| h == name) {
                Some(index) => *slot = index,
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(AnalyzeError::MissingColumns {
                missing,
                available: cleaned,
            });
        }
        let [game_name, acted_on, kind, market_name] = indices;

        Ok(Self {
            game_name,
            acted_on,
            kind,
            market_name,
            price_cents,
        })
    }
}

/// Why a row was silently excluded
#[derive(Debug, Error)]
enum RowError {
    #[error("empty transaction type")]
    EmptyKind,
    #[error("empty market name")]
    EmptyMarketName,
    #[error("unparseable price")]
    BadPrice,
    #[error("unparseable date")]
    BadDate,
}

/// Loads the export at `path` and keeps the normalized rows for `game`.
pub fn load_transactions(
    path: impl AsRef<Path>,
    game: &str,
) -> Result<Vec<Transaction>, AnalyzeError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalyzeError::MissingFile(path.to_path_buf()),
        _ => AnalyzeError::Io(e),
    })?;

    read_transactions(file, game)
}

/// Same as [`load_transactions`], over any reader.
pub fn read_transactions<R: Read>(reader: R, game: &str) -> Result<Vec<Transaction>, AnalyzeError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut transactions = Vec::new();
    let mut total = 0usize;
    let mut matched = 0usize;
    let mut dropped = 0usize;

    for (row, result) in csv_reader.records().enumerate() {
        total += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("dropping row {row}: {e}");
                dropped += 1;

                continue;
            }
        };

        if record.get(columns.game_name).unwrap_or("") != game {
            continue;
        }
        matched += 1;

        match row_to_transaction(&record, &columns) {
            Ok(tx) => transactions.push(tx),
            Err(reason) => {
                debug!("dropping row {row}: {reason}");
                dropped += 1;
            }
        }
    }

    if matched == 0 {
        return Err(AnalyzeError::NoMatchingRows(game.to_string()));
    }
    if !transactions.iter().any(|tx| tx.kind.is_trade()) {
        return Err(AnalyzeError::NoValidTransactions);
    }

    let labels: BTreeSet<&str> = transactions.iter().map(|tx| tx.kind.label()).collect();
    debug!("type labels after normalization: {labels:?}");
    info!(
        "kept {} of {matched} {game} rows ({total} read, {dropped} dropped)",
        transactions.len()
    );

    Ok(transactions)
}

fn row_to_transaction(record: &StringRecord, columns: &ColumnMap) -> Result<Transaction, RowError> {
    let kind = TransactionKind::normalize(record.get(columns.kind).unwrap_or(""))
        .ok_or(RowError::EmptyKind)?;

    let market_name = record.get(columns.market_name).unwrap_or("");
    if market_name.is_empty() {
        return Err(RowError::EmptyMarketName);
    }

    let price_cents =
        parse_price(record.get(columns.price_cents).unwrap_or("")).ok_or(RowError::BadPrice)?;
    let date = parse_date(record.get(columns.acted_on).unwrap_or("")).ok_or(RowError::BadDate)?;

    Ok(Transaction {
        market_name: market_name.to_string(),
        kind,
        date,
        price_cents,
    })
}
