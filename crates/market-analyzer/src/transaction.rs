use chrono::NaiveDate;
use rust_decimal::Decimal;

// The export carries day-month dates with no year; anchoring them to a
// fixed year keeps repeated runs byte-identical.
const ANCHOR_YEAR: i32 = 1900;

/// Normalized transaction type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Purchase,
    Sale,
    /// Unrecognized label, kept lowercased
    Other(String),
}

impl TransactionKind {
    /// Folds synonyms case-insensitively; `None` for an empty label.
    pub fn normalize(raw: &str) -> Option<Self> {
        let value = raw.trim().to_lowercase();
        if value.is_empty() {
            return None;
        }

        Some(match value.as_str() {
            "purchase" | "buy" | "bought" => Self::Purchase,
            "sale" | "sell" | "sold" => Self::Sale,
            _ => Self::Other(value),
        })
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Purchase => "purchase",
            Self::Sale => "sale",
            Self::Other(label) => label,
        }
    }

    /// Whether the row counts toward spent/earned totals.
    pub fn is_trade(&self) -> bool {
        matches!(self, Self::Purchase | Self::Sale)
    }
}

/// A single row that survived filtering
#[derive(Debug, Clone)]
pub struct Transaction {
    pub market_name: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub price_cents: Decimal,
}

/// Parses a price written with a comma decimal marker, e.g. `1050,00`.
/// Non-numeric and negative values fail coercion.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let value: Decimal = raw.trim().replace(',', ".").parse().ok()?;

    (value >= Decimal::ZERO).then_some(value)
}

/// Parses a year-less `%d %b` date such as `05 Jan`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{} {ANCHOR_YEAR}", raw.trim()), "%d %b %Y").ok()
}
