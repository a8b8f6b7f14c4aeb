use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::category::Category;
use crate::transaction::{Transaction, TransactionKind};

/// Everything the report artifacts are built from, computed in one pass
/// over the filtered transactions.
#[derive(Debug)]
pub struct Report {
    pub summary: Summary,
    pub category_totals: Vec<CategoryBreakdown>,
    pub daily_activity: Vec<ActivityPoint>,
    pub type_distribution: Vec<TypeSlice>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_earned: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_flow: Decimal,
    pub purchase_count: usize,
    pub sale_count: usize,
    pub most_purchased_item: String,
    pub highest_transaction: HighestTransaction,
    pub item_details: Vec<ItemDetail>,
}

#[derive(Debug, Serialize)]
pub struct HighestTransaction {
    pub market_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_eur: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for HighestTransaction {
    fn default() -> Self {
        Self {
            market_name: "None".to_string(),
            price_eur: Decimal::ZERO,
            kind: String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemDetail {
    #[serde(rename = "Market Name")]
    pub market_name: String,
    pub transaction_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_eur: Decimal,
    pub type_breakdown: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct CategoryBreakdown {
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub earned: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ActivityPoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Market Name")]
    pub market_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TypeSlice {
    pub name: &'static str,
    pub value: usize,
}

#[derive(Default)]
struct ItemAccum {
    count: usize,
    total_cents: Decimal,
    kind_counts: BTreeMap<String, usize>,
}

#[derive(Default)]
struct CategoryAccum {
    spent_cents: Decimal,
    earned_cents: Decimal,
}

#[derive(Default)]
struct DailyAccum {
    total_cents: Decimal,
    count: usize,
}

/// Cents to currency units, rounded only at this output boundary.
fn to_eur(cents: Decimal) -> Decimal {
    (cents / Decimal::ONE_HUNDRED).round_dp(2)
}

impl Report {
    pub fn build(transactions: &[Transaction]) -> Self {
        let mut spent_cents = Decimal::ZERO;
        let mut earned_cents = Decimal::ZERO;
        let mut purchase_count = 0usize;
        let mut sale_count = 0usize;
        let mut purchase_runs: HashMap<&str, usize> = HashMap::new();
        let mut most_purchased: Option<(&str, usize)> = None;
        let mut highest: Option<&Transaction> = None;

        let mut items: BTreeMap<&str, ItemAccum> = BTreeMap::new();
        let mut categories: BTreeMap<Category, CategoryAccum> = BTreeMap::new();
        let mut daily: BTreeMap<(NaiveDate, &str), DailyAccum> = BTreeMap::new();

        for tx in transactions {
            let name = tx.market_name.as_str();

            match tx.kind {
                TransactionKind::Purchase => {
                    spent_cents += tx.price_cents;
                    purchase_count += 1;
                    let run = purchase_runs.entry(name).or_insert(0);
                    *run += 1;
                    // Ties go to whichever item reached the count first.
                    if most_purchased.map_or(true, |(_, best)| *run > best) {
                        most_purchased = Some((name, *run));
                    }
                }
                TransactionKind::Sale => {
                    earned_cents += tx.price_cents;
                    sale_count += 1;
                }
                TransactionKind::Other(_) => {}
            }

            // Strict comparison keeps the first occurrence on ties.
            if highest.map_or(true, |best| tx.price_cents > best.price_cents) {
                highest = Some(tx);
            }

            let item = items.entry(name).or_default();
            item.count += 1;
            item.total_cents += tx.price_cents;
            *item.kind_counts.entry(tx.kind.label().to_string()).or_insert(0) += 1;

            let category = categories.entry(Category::classify(name)).or_default();
            match tx.kind {
                TransactionKind::Purchase => category.spent_cents += tx.price_cents,
                TransactionKind::Sale => category.earned_cents += tx.price_cents,
                TransactionKind::Other(_) => {}
            }

            let day = daily.entry((tx.date, name)).or_default();
            day.total_cents += tx.price_cents;
            day.count += 1;
        }

        let summary = Summary {
            total_spent: to_eur(spent_cents),
            total_earned: to_eur(earned_cents),
            net_flow: to_eur(earned_cents - spent_cents),
            purchase_count,
            sale_count,
            most_purchased_item: most_purchased
                .map_or_else(|| "None".to_string(), |(name, _)| name.to_string()),
            highest_transaction: highest
                .map(|tx| HighestTransaction {
                    market_name: tx.market_name.clone(),
                    price_eur: to_eur(tx.price_cents),
                    kind: tx.kind.label().to_string(),
                })
                .unwrap_or_default(),
            item_details: items
                .into_iter()
                .map(|(name, acc)| ItemDetail {
                    market_name: name.to_string(),
                    transaction_count: acc.count,
                    total_eur: to_eur(acc.total_cents),
                    type_breakdown: acc.kind_counts,
                })
                .collect(),
        };

        let category_totals = categories
            .into_iter()
            .map(|(category, acc)| CategoryBreakdown {
                category,
                spent: to_eur(acc.spent_cents),
                earned: to_eur(acc.earned_cents),
            })
            .collect();

        let daily_activity = daily
            .into_iter()
            .map(|((date, name), acc)| ActivityPoint {
                date,
                market_name: name.to_string(),
                value: to_eur(acc.total_cents),
                count: acc.count,
            })
            .collect();

        let type_distribution = vec![
            TypeSlice {
                name: "Purchases",
                value: purchase_count,
            },
            TypeSlice {
                name: "Sales",
                value: sale_count,
            },
        ];

        Self {
            summary,
            category_totals,
            daily_activity,
            type_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tx(name: &str, kind: TransactionKind, day: u32, month: u32, cents: i64) -> Transaction {
        Transaction {
            market_name: name.to_string(),
            kind,
            date: NaiveDate::from_ymd_opt(1900, month, day).unwrap(),
            price_cents: Decimal::new(cents, 0),
        }
    }

    fn fixture() -> Vec<Transaction> {
        vec![
            tx("AK-47 | Redline", TransactionKind::Sale, 5, 1, 1050),
            tx(
                "Antwerp 2022 Legends Sticker Capsule",
                TransactionKind::Purchase,
                7,
                1,
                250,
            ),
            tx("Kilowatt Case", TransactionKind::Purchase, 13, 2, 150),
            tx("Kilowatt Case", TransactionKind::Purchase, 13, 2, 174),
            tx(
                "Sticker | Crown (Foil)",
                TransactionKind::Other("gift".to_string()),
                10,
                3,
                50,
            ),
        ]
    }

    #[test]
    fn totals_balance() {
        let report = Report::build(&fixture());
        let summary = &report.summary;

        assert_eq!(summary.total_spent, Decimal::new(574, 2));
        assert_eq!(summary.total_earned, Decimal::new(1050, 2));
        assert_eq!(summary.net_flow, Decimal::new(476, 2));
        assert_eq!(summary.total_spent + summary.net_flow, summary.total_earned);
        assert_eq!(summary.purchase_count, 3);
        assert_eq!(summary.sale_count, 1);
    }

    #[test]
    fn most_purchased_is_by_purchase_count() {
        let report = Report::build(&fixture());

        assert_eq!(report.summary.most_purchased_item, "Kilowatt Case");
    }

    #[test]
    fn most_purchased_without_purchases_is_none_label() {
        let report = Report::build(&[tx("AK-47 | Redline", TransactionKind::Sale, 5, 1, 1050)]);

        assert_eq!(report.summary.most_purchased_item, "None");
        assert_eq!(report.summary.total_spent, Decimal::ZERO);
    }

    #[test]
    fn highest_transaction_keeps_first_on_ties() {
        let report = Report::build(&[
            tx("First", TransactionKind::Sale, 5, 1, 1050),
            tx("Second", TransactionKind::Sale, 6, 1, 1050),
        ]);
        let highest = &report.summary.highest_transaction;

        assert_eq!(highest.market_name, "First");
        assert_eq!(highest.price_eur, Decimal::new(1050, 2));
        assert_eq!(highest.kind, "sale");
    }

    #[test]
    fn item_details_are_sorted_and_carry_unknown_types() {
        let report = Report::build(&fixture());
        let items = &report.summary.item_details;

        let names: Vec<&str> = items.iter().map(|i| i.market_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "AK-47 | Redline",
                "Antwerp 2022 Legends Sticker Capsule",
                "Kilowatt Case",
                "Sticker | Crown (Foil)",
            ]
        );

        let kilowatt = &items[2];
        assert_eq!(kilowatt.transaction_count, 2);
        assert_eq!(kilowatt.total_eur, Decimal::new(324, 2));
        assert_eq!(kilowatt.type_breakdown.get("purchase"), Some(&2));

        let gifted = &items[3];
        assert_eq!(gifted.type_breakdown.get("gift"), Some(&1));
    }

    #[test]
    fn category_totals_default_missing_sides_to_zero() {
        let report = Report::build(&fixture());

        let rows: Vec<(Category, Decimal, Decimal)> = report
            .category_totals
            .iter()
            .map(|row| (row.category, row.spent, row.earned))
            .collect();
        assert_eq!(
            rows,
            vec![
                (Category::Capsules, Decimal::new(250, 2), Decimal::ZERO),
                (Category::Cases, Decimal::new(324, 2), Decimal::ZERO),
                (Category::Stickers, Decimal::ZERO, Decimal::ZERO),
                (Category::Weapons, Decimal::ZERO, Decimal::new(1050, 2)),
            ]
        );
    }

    #[test]
    fn daily_activity_groups_by_date_and_item() {
        let report = Report::build(&fixture());
        let points = &report.daily_activity;

        assert_eq!(points.len(), 4);
        assert_eq!(points[0].market_name, "AK-47 | Redline");
        assert_eq!(points[2].market_name, "Kilowatt Case");
        assert_eq!(points[2].value, Decimal::new(324, 2));
        assert_eq!(points[2].count, 2);
        assert_eq!(points[3].market_name, "Sticker | Crown (Foil)");
    }

    #[test]
    fn type_distribution_covers_trades_only() {
        let report = Report::build(&fixture());

        let slices: Vec<(&str, usize)> = report
            .type_distribution
            .iter()
            .map(|slice| (slice.name, slice.value))
            .collect();
        assert_eq!(slices, vec![("Purchases", 3), ("Sales", 1)]);
    }

    #[test]
    fn summary_serializes_with_dashboard_field_names() {
        let report = Report::build(&fixture());
        let value = serde_json::to_value(&report.summary).unwrap();

        assert_eq!(value["total_spent"], json!(5.74));
        assert_eq!(value["net_flow"], json!(4.76));
        assert_eq!(value["purchase_count"], json!(3));
        assert_eq!(value["highest_transaction"]["market_name"], json!("AK-47 | Redline"));
        assert_eq!(value["highest_transaction"]["price_eur"], json!(10.5));
        assert_eq!(value["highest_transaction"]["type"], json!("sale"));
        assert_eq!(value["item_details"][0]["Market Name"], json!("AK-47 | Redline"));
        assert_eq!(value["item_details"][0]["total_eur"], json!(10.5));
    }

    #[test]
    fn chart_rows_serialize_with_dashboard_field_names() {
        let report = Report::build(&fixture());

        let bar = serde_json::to_value(&report.category_totals).unwrap();
        assert_eq!(bar[0]["Category"], json!("Capsules"));
        assert_eq!(bar[0]["spent"], json!(2.5));
        assert_eq!(bar[0]["earned"], json!(0.0));

        let line = serde_json::to_value(&report.daily_activity).unwrap();
        assert_eq!(line[0]["Date"], json!("1900-01-05"));
        assert_eq!(line[0]["Market Name"], json!("AK-47 | Redline"));
        assert_eq!(line[0]["value"], json!(10.5));
        assert_eq!(line[0]["count"], json!(1));

        let pie = serde_json::to_value(&report.type_distribution).unwrap();
        assert_eq!(pie[0], json!({"name": "Purchases", "value": 3}));
        assert_eq!(pie[1], json!({"name": "Sales", "value": 1}));
    }
}
