use chrono::NaiveDate;
use serde::Serialize;

use crate::price_table::PriceTable;

pub const DATE_FIELD: &str = "Date";
pub const NAME_FIELD: &str = "Name";
pub const PRICE_FIELD: &str = "Stock Prices(USD)";

/// One plotted point: a company's close on a trading date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongFormRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Stock Prices(USD)")]
    pub price: f64,
}

/// Unpivots `table` into one row per present cell.
///
/// Rows come out company by company in table order, each company's dates
/// oldest first. Absent cells produce no row.
pub fn to_long_form(table: &PriceTable) -> Vec<LongFormRow> {
    table
        .rows()
        .iter()
        .flat_map(|row| {
            row.closes.iter().map(|(date, price)| LongFormRow {
                date: *date,
                name: row.name.clone(),
                price: *price,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::price_table::PriceRow;

    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn one_row_per_present_cell() {
        let table = PriceTable::from_rows(vec![
            PriceRow::new("apple", [(d(4), 175.10), (d(5), 170.12)]),
            PriceRow::new("google", [(d(5), 132.67)]),
        ]);
        let rows = to_long_form(&table);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            LongFormRow {
                date: d(4),
                name: "apple".into(),
                price: 175.10
            }
        );
        assert_eq!(rows[2].name, "google");
        assert_eq!(rows[2].date, d(5));
    }

    #[test]
    fn serializes_with_chart_field_names() {
        let row = LongFormRow {
            date: d(5),
            name: "apple".into(),
            price: 170.12,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value[DATE_FIELD], "2024-03-05");
        assert_eq!(value[NAME_FIELD], "apple");
        assert_eq!(value[PRICE_FIELD], 170.12);
    }
}
