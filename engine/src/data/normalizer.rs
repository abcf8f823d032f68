// Schema Normalizer: turns a RawCsv into an immutable SalesTable.
//
// Order of operations: header validation, numeric coercion, period
// derivation, month-name mapping, product canonicalization.
use crate::config::settings::ProductRule;
use crate::data::reader::RawCsv;
use crate::data::table::{CoercionReport, SalesTable};
use crate::error::EngineError;
use chrono::NaiveDate;
use csv::StringRecord;
use shared::models::{MonthName, SalesRecord};

pub const COL_YEAR: &str = "Year";
pub const COL_MONTH: &str = "Month";
pub const COL_ZONE: &str = "Zone";
pub const COL_BRANCH: &str = "BrName";
pub const COL_PRODUCT: &str = "PrName";
pub const COL_SALE_AMOUNT: &str = "SaleAmount (ExVat)";
pub const COL_QTY: &str = "Qty";

pub struct SchemaNormalizer {
    rules: Vec<ProductRule>,
}

impl SchemaNormalizer {
    pub fn new(rules: Vec<ProductRule>) -> Self {
        Self { rules }
    }

    pub fn normalize(&self, raw: RawCsv) -> Result<SalesTable, EngineError> {
        let zone_idx = required_column(&raw.headers, COL_ZONE)?;
        let branch_idx = required_column(&raw.headers, COL_BRANCH)?;
        let product_idx = required_column(&raw.headers, COL_PRODUCT)?;
        let sale_idx = required_column(&raw.headers, COL_SALE_AMOUNT)?;
        let qty_idx = required_column(&raw.headers, COL_QTY)?;

        // Year/Month are optional as a pair: both present enables the
        // calendar, anything less disables every Period-based feature.
        let year_idx = column(&raw.headers, COL_YEAR);
        let month_idx = column(&raw.headers, COL_MONTH);
        let calendar = match (year_idx, month_idx) {
            (Some(y), Some(m)) => Some((y, m)),
            _ => None,
        };

        let mut coercion = CoercionReport::default();
        let mut records = Vec::with_capacity(raw.records.len());

        for (idx, row) in raw.records.iter().enumerate() {
            let line = idx + 2; // 1-based, after the header row

            let sale_amount = coerce_numeric(field(row, sale_idx), &mut coercion.sale_amount);
            let qty = coerce_numeric(field(row, qty_idx), &mut coercion.qty);

            let (year, month, period, month_name) = match calendar {
                Some((y_idx, m_idx)) => {
                    let (year, month, period) =
                        derive_period(field(row, y_idx), field(row, m_idx), line)?;
                    let month_name = MonthName::from_month(month);
                    (Some(year), Some(month), Some(period), month_name)
                }
                None => (None, None, None, None),
            };

            records.push(SalesRecord {
                year,
                month,
                zone: field(row, zone_idx).to_string(),
                branch: field(row, branch_idx).to_string(),
                product: self.canonicalize(field(row, product_idx)),
                sale_amount,
                qty,
                period,
                month_name,
            });
        }

        Ok(SalesTable::new(
            records,
            calendar.is_some(),
            coercion,
            raw.encoding,
        ))
    }

    /// Ordered substring rules, case-insensitive, first match wins. A name
    /// matching no rule passes through unchanged.
    fn canonicalize(&self, raw_name: &str) -> String {
        let lowered = raw_name.to_lowercase();
        for rule in &self.rules {
            if lowered.contains(&rule.contains.to_lowercase()) {
                return rule.canonical.clone();
            }
        }
        raw_name.to_string()
    }
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn required_column(headers: &StringRecord, name: &str) -> Result<usize, EngineError> {
    column(headers, name)
        .ok_or_else(|| EngineError::SchemaError(format!("Missing required column '{}'", name)))
}

fn field<'a>(row: &'a StringRecord, idx: usize) -> &'a str {
    row.get(idx).unwrap_or("")
}

/// Unparseable, non-finite, or negative values become exactly 0.0 and bump
/// the coercion counter. Never an error, never a dropped row.
fn coerce_numeric(value: &str, failures: &mut usize) -> f64 {
    let cleaned = value.trim().replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => parsed,
        _ => {
            *failures += 1;
            0.0
        }
    }
}

/// Year and Month must be integers with Month in 1..=12; Period is the
/// first of that month. Unlike the monetary columns, a bad calendar cell is
/// a hard SchemaError since the whole time axis would be wrong.
fn derive_period(
    year_str: &str,
    month_str: &str,
    line: usize,
) -> Result<(i32, u32, NaiveDate), EngineError> {
    let year: i32 = year_str.trim().parse().map_err(|_| {
        EngineError::SchemaError(format!("Invalid Year '{}' at line {}", year_str, line))
    })?;
    let month: u32 = month_str.trim().parse().map_err(|_| {
        EngineError::SchemaError(format!("Invalid Month '{}' at line {}", month_str, line))
    })?;
    let period = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::SchemaError(format!(
            "Invalid Year-Month {}-{} at line {}",
            year, month, line
        ))
    })?;
    Ok((year, month, period))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawCsv {
        RawCsv {
            headers: StringRecord::from(headers.to_vec()),
            records: rows
                .iter()
                .map(|row| StringRecord::from(row.to_vec()))
                .collect(),
            encoding: "utf-8".to_string(),
        }
    }

    const FULL_HEADERS: &[&str] = &[
        "Year",
        "Month",
        "Zone",
        "BrName",
        "PrName",
        "SaleAmount (ExVat)",
        "Qty",
    ];

    #[test]
    fn test_normalize_full_schema() {
        let raw = raw(
            FULL_HEADERS,
            &[&["2024", "3", "City", "X", "Milk", "1,500.25", "10"]],
        );
        let table = SchemaNormalizer::new(Vec::new()).normalize(raw).unwrap();

        assert!(table.has_calendar);
        assert_eq!(table.len(), 1);
        let record = &table.records()[0];
        assert_eq!(record.year, Some(2024));
        assert_eq!(record.month, Some(3));
        assert_eq!(record.period, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(record.month_name, Some(MonthName::Mar));
        assert_eq!(record.sale_amount, 1500.25);
        assert_eq!(record.qty, 10.0);
        assert_eq!(table.coercion.total(), 0);
    }

    #[test]
    fn test_invalid_numerics_become_zero_and_are_counted() {
        let raw = raw(
            FULL_HEADERS,
            &[
                &["2024", "1", "City", "X", "A", "abc", "5"],
                &["2024", "1", "City", "X", "A", "100", "-3"],
                &["2024", "1", "City", "X", "A", "", "NaN"],
            ],
        );
        let table = SchemaNormalizer::new(Vec::new()).normalize(raw).unwrap();

        for record in table.records() {
            assert!(record.sale_amount.is_finite() && record.sale_amount >= 0.0);
            assert!(record.qty.is_finite() && record.qty >= 0.0);
        }
        assert_eq!(table.records()[0].sale_amount, 0.0);
        assert_eq!(table.records()[1].qty, 0.0);
        assert_eq!(table.coercion.sale_amount, 2); // "abc" and ""
        assert_eq!(table.coercion.qty, 2); // "-3" and "NaN"
    }

    #[test]
    fn test_missing_required_column_is_schema_error() {
        let raw = raw(
            &["Year", "Month", "Zone", "BrName", "PrName", "Qty"],
            &[&["2024", "1", "City", "X", "A", "5"]],
        );
        let err = SchemaNormalizer::new(Vec::new()).normalize(raw).unwrap_err();
        match err {
            EngineError::SchemaError(msg) => assert!(msg.contains("SaleAmount (ExVat)")),
            other => panic!("expected SchemaError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_calendar_disables_period_fields() {
        let raw = raw(
            &["Zone", "BrName", "PrName", "SaleAmount (ExVat)", "Qty"],
            &[&["City", "X", "A", "100", "5"]],
        );
        let table = SchemaNormalizer::new(Vec::new()).normalize(raw).unwrap();
        assert!(!table.has_calendar);
        let record = &table.records()[0];
        assert_eq!(record.year, None);
        assert_eq!(record.month, None);
        assert_eq!(record.period, None);
        assert_eq!(record.month_name, None);
    }

    #[test]
    fn test_year_without_month_disables_calendar() {
        let raw = raw(
            &["Year", "Zone", "BrName", "PrName", "SaleAmount (ExVat)", "Qty"],
            &[&["2024", "City", "X", "A", "100", "5"]],
        );
        let table = SchemaNormalizer::new(Vec::new()).normalize(raw).unwrap();
        assert!(!table.has_calendar);
        assert_eq!(table.records()[0].year, None);
    }

    #[test]
    fn test_month_out_of_range_is_schema_error() {
        let raw = raw(
            FULL_HEADERS,
            &[&["2024", "13", "City", "X", "A", "100", "5"]],
        );
        let err = SchemaNormalizer::new(Vec::new()).normalize(raw).unwrap_err();
        match err {
            EngineError::SchemaError(msg) => assert!(msg.contains("line 2")),
            other => panic!("expected SchemaError, got {:?}", other),
        }
    }

    #[test]
    fn test_product_rules_first_match_wins() {
        let rules = vec![
            ProductRule {
                contains: "milk uht".to_string(),
                canonical: "UHT Milk".to_string(),
            },
            ProductRule {
                contains: "milk".to_string(),
                canonical: "Milk".to_string(),
            },
        ];
        let raw = raw(
            FULL_HEADERS,
            &[
                &["2024", "1", "City", "X", "MILK UHT 180ml", "100", "5"],
                &["2024", "1", "City", "X", "Fresh Milk 2L", "100", "5"],
                &["2024", "1", "City", "X", "Yogurt Cup", "100", "5"],
            ],
        );
        let table = SchemaNormalizer::new(rules).normalize(raw).unwrap();
        assert_eq!(table.records()[0].product, "UHT Milk");
        assert_eq!(table.records()[1].product, "Milk");
        // No rule matches: name passes through unchanged.
        assert_eq!(table.records()[2].product, "Yogurt Cup");
    }
}
