// The loaded, normalized sales table. Immutable after normalization; every
// downstream view borrows from it.
use shared::models::{FilterOptions, SalesRecord};
use std::collections::BTreeSet;

/// Count of cells that could not be kept as-is during numeric coercion and
/// were zeroed instead. Invalid numerics never fail the load; this side
/// channel is the only place the data-quality loss shows up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoercionReport {
    pub sale_amount: usize,
    pub qty: usize,
}

impl CoercionReport {
    pub fn total(&self) -> usize {
        self.sale_amount + self.qty
    }
}

#[derive(Debug, Clone)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
    /// True when the source carried both Year and Month columns. When false,
    /// every Period-based feature (trend, growth, forecast) is skipped.
    pub has_calendar: bool,
    pub coercion: CoercionReport,
    pub source_encoding: String,
}

impl SalesTable {
    pub fn new(
        records: Vec<SalesRecord>,
        has_calendar: bool,
        coercion: CoercionReport,
        source_encoding: String,
    ) -> Self {
        SalesTable {
            records,
            has_calendar,
            coercion,
            source_encoding,
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct values per filterable dimension.
    pub fn filter_options(&self) -> FilterOptions {
        let mut years: BTreeSet<i32> = BTreeSet::new();
        let mut zones: BTreeSet<&str> = BTreeSet::new();
        let mut products: BTreeSet<&str> = BTreeSet::new();
        let mut branches: BTreeSet<&str> = BTreeSet::new();

        for record in &self.records {
            if let Some(year) = record.year {
                years.insert(year);
            }
            zones.insert(&record.zone);
            products.insert(&record.product);
            branches.insert(&record.branch);
        }

        FilterOptions {
            years: years.into_iter().collect(),
            zones: zones.into_iter().map(String::from).collect(),
            products: products.into_iter().map(String::from).collect(),
            branches: branches.into_iter().map(String::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, zone: &str, branch: &str, product: &str) -> SalesRecord {
        SalesRecord {
            year: Some(year),
            month: Some(1),
            zone: zone.to_string(),
            branch: branch.to_string(),
            product: product.to_string(),
            sale_amount: 0.0,
            qty: 0.0,
            period: chrono::NaiveDate::from_ymd_opt(year, 1, 1),
            month_name: shared::models::MonthName::from_month(1),
        }
    }

    #[test]
    fn test_filter_options_sorted_distinct() {
        let table = SalesTable::new(
            vec![
                record(2024, "City", "X", "B"),
                record(2023, "Provincial", "Y", "A"),
                record(2024, "City", "X", "A"),
            ],
            true,
            CoercionReport::default(),
            "utf-8".to_string(),
        );
        let options = table.filter_options();
        assert_eq!(options.years, vec![2023, 2024]);
        assert_eq!(options.zones, vec!["City", "Provincial"]);
        assert_eq!(options.products, vec!["A", "B"]);
        assert_eq!(options.branches, vec!["X", "Y"]);
    }
}
