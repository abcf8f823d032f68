// Year-over-year growth per branch, computed over the latest two distinct
// years present in the supplied view. The comparison must not depend on
// the user's year selection, so callers pass a view built with
// `filter::apply_without_years`.
use crate::filter::FilteredView;
use shared::models::BranchGrowth;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Soft precondition failure: the widget is hidden and this message shown,
/// nothing else fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Year-over-year growth needs data from at least 2 years; found {found}")]
pub struct InsufficientYears {
    pub found: usize,
}

pub fn year_over_year(view: &FilteredView<'_>) -> Result<Vec<BranchGrowth>, InsufficientYears> {
    let years: BTreeSet<i32> = view.records().iter().filter_map(|r| r.year).collect();
    if years.len() < 2 {
        return Err(InsufficientYears { found: years.len() });
    }
    let mut iter = years.into_iter().rev();
    // Non-empty set of at least 2, so both pops succeed.
    let latest_year = iter.next().unwrap_or_default();
    let previous_year = iter.next().unwrap_or_default();

    let mut previous: BTreeMap<&str, f64> = BTreeMap::new();
    let mut latest: BTreeMap<&str, f64> = BTreeMap::new();
    for record in view.records() {
        match record.year {
            Some(y) if y == previous_year => {
                *previous.entry(&record.branch).or_insert(0.0) += record.sale_amount;
            }
            Some(y) if y == latest_year => {
                *latest.entry(&record.branch).or_insert(0.0) += record.sale_amount;
            }
            _ => {}
        }
    }

    let mut rows: Vec<BranchGrowth> = previous
        .iter()
        .filter_map(|(branch, &previous_sales)| {
            // Branches lacking either year are excluded, and a zero
            // previous-year sum is discarded rather than shown as
            // infinite growth.
            let latest_sales = *latest.get(branch)?;
            if previous_sales == 0.0 {
                return None;
            }
            Some(BranchGrowth {
                branch: branch.to_string(),
                previous_year,
                latest_year,
                previous_sales,
                latest_sales,
                growth_pct: (latest_sales - previous_sales) / previous_sales * 100.0,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.growth_pct
            .partial_cmp(&a.growth_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.branch.cmp(&b.branch))
    });
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{CoercionReport, SalesTable};
    use crate::filter;
    use shared::models::{FilterSelections, MonthName, SalesRecord};

    fn record(year: i32, branch: &str, sale_amount: f64) -> SalesRecord {
        SalesRecord {
            year: Some(year),
            month: Some(6),
            zone: "City".to_string(),
            branch: branch.to_string(),
            product: "A".to_string(),
            sale_amount,
            qty: 1.0,
            period: chrono::NaiveDate::from_ymd_opt(year, 6, 1),
            month_name: MonthName::from_month(6),
        }
    }

    fn growth_for(records: Vec<SalesRecord>) -> Result<Vec<BranchGrowth>, InsufficientYears> {
        let table = SalesTable::new(records, true, CoercionReport::default(), "utf-8".to_string());
        let selections = FilterSelections::select_all(&table.filter_options());
        let view = filter::apply(&table, &selections);
        year_over_year(&view)
    }

    #[test]
    fn test_basic_growth_percentage() {
        let rows = growth_for(vec![
            record(2023, "A", 100.0),
            record(2024, "A", 150.0),
        ])
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].previous_year, 2023);
        assert_eq!(rows[0].latest_year, 2024);
        assert_eq!(rows[0].growth_pct, 50.0);
    }

    #[test]
    fn test_zero_previous_year_is_discarded() {
        let rows = growth_for(vec![
            record(2023, "A", 100.0),
            record(2024, "A", 150.0),
            record(2023, "B", 0.0),
            record(2024, "B", 999.0),
        ])
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].branch, "A");
    }

    #[test]
    fn test_branch_missing_a_year_is_excluded() {
        let rows = growth_for(vec![
            record(2023, "A", 100.0),
            record(2024, "A", 150.0),
            record(2024, "OnlyNew", 500.0),
            record(2023, "OnlyOld", 500.0),
        ])
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].branch, "A");
    }

    #[test]
    fn test_uses_latest_two_years_only() {
        let rows = growth_for(vec![
            record(2022, "A", 1.0),
            record(2023, "A", 100.0),
            record(2024, "A", 200.0),
        ])
        .unwrap();
        assert_eq!(rows[0].previous_year, 2023);
        assert_eq!(rows[0].latest_year, 2024);
        assert_eq!(rows[0].growth_pct, 100.0);
    }

    #[test]
    fn test_single_year_is_insufficient() {
        let err = growth_for(vec![record(2024, "A", 100.0)]).unwrap_err();
        assert_eq!(err, InsufficientYears { found: 1 });
    }
}
