// Aggregator: pure re-groupings of a filtered view. Each function builds
// one chart's pre-aggregated table; everything is recomputed per render.
use crate::filter::FilteredView;
use shared::models::{BranchZoneSales, KpiSummary, PeriodSales, PivotRow, PivotTable, ProductSales};
use std::collections::{BTreeMap, HashSet};

/// Headline KPI cards: total sales, total quantity, and the count of
/// distinct branches with at least one row where Qty > 0.
pub fn kpi_summary(view: &FilteredView<'_>) -> KpiSummary {
    let mut total_sales = 0.0;
    let mut total_qty = 0.0;
    let mut active: HashSet<&str> = HashSet::new();
    for record in view.records() {
        total_sales += record.sale_amount;
        total_qty += record.qty;
        if record.qty > 0.0 {
            active.insert(&record.branch);
        }
    }
    KpiSummary {
        total_sales,
        total_qty,
        active_branches: active.len(),
    }
}

/// Summed sales per Period in ascending time order. Empty when the table
/// has no calendar.
pub fn sales_by_period(view: &FilteredView<'_>) -> Vec<PeriodSales> {
    let mut sums = BTreeMap::new();
    for record in view.records() {
        if let Some(period) = record.period {
            *sums.entry(period).or_insert(0.0) += record.sale_amount;
        }
    }
    sums.into_iter()
        .map(|(period, sales)| PeriodSales { period, sales })
        .collect()
}

/// Summed sales per product, ascending by name (the pie chart slices).
pub fn sales_by_product(view: &FilteredView<'_>) -> Vec<ProductSales> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for record in view.records() {
        *sums.entry(&record.product).or_insert(0.0) += record.sale_amount;
    }
    sums.into_iter()
        .map(|(product, sales)| ProductSales {
            product: product.to_string(),
            sales,
        })
        .collect()
}

/// Branch x zone sums sorted by sales descending (branch name as the
/// tiebreak), truncated to the top N.
pub fn branch_leaderboard(view: &FilteredView<'_>, top_n: usize) -> Vec<BranchZoneSales> {
    let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for record in view.records() {
        *sums
            .entry((record.branch.as_str(), record.zone.as_str()))
            .or_insert(0.0) += record.sale_amount;
    }
    let mut rows: Vec<BranchZoneSales> = sums
        .into_iter()
        .map(|((branch, zone), sales)| BranchZoneSales {
            branch: branch.to_string(),
            zone: zone.to_string(),
            sales,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.sales
            .partial_cmp(&a.sales)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.branch.cmp(&b.branch))
    });
    rows.truncate(top_n);
    rows
}

/// Branch x product pivot of summed sales; rows and columns are sorted and
/// missing combinations hold 0.0.
pub fn pivot(view: &FilteredView<'_>) -> PivotTable {
    let mut products: Vec<&str> = Vec::new();
    let mut branches: Vec<&str> = Vec::new();
    let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for record in view.records() {
        products.push(&record.product);
        branches.push(&record.branch);
        *sums
            .entry((record.branch.as_str(), record.product.as_str()))
            .or_insert(0.0) += record.sale_amount;
    }
    products.sort();
    products.dedup();
    branches.sort();
    branches.dedup();

    let rows = branches
        .iter()
        .map(|branch| PivotRow {
            branch: branch.to_string(),
            cells: products
                .iter()
                .map(|product| sums.get(&(*branch, *product)).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    PivotTable {
        products: products.into_iter().map(String::from).collect(),
        rows,
    }
}
