use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Three-letter month abbreviation, ordered Jan..Dec so charts sort by
/// calendar position instead of alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonthName {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthName {
    /// Fixed 12-entry mapping from a 1-based month number.
    pub fn from_month(month: u32) -> Option<MonthName> {
        match month {
            1 => Some(MonthName::Jan),
            2 => Some(MonthName::Feb),
            3 => Some(MonthName::Mar),
            4 => Some(MonthName::Apr),
            5 => Some(MonthName::May),
            6 => Some(MonthName::Jun),
            7 => Some(MonthName::Jul),
            8 => Some(MonthName::Aug),
            9 => Some(MonthName::Sep),
            10 => Some(MonthName::Oct),
            11 => Some(MonthName::Nov),
            12 => Some(MonthName::Dec),
            _ => None,
        }
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            MonthName::Jan => "Jan",
            MonthName::Feb => "Feb",
            MonthName::Mar => "Mar",
            MonthName::Apr => "Apr",
            MonthName::May => "May",
            MonthName::Jun => "Jun",
            MonthName::Jul => "Jul",
            MonthName::Aug => "Aug",
            MonthName::Sep => "Sep",
            MonthName::Oct => "Oct",
            MonthName::Nov => "Nov",
            MonthName::Dec => "Dec",
        }
    }
}

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// One normalized row of the sales export.
/// The calendar fields (year, month, period, month_name) are either all Some
/// or all None for every record of a given table, depending on whether the
/// source file carried Year/Month columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub zone: String,
    pub branch: String,
    pub product: String,
    pub sale_amount: f64,
    pub qty: f64,
    pub period: Option<NaiveDate>,
    pub month_name: Option<MonthName>,
}

/// Sorted distinct values per filterable dimension, used by the presentation
/// layer to populate its selectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub zones: Vec<String>,
    pub products: Vec<String>,
    pub branches: Vec<String>,
}

/// A set-membership predicate where an empty selection matches nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequiredSelection<T: Eq + Hash> {
    pub values: HashSet<T>,
}

impl<T: Eq + Hash> RequiredSelection<T> {
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn matches(&self, value: &T) -> bool {
        self.values.contains(value)
    }
}

/// A set-membership predicate where an empty selection omits the predicate
/// entirely, i.e. matches everything. Only the branch filter behaves this
/// way; the asymmetry is deliberate and kept explicit in the type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionalSelection<T: Eq + Hash> {
    pub values: HashSet<T>,
}

impl<T: Eq + Hash> OptionalSelection<T> {
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn unrestricted() -> Self {
        Self {
            values: HashSet::new(),
        }
    }

    pub fn matches(&self, value: &T) -> bool {
        self.values.is_empty() || self.values.contains(value)
    }
}

/// The active filter state supplied by the presentation layer on every
/// interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSelections {
    pub years: RequiredSelection<i32>,
    pub zones: RequiredSelection<String>,
    pub products: RequiredSelection<String>,
    pub branches: OptionalSelection<String>,
}

impl FilterSelections {
    /// Every option selected, the sidebar default of the original dashboard.
    /// Branches start unrestricted so the optional predicate is omitted.
    pub fn select_all(options: &FilterOptions) -> Self {
        FilterSelections {
            years: RequiredSelection::new(options.years.iter().copied()),
            zones: RequiredSelection::new(options.zones.iter().cloned()),
            products: RequiredSelection::new(options.products.iter().cloned()),
            branches: OptionalSelection::unrestricted(),
        }
    }
}

/// Headline KPI card values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Total SaleAmount (ExVat) over the filtered view, in THB.
    pub total_sales: f64,
    /// Total quantity sold, in pieces.
    pub total_qty: f64,
    /// Distinct branches with at least one row where Qty > 0.
    pub active_branches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSales {
    pub period: NaiveDate,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchZoneSales {
    pub branch: String,
    pub zone: String,
    pub sales: f64,
}

/// Branch x product cross-tabulation of summed sales. `products` is the
/// column order shared by every row; missing combinations hold 0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PivotTable {
    pub products: Vec<String>,
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotRow {
    pub branch: String,
    pub cells: Vec<f64>,
}

impl PivotRow {
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }
}

impl PivotTable {
    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(|row| row.total()).sum()
    }
}

/// Year-over-year sales growth for one branch, computed over the latest two
/// distinct years present in the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchGrowth {
    pub branch: String,
    pub previous_year: i32,
    pub latest_year: i32,
    pub previous_sales: f64,
    pub latest_sales: f64,
    pub growth_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period: NaiveDate,
    pub predicted_sales: f64,
}

/// Straight-line extrapolation of the monthly sales trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesForecast {
    pub slope: f64,
    pub intercept: f64,
    pub points: Vec<ForecastPoint>,
}

/// A dashboard widget that either carries its data or is hidden with an
/// informational note (the soft InsufficientData degradation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Widget<T> {
    Ready(T),
    Hidden { note: String },
}

impl<T> Widget<T> {
    pub fn hidden(note: impl Into<String>) -> Self {
        Widget::Hidden { note: note.into() }
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Widget::Ready(value) => Some(value),
            Widget::Hidden { .. } => None,
        }
    }
}

/// Everything one render pass needs: KPIs plus every chart's pre-aggregated
/// table. Rebuilt from scratch on each filter change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub kpis: KpiSummary,
    pub monthly_trend: Widget<Vec<PeriodSales>>,
    pub product_mix: Vec<ProductSales>,
    pub leaderboard: Vec<BranchZoneSales>,
    pub pivot: PivotTable,
    pub growth: Widget<Vec<BranchGrowth>>,
    pub forecast: Widget<SalesForecast>,
}
