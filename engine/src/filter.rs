// Filter Engine: conjunction of set-membership predicates over the
// categorical dimensions. Produces a borrowed, read-only view; the
// underlying table is never mutated.
use crate::data::table::SalesTable;
use shared::models::{FilterSelections, SalesRecord};

/// A read-only subset of the table's records matching the active filter.
/// Recomputed in full on every filter change.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a SalesRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-applies a selection to an already-filtered view. Refining with
    /// the selections that produced the view yields the same set.
    pub fn refine(&self, selections: &FilterSelections) -> FilteredView<'a> {
        FilteredView {
            records: self
                .records
                .iter()
                .copied()
                .filter(|record| matches(record, selections))
                .collect(),
        }
    }
}

pub fn apply<'a>(table: &'a SalesTable, selections: &FilterSelections) -> FilteredView<'a> {
    FilteredView {
        records: table
            .records()
            .iter()
            .filter(|record| matches(record, selections))
            .collect(),
    }
}

/// Applies every predicate except the year filter. The growth widget
/// always compares the dataset's latest two years, so its view must not
/// shrink with the year selection.
pub fn apply_without_years<'a>(
    table: &'a SalesTable,
    selections: &FilterSelections,
) -> FilteredView<'a> {
    FilteredView {
        records: table
            .records()
            .iter()
            .filter(|record| matches_without_years(record, selections))
            .collect(),
    }
}

fn matches(record: &SalesRecord, selections: &FilterSelections) -> bool {
    // Calendar-less tables carry no year, so the year predicate is vacuous
    // for them; the other required predicates still apply.
    let year_ok = match record.year {
        Some(year) => selections.years.matches(&year),
        None => true,
    };
    year_ok && matches_without_years(record, selections)
}

fn matches_without_years(record: &SalesRecord, selections: &FilterSelections) -> bool {
    selections.zones.matches(&record.zone)
        && selections.products.matches(&record.product)
        && selections.branches.matches(&record.branch)
}
