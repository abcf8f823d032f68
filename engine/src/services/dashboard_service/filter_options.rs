// Handler for listing the selectable filter values of a loaded table.
use crate::data::table::SalesTable;
use shared::models::FilterOptions;

pub fn handle_filter_options(table: &SalesTable) -> FilterOptions {
    table.filter_options()
}
