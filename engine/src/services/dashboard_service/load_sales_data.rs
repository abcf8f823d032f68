// Handler for the directory-scanning load: locate the sales export in the
// configured data directory, then run the shared file-loading pipeline.
use std::sync::Arc;

use crate::config::settings::DashboardSettings;
use crate::data::cache::TableCache;
use crate::data::locator;
use crate::data::table::SalesTable;
use crate::error::EngineError;

use super::load_sales_file;

pub fn handle_load_sales_data(
    settings: &DashboardSettings,
    cache: &TableCache,
) -> Result<Arc<SalesTable>, EngineError> {
    let path = locator::find_sales_csv(&settings.data_dir, &settings.file_marker)?;
    tracing::info!(file = %path.display(), dir = %settings.data_dir.display(), "Located sales export");
    load_sales_file::handle_load_sales_file(&path, settings, cache)
}
