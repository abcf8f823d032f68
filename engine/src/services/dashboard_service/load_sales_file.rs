// Handler for loading and normalizing one explicit CSV file, through the
// injected table cache.
use std::path::Path;
use std::sync::Arc;

use crate::config::settings::DashboardSettings;
use crate::data::cache::TableCache;
use crate::data::normalizer::SchemaNormalizer;
use crate::data::reader::EncodedCsvReader;
use crate::data::table::SalesTable;
use crate::error::EngineError;

pub fn handle_load_sales_file(
    path: &Path,
    settings: &DashboardSettings,
    cache: &TableCache,
) -> Result<Arc<SalesTable>, EngineError> {
    if let Some(table) = cache.get(path) {
        tracing::info!(file = %path.display(), rows = table.len(), "Serving sales table from cache");
        return Ok(table);
    }

    let reader = EncodedCsvReader::new(settings.encodings.clone());
    let raw = reader.read(path)?;
    let normalizer = SchemaNormalizer::new(settings.product_rules.clone());
    let table = Arc::new(normalizer.normalize(raw)?);

    tracing::info!(
        file = %path.display(),
        encoding = %table.source_encoding,
        rows = table.len(),
        has_calendar = table.has_calendar,
        "Loaded and normalized sales table"
    );
    if table.coercion.total() > 0 {
        tracing::warn!(
            sale_amount = table.coercion.sale_amount,
            qty = table.coercion.qty,
            "Zeroed unparseable numeric cells during normalization"
        );
    }

    cache.store(path.to_path_buf(), table.clone());
    Ok(table)
}
