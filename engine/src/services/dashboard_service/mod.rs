// engine/src/services/dashboard_service/mod.rs
// Module hub for the dashboard service: the DashboardEngine struct plus one
// submodule per operation.
use std::path::Path;
use std::sync::Arc;

use crate::config::settings::DashboardSettings;
use crate::data::cache::TableCache;
use crate::data::table::SalesTable;
use crate::error::EngineError;
use shared::models::{DashboardSnapshot, FilterOptions, FilterSelections};

pub mod build_snapshot;
pub mod filter_options;
pub mod load_sales_data;
pub mod load_sales_file;

/// The single entry point a presentation layer talks to. Synchronous and
/// single-threaded: every interaction re-runs filter -> aggregate -> render
/// in full, with the loaded table shared through the injected cache.
#[derive(Debug)]
pub struct DashboardEngine {
    settings: DashboardSettings,
    cache: Arc<TableCache>,
}

impl DashboardEngine {
    pub fn new(settings: DashboardSettings) -> Self {
        Self::with_cache(settings, Arc::new(TableCache::new()))
    }

    /// Injects an explicit cache so callers (and tests) control its
    /// lifetime and invalidation.
    pub fn with_cache(settings: DashboardSettings, cache: Arc<TableCache>) -> Self {
        DashboardEngine { settings, cache }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Scans the configured data directory for the sales export and loads
    /// it. Prefer `load_sales_file` when the caller knows the path.
    pub fn load_sales_data(&self) -> Result<Arc<SalesTable>, EngineError> {
        tracing::info!(dir = %self.settings.data_dir.display(), "Loading sales data by directory scan");
        load_sales_data::handle_load_sales_data(&self.settings, &self.cache)
    }

    pub fn load_sales_file(&self, path: &Path) -> Result<Arc<SalesTable>, EngineError> {
        tracing::info!(file = %path.display(), "Loading sales data from explicit file");
        load_sales_file::handle_load_sales_file(path, &self.settings, &self.cache)
    }

    pub fn filter_options(&self, table: &SalesTable) -> FilterOptions {
        filter_options::handle_filter_options(table)
    }

    pub fn build_snapshot(
        &self,
        table: &SalesTable,
        selections: &FilterSelections,
    ) -> DashboardSnapshot {
        tracing::info!(rows = table.len(), "Building dashboard snapshot");
        build_snapshot::handle_build_snapshot(table, selections, &self.settings)
    }
}
