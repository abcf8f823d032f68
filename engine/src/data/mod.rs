// Data ingestion layer: locate the CSV, decode it, normalize the schema,
// and cache the resulting table.
pub mod cache;
pub mod locator;
pub mod normalizer;
pub mod reader;
pub mod table;
