// Shared contract crate: the data models exchanged between the dashboard
// engine and any presentation layer, plus display formatting helpers.

pub mod models;
pub mod utils;
