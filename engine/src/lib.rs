// Engine library root
// This file declares the modules for the dashboard engine crate.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod services;
