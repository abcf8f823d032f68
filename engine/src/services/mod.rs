// Service layer: the operations a presentation layer drives.
pub mod dashboard_service;

pub use dashboard_service::DashboardEngine;
