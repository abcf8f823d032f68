// Analytics over a filtered view: chart aggregations, year-over-year
// growth, and the optional trend projector.
pub mod aggregate;
pub mod growth;

#[cfg(feature = "forecast")]
pub mod forecast;
