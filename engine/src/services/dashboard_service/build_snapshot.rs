// Handler for one render pass: filter -> aggregate -> growth -> forecast.
// Infallible by construction; every hard failure belongs to the load, and
// soft preconditions surface as hidden widgets with a note.
use crate::analytics::{aggregate, growth};
use crate::config::settings::DashboardSettings;
use crate::data::table::SalesTable;
use crate::filter;
use shared::models::{DashboardSnapshot, FilterSelections, PeriodSales, SalesForecast, Widget};

pub fn handle_build_snapshot(
    table: &SalesTable,
    selections: &FilterSelections,
    settings: &DashboardSettings,
) -> DashboardSnapshot {
    let view = filter::apply(table, selections);

    let kpis = aggregate::kpi_summary(&view);
    let trend_series = aggregate::sales_by_period(&view);
    let product_mix = aggregate::sales_by_product(&view);
    let leaderboard = aggregate::branch_leaderboard(&view, settings.leaderboard_size);
    let pivot = aggregate::pivot(&view);

    let monthly_trend = if table.has_calendar {
        Widget::Ready(trend_series.clone())
    } else {
        Widget::hidden("Source file has no Year/Month columns; monthly trend unavailable")
    };

    // Growth always compares the dataset's latest two years, so its view
    // applies every predicate except the year filter.
    let growth_view = filter::apply_without_years(table, selections);
    let growth = match growth::year_over_year(&growth_view) {
        Ok(rows) => Widget::Ready(rows),
        Err(e) => {
            tracing::warn!(note = %e, "Hiding growth widget");
            Widget::hidden(e.to_string())
        }
    };

    let forecast = build_forecast(&trend_series);

    DashboardSnapshot {
        kpis,
        monthly_trend,
        product_mix,
        leaderboard,
        pivot,
        growth,
        forecast,
    }
}

#[cfg(feature = "forecast")]
fn build_forecast(trend_series: &[PeriodSales]) -> Widget<SalesForecast> {
    match crate::analytics::forecast::project(trend_series) {
        Ok(forecast) => Widget::Ready(forecast),
        Err(e) => {
            tracing::warn!(note = %e, "Hiding forecast widget");
            Widget::hidden(e.to_string())
        }
    }
}

#[cfg(not(feature = "forecast"))]
fn build_forecast(_trend_series: &[PeriodSales]) -> Widget<SalesForecast> {
    Widget::hidden("Forecasting capability is not available in this build")
}
