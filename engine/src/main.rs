// Engine main entry point: a text-mode render shell over the dashboard
// service. Loads the sales export, applies the select-all default filter,
// and prints every widget of one snapshot.
use anyhow::{bail, Context, Result};
use engine::config::settings::DashboardSettings;
use engine::data::table::SalesTable;
use engine::services::DashboardEngine;
use shared::models::{DashboardSnapshot, FilterSelections, Widget};
use shared::utils::{format_pcs, format_pct, format_thb, format_thousands};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting Modern Trade dashboard engine...");

    let settings = DashboardSettings::load_or_default(Path::new("settings.json"))
        .context("Failed to load settings")?;

    // Optional positional argument: an explicit CSV file (recommended) or a
    // directory to scan instead of the configured data_dir.
    let arg = std::env::args().nth(1).map(PathBuf::from);
    let (engine, table) = load_from(settings, arg)?;

    let options = engine.filter_options(&table);
    let selections = FilterSelections::select_all(&options);
    let snapshot = engine.build_snapshot(&table, &selections);

    render(&snapshot);
    Ok(())
}

fn load_from(
    settings: DashboardSettings,
    arg: Option<PathBuf>,
) -> Result<(DashboardEngine, Arc<SalesTable>)> {
    match arg {
        // A mistyped path would otherwise fall into the directory branch
        // and surface as a bare read_dir error; name the argument instead.
        Some(path) if !path.exists() => {
            bail!(
                "Data source '{}' does not exist (expected a CSV file or a directory)",
                path.display()
            )
        }
        Some(path) if path.is_file() => {
            let engine = DashboardEngine::new(settings);
            let table = engine.load_sales_file(&path)?;
            Ok((engine, table))
        }
        Some(path) => {
            let engine = DashboardEngine::new(DashboardSettings {
                data_dir: path,
                ..settings
            });
            let table = engine.load_sales_data()?;
            Ok((engine, table))
        }
        None => {
            let engine = DashboardEngine::new(settings);
            let table = engine.load_sales_data()?;
            Ok((engine, table))
        }
    }
}

fn render(snapshot: &DashboardSnapshot) {
    println!("=== Modern Trade Dashboard ===");
    println!();
    println!("Total sales:     {}", format_thb(snapshot.kpis.total_sales));
    println!("Total quantity:  {}", format_pcs(snapshot.kpis.total_qty));
    println!("Active branches: {}", snapshot.kpis.active_branches);

    println!();
    println!("--- Monthly trend ---");
    match &snapshot.monthly_trend {
        Widget::Ready(points) => {
            for point in points {
                println!(
                    "{}  {}",
                    point.period.format("%Y-%m"),
                    format_thousands(point.sales, 2)
                );
            }
        }
        Widget::Hidden { note } => println!("(hidden: {})", note),
    }

    println!();
    println!("--- Sales by product ---");
    for row in &snapshot.product_mix {
        println!("{:<30} {}", row.product, format_thousands(row.sales, 2));
    }

    println!();
    println!("--- Top branches ---");
    for (rank, row) in snapshot.leaderboard.iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:<12} {}",
            rank + 1,
            row.branch,
            row.zone,
            format_thousands(row.sales, 2)
        );
    }

    println!();
    println!("--- Branch x product pivot ---");
    let header: Vec<String> = snapshot
        .pivot
        .products
        .iter()
        .map(|p| format!("{:>14}", p))
        .collect();
    println!("{:<20} {}", "Branch", header.join(" "));
    for row in &snapshot.pivot.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| format!("{:>14}", format_thousands(*cell, 2)))
            .collect();
        println!("{:<20} {}", row.branch, cells.join(" "));
    }
    println!(
        "{:<20} {}",
        "Grand total",
        format_thousands(snapshot.pivot.grand_total(), 2)
    );

    println!();
    println!("--- Year-over-year growth ---");
    match &snapshot.growth {
        Widget::Ready(rows) => {
            for row in rows {
                println!(
                    "{:<20} {} -> {}: {}",
                    row.branch,
                    row.previous_year,
                    row.latest_year,
                    format_pct(row.growth_pct)
                );
            }
        }
        Widget::Hidden { note } => println!("(hidden: {})", note),
    }

    println!();
    println!("--- Sales forecast (next 3 months) ---");
    match &snapshot.forecast {
        Widget::Ready(forecast) => {
            for point in &forecast.points {
                println!(
                    "{}  {}",
                    point.period.format("%Y-%m"),
                    format_thousands(point.predicted_sales, 2)
                );
            }
        }
        Widget::Hidden { note } => println!("(hidden: {})", note),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_nonexistent_argument_names_the_path() {
        let err = load_from(
            DashboardSettings::default(),
            Some(PathBuf::from("no_such_export.csv")),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("no_such_export.csv"));
        assert!(message.contains("does not exist"));
    }

    #[test]
    fn test_file_argument_loads_directly() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "Year,Month,Zone,BrName,PrName,SaleAmount (ExVat),Qty\n2024,1,City,X,A,100,5\n"
        )
        .unwrap();
        file.flush().unwrap();

        let (_, table) =
            load_from(DashboardSettings::default(), Some(file.path().to_path_buf())).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_directory_argument_overrides_data_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("modern trade.csv"),
            "Year,Month,Zone,BrName,PrName,SaleAmount (ExVat),Qty\n2024,1,City,X,A,100,5\n",
        )
        .unwrap();

        let (_, table) = load_from(
            DashboardSettings::default(),
            Some(dir.path().to_path_buf()),
        )
        .unwrap();
        assert_eq!(table.len(), 1);
    }
}
