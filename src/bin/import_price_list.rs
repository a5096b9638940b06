// Bulk-load equipment/labor prices from a CSV file into the catalog.
//
// Usage:
//   cargo run --bin import_price_list -- <db_path> <file.csv>
//
// CSV headers: name,description,category,unit_cost[,is_active]
// Rows are upserted by name; rejected rows are listed on stderr.

use anyhow::{bail, Context};
use network_cost_estimator::{logging, AppState};

fn main() -> anyhow::Result<()> {
    logging::init_from_env();

    let mut args = std::env::args().skip(1);
    let (db_path, csv_path) = match (args.next(), args.next()) {
        (Some(db), Some(csv)) => (db, csv),
        _ => bail!("usage: import_price_list <db_path> <file.csv>"),
    };

    let state = AppState::new(db_path.clone())
        .with_context(|| format!("cannot open database: {}", db_path))?;

    let report = state
        .price_list_importer
        .import_file(&csv_path)
        .with_context(|| format!("import failed: {}", csv_path))?;

    for rejected in &report.rejected {
        eprintln!("row {}: {}", rejected.row, rejected.reason);
    }

    println!(
        "rows={} inserted={} updated={} rejected={}",
        report.total_rows,
        report.inserted,
        report.updated,
        report.rejected_count()
    );
    Ok(())
}
