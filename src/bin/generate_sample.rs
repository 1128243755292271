use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ward_stock::config::DashboardConfig;
use ward_stock::data::export::write_csv;
use ward_stock::data::generator::Generator;

/// Usage: `generate_sample [periods] [seed]`
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let periods: usize = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid period count `{s}`"))?,
        None => 30,
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed `{s}`"))?,
        None => 42,
    };

    let config = DashboardConfig::default();
    let mut generator = Generator::seeded(seed, config.value_range());
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("start date")?;
    let department = config.departments.first().context("no departments configured")?;
    let table = generator.periods(department, start, periods);

    let output_path = Path::new("sample_demand.csv");
    write_csv(&table, output_path)?;

    println!(
        "Wrote {} rows (seed {seed}, values {}..={}) to {}",
        table.len(),
        generator.range().low(),
        generator.range().high(),
        output_path.display()
    );
    Ok(())
}
