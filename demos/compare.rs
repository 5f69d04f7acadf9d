//! Compare drivers in a fixture session from the command line.
//!
//! ```text
//! cargo run --example compare -- [root] [year] [event] [kind] [drivers...]
//! cargo run --example compare -- test-data/sessions 2024 "Abu Dhabi" R 4 55 16
//! ```
//!
//! Set `RUST_LOG=paddock=debug` for per-driver detail.

use anyhow::{Context, Result};
use paddock::{Paddock, SessionKey, SessionKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut args = std::env::args().skip(1);
    let root = args.next().unwrap_or_else(|| "test-data/sessions".to_string());
    let year: u16 = match args.next() {
        Some(year) => year.parse().with_context(|| format!("Invalid season {year}"))?,
        None => 2024,
    };
    let event = args.next().unwrap_or_else(|| "Abu Dhabi".to_string());
    let kind: SessionKind = args.next().as_deref().unwrap_or("R").parse()?;
    let mut drivers: Vec<String> = args.collect();

    let dashboard = Paddock::open_fixtures(&root);

    println!("Events {year}: {}", dashboard.event_options(year).await.join(", "));

    let key = SessionKey::new(year, event, kind);
    let overview = dashboard
        .load_session(&key)
        .await
        .with_context(|| format!("Failed to load {key} from {root}"))?;
    println!(
        "{} - {} ({} drivers)",
        overview.event_name, overview.session_name, overview.driver_count
    );
    if drivers.is_empty() {
        drivers = overview.default_selection.clone();
    }

    let report = dashboard.compare(&key, &drivers).await?;

    println!("\nFastest laps");
    for row in &report.fastest_laps {
        let marker = if row.is_overall_fastest { " *" } else { "" };
        println!("  {:>4}  lap {:>3}  {}{}", row.driver, row.lap_number, row.time, marker);
    }

    println!("\nLap grid");
    let header: Vec<String> = report.styles.iter().map(|s| format!("{:>16}", s.label)).collect();
    println!("  lap {}", header.join(""));
    for row in &report.grid.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| format!("{:>16}", format!("{} {}", cell.time_label(), cell.delta_label())))
            .collect();
        println!("  {:>3} {}", row.lap_number, cells.join(""));
    }

    println!("\nTelemetry");
    for driver in &report.telemetry.drivers {
        let top_speed = driver.top_speed().unwrap_or_default();
        println!("  {:>4}  {} samples, top speed {:.1} km/h", driver.driver, driver.channels.len(), top_speed);
    }
    for omitted in &report.telemetry.omitted {
        println!("  {:>4}  omitted: {}", omitted.driver, omitted.reason);
    }

    println!("\nStints");
    for driver in &report.stints {
        let stints: Vec<String> = driver
            .stints
            .iter()
            .map(|s| format!("{:?} {}-{}", s.compound, s.start_lap, s.end_lap))
            .collect();
        println!("  {:>4}  {}", driver.driver, stints.join(", "));
    }

    match report.weather {
        Some(w) => println!(
            "\nWeather: air {:.1}°C, track {:.1}°C, humidity {:.0}%, rain {}",
            w.air_temp,
            w.track_temp,
            w.humidity,
            if w.rainfall { "yes" } else { "no" }
        ),
        None => println!("\nNo weather data"),
    }

    Ok(())
}
