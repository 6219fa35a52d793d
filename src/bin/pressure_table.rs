//! Print recommended pressure across the rider mass range for one setup
//! Usage: cargo run --bin pressure_table -- [ride_style] [rim_type] [front_width] [rear_width] [rim_width]

use tpm::config::Config;
use tpm::models::{PressureRequest, RideStyle, RimType, RIDER_MASS_RANGE, RIM_WIDTH_RANGE, TIRE_WIDTH_RANGE};
use tpm::pressure::PressureEstimator;
use tpm::tools::reports::pressure_sweep;

fn parse_width(args: &[String], index: usize, default: f64) -> Result<f64, Box<dyn std::error::Error>> {
    match args.get(index) {
        Some(s) => Ok(s.parse::<f64>().map_err(|e| format!("Invalid width '{}': {}", s, e))?),
        None => Ok(default),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let defaults = PressureRequest::default();

    let ride_style = match args.get(1) {
        Some(s) => RideStyle::from_str(s).ok_or_else(|| format!("Unknown ride style: {}", s))?,
        None => defaults.ride_style,
    };
    let rim_type = match args.get(2) {
        Some(s) => RimType::from_str(s).ok_or_else(|| format!("Unknown rim type: {}", s))?,
        None => defaults.rim_type,
    };
    let front_tire_width = parse_width(&args, 3, defaults.front_tire_width)?;
    let rear_tire_width = parse_width(&args, 4, front_tire_width)?;
    let inner_rim_width = parse_width(&args, 5, defaults.inner_rim_width)?;

    let request = PressureRequest {
        ride_style,
        rim_type,
        front_tire_width,
        rear_tire_width,
        inner_rim_width,
        ..defaults
    };

    for width in [front_tire_width, rear_tire_width] {
        if !TIRE_WIDTH_RANGE.contains(width) {
            eprintln!("Note: {} mm is outside the usual tire width range", width);
        }
    }
    if !RIM_WIDTH_RANGE.contains(inner_rim_width) {
        eprintln!("Note: {} mm is outside the usual inner rim width range", inner_rim_width);
    }

    let config = Config::from_env()?;
    let estimator = PressureEstimator::new(config.table);

    println!(
        "{} / {} - {} mm front, {} mm rear, {} mm inner rim (pressure table: {})",
        ride_style.display_name(),
        rim_type.display_name(),
        front_tire_width,
        rear_tire_width,
        inner_rim_width,
        config.table_source
    );
    println!("Bike mass {} {}", request.bike_mass, request.mass_unit.as_str());
    println!();
    println!(
        "{:>10}  {:>8}  {:>8}  Note",
        format!("Rider {}", request.mass_unit.as_str()),
        format!("Front {}", request.pressure_unit.as_str()),
        format!("Rear {}", request.pressure_unit.as_str())
    );

    let rows = pressure_sweep(&estimator, &request, RIDER_MASS_RANGE.min, RIDER_MASS_RANGE.max)?;
    for row in &rows {
        let note = row.warning.map(|w| w.message()).unwrap_or("");
        println!(
            "{:>10.1}  {:>8.1}  {:>8.1}  {}",
            row.rider_mass, row.front, row.rear, note
        );
    }

    Ok(())
}
