use anyhow::anyhow;
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Parser;
use globe_views::core::{GeoCoordinate, SimulatedInstant};
use globe_views::export::sky::{self as export_sky, SkySnapshot};
use globe_views::orbits::OrbitalState;
use globe_views::solar::{self, SolarState};
use std::path::{Path, PathBuf};

/// Report the Sun's position, the terminator and the Earth's orbital state at a simulated instant.
#[derive(Parser, Debug)]
#[command(author, version, about = "Solar and orbital state at a simulated instant")]
struct Cli {
    /// Day of the year (wraps onto 1..=365)
    #[arg(long, default_value_t = 172, allow_negative_numbers = true)]
    day: i64,

    /// Hour of the day, UTC (carries into the day when outside 0..24)
    #[arg(long, default_value_t = 12.0, allow_negative_numbers = true)]
    hour: f64,

    /// UTC timestamp (RFC 3339 or "YYYY-MM-DD HH:MM:SS"); overrides --day/--hour
    #[arg(long)]
    utc: Option<String>,

    /// Latitude of an observer to classify as day or night
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of the observer
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Number of terminator segments in the JSON snapshot
    #[arg(long, default_value_t = 72)]
    terminator_points: usize,

    /// Write a JSON snapshot to this file (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let instant = match &cli.utc {
        Some(stamp) => SimulatedInstant::from_datetime(&parse_utc(stamp)?),
        None => SimulatedInstant::new(cli.day, cli.hour),
    };
    log::info!("evaluating sky at {instant}");

    let sun = SolarState::at(&instant);
    let orbit = OrbitalState::at(instant.fractional_day());
    let snapshot = SkySnapshot {
        day_of_year: instant.day_of_year(),
        hour_of_day: instant.hour_of_day(),
        utc: instant.to_datetime().format("%Y-%m-%d %H:%M:%S").to_string(),
        season: sun.season.label().to_string(),
        declination_deg: sun.declination_deg,
        subsolar_lat_deg: sun.subsolar_point.lat(),
        subsolar_lon_deg: sun.subsolar_point.lon(),
        true_anomaly_rad: orbit.true_anomaly_rad,
        earth_sun_distance_million_km: orbit.distance_million_km,
        orbit_position_million_km: orbit.heliocentric_position(),
        terminator: solar::terminator(&instant, cli.terminator_points)
            .iter()
            .map(|c| [c.lon(), c.lat()])
            .collect(),
    };

    if let Some(path) = &cli.json {
        if path.as_path() == Path::new("-") {
            println!("{}", export_sky::to_json(&snapshot)?);
            return Ok(());
        }
        export_sky::write_snapshot(path, &snapshot)?;
    }

    println!("=== Sky ===");
    println!("Instant         : {} ({} UTC)", instant, snapshot.utc);
    println!("Season          : {}", snapshot.season);
    println!("Declination     : {:+.3}°", sun.declination_deg);
    println!("Subsolar point  : {}", sun.subsolar_point);
    println!(
        "Orbit           : ν = {:.2}°, r = {:.3} million km",
        orbit.true_anomaly_rad.to_degrees(),
        orbit.distance_million_km
    );

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        let observer = GeoCoordinate::new(lat, lon);
        let state = if solar::is_daylight(&observer, &instant) {
            "day"
        } else {
            "night"
        };
        println!(
            "Observer        : {} is in {} (Sun elevation {:+.2}°, noon {:+.2}°, day length {:.2} h)",
            observer,
            state,
            solar::solar_elevation_deg(&observer, &instant),
            solar::noon_elevation_deg(observer.lat(), instant.day_of_year()),
            solar::day_length_hours(observer.lat(), instant.day_of_year()),
        );
    }

    Ok(())
}

fn parse_utc(stamp: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(stamp) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .map_err(|err| anyhow!("invalid UTC timestamp '{stamp}': {err}"))
}
