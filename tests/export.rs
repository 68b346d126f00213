use std::fs;

use globe_views::core::SimulatedInstant;
use globe_views::export::paths::{self, HEADER, Record};
use globe_views::export::sky::{self, SkySnapshot};
use globe_views::orbits::OrbitalState;
use globe_views::solar::SolarState;

fn snapshot(instant: &SimulatedInstant) -> SkySnapshot {
    let sun = SolarState::at(instant);
    let orbit = OrbitalState::at(instant.fractional_day());
    SkySnapshot {
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
        terminator: vec![[0.0, 90.0], [90.0, 0.0]],
    }
}

#[test]
fn path_records_follow_the_header() {
    let mut writer = paths::csv_writer(Vec::new());
    paths::write_header(&mut writer).unwrap();
    Record {
        line: "Tokyo, Japan",
        source: "mercator",
        target: "sphere",
        segment: 1,
        index: 7,
        x: 0.5,
        y: -0.25,
        z: 1.0,
    }
    .write_to(&mut writer)
    .unwrap();
    let buffer = writer.into_inner().unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER);
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[0], "Tokyo, Japan");
    assert_eq!(&row[3], "1");
    assert_eq!(row[5].parse::<f64>().unwrap(), 0.5);
    assert_eq!(&row[6], "-0.250000000");
}

#[test]
fn awkward_line_names_survive_the_csv_round_trip() {
    let names = ["Quote \"Q\" line", "multi\nline", "plain", "a,b,\"c\""];
    let mut writer = paths::csv_writer(Vec::new());
    paths::write_header(&mut writer).unwrap();
    for (index, name) in names.iter().enumerate() {
        Record {
            line: name,
            source: "azimuthal",
            target: "mercator",
            segment: 0,
            index,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
        .write_to(&mut writer)
        .unwrap();
    }
    let buffer = writer.into_inner().unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let read: Vec<String> = reader
        .records()
        .map(|row| row.unwrap()[0].to_string())
        .collect();
    assert_eq!(read, names);
}

#[test]
fn writer_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out/paths.csv");
    {
        let mut writer = paths::create(&path).unwrap();
        paths::write_header(&mut writer).unwrap();
        writer.flush().unwrap();
    }
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.trim_end(), HEADER.join(","));
}

#[test]
fn sky_snapshot_serializes_to_json() {
    let instant = SimulatedInstant::new(172, 12.0);
    let snap = snapshot(&instant);
    let json = sky::to_json(&snap).unwrap();
    assert!(json.contains("\"season\": \"summer\""));
    assert!(json.contains("\"utc\": \"2023-06-21 12:00:00\""));
    assert!(json.contains("\"terminator\""));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sky/snapshot.json");
    sky::write_snapshot(&path, &snap).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, json);
}
