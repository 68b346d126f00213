//! Export helpers for CSV and JSON artifacts.

pub mod paths {
    use csv::{Writer, WriterBuilder};
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    pub const HEADER: [&str; 8] = ["line", "source", "target", "segment", "index", "x", "y", "z"];

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// CSV writer over any sink. The header is written explicitly with [`write_header`].
    pub fn csv_writer<W: Write>(inner: W) -> Writer<W> {
        WriterBuilder::new().has_headers(false).from_writer(inner)
    }

    /// CSV writer for the target path, `-` meaning stdout.
    pub fn create(path: &Path) -> io::Result<Writer<Box<dyn Write>>> {
        Ok(csv_writer(writer_for_path(path)?))
    }

    /// Write the standard path CSV header.
    pub fn write_header<W: Write>(writer: &mut Writer<W>) -> csv::Result<()> {
        writer.write_record(HEADER)
    }

    /// One projected vertex of a line path.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub line: &'a str,
        pub source: &'a str,
        pub target: &'a str,
        pub segment: usize,
        pub index: usize,
        pub x: f64,
        pub y: f64,
        pub z: f64,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> csv::Result<()> {
            writer.write_record([
                self.line.to_string(),
                self.source.to_string(),
                self.target.to_string(),
                self.segment.to_string(),
                self.index.to_string(),
                format!("{:.9}", self.x),
                format!("{:.9}", self.y),
                format!("{:.9}", self.z),
            ])
        }
    }
}

pub mod sky {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Solar and orbital state at one simulated instant.
    #[derive(Debug, Clone, Serialize)]
    pub struct SkySnapshot {
        pub day_of_year: u16,
        pub hour_of_day: f64,
        pub utc: String,
        pub season: String,
        pub declination_deg: f64,
        pub subsolar_lat_deg: f64,
        pub subsolar_lon_deg: f64,
        pub true_anomaly_rad: f64,
        pub earth_sun_distance_million_km: f64,
        pub orbit_position_million_km: [f64; 2],
        /// Terminator ring as `[lon, lat]` pairs.
        pub terminator: Vec<[f64; 2]>,
    }

    /// Write the snapshot as pretty JSON, creating parent directories as needed.
    pub fn write_snapshot(output: &Path, snapshot: &SkySnapshot) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(output)?, snapshot)?;
        Ok(())
    }

    /// Render the snapshot as pretty JSON.
    pub fn to_json(snapshot: &SkySnapshot) -> serde_json::Result<String> {
        serde_json::to_string_pretty(snapshot)
    }
}
