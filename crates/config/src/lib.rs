//! Configuration models and loaders for Globe Views scenes.

use std::fs::File;
use std::path::{Path, PathBuf};

use globe_core::GeoCoordinate;
use globe_projection::Projection;
use serde::Deserialize;
use thiserror::Error;

/// A scene manifest: starting clock, sampling density, and the lines to show.
#[derive(Debug, Deserialize, Clone)]
pub struct SceneConfig {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default)]
    pub lines: Vec<LineConfig>,
    /// Optional outline file (YAML or TOML), relative to the manifest.
    #[serde(default)]
    pub outlines: Option<PathBuf>,
}

/// Initial state of the simulated clock.
#[derive(Debug, Deserialize, Clone)]
pub struct ClockConfig {
    #[serde(default = "default_day")]
    pub day_of_year: i64,
    #[serde(default = "default_hour")]
    pub hour_of_day: f64,
    /// Simulated hours that pass per second of wall time while animating.
    #[serde(default = "default_speed")]
    pub hours_per_second: f64,
    #[serde(default)]
    pub animate: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_of_year: default_day(),
            hour_of_day: default_hour(),
            hours_per_second: default_speed(),
            animate: false,
        }
    }
}

/// A line as stored in a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct LineConfig {
    pub name: String,
    pub start: GeoCoordinate,
    pub end: GeoCoordinate,
    #[serde(default = "default_projection")]
    pub projection: Projection,
}

/// Land outlines as rings of `[lon, lat]` pairs (GeoJSON ordering).
#[derive(Debug, Deserialize, Clone)]
pub struct OutlineConfig {
    pub rings: Vec<Vec<[f64; 2]>>,
}

impl OutlineConfig {
    pub fn to_coordinates(&self) -> Vec<Vec<GeoCoordinate>> {
        self.rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(|[lon, lat]| GeoCoordinate::new(*lat, *lon))
                    .collect()
            })
            .collect()
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid scene: {0}")]
    Invalid(String),
}

fn default_samples() -> usize {
    64
}

fn default_day() -> i64 {
    172
}

fn default_hour() -> f64 {
    12.0
}

fn default_speed() -> f64 {
    1.0
}

fn default_projection() -> Projection {
    Projection::Azimuthal
}

/// Load a scene manifest from YAML or TOML (chosen by extension).
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
    let path = path.as_ref();
    let mut scene: SceneConfig = load_document(path)?;
    validate_scene(&scene)?;
    if let Some(outlines) = scene.outlines.take() {
        let resolved = if outlines.is_relative() {
            path.parent()
                .map(|dir| dir.join(&outlines))
                .unwrap_or(outlines)
        } else {
            outlines
        };
        scene.outlines = Some(resolved);
    }
    Ok(scene)
}

/// Load a line catalog: a YAML list, a single TOML record, or a directory of TOML records.
pub fn load_lines<P: AsRef<Path>>(path: P) -> Result<Vec<LineConfig>, ConfigError> {
    load_records(path)
}

/// Load outline rings from YAML or TOML.
pub fn load_outlines<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<GeoCoordinate>>, ConfigError> {
    let outline: OutlineConfig = load_document(path.as_ref())?;
    Ok(outline.to_coordinates())
}

fn validate_scene(scene: &SceneConfig) -> Result<(), ConfigError> {
    if scene.samples == 0 {
        return Err(ConfigError::Invalid("samples must be at least 1".into()));
    }
    if !scene.clock.hours_per_second.is_finite() {
        return Err(ConfigError::Invalid(
            "clock.hours_per_second must be finite".into(),
        ));
    }
    if let Some(line) = scene.lines.iter().find(|l| l.name.trim().is_empty()) {
        return Err(ConfigError::Invalid(format!(
            "line starting at {} has an empty name",
            line.start
        )));
    }
    Ok(())
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_document<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
