//! Application-owned scene state: the simulated clock and the user's line list.
//!
//! Exactly one driver mutates a [`SceneState`]. Renderers read it, then query the core for
//! derived solar and orbital state each frame.

use globe_config::SceneConfig;
use globe_core::{GeoCoordinate, SimulatedInstant};
use globe_crossview::LineSegment;
use globe_orbits::OrbitalState;
use globe_projection::Projection;
use globe_solar::SolarState;
use log::{debug, info};
use thiserror::Error;

/// Stable handle for a line in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-drawn line with its label.
#[derive(Debug, Clone)]
pub struct SceneLine {
    pub id: LineId,
    pub name: String,
    pub segment: LineSegment,
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("line {0} does not exist")]
    UnknownLine(LineId),
    #[error("a line named '{0}' already exists")]
    DuplicateName(String),
}

/// Clock plus line list.
#[derive(Debug, Clone)]
pub struct SceneState {
    instant: SimulatedInstant,
    hours_per_second: f64,
    animating: bool,
    samples: usize,
    lines: Vec<SceneLine>,
    next_id: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(SimulatedInstant::default())
    }
}

impl SceneState {
    pub fn new(instant: SimulatedInstant) -> Self {
        Self {
            instant,
            hours_per_second: 1.0,
            animating: false,
            samples: globe_crossview::DEFAULT_SAMPLES,
            lines: Vec::new(),
            next_id: 1,
        }
    }

    /// Build the initial scene from a manifest.
    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        let clock = &config.clock;
        let mut scene = Self::new(SimulatedInstant::new(clock.day_of_year, clock.hour_of_day));
        scene.hours_per_second = clock.hours_per_second;
        scene.animating = clock.animate;
        scene.samples = config.samples.max(1);
        for line in &config.lines {
            scene.add_line(&line.name, line.start, line.end, line.projection)?;
        }
        info!(
            "scene ready at {} with {} line(s)",
            scene.instant,
            scene.lines.len()
        );
        Ok(scene)
    }

    pub fn instant(&self) -> SimulatedInstant {
        self.instant
    }

    pub fn set_instant(&mut self, instant: SimulatedInstant) {
        self.instant = instant;
    }

    pub fn hours_per_second(&self) -> f64 {
        self.hours_per_second
    }

    pub fn set_hours_per_second(&mut self, hours_per_second: f64) {
        if hours_per_second.is_finite() {
            self.hours_per_second = hours_per_second;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Samples per line used when reprojecting.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Advance the clock by one rendering tick when animation is enabled.
    pub fn tick(&mut self, delta_seconds: f64) -> SimulatedInstant {
        if self.animating {
            self.instant = self.instant.advance(delta_seconds, self.hours_per_second);
        }
        self.instant
    }

    /// Solar state for the current instant.
    pub fn solar(&self) -> SolarState {
        SolarState::at(&self.instant)
    }

    /// Orbital state for the current instant.
    pub fn orbit(&self) -> OrbitalState {
        OrbitalState::at(self.instant.fractional_day())
    }

    pub fn lines(&self) -> &[SceneLine] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&SceneLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Record a new line. Lines are immutable once added.
    pub fn add_line(
        &mut self,
        name: &str,
        start: GeoCoordinate,
        end: GeoCoordinate,
        source: Projection,
    ) -> Result<LineId, SceneError> {
        if self.lines.iter().any(|l| l.name == name) {
            return Err(SceneError::DuplicateName(name.to_string()));
        }
        let id = LineId(self.next_id);
        self.next_id += 1;
        let segment = LineSegment::new(start, end, source);
        debug!(
            "added line {id} '{name}' on {source}: {:.1} km",
            segment.distance_km()
        );
        self.lines.push(SceneLine {
            id,
            name: name.to_string(),
            segment,
        });
        Ok(id)
    }

    /// Delete a line, returning it.
    pub fn remove_line(&mut self, id: LineId) -> Result<SceneLine, SceneError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or(SceneError::UnknownLine(id))?;
        Ok(self.lines.remove(index))
    }

    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }
}
