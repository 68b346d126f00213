//! Geo-astronomical core of the Globe Views visualizer.
//!
//! The member crates hold the pure math (projections, great circles, solar and orbital
//! geometry, cross-view line projection). This crate re-exports them under one roof and adds
//! [`scene::SceneState`], the explicit application state that front-ends own and pass into
//! the core.

pub mod scene;

pub use globe_config as config;
pub use globe_core as core;
pub use globe_crossview as crossview;
pub use globe_export as export;
pub use globe_geodesic as geodesic;
pub use globe_orbits as orbits;
pub use globe_projection as projection;
pub use globe_solar as solar;
