//! Projection of static land outlines supplied by the world-geometry collaborator.

use globe_core::GeoCoordinate;
use globe_projection::Projection;

use crate::{ProjectedPath, project_path};

/// Project one outline ring into `target`, breaking it where it wraps around a seam.
///
/// The ring is taken vertex by vertex; outlines are expected to be densified already.
pub fn project_ring(ring: &[GeoCoordinate], target: Projection) -> ProjectedPath {
    project_path(ring, target)
}

/// Project every ring of an outline collection.
pub fn project_rings<'a, I>(rings: I, target: Projection) -> Vec<ProjectedPath>
where
    I: IntoIterator<Item = &'a [GeoCoordinate]>,
{
    rings
        .into_iter()
        .map(|ring| project_ring(ring, target))
        .collect()
}
