use std::f64::consts::PI;

use globe_views::core::GeoCoordinate;
use globe_views::projection::{
    self, MERCATOR_LAT_LIMIT_DEG, PlanePoint, ProjectedPoint, Projection,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_coordinate(rng: &mut StdRng) -> GeoCoordinate {
    GeoCoordinate::new(rng.gen_range(-89.999..89.999), rng.gen_range(-180.0..180.0))
}

#[test]
fn cartesian_round_trip_holds_for_random_coordinates() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..1000 {
        let coord = random_coordinate(&mut rng);
        let radius = rng.gen_range(0.001..1000.0);
        let v = projection::to_cartesian(&coord, radius);
        let back = projection::from_cartesian(&v).expect("non-zero vector");
        assert!(
            back.approx_eq(&coord, 1e-9),
            "round trip drifted: {coord:?} -> {back:?} (r = {radius})"
        );
    }
}

#[test]
fn cartesian_convention_negates_longitude() {
    let prime = projection::to_cartesian(&GeoCoordinate::new(0.0, 0.0), 2.0);
    assert!((prime[0] - 2.0).abs() < 1e-12);
    assert!(prime[1].abs() < 1e-12 && prime[2].abs() < 1e-12);

    let east = projection::to_cartesian(&GeoCoordinate::new(0.0, 90.0), 1.0);
    assert!((east[2] + 1.0).abs() < 1e-12, "90°E should sit on -z: {east:?}");

    let north = projection::to_cartesian(&GeoCoordinate::new(90.0, 45.0), 1.0);
    assert!((north[1] - 1.0).abs() < 1e-12);
}

#[test]
fn zero_vector_has_no_coordinate() {
    assert!(projection::from_cartesian(&[0.0, 0.0, 0.0]).is_none());
    assert!(projection::from_cartesian(&[f64::NAN, 0.0, 1.0]).is_none());
}

#[test]
fn azimuthal_places_poles_at_centre_and_rim() {
    let north = projection::to_azimuthal_equidistant(&GeoCoordinate::new(90.0, 123.0));
    assert!(north.x.abs() < 1e-12 && north.y.abs() < 1e-12);

    for lon in [-180.0, -45.0, 0.0, 90.0] {
        let south = projection::to_azimuthal_equidistant(&GeoCoordinate::new(-90.0, lon));
        let r = south.x.hypot(south.y);
        assert!((r - 1.0).abs() < 1e-12, "south pole should lie on the rim, got r = {r}");
    }

    let equator = projection::to_azimuthal_equidistant(&GeoCoordinate::new(0.0, 90.0));
    assert!(equator.x.abs() < 1e-12);
    assert!((equator.y - 0.5).abs() < 1e-12);
}

#[test]
fn azimuthal_inverse_round_trips_and_rejects_outside_disc() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let coord = random_coordinate(&mut rng);
        let p = projection::to_azimuthal_equidistant(&coord);
        let back = projection::from_azimuthal_equidistant(&p).expect("inside disc");
        assert!(back.approx_eq(&coord, 1e-9), "{coord:?} -> {back:?}");
    }

    assert!(projection::from_azimuthal_equidistant(&PlanePoint::new(0.8, 0.8)).is_none());
    assert!(projection::from_azimuthal_equidistant(&PlanePoint::new(1.0 + 1e-6, 0.0)).is_none());
    let pole = projection::from_azimuthal_equidistant(&PlanePoint::new(0.0, 0.0)).unwrap();
    assert_eq!(pole.lat(), 90.0);
}

#[test]
fn mercator_clamps_poles_and_stays_finite() {
    let top = projection::to_mercator(&GeoCoordinate::new(90.0, 0.0));
    assert!(top.y.is_finite());
    assert!((top.y - PI).abs() < 1e-9, "clamped pole should map to y = π, got {}", top.y);

    let bottom = projection::to_mercator(&GeoCoordinate::new(-89.0, 0.0));
    assert!((bottom.y + PI).abs() < 1e-9);

    let equator = projection::to_mercator(&GeoCoordinate::new(0.0, -180.0));
    assert!(equator.y.abs() < 1e-12);
    assert!((equator.x + PI).abs() < 1e-12);
}

#[test]
fn mercator_inverse_wraps_longitude_and_rejects_beyond_limit() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let coord = GeoCoordinate::new(
            rng.gen_range(-MERCATOR_LAT_LIMIT_DEG..MERCATOR_LAT_LIMIT_DEG),
            rng.gen_range(-180.0..180.0),
        );
        let back = projection::from_mercator(&projection::to_mercator(&coord)).unwrap();
        assert!(back.approx_eq(&coord, 1e-9), "{coord:?} -> {back:?}");
    }

    let wrapped = projection::from_mercator(&PlanePoint::new(PI + 0.5, 0.0)).unwrap();
    assert!((wrapped.lon() - (0.5 - PI).to_degrees()).abs() < 1e-9);
    assert!(projection::from_mercator(&PlanePoint::new(0.0, PI + 0.01)).is_none());
}

#[test]
fn projection_enum_dispatches_and_refuses_mismatched_spaces() {
    let coord = GeoCoordinate::new(48.85, 2.35);
    for target in Projection::ALL {
        let point = target.forward(&coord);
        let back = target.inverse(&point).expect("point inside its own image");
        assert!(back.approx_eq(&coord, 1e-9), "{target}: {back:?}");
    }

    let plane = ProjectedPoint::Plane(PlanePoint::new(0.1, 0.1));
    assert!(Projection::Sphere.inverse(&plane).is_none());
    let space = ProjectedPoint::Space([1.0, 0.0, 0.0]);
    assert!(Projection::Mercator.inverse(&space).is_none());

    assert_eq!("flat".parse::<Projection>().unwrap(), Projection::Azimuthal);
    assert_eq!("Globe".parse::<Projection>().unwrap(), Projection::Sphere);
    assert!("conic".parse::<Projection>().is_err());
    assert_eq!(Projection::Sphere.seam_threshold(), None);
}

#[test]
fn coordinates_normalize_longitude_and_clamp_latitude() {
    let c = GeoCoordinate::new(95.0, 190.0);
    assert_eq!(c.lat(), 90.0);
    assert!((c.lon() + 170.0).abs() < 1e-12);

    assert_eq!(GeoCoordinate::new(0.0, 180.0).lon(), -180.0);
    assert_eq!(GeoCoordinate::new(0.0, -540.0).lon(), -180.0);
    assert!(GeoCoordinate::new(0.0, -1e-20).lon() < 180.0);
    assert!(GeoCoordinate::new(f64::NAN, 0.0).lat().is_nan());
}
