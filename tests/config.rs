use std::fs;

use globe_views::config::{ConfigError, load_lines, load_outlines, load_scene};
use globe_views::projection::Projection;
use globe_views::scene::SceneState;

#[test]
fn loads_default_toml_scene() {
    let scene = load_scene("configs/scene.toml").expect("scene.toml");
    assert_eq!(scene.samples, 64);
    assert_eq!(scene.clock.day_of_year, 172);
    assert!(!scene.clock.animate);
    assert_eq!(scene.lines.len(), 4);
    assert_eq!(scene.lines[0].name, "London-Cape Town");
    assert_eq!(scene.lines[0].projection, Projection::Azimuthal);
    assert_eq!(scene.lines[3].projection, Projection::Sphere);

    let outlines = scene.outlines.as_ref().expect("outline path");
    assert!(outlines.ends_with("configs/outlines.yaml"));
    let rings = load_outlines(outlines).expect("outlines");
    assert_eq!(rings.len(), 3);
    assert!(rings.iter().all(|ring| ring.len() > 4));
    // [lon, lat] ordering in the file
    assert!((rings[0][0].lat() - 14.7).abs() < 1e-12);
    assert!((rings[0][0].lon() + 17.5).abs() < 1e-12);
}

#[test]
fn loads_yaml_scene_into_state() {
    let config = load_scene("configs/scene.yaml").expect("scene.yaml");
    assert_eq!(config.samples, 48);
    assert!(config.outlines.is_none());

    let scene = SceneState::from_config(&config).expect("scene state");
    assert_eq!(scene.instant().day_of_year(), 355);
    assert!(scene.is_animating());
    assert_eq!(scene.hours_per_second(), 6.0);
    assert_eq!(scene.samples(), 48);
    let names: Vec<_> = scene.lines().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Anchorage-Perth", "Fiji-Samoa"]);
}

#[test]
fn loads_line_directory_in_file_order() {
    let lines = load_lines("configs/lines").expect("line directory");
    let names: Vec<_> = lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Oslo-Lagos", "Auckland-Honolulu", "Reykjavik-Vladivostok"]);
    assert_eq!(lines[1].projection, Projection::Mercator);
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.toml");
    fs::write(
        &path,
        r#"
[[lines]]
name = "Default view"
start = { lat = 0.0, lon = 0.0 }
end = { lat = 10.0, lon = 200.0 }
"#,
    )
    .unwrap();
    let scene = load_scene(&path).unwrap();
    assert_eq!(scene.samples, 64);
    assert_eq!(scene.clock.day_of_year, 172);
    assert_eq!(scene.clock.hour_of_day, 12.0);
    assert_eq!(scene.lines[0].projection, Projection::Azimuthal);
    assert!((scene.lines[0].end.lon() + 160.0).abs() < 1e-12);
}

#[test]
fn rejects_invalid_scenes() {
    let dir = tempfile::tempdir().unwrap();

    let zero = dir.path().join("zero.yaml");
    fs::write(&zero, "samples: 0\n").unwrap();
    assert!(matches!(load_scene(&zero), Err(ConfigError::Invalid(_))));

    let unnamed = dir.path().join("unnamed.yaml");
    fs::write(
        &unnamed,
        "lines:\n  - name: \" \"\n    start: { lat: 0, lon: 0 }\n    end: { lat: 1, lon: 1 }\n",
    )
    .unwrap();
    assert!(matches!(load_scene(&unnamed), Err(ConfigError::Invalid(_))));

    let bad_view = dir.path().join("bad.toml");
    fs::write(
        &bad_view,
        "name = \"x\"\nstart = { lat = 0.0, lon = 0.0 }\nend = { lat = 1.0, lon = 1.0 }\nprojection = \"conic\"\n",
    )
    .unwrap();
    assert!(matches!(load_lines(&bad_view), Err(ConfigError::Toml(_))));

    assert!(matches!(
        load_scene(dir.path().join("absent.yaml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn duplicate_line_names_fail_scene_construction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dupes.yaml");
    fs::write(
        &path,
        "lines:\n  - name: twin\n    start: { lat: 0, lon: 0 }\n    end: { lat: 1, lon: 1 }\n  - name: twin\n    start: { lat: 2, lon: 2 }\n    end: { lat: 3, lon: 3 }\n",
    )
    .unwrap();
    let config = load_scene(&path).unwrap();
    assert!(SceneState::from_config(&config).is_err());
}
