use std::path::PathBuf;

use footprint::viewer::VolumeClass;
use footprint::{Settings, run_batch};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("footprint-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn batch_merges_index_and_skips_failures() {
    let files = [
        fixture("simple_wall.ccl"),
        fixture("duplicate_label.ccl"),
        fixture("foundation_east.ccl"),
        fixture("dirt_berm.ccl"),
    ];
    let settings = Settings::default();
    let report = run_batch(&files, &settings).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].file().ends_with("duplicate_label.ccl"));

    let names: Vec<_> = report.documents().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        ["wallA", "foundationEast", "dirtFoundationEast", "dirtBerm"]
    );

    let building: Vec<_> = report.index.building.prefixes.iter().map(String::as_str).collect();
    assert_eq!(building, ["building.foundation.east", "building.wallA"]);
    let dirt: Vec<_> = report.index.dirt.prefixes.iter().map(String::as_str).collect();
    assert_eq!(dirt, ["dirt.berm", "dirt.foundation.east"]);

    assert_eq!(report.render.volumes.len(), 4);
    assert_eq!(report.render.of_class(VolumeClass::Dirt).count(), 2);
    assert_eq!(report.render.of_class(VolumeClass::Foundation).count(), 1);
}

#[test]
fn batch_writes_documents_and_index() {
    let files = [fixture("foundation_east.ccl"), fixture("rotated_hall.ccl")];
    let settings = Settings::default();
    let report = run_batch(&files, &settings).unwrap();
    assert!(report.is_success());

    let dir = scratch_dir("write");
    let written = report.write_to(&dir, &settings).unwrap();
    assert_eq!(written.len(), 4);

    let index = std::fs::read_to_string(dir.join("mu2eBuilding.txt")).unwrap();
    assert!(index.contains("#include \"Mu2eG4/geom/bldg/foundationEast.txt\"\n#include \"Mu2eG4/geom/bldg/hallRotated.txt\"\n"));
    assert!(index.contains("vector<string> dirt.prefix.list = {\n  \"dirt.foundation.east\"\n};"));

    let dirt = std::fs::read_to_string(dir.join("dirtFoundationEast.txt")).unwrap();
    assert!(dirt.starts_with("// SimpleConfig geometry file"));
    assert!(dirt.ends_with("// End:\n"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn same_input_twice_is_idempotent_in_index() {
    let files = [fixture("simple_wall.ccl"), fixture("simple_wall.ccl")];
    let report = run_batch(&files, &Settings::default()).unwrap();
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.index.building.files.len(), 1);
}

#[test]
fn custom_world_moves_wall_points() {
    let settings = Settings::from_toml_str("world_half_extent_x = 1000.0\nworld_half_extent_y = 2000.0").unwrap();
    let report = run_batch(&[fixture("foundation_east.ccl")], &settings).unwrap();
    let dirt = report.documents().find(|d| d.is_dirt()).unwrap();
    let corner = dirt.vertices.iter().find(|v| v.label == "NEcorner").unwrap();
    assert_eq!(corner.position.x.raw(), 1000.0);
    assert_eq!(corner.position.y.raw(), 2000.0);
    assert_eq!(report.render.world.corner(footprint::Corner::NorthEast), corner.position);
}

#[test]
fn bad_world_is_rejected_before_any_file() {
    let settings = Settings {
        world_half_extent_x: -1.0,
        ..Settings::default()
    };
    assert!(run_batch(&[fixture("simple_wall.ccl")], &settings).is_err());
}
