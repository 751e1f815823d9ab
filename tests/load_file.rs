use std::fs;
use std::path::Path;

use roadroute::{osm, shortest_path, Error, Graph};

const SIMPLE_XML: &[u8] = include_bytes!("../src/osm/reader/test_fixtures/simple.osm");
const SIMPLE_GZ: &[u8] = include_bytes!("../src/osm/reader/test_fixtures/simple.osm.gz");
const SIMPLE_BZ2: &[u8] = include_bytes!("../src/osm/reader/test_fixtures/simple.osm.bz2");

fn load_file(path: &Path, file_format: osm::FileFormat) -> Result<Graph, osm::Error> {
    let mut g = Graph::new();
    let options = osm::Options {
        profile: &osm::ROAD_PROFILE,
        file_format,
        bbox: [0.0; 4],
    };
    osm::add_features_from_file(&mut g, &options, path)?;
    Ok(g)
}

#[test]
fn loads_files_by_extension() {
    let dir = tempfile::tempdir().expect("create temp dir");

    for (name, data) in [
        ("berkeley.osm", SIMPLE_XML),
        ("berkeley.osm.gz", SIMPLE_GZ),
        ("berkeley.osm.bz2", SIMPLE_BZ2),
        ("berkeley.data", SIMPLE_GZ),
    ] {
        let path = dir.path().join(name);
        fs::write(&path, data).expect("write fixture");

        let g = load_file(&path, osm::FileFormat::Unknown).expect("fixture loads");
        assert_eq!(g.len(), 7, "{}", name);

        let route = shortest_path(&g, -122.26, 37.87, -122.26, 37.871).expect("route exists");
        assert_eq!(route, vec![1, 2, 3, 4, 5], "{}", name);
    }
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = load_file(&dir.path().join("missing.osm"), osm::FileFormat::Xml)
        .expect_err("missing file must not load");
    assert!(matches!(err, osm::Error::Io(_)));
}

#[test]
fn routes_between_disconnected_islands_are_not_found() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("islands.osm");
    fs::write(&path, SIMPLE_XML).expect("write fixture");

    let g = load_file(&path, osm::FileFormat::Xml).expect("fixture loads");
    let err = shortest_path(&g, -122.2601, 37.8701, -122.2291, 37.8601)
        .expect_err("islands are disconnected");
    assert_eq!(err, Error::PathNotFound { from: 1, to: 10 });

    let length = g.path_length(&[9, 10]).unwrap();
    assert!(length > 0.05 && length < 0.06, "unexpected length {}", length);
}
