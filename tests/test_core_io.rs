use sensegraph::core::io::{EdgeRecord, load_token_graph, write_edge_file};
use sensegraph::similarity::{read_vector_file, write_vector_file};
use std::fs;
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_edge_file_round_trip_symmetrizes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tokens.graph");

    let edges = vec![
        EdgeRecord {
            from: 0,
            to: 1,
            weight: 0.9,
        },
        EdgeRecord {
            from: 0,
            to: 2,
            weight: 0.4,
        },
        EdgeRecord {
            from: 2,
            to: 1,
            weight: 0.6,
        },
        // Reverse of an already-seen edge: dropped on load, first weight kept.
        EdgeRecord {
            from: 1,
            to: 0,
            weight: 0.123,
        },
    ];
    write_edge_file(&path, &edges).unwrap();
    // 4 records × 12 bytes, no header, no trailer.
    assert_eq!(fs::metadata(&path).unwrap().len(), 48);

    let graph = load_token_graph(&path).unwrap();
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.edge_weight(0, 1), 0.9);
    assert_eq!(graph.edge_weight(1, 0), 0.9);
    assert_eq!(graph.edge_weight(1, 2), 0.6);
    // Adjacencies come back sorted ascending by weight.
    assert_eq!(graph.neighbors(0), &[2, 1]);
    assert_eq!(graph.weights(0), &[0.4, 0.9]);
}

#[test]
fn test_empty_edge_file_loads_empty_graph() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.graph");
    fs::File::create(&path).unwrap();

    let graph = load_token_graph(&path).unwrap();
    assert!(graph.is_empty());
}

#[test]
fn test_torn_edge_record_is_a_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("torn.graph");
    let mut file = fs::File::create(&path).unwrap();
    // One full record plus 5 stray bytes.
    file.write_all(&[0u8; 12]).unwrap();
    file.write_all(&[1u8; 5]).unwrap();
    drop(file);

    assert!(load_token_graph(&path).is_err());
}

#[test]
fn test_missing_edge_file_is_a_read_error() {
    let dir = tempdir().unwrap();
    assert!(load_token_graph(dir.path().join("nope.graph")).is_err());
}

#[test]
fn test_vector_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tokens.vec");

    let vectors =
        nalgebra::DMatrix::from_row_slice(2, 3, &[1.0f32, 2.0, 3.0, -0.5, 0.25, 0.125]);
    write_vector_file(&path, &vectors).unwrap();
    // Header plus 6 floats.
    assert_eq!(fs::metadata(&path).unwrap().len(), 8 + 24);

    let loaded = read_vector_file(&path).unwrap();
    assert_eq!(loaded, vectors);
}

#[test]
fn test_vector_file_rejects_bad_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.vec");
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&(-3i32).to_le_bytes()).unwrap();
    file.write_all(&4i32.to_le_bytes()).unwrap();
    drop(file);

    assert!(read_vector_file(&path).is_err());
}
