/*!
# Graph File I/O

This module reads and writes the binary edge file shared by the two pipeline
stages. The file is a bare concatenation of fixed-width little-endian
records, with no header and no trailer:

```text
[from: i32 LE][to: i32 LE][weight: f32 LE]
```

End of file terminates the stream. Each on-disk record is directed, but
loading inserts every edge in both directions, so the loaded graph is the
symmetrized union of each token's outgoing top-n and the incoming top-n of
tokens that picked it.
*/

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

use crate::core::binio;
use crate::core::error::{Result, SensegraphError};
use crate::core::graph::TokenGraph;

/// One `(from, to, weight)` edge record as laid out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeRecord {
    pub from: i32,
    pub to: i32,
    pub weight: f32,
}

/// Node capacity the loader starts from; grows geometrically past this.
const INITIAL_NODE_CAPACITY: usize = 200_000;
/// Adjacency slots reserved per node on first touch.
const EDGE_LIST_RESERVE: usize = 220;

/// Writes `edges` to `path` as bare little-endian triples.
pub fn write_edge_file<P: AsRef<Path>>(path: P, edges: &[EdgeRecord]) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| SensegraphError::io_write(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    for edge in edges {
        binio::write_i32_le(&mut writer, edge.from)?;
        binio::write_i32_le(&mut writer, edge.to)?;
        binio::write_f32_le(&mut writer, edge.weight)?;
    }
    binio::flush(&mut writer)?;
    debug!(edges = edges.len(), "edge file written");
    Ok(())
}

/// Loads the edge file at `path` into a symmetric [`TokenGraph`] and sorts
/// every adjacency list by ascending weight.
pub fn load_token_graph<P: AsRef<Path>>(path: P) -> Result<TokenGraph> {
    let file = File::open(path.as_ref()).map_err(|e| SensegraphError::io_read(e.to_string()))?;
    let mut reader = BufReader::new(file);
    let mut graph = TokenGraph::with_capacity(INITIAL_NODE_CAPACITY, EDGE_LIST_RESERVE);
    let mut records: u64 = 0;
    while let Some(from) = binio::try_read_i32_le(&mut reader)? {
        let to = binio::read_i32_le(&mut reader)?;
        let weight = binio::read_f32_le(&mut reader)?;
        graph.add_edge(from, to, weight);
        records += 1;
    }
    graph.sort_edges();
    debug!(records, nodes = graph.len(), "token graph loaded");
    Ok(graph)
}
