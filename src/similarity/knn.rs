/*!
# Blocked Cosine-Similarity Kernel

Computes the top-n nearest neighbors of every token in a dense embedding
matrix. Rows are processed in contiguous batches; each batch is multiplied
against the transposed matrix with a dense GEMM, every row of the resulting
similarity block is ranked with the top-k partition, and the selected edges
land in a disjoint range of one flat output buffer. Batches run in parallel
under Rayon.

Vectors are expected to be L2-normalized by the caller, so the dot product
is the cosine similarity. [`normalize_rows`] is provided for inputs that
arrive unnormalized; all-zero rows must be filtered upstream.
*/

use nalgebra::DMatrix;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

use crate::core::binio;
use crate::core::error::{Result, SensegraphError};
use crate::core::io::EdgeRecord;
use crate::similarity::topk::partition_smallest;

/// Computes the top-`neighbors` similarity edges for every row of `vectors`.
///
/// The output holds the same number of edges for every token: `neighbors`,
/// or `N − 1` when the matrix has fewer than `neighbors + 1` rows. Token
/// `i`'s edges occupy one contiguous range; emission order inside a range is
/// unspecified.
pub fn nearest_neighbor_edges(
    vectors: &DMatrix<f32>,
    neighbors: usize,
    batch_size: usize,
) -> Result<Vec<EdgeRecord>> {
    if neighbors == 0 {
        return Err(SensegraphError::invalid_argument(
            "neighbors must be positive",
        ));
    }
    if batch_size == 0 {
        return Err(SensegraphError::invalid_argument(
            "batch_size must be positive",
        ));
    }
    let tokens = vectors.nrows();
    let per_token = neighbors.min(tokens.saturating_sub(1));
    if per_token == 0 {
        return Ok(Vec::new());
    }

    let transposed = vectors.transpose();
    let mut edges = vec![EdgeRecord::default(); tokens * per_token];

    edges
        .par_chunks_mut(batch_size * per_token)
        .enumerate()
        .for_each(|(batch, out)| {
            let start = batch * batch_size;
            let rows = batch_size.min(tokens - start);
            // One GEMM per batch: (rows × D) · (D × N) similarity block.
            let block = vectors.rows(start, rows) * &transposed;

            let mut scores = vec![0.0f32; tokens];
            let mut order = vec![0u32; tokens];
            for r in 0..rows {
                let token = (start + r) as i32;
                for j in 0..tokens {
                    // Negate so the smallest-score partition keeps the most similar.
                    scores[j] = -block[(r, j)];
                    order[j] = j as u32;
                }
                // One extra slot because the token itself scores 1.0.
                partition_smallest(&mut order, &scores, per_token + 1);

                let slots = &mut out[r * per_token..(r + 1) * per_token];
                let mut filled = 0;
                for &candidate in order.iter().take(per_token + 1) {
                    if candidate as i32 == token {
                        continue;
                    }
                    if filled == per_token {
                        break;
                    }
                    slots[filled] = EdgeRecord {
                        from: token,
                        to: candidate as i32,
                        weight: -scores[candidate as usize],
                    };
                    filled += 1;
                }
            }
            debug!(batch, rows, "similarity batch finished");
        });

    Ok(edges)
}

/// Scales every row of `vectors` to unit L2 norm. All-zero rows are left
/// untouched.
pub fn normalize_rows(vectors: &mut DMatrix<f32>) {
    for mut row in vectors.row_iter_mut() {
        let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            row /= norm;
        }
    }
}

/// Reads a token-vector matrix: a little-endian `[rows: i32][cols: i32]`
/// header followed by `rows × cols` row-major `f32` values.
pub fn read_vector_file<P: AsRef<Path>>(path: P) -> Result<DMatrix<f32>> {
    let file = File::open(path.as_ref()).map_err(|e| SensegraphError::io_read(e.to_string()))?;
    let mut reader = BufReader::new(file);
    let rows = binio::read_i32_le(&mut reader)?;
    let cols = binio::read_i32_le(&mut reader)?;
    if rows <= 0 || cols <= 0 {
        return Err(SensegraphError::invalid_argument(format!(
            "vector file declares a {}x{} matrix",
            rows, cols
        )));
    }
    let (rows, cols) = (rows as usize, cols as usize);
    let mut data = vec![0.0f32; rows * cols];
    binio::read_f32_slice_le(&mut reader, &mut data)?;
    Ok(DMatrix::from_row_slice(rows, cols, &data))
}

/// Writes a token-vector matrix in the [`read_vector_file`] layout.
pub fn write_vector_file<P: AsRef<Path>>(path: P, vectors: &DMatrix<f32>) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| SensegraphError::io_write(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    binio::write_i32_le(&mut writer, vectors.nrows() as i32)?;
    binio::write_i32_le(&mut writer, vectors.ncols() as i32)?;
    for i in 0..vectors.nrows() {
        for j in 0..vectors.ncols() {
            binio::write_f32_le(&mut writer, vectors[(i, j)])?;
        }
    }
    binio::flush(&mut writer)
}
