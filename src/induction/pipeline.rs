/*!
# Induction Pipeline

Runs sense induction over every token of a loaded graph with a pool of
worker threads and a single writer thread.

Workers split the node id space into contiguous ranges and push every
induced cluster onto a bounded queue, blocking when the writer falls behind.
The writer drains the queue into the binary cluster file:

```text
[base_node: i32 BE][sense_id: i32 BE][count: i32 BE]
count × { [node: i32 BE][weight: f32 BE] }
```

A sentinel cluster with `base_node = -1` marks end of input; the writer
exits without serializing it. The graph is read-only for the whole run, so
workers share it without locks.
*/

use crossbeam_channel::{Receiver, Sender, bounded};
use rand::{SeedableRng, rngs::StdRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::binio;
use crate::core::error::{Result, SensegraphError};
use crate::core::graph::TokenGraph;
use crate::induction::chinese_whispers::{
    InductionParams, SenseCluster, induce_token_senses_with,
};

/// `base_node` value of the end-of-stream sentinel.
pub const END_OF_STREAM: i32 = -1;

/// Clusters the queue holds before producers block.
const CLUSTER_QUEUE_CAPACITY: usize = 1024;

const PROGRESS_POLL: Duration = Duration::from_millis(200);

/// Totals reported by a finished [`induce_all`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InductionSummary {
    /// Base tokens processed.
    pub tokens: u64,
    /// Clusters written to the output file.
    pub clusters: u64,
}

fn sentinel() -> SenseCluster {
    SenseCluster {
        base_node: END_OF_STREAM,
        sense_id: 0,
        members: Vec::new(),
    }
}

/// Writes one cluster record in the big-endian on-disk layout.
pub fn write_cluster_record<W: Write>(writer: &mut W, cluster: &SenseCluster) -> Result<()> {
    binio::write_i32_be(writer, cluster.base_node)?;
    binio::write_i32_be(writer, cluster.sense_id)?;
    binio::write_i32_be(writer, cluster.members.len() as i32)?;
    for &(node, weight) in &cluster.members {
        binio::write_i32_be(writer, node)?;
        binio::write_f32_be(writer, weight)?;
    }
    Ok(())
}

/// Drains `queue` into `writer` until the end-of-stream sentinel arrives or
/// the channel closes, then flushes. The sentinel itself is never
/// serialized. `written` counts the records emitted so far.
///
/// Takes the receiver by value: dropping it on exit disconnects the queue,
/// so blocked producers unblock if the writer dies early.
pub fn run_cluster_writer<W: Write>(
    writer: &mut W,
    queue: Receiver<SenseCluster>,
    written: &AtomicU64,
) -> Result<()> {
    for cluster in queue.iter() {
        if cluster.base_node == END_OF_STREAM {
            break;
        }
        write_cluster_record(writer, &cluster)?;
        written.fetch_add(1, Ordering::Relaxed);
    }
    binio::flush(writer)
}

fn run_worker(
    graph: &TokenGraph,
    params: &InductionParams,
    range: std::ops::Range<i32>,
    queue: &Sender<SenseCluster>,
    processed: &AtomicU64,
) {
    let mut rng = StdRng::seed_from_u64(rand::random::<u64>());
    'tokens: for base in range {
        for cluster in induce_token_senses_with(graph, base, params, &mut rng) {
            // A send only fails when the writer is gone; stop producing.
            if queue.send(cluster).is_err() {
                break 'tokens;
            }
        }
        processed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Induces senses for every token of `graph` and streams the clusters to
/// `output`.
///
/// `num_workers` threads take contiguous ranges of the node id space, with
/// the last worker picking up the remainder. The orchestrating thread polls
/// the progress counters on a sleeping loop, joins the workers, queues the
/// sentinel, and finally joins the writer, so the writer sees every cluster.
pub fn induce_all<P: AsRef<Path>>(
    graph: &TokenGraph,
    params: &InductionParams,
    num_workers: usize,
    output: P,
) -> Result<InductionSummary> {
    if num_workers == 0 {
        return Err(SensegraphError::invalid_argument(
            "num_workers must be positive",
        ));
    }
    let file =
        File::create(output.as_ref()).map_err(|e| SensegraphError::io_write(e.to_string()))?;
    let mut out = BufWriter::new(file);

    let bound = graph.node_id_bound() as usize;
    let chunk = bound / num_workers;
    let (tx, rx) = bounded::<SenseCluster>(CLUSTER_QUEUE_CAPACITY);
    let processed = AtomicU64::new(0);
    let written = AtomicU64::new(0);

    thread::scope(|scope| -> Result<()> {
        let writer = scope.spawn(|| run_cluster_writer(&mut out, rx, &written));

        let mut handles = Vec::with_capacity(num_workers);
        for w in 0..num_workers {
            let start = w * chunk;
            let end = if w + 1 == num_workers {
                bound
            } else {
                start + chunk
            };
            let queue = tx.clone();
            let processed = &processed;
            handles.push(scope.spawn(move || {
                run_worker(graph, params, start as i32..end as i32, &queue, processed);
            }));
        }

        while !handles.iter().all(|handle| handle.is_finished()) {
            thread::sleep(PROGRESS_POLL);
            debug!(
                processed = processed.load(Ordering::Acquire),
                total = bound,
                clusters = written.load(Ordering::Acquire),
                "sense induction progress"
            );
        }
        for handle in handles {
            handle
                .join()
                .map_err(|_| SensegraphError::algorithm("induction worker panicked"))?;
        }

        // All producers are done; the sentinel tells the writer to finish.
        tx.send(sentinel()).ok();
        drop(tx);
        writer
            .join()
            .map_err(|_| SensegraphError::algorithm("cluster writer panicked"))?
    })?;

    let summary = InductionSummary {
        tokens: processed.load(Ordering::Acquire),
        clusters: written.load(Ordering::Acquire),
    };
    info!(
        tokens = summary.tokens,
        clusters = summary.clusters,
        "sense induction finished"
    );
    Ok(summary)
}
