//! Parallel generation of chunk regions on a worker pool.
//!
//! Workers pull tasks from a bounded channel, generate with a shared
//! immutable [`ChunkGenerator`], and send chunks back. Each worker owns its
//! own [`DebugMaps`] shard; shards are merged when the pool is finished.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use strata_voxel::ChunkData;
use tracing::{debug, error};

use crate::debug_maps::DebugMaps;
use crate::generators::ChunkGenerator;

/// A request to generate a single chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationTask {
    pub seed: i64,
    pub chunk_x: i32,
    pub chunk_z: i32,
}

/// A generated chunk.
#[derive(Debug)]
pub struct GeneratedChunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
    /// The generated blocks and biomes.
    pub data: ChunkData,
    /// Generation time in microseconds (for profiling).
    pub generation_time_us: u64,
}

/// Everything a finished pool produced.
#[derive(Debug, Default)]
pub struct RegionOutput {
    /// Chunks sorted by `(chunk_x, chunk_z)`.
    pub chunks: Vec<GeneratedChunk>,
    /// All worker shards merged, when capture was requested.
    pub debug_maps: Option<DebugMaps>,
}

/// A pool of chunk generation workers.
pub struct RegionGenerator {
    task_sender: Option<Sender<GenerationTask>>,
    result_receiver: Receiver<GeneratedChunk>,
    workers: Vec<JoinHandle<Option<DebugMaps>>>,
    debug_maps: Option<DebugMaps>,
}

impl RegionGenerator {
    /// Spawn `thread_count` workers (at least one) sharing `generator`.
    ///
    /// `debug_maps`, when given, receives the merged worker shards in
    /// [`finish`](Self::finish); each worker starts from a blank copy.
    pub fn new(
        generator: Arc<dyn ChunkGenerator>,
        thread_count: usize,
        queue_capacity: usize,
        debug_maps: Option<DebugMaps>,
    ) -> Self {
        let (task_sender, task_receiver) = bounded::<GenerationTask>(queue_capacity.max(1));
        let (result_sender, result_receiver) = unbounded::<GeneratedChunk>();

        let workers = (0..thread_count.max(1))
            .map(|index| {
                let receiver = task_receiver.clone();
                let sender = result_sender.clone();
                let generator = Arc::clone(&generator);
                let mut shard = debug_maps.as_ref().map(DebugMaps::empty_shard);

                std::thread::Builder::new()
                    .name(format!("chunk-gen-{index}"))
                    .spawn(move || {
                        let mut generated = 0usize;
                        while let Ok(GenerationTask {
                            seed,
                            chunk_x,
                            chunk_z,
                        }) = receiver.recv()
                        {
                            let start = Instant::now();
                            let data =
                                generator.generate_with_debug(seed, chunk_x, chunk_z, shard.as_mut());
                            let elapsed = start.elapsed().as_micros() as u64;
                            generated += 1;

                            let _ = sender.send(GeneratedChunk {
                                chunk_x,
                                chunk_z,
                                data,
                                generation_time_us: elapsed,
                            });
                        }
                        debug!("Worker {index} exiting after {generated} chunks");
                        shard
                    })
                    .expect("Failed to spawn chunk generation worker thread")
            })
            .collect();

        Self {
            task_sender: Some(task_sender),
            result_receiver,
            workers,
            debug_maps,
        }
    }

    /// Queue a task, waiting for space in the queue. Returns the task back
    /// if the workers have stopped.
    pub fn submit_wait(&self, task: GenerationTask) -> Result<(), GenerationTask> {
        let Some(sender) = &self.task_sender else {
            return Err(task);
        };
        sender.send(task).map_err(|err| err.into_inner())
    }

    /// Collect every chunk finished so far.
    pub fn drain_results(&self) -> Vec<GeneratedChunk> {
        self.result_receiver.try_iter().collect()
    }

    /// Close the queue, wait for every worker, and merge their debug shards.
    pub fn finish(mut self) -> RegionOutput {
        self.task_sender = None;

        let mut debug_maps = self.debug_maps.take();
        for handle in self.workers.drain(..) {
            match handle.join() {
                Ok(Some(shard)) => {
                    if let Some(maps) = debug_maps.as_mut() {
                        maps.merge(&shard);
                    }
                }
                Ok(None) => {}
                Err(_) => error!("Chunk generation worker panicked; its chunks are lost"),
            }
        }

        let mut chunks = self.drain_results();
        chunks.sort_by_key(|chunk| (chunk.chunk_x, chunk.chunk_z));
        RegionOutput { chunks, debug_maps }
    }
}

/// Worker count used when none is configured: all cores but one.
pub fn default_thread_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Tasks for the `(2·radius + 1)²` chunks centred on a chunk.
pub fn region_tasks(seed: i64, center_x: i32, center_z: i32, radius: u32) -> Vec<GenerationTask> {
    let r = radius as i32;
    (center_x - r..=center_x + r)
        .flat_map(|chunk_x| {
            (center_z - r..=center_z + r).map(move |chunk_z| GenerationTask {
                seed,
                chunk_x,
                chunk_z,
            })
        })
        .collect()
}

/// Generate every task on a fresh pool and wait for all of them.
///
/// `threads == 0` picks [`default_thread_count`].
pub fn generate_region(
    generator: Arc<dyn ChunkGenerator>,
    tasks: &[GenerationTask],
    threads: usize,
    debug_maps: Option<DebugMaps>,
) -> RegionOutput {
    let threads = if threads == 0 {
        default_thread_count()
    } else {
        threads
    };
    let pool = RegionGenerator::new(generator, threads, threads * 4, debug_maps);
    for task in tasks {
        if pool.submit_wait(*task).is_err() {
            error!(
                "Could not queue chunk ({}, {}); workers have stopped",
                task.chunk_x, task.chunk_z
            );
        }
    }
    pool.finish()
}
