//! Pull-based chunk rebuild queues and worker orchestration.
//!
//! Two lanes: `edit` for latency-sensitive rebuilds after a voxel change,
//! `bg` for everything else. Background workers steal edit work when their
//! own queue runs dry. Each chunk's layer-geometry cache lives in a shared
//! registry; racing rebuilds of one chunk serialize on that chunk's lock.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TryRecvError, select, unbounded};
use hashbrown::HashMap;
use loam_mesh_cpu::{BuildOptions, BuildStats, ChunkMeshCache, MeshBuf, build_chunk_mesh};
use loam_voxels::{GrassRegistry, VoxelTypeRegistry};
use loam_world::{ChunkCoord, WorldVoxels};
use rayon::{ThreadPool, ThreadPoolBuilder};

#[derive(Clone, Copy, Debug)]
pub struct BuildJob {
    pub coord: ChunkCoord,
    pub rev: u64,
    pub job_id: u64,
    pub opts: BuildOptions,
}

pub struct JobOut {
    pub coord: ChunkCoord,
    pub rev: u64,
    pub job_id: u64,
    /// `None` when the chunk was not loaded at build time.
    pub mesh: Option<MeshBuf>,
    pub stats: BuildStats,
    pub kind: JobKind,
    pub t_total_ms: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Lane {
    Edit,
    Bg,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobKind {
    Edit,
    Bg,
}

struct Shared {
    world: Arc<WorldVoxels>,
    types: Arc<VoxelTypeRegistry>,
    grasses: Arc<GrassRegistry>,
    caches: Mutex<HashMap<ChunkCoord, Arc<ChunkMeshCache>>>,
}

impl Shared {
    fn cache_for(&self, coord: ChunkCoord) -> Arc<ChunkMeshCache> {
        let mut caches = self.caches.lock().unwrap();
        caches
            .entry(coord)
            .or_insert_with(|| Arc::new(ChunkMeshCache::new(self.world.sy)))
            .clone()
    }
}

fn process_build_job(job: BuildJob, lane: Lane, shared: &Shared) -> JobOut {
    let t0 = Instant::now();
    let cache = shared.cache_for(job.coord);
    let built = build_chunk_mesh(
        &shared.world,
        &shared.types,
        &shared.grasses,
        job.coord,
        &cache,
        &job.opts,
    );
    let (mesh, stats) = match built {
        Some((mesh, stats)) => (Some(mesh), stats),
        None => (None, BuildStats::default()),
    };
    let t_total_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::trace!(
        "{:?} job {} for chunk ({}, {}) done in {} ms",
        lane,
        job.job_id,
        job.coord.cx,
        job.coord.cz,
        t_total_ms
    );
    JobOut {
        coord: job.coord,
        rev: job.rev,
        job_id: job.job_id,
        mesh,
        stats,
        kind: match lane {
            Lane::Edit => JobKind::Edit,
            Lane::Bg => JobKind::Bg,
        },
        t_total_ms,
    }
}

pub struct Runtime {
    job_tx_edit: Sender<BuildJob>,
    job_tx_bg: Sender<BuildJob>,
    res_rx: Receiver<JobOut>,
    _edit_pool: Arc<ThreadPool>,
    bg_pool: Option<Arc<ThreadPool>>,
    q_edit: Arc<AtomicUsize>,
    q_bg: Arc<AtomicUsize>,
    inflight_edit: Arc<AtomicUsize>,
    inflight_bg: Arc<AtomicUsize>,
    pub w_edit: usize,
    pub w_bg: usize,
    shared: Arc<Shared>,
}

impl Runtime {
    pub fn new(
        world: Arc<WorldVoxels>,
        types: Arc<VoxelTypeRegistry>,
        grasses: Arc<GrassRegistry>,
    ) -> Self {
        Self::with_workers(
            world,
            types,
            grasses,
            thread::available_parallelism().map(|n| n.get()).unwrap_or(8),
        )
    }

    pub fn with_workers(
        world: Arc<WorldVoxels>,
        types: Arc<VoxelTypeRegistry>,
        grasses: Arc<GrassRegistry>,
        worker_count: usize,
    ) -> Self {
        let (job_tx_edit, job_rx_edit) = unbounded::<BuildJob>();
        let (job_tx_bg, job_rx_bg) = unbounded::<BuildJob>();
        let (res_tx, res_rx) = unbounded::<JobOut>();

        let w_edit = 1usize;
        let w_bg = worker_count.saturating_sub(w_edit);
        let shared = Arc::new(Shared {
            world,
            types,
            grasses,
            caches: Mutex::new(HashMap::new()),
        });

        let q_edit_ctr = Arc::new(AtomicUsize::new(0));
        let q_bg_ctr = Arc::new(AtomicUsize::new(0));
        let inflight_edit_ctr = Arc::new(AtomicUsize::new(0));
        let inflight_bg_ctr = Arc::new(AtomicUsize::new(0));

        let edit_pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(w_edit)
                .thread_name(|i| format!("loam-edit-{i}"))
                .build()
                .expect("edit pool"),
        );
        for _ in 0..w_edit {
            let rx = job_rx_edit.clone();
            let tx = res_tx.clone();
            let shared = shared.clone();
            let q_edit = q_edit_ctr.clone();
            let inflight_edit = inflight_edit_ctr.clone();
            edit_pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    q_edit.fetch_sub(1, Ordering::Relaxed);
                    inflight_edit.fetch_add(1, Ordering::Relaxed);
                    let out = process_build_job(job, Lane::Edit, &shared);
                    // Settle the counter before the result becomes observable.
                    inflight_edit.fetch_sub(1, Ordering::Relaxed);
                    let _ = tx.send(out);
                }
            });
        }

        let bg_pool = if w_bg > 0 {
            let pool = Arc::new(
                ThreadPoolBuilder::new()
                    .num_threads(w_bg)
                    .thread_name(|i| format!("loam-bg-{i}"))
                    .build()
                    .expect("bg pool"),
            );
            for _ in 0..w_bg {
                let bg_rx = job_rx_bg.clone();
                let edit_rx = job_rx_edit.clone();
                let tx = res_tx.clone();
                let shared = shared.clone();
                let q_bg = q_bg_ctr.clone();
                let inflight_bg = inflight_bg_ctr.clone();
                let q_edit = q_edit_ctr.clone();
                let inflight_edit = inflight_edit_ctr.clone();
                pool.spawn(move || {
                    loop {
                        match bg_rx.try_recv() {
                            Ok(job) => {
                                q_bg.fetch_sub(1, Ordering::Relaxed);
                                inflight_bg.fetch_add(1, Ordering::Relaxed);
                                let out = process_build_job(job, Lane::Bg, &shared);
                                inflight_bg.fetch_sub(1, Ordering::Relaxed);
                                let _ = tx.send(out);
                                continue;
                            }
                            Err(TryRecvError::Disconnected) => break,
                            Err(TryRecvError::Empty) => {}
                        }
                        // Steal edit work rather than idle.
                        match edit_rx.try_recv() {
                            Ok(job) => {
                                q_edit.fetch_sub(1, Ordering::Relaxed);
                                inflight_edit.fetch_add(1, Ordering::Relaxed);
                                let out = process_build_job(job, Lane::Edit, &shared);
                                inflight_edit.fetch_sub(1, Ordering::Relaxed);
                                let _ = tx.send(out);
                                continue;
                            }
                            Err(TryRecvError::Disconnected) => {}
                            Err(TryRecvError::Empty) => {}
                        }
                        select! {
                            recv(bg_rx) -> res => match res {
                                Ok(job) => {
                                    q_bg.fetch_sub(1, Ordering::Relaxed);
                                    inflight_bg.fetch_add(1, Ordering::Relaxed);
                                    let out = process_build_job(job, Lane::Bg, &shared);
                                    inflight_bg.fetch_sub(1, Ordering::Relaxed);
                                    let _ = tx.send(out);
                                }
                                Err(_) => break,
                            },
                            recv(edit_rx) -> res => match res {
                                Ok(job) => {
                                    q_edit.fetch_sub(1, Ordering::Relaxed);
                                    inflight_edit.fetch_add(1, Ordering::Relaxed);
                                    let out = process_build_job(job, Lane::Edit, &shared);
                                    inflight_edit.fetch_sub(1, Ordering::Relaxed);
                                    let _ = tx.send(out);
                                }
                                Err(_) => {}
                            },
                        }
                    }
                });
            }
            Some(pool)
        } else {
            None
        };

        Self {
            job_tx_edit,
            job_tx_bg,
            res_rx,
            _edit_pool: edit_pool,
            bg_pool,
            q_edit: q_edit_ctr,
            q_bg: q_bg_ctr,
            inflight_edit: inflight_edit_ctr,
            inflight_bg: inflight_bg_ctr,
            w_edit,
            w_bg,
            shared,
        }
    }

    pub fn submit_build_job_edit(&self, job: BuildJob) {
        self.q_edit.fetch_add(1, Ordering::Relaxed);
        if self.job_tx_edit.send(job).is_err() {
            self.q_edit.fetch_sub(1, Ordering::Relaxed);
        }
    }

    pub fn submit_build_job_bg(&self, job: BuildJob) {
        if self.bg_pool.is_some() {
            self.q_bg.fetch_add(1, Ordering::Relaxed);
            if self.job_tx_bg.send(job).is_err() {
                self.q_bg.fetch_sub(1, Ordering::Relaxed);
            }
        } else {
            self.submit_build_job_edit(job);
        }
    }

    pub fn drain_worker_results(&self) -> Vec<JobOut> {
        self.res_rx.try_iter().collect()
    }

    pub fn recv_result(&self, timeout: Duration) -> Option<JobOut> {
        self.res_rx.recv_timeout(timeout).ok()
    }

    /// The layer-geometry cache for one chunk, creating it on first use.
    pub fn chunk_cache(&self, coord: ChunkCoord) -> Arc<ChunkMeshCache> {
        self.shared.cache_for(coord)
    }

    /// Invalidate the layers a voxel change at `layer` can affect.
    pub fn mark_voxel_dirty(&self, coord: ChunkCoord, layer: usize) {
        self.shared.cache_for(coord).mark_dirty_around(layer);
    }

    pub fn queue_debug_counts(&self) -> (usize, usize, usize, usize) {
        (
            self.q_edit.load(Ordering::Relaxed),
            self.inflight_edit.load(Ordering::Relaxed),
            self.q_bg.load(Ordering::Relaxed),
            self.inflight_bg.load(Ordering::Relaxed),
        )
    }
}
