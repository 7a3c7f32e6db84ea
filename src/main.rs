//! Headless meshing harness: fills a square of demo chunks, meshes them
//! through the worker runtime, and reports per-chunk and aggregate stats.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use loam_mesh_cpu::BuildOptions;
use loam_runtime::{BuildJob, Runtime};
use loam_voxels::{GrassRegistry, VoxelTypeRegistry};
use loam_world::demo::{DemoTypes, fill_demo_chunk};
use loam_world::{ChunkCoord, WorldVoxels};

#[derive(Parser, Debug)]
#[command(name = "loam", about = "Chunk geometry builder harness")]
struct Args {
    /// Chunk radius around the origin; meshes (2r+1)^2 chunks.
    #[arg(long, default_value_t = 2)]
    radius: i32,
    /// World height in layers.
    #[arg(long, default_value_t = 64)]
    sy: usize,
    /// Worker thread count (0 = autodetect).
    #[arg(long, default_value_t = 0)]
    workers: usize,
    /// Terrain seed.
    #[arg(long, default_value_t = 1337)]
    seed: i32,
    /// Viewing cutaway: highest layer to mesh.
    #[arg(long)]
    max_layer: Option<usize>,
    /// Skip per-vertex light aggregation.
    #[arg(long, default_value_t = false)]
    no_lighting: bool,
    /// Skip grass fringe decals.
    #[arg(long, default_value_t = false)]
    no_fringe: bool,
    /// Directory holding voxels/types.toml and voxels/grass.toml.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let types = Arc::new(VoxelTypeRegistry::from_path(
        args.assets.join("voxels/types.toml"),
    )?);
    let grasses = Arc::new(GrassRegistry::from_path(
        args.assets.join("voxels/grass.toml"),
    )?);
    let demo = DemoTypes {
        stone: types
            .id_by_name("stone")
            .ok_or("types.toml is missing \"stone\"")?,
        soil: types
            .id_by_name("soil")
            .ok_or("types.toml is missing \"soil\"")?,
        grass: grasses
            .id_by_name("lush")
            .ok_or("grass.toml is missing \"lush\"")?,
    };

    let max_layer = args.max_layer.unwrap_or(usize::MAX);
    let mut world = WorldVoxels::new(args.sy);
    let t_gen = Instant::now();
    let mut coords = Vec::new();
    for cz in -args.radius..=args.radius {
        for cx in -args.radius..=args.radius {
            let coord = ChunkCoord::new(cx, cz);
            fill_demo_chunk(
                &mut world,
                coord,
                args.seed,
                demo,
                max_layer.min(args.sy.saturating_sub(1)),
            );
            coords.push(coord);
        }
    }
    log::info!(
        "generated {} chunks (sy={}) in {:?}",
        coords.len(),
        args.sy,
        t_gen.elapsed()
    );

    let world = Arc::new(world);
    let rt = if args.workers > 0 {
        Runtime::with_workers(world, types, grasses, args.workers)
    } else {
        Runtime::new(world, types, grasses)
    };
    log::info!("runtime: {} edit + {} bg workers", rt.w_edit, rt.w_bg);

    let opts = BuildOptions {
        apply_lighting: !args.no_lighting,
        max_layer,
        grass_fringe: !args.no_fringe,
    };
    let t_mesh = Instant::now();
    for (i, &coord) in coords.iter().enumerate() {
        rt.submit_build_job_bg(BuildJob {
            coord,
            rev: 1,
            job_id: i as u64,
            opts,
        });
    }

    let mut total_faces = 0usize;
    let mut total_fringe = 0usize;
    let mut total_verts = 0usize;
    let mut seen = 0usize;
    while seen < coords.len() {
        let Some(out) = rt.recv_result(Duration::from_secs(60)) else {
            return Err("meshing stalled: no worker result within 60s".into());
        };
        let verts = out.mesh.as_ref().map_or(0, |m| m.vertex_count() as usize);
        log::info!(
            "chunk ({:>3}, {:>3}): {} faces, {} fringe quads, {} verts, {} ms",
            out.coord.cx,
            out.coord.cz,
            out.stats.faces,
            out.stats.fringe_quads,
            verts,
            out.t_total_ms
        );
        total_faces += out.stats.faces;
        total_fringe += out.stats.fringe_quads;
        total_verts += verts;
        seen += 1;
    }
    log::info!(
        "meshed {} chunks in {:?}: {} faces, {} fringe quads, {} verts",
        seen,
        t_mesh.elapsed(),
        total_faces,
        total_fringe,
        total_verts
    );
    Ok(())
}
