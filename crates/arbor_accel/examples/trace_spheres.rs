//! Example: build a BVH over random spheres and check it against brute force.
//!
//! Run with: cargo run --example trace_spheres -- [spheres] [rays] [config.json]

use std::env;
use std::fs;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use arbor_accel::{Bvh, BvhConfig, Primitive, PrimitiveList, Ray, Sphere, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let sphere_count: usize = match args.get(1) {
        Some(arg) => arg.parse().context("sphere count must be an integer")?,
        None => 1000,
    };
    let ray_count: usize = match args.get(2) {
        Some(arg) => arg.parse().context("ray count must be an integer")?,
        None => 10_000,
    };
    let config = match args.get(3) {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => BvhConfig::default(),
    };

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let spheres: Vec<Sphere> = (0..sphere_count)
        .map(|_| {
            let center = Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            Sphere::new(center, rng.gen_range(0.2..2.0))
        })
        .collect();
    let rays: Vec<Ray> = (0..ray_count)
        .map(|_| {
            let target = Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            let origin = Vec3::new(0.0, 0.0, 120.0);
            Ray::new(origin, target - origin)
        })
        .collect();

    let list: PrimitiveList<Sphere> = spheres.iter().copied().collect();

    let start = Instant::now();
    let bvh = Bvh::build_with(spheres, &config)?;
    log::info!(
        "Built BVH over {} spheres: {} nodes, depth {} in {:?}",
        bvh.n_primitives(),
        bvh.nodes().len(),
        bvh.depth(),
        start.elapsed()
    );

    let start = Instant::now();
    let (traces, stats) = bvh.trace_batch_with_stats(&rays);
    let bvh_time = start.elapsed();

    let start = Instant::now();
    let reference: Vec<_> = rays.iter().map(|ray| list.hit(ray)).collect();
    let brute_time = start.elapsed();

    let mismatches = traces
        .iter()
        .zip(&reference)
        .filter(|(a, b)| a.hit != b.hit || (a.hit && (a.distance - b.distance).abs() > 1e-4))
        .count();
    let hits = traces.iter().filter(|trace| trace.hit).count();

    println!("Rays:            {}", rays.len());
    println!("Hits:            {}", hits);
    println!("BVH (parallel):  {:?}", bvh_time);
    println!("Brute force:     {:?}", brute_time);
    println!(
        "Per ray:         {:.1} nodes, {:.1} primitive tests",
        stats.nodes_visited as f64 / rays.len().max(1) as f64,
        stats.primitive_tests as f64 / rays.len().max(1) as f64
    );

    if mismatches > 0 {
        bail!("{mismatches} rays disagree with brute force");
    }
    println!("All rays match brute force");
    Ok(())
}
