//! BVH queries checked against brute-force primitive lists.

use arbor_accel::{
    Bvh, BvhConfig, Primitive, PrimitiveList, Quad, Ray, Shape, Sphere, Trace, Triangle, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOLERANCE: f32 = 1e-4;

fn random_point(rng: &mut StdRng, extent: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

fn random_spheres(rng: &mut StdRng, count: usize) -> Vec<Sphere> {
    (0..count)
        .map(|_| Sphere::new(random_point(rng, 50.0), rng.gen_range(0.1..3.0)))
        .collect()
}

/// Rays from a shell around the scene aimed at random interior points.
fn random_rays(rng: &mut StdRng, count: usize) -> Vec<Ray> {
    (0..count)
        .map(|_| {
            let origin = random_point(rng, 1.0).normalize_or_zero() * 150.0;
            let target = random_point(rng, 50.0);
            Ray::new(origin, (target - origin).normalize())
        })
        .collect()
}

fn assert_same_hit(bvh: &Trace, brute: &Trace, what: &str) {
    assert_eq!(bvh.hit, brute.hit, "{what}: hit flag differs");
    if brute.hit {
        assert!(
            (bvh.distance - brute.distance).abs() < TOLERANCE,
            "{what}: distance {} vs {}",
            bvh.distance,
            brute.distance
        );
    }
}

#[test]
fn test_bvh_matches_brute_force_spheres() {
    let mut rng = StdRng::seed_from_u64(1000);
    let spheres = random_spheres(&mut rng, 1000);
    let rays = random_rays(&mut rng, 10_000);

    let list: PrimitiveList<Sphere> = spheres.iter().copied().collect();
    let bvh = Bvh::build(spheres, 4).unwrap();

    let mut hits = 0;
    for (i, ray) in rays.iter().enumerate() {
        let brute = list.hit(ray);
        assert_same_hit(&bvh.hit(ray), &brute, &format!("ray {i}"));
        hits += brute.hit as usize;
    }
    // Make sure the scene is dense enough for the check to mean something
    assert!(hits > 1000, "only {hits} rays hit");
}

#[test]
fn test_leaf_size_and_candidates_do_not_change_hits() {
    let mut rng = StdRng::seed_from_u64(7);
    let spheres = random_spheres(&mut rng, 300);
    let rays = random_rays(&mut rng, 1000);
    let list: PrimitiveList<Sphere> = spheres.iter().copied().collect();

    for (leaf, candidates) in [(1, 1), (1, 10), (3, 4), (8, 32)] {
        let config = BvhConfig::new()
            .with_max_leaf_size(leaf)
            .with_split_candidates(candidates);
        let bvh = Bvh::build_with(spheres.clone(), &config).unwrap();
        for ray in &rays {
            assert_same_hit(
                &bvh.hit(ray),
                &list.hit(ray),
                &format!("leaf {leaf}, candidates {candidates}"),
            );
        }
    }
}

#[test]
fn test_occludes_agrees_with_closest_hit() {
    let mut rng = StdRng::seed_from_u64(99);
    let bvh = Bvh::build(random_spheres(&mut rng, 400), 2).unwrap();

    for ray in random_rays(&mut rng, 2000) {
        assert_eq!(bvh.occludes(&ray), bvh.hit(&ray).hit);
    }
}

#[test]
fn test_mixed_and_nested_shapes() {
    let mut rng = StdRng::seed_from_u64(3);

    let mut shapes: Vec<Shape> = Vec::new();
    for _ in 0..20 {
        // A small triangle soup wrapped in its own BVH
        let center = random_point(&mut rng, 40.0);
        let soup: Vec<Shape> = (0..30)
            .map(|_| {
                Triangle::new(
                    center + random_point(&mut rng, 3.0),
                    center + random_point(&mut rng, 3.0),
                    center + random_point(&mut rng, 3.0),
                )
                .into()
            })
            .collect();
        shapes.push(Bvh::build(soup, 2).unwrap().into());
    }
    for sphere in random_spheres(&mut rng, 100) {
        shapes.push(sphere.into());
    }
    for _ in 0..20 {
        let q = random_point(&mut rng, 40.0);
        let u = random_point(&mut rng, 5.0);
        let v = random_point(&mut rng, 5.0);
        shapes.push(Quad::new(q, u, v).into());
    }

    let list: PrimitiveList<Shape> = shapes.iter().cloned().collect();
    let bvh = Bvh::build(shapes, 2).unwrap();

    for (i, ray) in random_rays(&mut rng, 3000).iter().enumerate() {
        assert_same_hit(&bvh.hit(ray), &list.hit(ray), &format!("ray {i}"));
    }
}

#[test]
fn test_two_sphere_scene_matches_brute_force() {
    let spheres = vec![
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5),
        Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0),
    ];
    let list: PrimitiveList<Sphere> = spheres.iter().copied().collect();
    let bvh = Bvh::build(spheres, 1).unwrap();
    assert_eq!(bvh.nodes().len(), 3);

    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
    let trace = bvh.hit(&ray);
    assert!(trace.hit);
    assert!((trace.distance - 0.5).abs() < TOLERANCE);
    assert_same_hit(&trace, &list.hit(&ray), "center ray");

    // Straight down lands on the ground sphere
    let down = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
    assert_same_hit(&bvh.hit(&down), &list.hit(&down), "down ray");
}

#[test]
fn test_batch_on_empty_tree() {
    let bvh: Bvh<Sphere> = Bvh::build(Vec::new(), 4).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let traces = bvh.trace_batch(&random_rays(&mut rng, 16));
    assert_eq!(traces.len(), 16);
    assert!(traces.iter().all(|trace| !trace.hit));
}

#[test]
fn test_flat_shapes_far_from_origin() {
    for z in [-1000.0, -2000.0, -5000.0, -20_000.0] {
        let shapes: Vec<Shape> = vec![
            Quad::new(Vec3::new(-5.0, -5.0, z), Vec3::X * 10.0, Vec3::Y * 10.0).into(),
            Triangle::new(
                Vec3::new(-5.0, -5.0, z),
                Vec3::new(5.0, -5.0, z),
                Vec3::new(0.0, 5.0, z),
            )
            .into(),
            Sphere::new(Vec3::new(20.0, 20.0, -50.0), 1.0).into(),
        ];
        let list: PrimitiveList<Shape> = shapes.iter().cloned().collect();
        let bvh = Bvh::build(shapes, 1).unwrap();

        let ray = Ray::new(Vec3::new(0.3, 0.2, 0.0), Vec3::new(0.0001, 0.00005, -1.0));
        let brute = list.hit(&ray);
        assert!(brute.hit, "z={z}: flat shapes should be in the way");
        assert_same_hit(&bvh.hit(&ray), &brute, &format!("z={z}"));
        assert!(bvh.occludes(&ray), "z={z}");
        assert_same_hit(&bvh.trace_batch(&[ray])[0], &brute, &format!("batch z={z}"));
    }
}
