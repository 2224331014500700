mod common;

use std::collections::HashSet;

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planisphere::constants::RADEG;
use planisphere::spatial::{Bounds, QuadTree, QuadTreeParams, RaSeam};
use planisphere::star::{angular_distance, Star};

use common::{init_logger, random_catalog};

fn build(catalog: Vec<Star>, params: QuadTreeParams) -> QuadTree {
    QuadTree::build(catalog, Bounds::sky(), params).unwrap()
}

fn brute_force_radius(catalog: &[Star], ra: f64, dec: f64, radius: f64) -> HashSet<String> {
    catalog
        .iter()
        .filter(|s| angular_distance(ra, dec, s.ra, s.dec) <= radius * RADEG)
        .map(|s| s.name.clone())
        .collect()
}

#[test]
fn test_whole_sky_region_returns_every_star_once() {
    init_logger();
    let catalog = random_catalog(20_000, 1);
    let tree = build(catalog, QuadTreeParams::default());

    assert_eq!(tree.size(), 20_000);

    let all = tree.query_region(&Bounds::sky());
    assert_eq!(all.len(), 20_000);

    let names: HashSet<&str> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names.len(), 20_000);
}

#[test]
fn test_stress_depth_never_exceeds_limit() {
    init_logger();
    let tree = build(random_catalog(120_000, 2), QuadTreeParams::default());

    assert_eq!(tree.size(), 120_000);
    assert!(tree.depth() <= 8);

    for id in tree.node_ids() {
        if tree.node_children(id).is_none() && tree.node_depth(id) != Some(8) {
            assert!(tree.node_len(id).unwrap() <= 50);
        }
    }
}

#[test]
fn test_radius_results_within_radius_and_prefilter_box() {
    init_logger();
    let tree = build(random_catalog(5_000, 3), QuadTreeParams::default());
    let mut rng = StdRng::seed_from_u64(30);

    for _ in 0..200 {
        let ra = rng.random_range(0.0..24.0);
        let dec = rng.random_range(-90.0..90.0);
        let radius = rng.random_range(0.5..20.0);

        let found = tree.query_radius(ra, dec, radius);
        let boxed: HashSet<&str> = tree
            .query_region(&Bounds::new(ra - radius, ra + radius, dec - radius, dec + radius))
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();

        for s in &found {
            assert!(angular_distance(ra, dec, s.ra, s.dec) <= radius * RADEG);
            assert!(boxed.contains(s.name.as_str()));
        }
    }
}

#[test]
fn test_wrapped_radius_matches_brute_force() {
    init_logger();
    let catalog = random_catalog(3_000, 4);
    let params = QuadTreeParams {
        ra_seam: RaSeam::Wrap,
        ..QuadTreeParams::default()
    };
    let tree = build(catalog.clone(), params);
    let mut rng = StdRng::seed_from_u64(40);

    let mut centers: Vec<(f64, f64)> = (0..150)
        .map(|_| (rng.random_range(0.0..24.0), rng.random_range(-89.0..89.0)))
        .collect();
    // seam and pole neighbourhoods
    centers.extend([(0.0, 0.0), (23.9, 10.0), (0.1, -40.0), (12.0, 85.0), (3.0, -88.0)]);

    for (ra, dec) in centers {
        for radius in [1.0, 5.0, 15.0] {
            let found: HashSet<String> = tree
                .query_radius(ra, dec, radius)
                .into_iter()
                .map(|s| s.name.clone())
                .collect();
            assert_eq!(
                found,
                brute_force_radius(&catalog, ra, dec, radius),
                "center ({ra}, {dec}), radius {radius}"
            );
        }
    }
}

#[test]
fn test_find_nearest_matches_brute_force() {
    init_logger();
    let catalog = random_catalog(1_000, 5);
    let tree = build(catalog.clone(), QuadTreeParams::default());
    let mut rng = StdRng::seed_from_u64(50);

    for _ in 0..300 {
        // cones kept clear of the RA seam, which the clipped pre-filter does not cross
        let ra = rng.random_range(2.0..22.0);
        let dec = rng.random_range(-60.0..60.0);

        let expected = catalog
            .iter()
            .map(|s| angular_distance(ra, dec, s.ra, s.dec))
            .filter(|d| *d <= 10.0 * RADEG)
            .min_by(|a, b| a.total_cmp(b));

        let found = tree
            .find_nearest(ra, dec, 10.0)
            .map(|s| angular_distance(ra, dec, s.ra, s.dec));

        match (found, expected) {
            (Some(f), Some(e)) => assert_abs_diff_eq!(f, e, epsilon = 1e-15),
            (None, None) => {}
            other => panic!("nearest mismatch at ({ra}, {dec}): {other:?}"),
        }
    }
}

#[test]
fn test_find_nearest_wrap_is_exact() {
    init_logger();
    let catalog = random_catalog(1_000, 6);
    let params = QuadTreeParams {
        ra_seam: RaSeam::Wrap,
        ..QuadTreeParams::default()
    };
    let tree = build(catalog.clone(), params);
    let mut rng = StdRng::seed_from_u64(60);

    for _ in 0..300 {
        let ra = rng.random_range(0.0..24.0);
        let dec = rng.random_range(-90.0..90.0);

        let expected = catalog
            .iter()
            .map(|s| angular_distance(ra, dec, s.ra, s.dec))
            .filter(|d| *d <= 10.0 * RADEG)
            .min_by(|a, b| a.total_cmp(b));

        let found = tree
            .find_nearest(ra, dec, 10.0)
            .map(|s| angular_distance(ra, dec, s.ra, s.dec));

        assert_eq!(found, expected);
    }
}

#[test]
fn test_out_of_range_inputs_yield_nothing() {
    init_logger();
    let tree = build(random_catalog(500, 7), QuadTreeParams::default());

    assert!(tree.query_region(&Bounds::new(25.0, 30.0, -10.0, 10.0)).is_empty());
    assert!(tree.query_region(&Bounds::new(0.0, 24.0, 91.0, 95.0)).is_empty());
    assert!(tree.query_radius(f64::NAN, 0.0, 5.0).is_empty());
    assert!(tree.query_radius(1.0, f64::NAN, 5.0).is_empty());
    assert!(tree.find_nearest(1.0, 0.0, f64::NAN).is_none());
}

#[test]
fn test_ra_24h_records_are_rejected() {
    init_logger();
    let tree = build(
        vec![Star::new(24.0, 10.0, 2.0, "seam"), Star::new(0.0, 10.0, 2.0, "zero")],
        QuadTreeParams::default(),
    );

    assert_eq!(tree.size(), 1);
    assert_eq!(tree.rejected(), 1);
    assert_eq!(tree.query_radius(0.0, 10.0, 1.0)[0].name, "zero");
}
