mod common;

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planisphere::projection::{ProjectionState, ScreenHemisphere, ScreenPoint, SkyViewMode};

use common::{bright_stars, init_logger};

const MODES: [SkyViewMode; 3] = [
    SkyViewMode::SingleHemisphere,
    SkyViewMode::DualHemisphere,
    SkyViewMode::FullSkyMercator,
];

fn random_state(rng: &mut StdRng, mode: SkyViewMode) -> ProjectionState {
    ProjectionState::new(
        rng.random_range(0.0..=24.0),
        rng.random_range(-90.0..=90.0),
        rng.random_range(10.0..=180.0),
        rng.random_range(100.0..2000.0),
        rng.random_range(100.0..2000.0),
        mode,
    )
    .unwrap()
}

#[test]
fn test_single_hemisphere_center_is_canvas_center() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..500 {
        let s = random_state(&mut rng, SkyViewMode::SingleHemisphere);
        assert_eq!(
            s.project(s.center_ra, s.center_dec),
            Some(ScreenPoint {
                x: s.canvas_width / 2.0,
                y: s.canvas_height / 2.0
            })
        );
    }
}

#[test]
fn test_projection_is_idempotent_and_on_canvas() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(12);

    for mode in MODES {
        for _ in 0..100 {
            let s = random_state(&mut rng, mode);
            let (ra, dec) = (rng.random_range(0.0..24.0), rng.random_range(-90.0..90.0));

            let first = s.project(ra, dec);
            assert_eq!(first, s.project(ra, dec));
            assert_eq!(first.is_some(), s.is_in_viewport(ra, dec));

            if let Some(p) = first {
                assert!((0.0..=s.canvas_width).contains(&p.x));
                assert!((0.0..=s.canvas_height).contains(&p.y));
            }
        }
    }
}

#[test]
fn test_dual_hemisphere_side_follows_declination() {
    init_logger();
    let s = ProjectionState::new(0.0, 0.0, 90.0, 1000.0, 500.0, SkyViewMode::DualHemisphere).unwrap();

    for star in bright_stars() {
        let Some(p) = s.project(star.ra, star.dec) else {
            continue;
        };
        let expected = if star.dec >= 0.0 {
            ScreenHemisphere::North
        } else {
            ScreenHemisphere::South
        };
        assert_eq!(s.hemisphere_at(p.x), expected, "{}", star.name);
    }

    // radius grows linearly with the polar distance: 80° is 80/180 of the panel height
    let p = s.project(6.0, 10.0).unwrap();
    assert_abs_diff_eq!(p.x - 250.0, 500.0 * 80.0 / 180.0, epsilon = 1e-9);
}

#[test]
fn test_full_sky_wraps_ra_and_scales_dec() {
    init_logger();
    let s = ProjectionState::new(0.0, 0.0, 360.0, 960.0, 480.0, SkyViewMode::FullSkyMercator).unwrap();

    for k in 0..=24 {
        let p = s.project(k as f64, 0.0).unwrap();
        assert!(p.x < 960.0);
        assert_abs_diff_eq!(p.x, (k % 24) as f64 * 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 240.0, epsilon = 1e-12);
    }

    let south = s.project(3.0, -45.0).unwrap();
    assert_abs_diff_eq!(south.y, 360.0, epsilon = 1e-9);
}

#[test]
fn test_pan_and_zoom_between_calls() {
    init_logger();
    let mut s = ProjectionState::new(6.0, 20.0, 60.0, 800.0, 600.0, SkyViewMode::SingleHemisphere).unwrap();
    let before = s.project(6.5, 25.0).unwrap();

    // zooming in moves off-center points outward
    s.field_of_view = 30.0;
    let zoomed = s.project(6.5, 25.0).unwrap();
    assert!((zoomed.x - 400.0).abs() > (before.x - 400.0).abs());

    // panning recenters
    s.center_ra = 6.5;
    s.center_dec = 25.0;
    assert_eq!(s.project(6.5, 25.0), Some(ScreenPoint { x: 400.0, y: 300.0 }));

    s.field_of_view = -1.0;
    assert_eq!(s.project(6.5, 25.0), None);
}
