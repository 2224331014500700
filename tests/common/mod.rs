#![allow(dead_code)]

use std::sync::Once;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planisphere::star::Star;

static INIT: Once = Once::new();

/// Route `log` output through the test harness, once per test binary.
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env().is_test(true).try_init();
    });
}

/// `n` stars uniformly distributed on the sphere, named `S0..`.
pub fn random_catalog(n: usize, seed: u64) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let ra = rng.random_range(0.0..24.0);
            let dec = rng.random_range(-1.0f64..1.0).asin().to_degrees();
            let mag = rng.random_range(-1.5..8.0);
            Star::new(ra, dec, mag, format!("S{i}"))
        })
        .collect()
}

/// Stars with known positions, magnitudes from the Yale Bright Star catalog.
pub fn bright_stars() -> Vec<Star> {
    vec![
        Star::new(6.7525, -16.7161, -1.46, "Sirius").with_spectral_type("A1V"),
        Star::new(6.3992, -52.6957, -0.74, "Canopus").with_spectral_type("A9II"),
        Star::new(14.2610, 19.1824, -0.05, "Arcturus").with_spectral_type("K1.5III"),
        Star::new(18.6156, 38.7837, 0.03, "Vega").with_spectral_type("A0V"),
        Star::new(5.2782, 45.9980, 0.08, "Capella").with_spectral_type("G3III"),
        Star::new(5.2423, -8.2016, 0.13, "Rigel").with_spectral_type("B8Ia"),
        Star::new(7.6550, 5.2250, 0.34, "Procyon").with_spectral_type("F5IV"),
        Star::new(5.9195, 7.4071, 0.42, "Betelgeuse").with_spectral_type("M1Ia"),
        Star::new(19.8464, 8.8683, 0.76, "Altair").with_spectral_type("A7V"),
        Star::new(2.5303, 89.2641, 1.98, "Polaris").with_spectral_type("F7Ib"),
        Star::new(0.1398, 29.0904, 2.06, "Alpheratz").with_spectral_type("B8IV"),
        Star::new(23.0629, 28.0828, 2.42, "Scheat").with_spectral_type("M2.5II"),
    ]
}
