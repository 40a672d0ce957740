#![allow(dead_code)]

use orrery::{CelestialObject, PlanetKind, StarSystem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALMOST_EQ_TOLERANCE: f64 = 1e-6;

pub fn assert_almost_eq(a: f64, b: f64, what: &str) {
    let dist = (a - b).abs();
    assert!(
        dist < ALMOST_EQ_TOLERANCE,
        "Almost-eq assertion failed for '{what}'!\n\
        {a} and {b} has distance {dist}, which is more than max of {ALMOST_EQ_TOLERANCE}"
    );
}

/// Sun, Earth and Moon with real radii and distances
pub fn earth_moon() -> StarSystem {
    StarSystem::from_objects(
        "earth-moon",
        vec![
            CelestialObject::star("sun", "Sun", 695_700.0),
            CelestialObject::planet("earth", "Earth", 6_371.0).orbiting("sun", 1.0, 0.0167, 0.0),
            CelestialObject::moon("moon", "Moon", 1_737.0).orbiting("earth", 0.00257, 0.0549, 5.1),
        ],
    )
}

/// Random but well-formed system: one star, planets with moons and the odd belt
pub fn random_system(seed: u64) -> StarSystem {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut objects = vec![CelestialObject::star("star", "Star", rng.gen_range(100_000.0..2_000_000.0))];

    let planet_count = rng.gen_range(1..=9);
    let mut a = rng.gen_range(0.05..0.5);
    for p in 0..planet_count {
        // Tight spacing forces the collision sweep to do work
        a += rng.gen_range(0.001..4.0);
        if rng.gen_bool(0.15) {
            let width = rng.gen_range(0.01..1.5);
            objects.push(CelestialObject::belt(&format!("belt-{p}"), "Belt", "star", a, a + width));
            a += width;
            continue;
        }

        let planet_id = format!("planet-{p}");
        let kind = match rng.gen_range(0..3) {
            0 => PlanetKind::Terrestrial,
            1 => PlanetKind::GasGiant,
            _ => PlanetKind::IceGiant,
        };
        let radius = match kind {
            PlanetKind::Terrestrial => rng.gen_range(500.0..9_000.0),
            _ => rng.gen_range(15_000.0..90_000.0),
        };
        objects.push(
            CelestialObject::planet(&planet_id, "Planet", radius)
                .orbiting("star", a, rng.gen_range(0.0..0.3), rng.gen_range(0.0..10.0))
                .with_kind(kind),
        );

        let mut moon_a = rng.gen_range(1e-5..1e-3);
        for m in 0..rng.gen_range(0..=5) {
            moon_a += rng.gen_range(1e-6..5e-3);
            objects.push(
                CelestialObject::moon(&format!("moon-{p}-{m}"), "Moon", rng.gen_range(5.0..3_000.0))
                    .orbiting(&planet_id, moon_a, rng.gen_range(0.0..0.1), 0.0),
            );
        }
    }

    StarSystem::from_objects(&format!("random-{seed}"), objects)
}
