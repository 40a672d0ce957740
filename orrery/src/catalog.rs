//! Built-in systems with real data
//!
//! Radii in km, distances in AU, inclinations in degrees, periods in days,
//! masses in Earth masses.

use common::constants::{AU_KM, SOLAR_RADIUS_KM};

use crate::object::{CelestialObject, Lighting, PlanetKind, SystemDescription};
use crate::system::StarSystem;

/// Kilometres to AU
fn km(distance: f64) -> f64 {
    distance / AU_KM
}

/// The Sun, its planets, major moons, Saturn's rings and both belts
pub fn sol() -> StarSystem {
    let mut objects = Vec::new();

    // The Sun
    objects.push(
        CelestialObject::star("sun", "Sun", SOLAR_RADIUS_KM)
            .with_mass(332_946.0)
            .with_spectral_type("G2V")
            .with_temperature(5_772.0)
            .with_luminosity(1.0),
    );

    // Inner planets
    objects.push(
        CelestialObject::planet("mercury", "Mercury", 2_439.7)
            .orbiting("sun", 0.387, 0.2056, 7.0)
            .with_period(87.97)
            .with_mass(0.055)
            .with_kind(PlanetKind::Terrestrial),
    );
    objects.push(
        CelestialObject::planet("venus", "Venus", 6_051.8)
            .orbiting("sun", 0.723, 0.0068, 3.39)
            .with_period(224.70)
            .with_mass(0.815)
            .with_kind(PlanetKind::Terrestrial),
    );
    objects.push(
        CelestialObject::planet("earth", "Earth", 6_371.0)
            .orbiting("sun", 1.0, 0.0167, 0.0)
            .with_period(365.256)
            .with_mass(1.0)
            .with_kind(PlanetKind::Terrestrial),
    );
    objects.push(
        CelestialObject::moon("moon", "Moon", 1_737.4)
            .orbiting("earth", 0.00257, 0.0549, 5.145)
            .with_period(27.32)
            .with_mass(0.0123),
    );
    objects.push(
        CelestialObject::planet("mars", "Mars", 3_389.5)
            .orbiting("sun", 1.524, 0.0934, 1.85)
            .with_period(686.98)
            .with_mass(0.107)
            .with_kind(PlanetKind::Terrestrial),
    );
    objects.push(
        CelestialObject::moon("phobos", "Phobos", 11.27)
            .orbiting("mars", km(9_376.0), 0.0151, 1.08)
            .with_period(0.319)
            .with_mass(1.8e-9),
    );
    objects.push(
        CelestialObject::moon("deimos", "Deimos", 6.2)
            .orbiting("mars", km(23_463.0), 0.00033, 1.79)
            .with_period(1.263)
            .with_mass(2.5e-10),
    );

    objects.push(CelestialObject::belt("asteroid-belt", "Asteroid Belt", "sun", 2.2, 3.2));

    // Gas giants
    objects.push(
        CelestialObject::planet("jupiter", "Jupiter", 69_911.0)
            .orbiting("sun", 5.203, 0.0489, 1.30)
            .with_period(4_332.59)
            .with_mass(317.8)
            .with_kind(PlanetKind::GasGiant),
    );
    for (id, name, radius, a, e, i, period, mass) in [
        ("io", "Io", 1_821.6, 421_700.0, 0.0041, 0.05, 1.769, 0.015),
        ("europa", "Europa", 1_560.8, 671_034.0, 0.009, 0.47, 3.551, 0.008),
        ("ganymede", "Ganymede", 2_634.1, 1_070_412.0, 0.0013, 0.20, 7.155, 0.025),
        ("callisto", "Callisto", 2_410.3, 1_882_709.0, 0.0074, 0.19, 16.689, 0.018),
    ] {
        objects.push(
            CelestialObject::moon(id, name, radius)
                .orbiting("jupiter", km(a), e, i)
                .with_period(period)
                .with_mass(mass),
        );
    }

    objects.push(
        CelestialObject::planet("saturn", "Saturn", 58_232.0)
            .orbiting("sun", 9.537, 0.0565, 2.49)
            .with_period(10_759.22)
            .with_mass(95.2)
            .with_kind(PlanetKind::GasGiant),
    );
    objects.push(CelestialObject::ring(
        "saturn-rings",
        "Saturn's Rings",
        "saturn",
        km(66_900.0),
        km(140_180.0),
    ));
    objects.push(
        CelestialObject::moon("titan", "Titan", 2_574.7)
            .orbiting("saturn", km(1_221_870.0), 0.0288, 0.35)
            .with_period(15.945)
            .with_mass(0.0225),
    );

    // Ice giants
    objects.push(
        CelestialObject::planet("uranus", "Uranus", 25_362.0)
            .orbiting("sun", 19.19, 0.0457, 0.77)
            .with_period(30_688.5)
            .with_mass(14.5)
            .with_kind(PlanetKind::IceGiant),
    );
    objects.push(
        CelestialObject::planet("neptune", "Neptune", 24_622.0)
            .orbiting("sun", 30.07, 0.0113, 1.77)
            .with_period(60_182.0)
            .with_mass(17.1)
            .with_kind(PlanetKind::IceGiant),
    );

    objects.push(CelestialObject::belt("kuiper-belt", "Kuiper Belt", "sun", 32.0, 50.0));

    StarSystem::new(SystemDescription {
        id: "sol".to_string(),
        name: "Solar System".to_string(),
        objects,
        lighting: Lighting {
            primary_star: Some("sun".to_string()),
        },
    })
}

/// Alpha Centauri A and B orbiting their common barycenter
pub fn alpha_centauri() -> StarSystem {
    // AB: a = 23.4 AU, e = 0.5179, i = 79.2°, P = 79.91 yr, split by mass ratio
    let objects = vec![
        CelestialObject::barycenter("alpha-centauri", "Alpha Centauri AB"),
        CelestialObject::star("alpha-centauri-a", "Alpha Centauri A", 1.2234 * SOLAR_RADIUS_KM)
            .orbiting("alpha-centauri", 10.69, 0.5179, 79.2)
            .with_period(29_187.0)
            .with_mass(359_300.0)
            .with_spectral_type("G2V")
            .with_temperature(5_790.0)
            .with_luminosity(1.519),
        CelestialObject::star("alpha-centauri-b", "Alpha Centauri B", 0.8632 * SOLAR_RADIUS_KM)
            .orbiting("alpha-centauri", 12.71, 0.5179, 79.2)
            .with_period(29_187.0)
            .with_mass(302_000.0)
            .with_spectral_type("K1V")
            .with_temperature(5_260.0)
            .with_luminosity(0.5),
    ];

    StarSystem::new(SystemDescription {
        id: "alpha-centauri".to_string(),
        name: "Alpha Centauri".to_string(),
        objects,
        lighting: Lighting {
            primary_star: Some("alpha-centauri-a".to_string()),
        },
    })
}
