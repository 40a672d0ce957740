//! Per-frame orbital motion
//!
//! Keeps one phase angle per object and composes Kepler positions down the
//! hierarchy, so moons ride along with their planet.

use std::f64::consts::{PI, TAU};

use common::constants::DAYS_PER_YEAR;
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::kepler;
use crate::mechanics::{Placement, SystemLayout};
use crate::object::{Classification, Orbit};
use crate::system::StarSystem;
use crate::view_mode::OrbitLayout;

/// Anything that can report where an object currently is
pub trait ObjectLocator {
    fn locate(&self, id: &str) -> Option<DVec3>;
}

/// Orbital period in days, from the catalog or Kepler's third law
pub fn period_days(orbit: &Orbit) -> f64 {
    match orbit {
        Orbit::Keplerian(orbit) if orbit.orbital_period.is_finite() && orbit.orbital_period > 0.0 => {
            orbit.orbital_period
        }
        Orbit::Keplerian(orbit) if orbit.semi_major_axis.is_finite() && orbit.semi_major_axis > 0.0 => {
            DAYS_PER_YEAR * orbit.semi_major_axis.powf(1.5)
        }
        _ => 0.0,
    }
}

/// Where an object starts along its orbit.
///
/// The two stars of a binary pair start opposite each other, clean layouts start
/// at zero and everything else starts at a random angle drawn from `rng`.
pub fn starting_angle(system: &StarSystem, node: usize, layout: OrbitLayout, rng: &mut impl Rng) -> f64 {
    let objects = system.objects();
    let hierarchy = system.hierarchy();
    if objects[node].classification == Classification::Star {
        if let Some(parent) = hierarchy.parent(node) {
            let stars: Vec<usize> = hierarchy
                .children(parent)
                .iter()
                .copied()
                .filter(|&c| objects[c].classification == Classification::Star)
                .collect();
            if stars.len() == 2 {
                return if stars[0] == node { 0.0 } else { PI };
            }
        }
    }
    match layout {
        OrbitLayout::Clean => 0.0,
        OrbitLayout::Physical => rng.gen::<f64>() * TAU,
    }
}

#[derive(Debug, Clone)]
pub struct OrbitalMotion {
    layout: OrbitLayout,
    phases: Vec<f64>,
    /// Radians per day
    rates: Vec<f64>,
    elapsed_days: f64,
}

impl OrbitalMotion {
    /// Seeded motion is reproducible; `None` seeds from entropy
    pub fn new(system: &StarSystem, layout: OrbitLayout, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let phases = (0..system.objects().len())
            .map(|node| starting_angle(system, node, layout, &mut rng))
            .collect();
        let rates = system
            .objects()
            .iter()
            .map(|object| {
                let period = period_days(&object.orbit);
                if period > 0.0 {
                    TAU / period
                } else {
                    0.0
                }
            })
            .collect();
        Self {
            layout,
            phases,
            rates,
            elapsed_days: 0.0,
        }
    }

    pub fn layout(&self) -> OrbitLayout {
        self.layout
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    pub fn phase(&self, node: usize) -> Option<f64> {
        self.phases.get(node).copied()
    }

    /// Move every body along its orbit by `days` of simulated time
    pub fn advance(&mut self, days: f64) {
        if !days.is_finite() {
            return;
        }
        self.elapsed_days += days;
        for (phase, rate) in self.phases.iter_mut().zip(&self.rates) {
            *phase = (*phase + rate * days).rem_euclid(TAU);
        }
    }

    /// World position of every object for the current phases
    pub fn positions<'a>(&self, system: &'a StarSystem, layout: &SystemLayout) -> WorldPositions<'a> {
        let hierarchy = system.hierarchy();
        let objects = system.objects();
        let mut positions = vec![DVec3::ZERO; objects.len()];
        for &node in hierarchy.depth_first() {
            let origin = hierarchy
                .parent(node)
                .map(|p| positions[p])
                .unwrap_or(DVec3::ZERO);
            let local = match (layout.result(node).map(|r| r.placement), &objects[node].orbit) {
                (Some(Placement::Orbit { distance }), Orbit::Keplerian(orbit)) => kepler::position(
                    self.phases[node],
                    distance,
                    orbit.eccentricity,
                    orbit.inclination,
                    self.layout,
                ),
                _ => DVec3::ZERO,
            };
            positions[node] = origin + local;
        }
        WorldPositions { system, positions }
    }
}

/// Resolved world positions for one frame
#[derive(Debug, Clone)]
pub struct WorldPositions<'a> {
    system: &'a StarSystem,
    positions: Vec<DVec3>,
}

impl WorldPositions<'_> {
    pub fn get(&self, node: usize) -> Option<DVec3> {
        self.positions.get(node).copied()
    }

    pub fn as_slice(&self) -> &[DVec3] {
        &self.positions
    }
}

impl ObjectLocator for WorldPositions<'_> {
    fn locate(&self, id: &str) -> Option<DVec3> {
        let node = self.system.hierarchy().index_of(id)?;
        self.get(node)
    }
}

impl ObjectLocator for std::collections::HashMap<String, DVec3> {
    fn locate(&self, id: &str) -> Option<DVec3> {
        self.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::compute_layout;
    use crate::object::CelestialObject;
    use crate::view_mode::ViewModeDefinition;

    fn system() -> StarSystem {
        StarSystem::from_objects(
            "test",
            vec![
                CelestialObject::star("sol", "Sun", 695_700.0),
                CelestialObject::planet("earth", "Earth", 6_371.0)
                    .orbiting("sol", 1.0, 0.0167, 0.0)
                    .with_period(365.25),
                CelestialObject::moon("moon", "Moon", 1_737.0)
                    .orbiting("earth", 0.00257, 0.0549, 5.1)
                    .with_period(27.32),
                CelestialObject::belt("belt", "Belt", "sol", 2.2, 3.2),
            ],
        )
    }

    #[test]
    fn clean_layout_starts_at_zero() {
        let system = system();
        let motion = OrbitalMotion::new(&system, OrbitLayout::Clean, None);
        assert_eq!(motion.phase(1), Some(0.0));
        assert_eq!(motion.phase(2), Some(0.0));
    }

    #[test]
    fn seeded_motion_is_reproducible() {
        let system = system();
        let a = OrbitalMotion::new(&system, OrbitLayout::Physical, Some(7));
        let b = OrbitalMotion::new(&system, OrbitLayout::Physical, Some(7));
        assert_eq!(a.phase(1), b.phase(1));
        assert_eq!(a.phase(2), b.phase(2));
    }

    #[test]
    fn binary_stars_start_opposite() {
        let system = StarSystem::from_objects(
            "binary",
            vec![
                CelestialObject::barycenter("ab", "AB"),
                CelestialObject::star("a", "A", 850_000.0).orbiting("ab", 11.2, 0.52, 0.0),
                CelestialObject::star("b", "B", 600_000.0).orbiting("ab", 12.8, 0.52, 0.0),
            ],
        );
        let motion = OrbitalMotion::new(&system, OrbitLayout::Physical, Some(1));
        assert_eq!(motion.phase(1), Some(0.0));
        assert_eq!(motion.phase(2), Some(PI));
    }

    #[test]
    fn full_period_returns_to_start() {
        let system = system();
        let mut motion = OrbitalMotion::new(&system, OrbitLayout::Clean, None);
        motion.advance(365.25);
        let phase = motion.phase(1).unwrap();
        assert!(phase < 1e-9 || (TAU - phase) < 1e-9, "{phase}");
        assert!((motion.elapsed_days() - 365.25).abs() < 1e-12);
    }

    #[test]
    fn moon_rides_along_with_its_planet() {
        let system = system();
        let layout = compute_layout(&system, &ViewModeDefinition::navigational());
        let motion = OrbitalMotion::new(&system, OrbitLayout::Clean, None);
        let positions = motion.positions(&system, &layout);
        let earth = positions.locate("earth").unwrap();
        let moon = positions.locate("moon").unwrap();
        assert!((earth.x - layout.orbit_distance("earth").unwrap()).abs() < 1e-9);
        assert!(((moon - earth).length() - layout.orbit_distance("moon").unwrap()).abs() < 1e-9);
        assert_eq!(positions.locate("belt"), Some(DVec3::ZERO));
        assert_eq!(positions.locate("missing"), None);
    }

    #[test]
    fn missing_period_uses_keplers_third_law() {
        let orbit = CelestialObject::planet("p", "P", 1.0).orbiting("s", 4.0, 0.0, 0.0).orbit;
        assert!((period_days(&orbit) - 8.0 * DAYS_PER_YEAR).abs() < 1e-9);
        assert_eq!(period_days(&Orbit::None), 0.0);
    }
}
