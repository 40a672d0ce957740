//! Orbital mechanics calculator
//!
//! Turns physical radii and orbital elements into a non-overlapping visual layout
//! for one view mode:
//! - visual radii from a logarithmic or fixed-size policy, giants get a bonus
//! - children are capped below their parent's size
//! - orbit distances start at `a · orbit_scaling` and are swept outward per parent
//!   so neighbours never touch and the semi-major-axis ordering survives
//! - belts and rings take part in the same sweep as radial intervals

use std::collections::HashMap;

use crate::object::{Classification, Orbit, PlanetKind};
use crate::system::StarSystem;
use crate::view_mode::{ScalingConfig, ViewModeDefinition};

/// Radius used when the catalog gives a non-positive or missing one, in km
pub const DEFAULT_RADIUS_KM: f64 = 1.0;

pub const GAS_GIANT_BONUS: f64 = 1.5;
pub const ICE_GIANT_BONUS: f64 = 1.25;

/// A child is never drawn larger than this fraction of its parent
pub const CHILD_SIZE_RATIO: f64 = 0.9;

/// Rings hug their planet: minimum inner edge as a multiple of its visual radius
pub const RING_CLEARANCE: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeltData {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub center_radius: f64,
}

/// Where an object sits relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// At the system origin
    Root,
    Orbit { distance: f64 },
    Belt(BeltData),
}

/// Derived visual state of one object in one view mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalMechanicsResult {
    pub visual_radius: f64,
    pub placement: Placement,
    /// Radius of the object plus everything resolved around it
    pub reach: f64,
}

impl OrbitalMechanicsResult {
    pub fn orbit_distance(&self) -> Option<f64> {
        match self.placement {
            Placement::Orbit { distance } => Some(distance),
            _ => None,
        }
    }

    pub fn belt(&self) -> Option<&BeltData> {
        match &self.placement {
            Placement::Belt(belt) => Some(belt),
            _ => None,
        }
    }

    /// Farthest point from the parent this object occupies
    pub fn outer_edge(&self) -> f64 {
        match self.placement {
            Placement::Root => self.reach,
            Placement::Orbit { distance } => distance + self.reach,
            Placement::Belt(belt) => belt.outer_radius,
        }
    }
}

/// Complete layout of one system in one view mode
#[derive(Debug, Clone)]
pub struct SystemLayout {
    mode_id: String,
    generation: u64,
    results: Vec<OrbitalMechanicsResult>,
    index: HashMap<String, usize>,
    max_orbit_radius: f64,
}

impl SystemLayout {
    pub fn mode_id(&self) -> &str {
        &self.mode_id
    }

    /// Generation of the system this layout was computed for
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: &str) -> Option<&OrbitalMechanicsResult> {
        self.index.get(id).map(|&i| &self.results[i])
    }

    /// Result by position in the system's object list
    pub fn result(&self, node: usize) -> Option<&OrbitalMechanicsResult> {
        self.results.get(node)
    }

    pub fn results(&self) -> &[OrbitalMechanicsResult] {
        &self.results
    }

    pub fn visual_radius(&self, id: &str) -> Option<f64> {
        self.get(id).map(|r| r.visual_radius)
    }

    pub fn orbit_distance(&self, id: &str) -> Option<f64> {
        self.get(id).and_then(OrbitalMechanicsResult::orbit_distance)
    }

    /// Extent of the whole system around the origin
    pub fn max_orbit_radius(&self) -> f64 {
        self.max_orbit_radius
    }

    /// The child of `id` reaching farthest out, with its outer edge
    pub fn outermost_child(&self, system: &StarSystem, id: &str) -> Option<(usize, f64)> {
        let hierarchy = system.hierarchy();
        let node = hierarchy.index_of(id)?;
        hierarchy
            .children(node)
            .iter()
            .filter_map(|&child| {
                let result = self.results.get(child)?;
                let edge = match result.placement {
                    Placement::Orbit { distance } => distance,
                    Placement::Belt(belt) => belt.outer_radius,
                    Placement::Root => return None,
                };
                Some((child, edge))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Compute the layout of every object in `system` for `mode`
pub fn compute_layout(system: &StarSystem, mode: &ViewModeDefinition) -> SystemLayout {
    let objects = system.objects();
    let hierarchy = system.hierarchy();
    let scaling = &mode.scaling;

    let mut visual = assign_visual_radii(system, scaling);

    // Parents come first, so a capped parent caps its children in turn
    for &node in hierarchy.depth_first() {
        let Some(parent) = hierarchy.parent(node) else {
            continue;
        };
        if !objects[node].classification.has_body() || !objects[parent].classification.has_body() {
            continue;
        }
        let cap = visual[parent] * CHILD_SIZE_RATIO;
        if visual[node] > cap {
            log::debug!(
                "'{}' capped from {:.3} to {:.3} below '{}'",
                objects[node].id,
                visual[node],
                cap,
                objects[parent].id
            );
            visual[node] = cap;
        }
    }

    let mut placement = vec![Placement::Root; objects.len()];
    let mut reach = visual.clone();

    // Children before parents, so every child's reach is final when its parent sweeps
    for &parent in hierarchy.depth_first().iter().rev() {
        let children = hierarchy.children(parent);
        if children.is_empty() {
            continue;
        }
        let parent_radius = visual[parent];
        let mut frontier: Option<f64> = None;
        for &child in children {
            let object = &objects[child];
            match &object.orbit {
                Orbit::Keplerian(orbit) => {
                    let child_reach = reach[child];
                    let base = sanitize_au(orbit.semi_major_axis, &object.id) * scaling.orbit_scaling;
                    let mut distance =
                        base.max(parent_radius * scaling.safety_multiplier + child_reach);
                    if let Some(edge) = frontier {
                        distance = distance.max(edge + scaling.min_distance + child_reach);
                    }
                    placement[child] = Placement::Orbit { distance };
                    frontier = Some(distance + child_reach);
                }
                Orbit::Belt(belt) => {
                    let mut inner = sanitize_au(belt.inner_radius, &object.id) * scaling.orbit_scaling;
                    let mut outer = sanitize_au(belt.outer_radius, &object.id) * scaling.orbit_scaling;
                    if outer < inner {
                        log::warn!("belt '{}' has outer < inner radius, swapping", object.id);
                        std::mem::swap(&mut inner, &mut outer);
                    }
                    let width = (outer - inner).max(scaling.min_distance);
                    let clearance = if object.classification == Classification::Ring {
                        parent_radius * RING_CLEARANCE
                    } else {
                        parent_radius * scaling.safety_multiplier
                    };
                    let floor = match frontier {
                        Some(edge) => clearance.max(edge + scaling.min_distance),
                        None => clearance,
                    };
                    let inner = inner.max(floor);
                    let outer = inner + width;
                    placement[child] = Placement::Belt(BeltData {
                        inner_radius: inner,
                        outer_radius: outer,
                        center_radius: (inner + outer) / 2.0,
                    });
                    frontier = Some(outer);
                }
                Orbit::None => {}
            }
        }
        if let Some(edge) = frontier {
            reach[parent] = reach[parent].max(edge);
        }
    }

    let max_orbit_radius = hierarchy
        .roots()
        .iter()
        .map(|&root| reach[root])
        .fold(0.0, f64::max);

    let results: Vec<OrbitalMechanicsResult> = visual
        .iter()
        .zip(&placement)
        .zip(&reach)
        .map(|((&visual_radius, &placement), &reach)| OrbitalMechanicsResult {
            visual_radius,
            placement,
            reach,
        })
        .collect();

    let mut index = HashMap::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        // First definition wins, as in the hierarchy
        index.entry(object.id.clone()).or_insert(i);
    }

    log::debug!(
        "laid out '{}' in '{}' mode: {} objects, extent {:.1}",
        system.id,
        mode.id,
        results.len(),
        max_orbit_radius
    );

    SystemLayout {
        mode_id: mode.id.clone(),
        generation: system.generation(),
        results,
        index,
        max_orbit_radius,
    }
}

fn assign_visual_radii(system: &StarSystem, scaling: &ScalingConfig) -> Vec<f64> {
    let objects = system.objects();
    let radii: Vec<f64> = objects
        .iter()
        .map(|object| {
            if !object.classification.has_body() {
                return DEFAULT_RADIUS_KM;
            }
            let radius = object.properties.radius;
            if radius.is_finite() && radius > 0.0 {
                radius
            } else {
                log::warn!(
                    "'{}' has radius {}, using {} km",
                    object.id,
                    radius,
                    DEFAULT_RADIUS_KM
                );
                DEFAULT_RADIUS_KM
            }
        })
        .collect();

    let (lo, hi) = objects
        .iter()
        .zip(&radii)
        .filter(|(object, _)| object.classification.has_body())
        .map(|(_, radius)| radius.log10())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), log_radius| {
            (lo.min(log_radius), hi.max(log_radius))
        });

    objects
        .iter()
        .zip(&radii)
        .map(|(object, &radius)| {
            let class = object.classification;
            let size = match (&scaling.fixed_sizes, class) {
                (_, Classification::Barycenter) => 0.0,
                (Some(fixed), _) => fixed.size_for(class),
                (None, Classification::Belt | Classification::Ring) => scaling.min_visual_size,
                (None, _) => {
                    let t = if hi - lo > 1e-9 {
                        (radius.log10() - lo) / (hi - lo)
                    } else {
                        0.5
                    };
                    let span = scaling.max_visual_size - scaling.min_visual_size;
                    (scaling.min_visual_size + t * span) * classification_factor(class)
                }
            };
            let bonus = match (class, object.properties.kind) {
                (Classification::Planet, Some(PlanetKind::GasGiant)) => GAS_GIANT_BONUS,
                (Classification::Planet, Some(PlanetKind::IceGiant)) => ICE_GIANT_BONUS,
                _ => 1.0,
            };
            size * bonus
        })
        .collect()
}

/// Extra log-scale weighting; anything not listed uses 1.0
fn classification_factor(classification: Classification) -> f64 {
    match classification {
        Classification::DwarfPlanet => 0.9,
        Classification::Asteroid => 0.8,
        _ => 1.0,
    }
}

fn sanitize_au(value: f64, id: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("'{id}' has orbital distance {value} AU, using 0");
        0.0
    }
}
