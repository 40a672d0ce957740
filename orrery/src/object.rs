//! Celestial object data model
//!
//! Radii are in km, orbital distances in AU, angles in degrees and periods in days.
//! Objects are immutable once a system is loaded; only derived visual state changes.

use serde::{Deserialize, Serialize};

/// What kind of thing an object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
    Asteroid,
    Belt,
    Ring,
    Barycenter,
    /// Anything a data file names that is not listed above; drawn as a plain body
    #[serde(other)]
    Other,
}

impl Classification {
    /// Belts and rings are annular regions rather than single bodies
    pub fn is_annular(self) -> bool {
        matches!(self, Classification::Belt | Classification::Ring)
    }

    /// Whether the object is drawn as a solid body
    pub fn has_body(self) -> bool {
        !matches!(
            self,
            Classification::Belt | Classification::Ring | Classification::Barycenter
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Classification::Star => "star",
            Classification::Planet => "planet",
            Classification::DwarfPlanet => "dwarf planet",
            Classification::Moon => "moon",
            Classification::Asteroid => "asteroid",
            Classification::Belt => "belt",
            Classification::Ring => "ring",
            Classification::Barycenter => "barycenter",
            Classification::Other => "object",
        }
    }
}

/// Planet composition, used for the giant size bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetKind {
    Terrestrial,
    GasGiant,
    IceGiant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProperties {
    /// Mean radius in km
    pub radius: f64,
    /// Mass in Earth masses
    #[serde(default)]
    pub mass: f64,
    /// Effective surface temperature in K
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub spectral_type: Option<String>,
    /// Luminosity in solar units
    #[serde(default)]
    pub luminosity: Option<f64>,
    #[serde(default)]
    pub kind: Option<PlanetKind>,
}

impl PhysicalProperties {
    pub fn with_radius(radius: f64) -> Self {
        Self {
            radius,
            mass: 0.0,
            temperature: None,
            spectral_type: None,
            luminosity: None,
            kind: None,
        }
    }
}

/// Elliptical orbit around a parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitData {
    pub parent: String,
    pub semi_major_axis: f64,
    #[serde(default)]
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination: f64,
    /// Zero or negative means "derive from Kepler's third law"
    #[serde(default)]
    pub orbital_period: f64,
}

/// Annular region around a parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeltOrbitData {
    pub parent: String,
    pub inner_radius: f64,
    pub outer_radius: f64,
    #[serde(default)]
    pub inclination: f64,
    #[serde(default)]
    pub eccentricity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Orbit {
    /// Sits at the system origin
    #[default]
    None,
    Keplerian(OrbitData),
    Belt(BeltOrbitData),
}

impl Orbit {
    pub fn parent(&self) -> Option<&str> {
        match self {
            Orbit::None => None,
            Orbit::Keplerian(orbit) => Some(&orbit.parent),
            Orbit::Belt(belt) => Some(&belt.parent),
        }
    }

    /// Radial position used to order siblings: semi-major axis or belt inner edge, in AU
    pub fn radial_key(&self) -> f64 {
        let key = match self {
            Orbit::None => 0.0,
            Orbit::Keplerian(orbit) => orbit.semi_major_axis,
            Orbit::Belt(belt) => belt.inner_radius,
        };
        if key.is_finite() {
            key
        } else {
            0.0
        }
    }

    pub fn inclination(&self) -> f64 {
        match self {
            Orbit::None => 0.0,
            Orbit::Keplerian(orbit) => orbit.inclination,
            Orbit::Belt(belt) => belt.inclination,
        }
    }
}

/// One star, planet, moon, belt, ring or barycenter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub classification: Classification,
    pub properties: PhysicalProperties,
    #[serde(default)]
    pub orbit: Orbit,
}

impl CelestialObject {
    pub fn new(id: &str, name: &str, classification: Classification, radius_km: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            classification,
            properties: PhysicalProperties::with_radius(radius_km),
            orbit: Orbit::None,
        }
    }

    pub fn star(id: &str, name: &str, radius_km: f64) -> Self {
        Self::new(id, name, Classification::Star, radius_km)
    }

    pub fn planet(id: &str, name: &str, radius_km: f64) -> Self {
        Self::new(id, name, Classification::Planet, radius_km)
    }

    pub fn moon(id: &str, name: &str, radius_km: f64) -> Self {
        Self::new(id, name, Classification::Moon, radius_km)
    }

    pub fn barycenter(id: &str, name: &str) -> Self {
        Self::new(id, name, Classification::Barycenter, 0.0)
    }

    /// Belt or ring spanning `inner`..`outer` AU around `parent`
    pub fn belt(id: &str, name: &str, parent: &str, inner: f64, outer: f64) -> Self {
        let mut belt = Self::new(id, name, Classification::Belt, 0.0);
        belt.orbit = Orbit::Belt(BeltOrbitData {
            parent: parent.to_string(),
            inner_radius: inner,
            outer_radius: outer,
            inclination: 0.0,
            eccentricity: 0.0,
        });
        belt
    }

    pub fn ring(id: &str, name: &str, parent: &str, inner: f64, outer: f64) -> Self {
        let mut ring = Self::belt(id, name, parent, inner, outer);
        ring.classification = Classification::Ring;
        ring
    }

    pub fn orbiting(mut self, parent: &str, semi_major_axis: f64, eccentricity: f64, inclination: f64) -> Self {
        self.orbit = Orbit::Keplerian(OrbitData {
            parent: parent.to_string(),
            semi_major_axis,
            eccentricity,
            inclination,
            orbital_period: 0.0,
        });
        self
    }

    pub fn with_period(mut self, days: f64) -> Self {
        if let Orbit::Keplerian(orbit) = &mut self.orbit {
            orbit.orbital_period = days;
        }
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.properties.mass = mass;
        self
    }

    pub fn with_kind(mut self, kind: PlanetKind) -> Self {
        self.properties.kind = Some(kind);
        self
    }

    pub fn with_spectral_type(mut self, spectral_type: &str) -> Self {
        self.properties.spectral_type = Some(spectral_type.to_string());
        self
    }

    pub fn with_temperature(mut self, kelvin: f64) -> Self {
        self.properties.temperature = Some(kelvin);
        self
    }

    pub fn with_luminosity(mut self, solar: f64) -> Self {
        self.properties.luminosity = Some(solar);
        self
    }

    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    #[serde(default)]
    pub primary_star: Option<String>,
}

/// Static description of a whole system as handed over by the data loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDescription {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub objects: Vec<CelestialObject>,
    #[serde(default)]
    pub lighting: Lighting,
}
