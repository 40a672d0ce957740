//! View-mode definitions: scaling, camera and feature settings per mode
//!
//! All built-in modes share one consistent constant set. Custom modes come in
//! through the registry and are validated there.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::ViewModeError;
use crate::object::Classification;

pub const EXPLORATIONAL: &str = "explorational";
pub const NAVIGATIONAL: &str = "navigational";
pub const PROFILE: &str = "profile";
pub const SCIENTIFIC: &str = "scientific";

/// Map alternate names onto the canonical mode id
pub fn canonical_id(id: &str) -> &str {
    match id {
        "realistic" => EXPLORATIONAL,
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewModeCategory {
    Scientific,
    Educational,
    Gaming,
    Navigation,
    Custom,
}

/// How orbiting bodies move along their paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitLayout {
    /// Circles in the reference plane, eccentricity and inclination ignored
    Clean,
    /// Kepler ellipses with inclination
    Physical,
}

/// How the camera frames a focused object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingStrategy {
    /// Approach the object itself from the current viewing direction
    Standard,
    /// Frame the span between the object and its outermost orbiting child
    Profile,
}

/// Per-classification sizes for fixed-size modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedSizes {
    pub star: f64,
    pub planet: f64,
    pub moon: f64,
    pub asteroid: f64,
    pub belt: f64,
}

impl FixedSizes {
    pub fn size_for(&self, classification: Classification) -> f64 {
        match classification {
            Classification::Star => self.star,
            Classification::Planet => self.planet,
            Classification::Moon => self.moon,
            Classification::DwarfPlanet | Classification::Asteroid => self.asteroid,
            Classification::Belt | Classification::Ring => self.belt,
            Classification::Barycenter => 0.0,
            Classification::Other => self.planet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    pub max_visual_size: f64,
    pub min_visual_size: f64,
    /// Scene units per AU
    pub orbit_scaling: f64,
    /// Minimum orbit as a multiple of the parent's visual radius
    pub safety_multiplier: f64,
    /// Minimum clearance between neighbouring bodies, in scene units
    pub min_distance: f64,
    /// Present for fixed-size modes; absent means logarithmic scaling
    #[serde(default)]
    pub fixed_sizes: Option<FixedSizes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewingAngles {
    /// Degrees above the orbital plane when focusing an object
    pub default_elevation: f64,
    /// Degrees above the orbital plane for the system overview
    pub birds_eye_elevation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Seconds
    pub focus_duration: f64,
    /// Seconds
    pub birds_eye_duration: f64,
    pub easing: Easing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub radius_multiplier: f64,
    pub min_distance_multiplier: f64,
    pub max_distance_multiplier: f64,
    pub absolute_min_distance: f64,
    pub absolute_max_distance: f64,
    pub viewing_angles: ViewingAngles,
    pub animation: AnimationConfig,
}

/// What the renderer and sidebar should show in this mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFeatures {
    #[serde(default = "default_true")]
    pub orbit_paths: bool,
    #[serde(default = "default_true")]
    pub labels: bool,
    #[serde(default)]
    pub habitable_zone: bool,
    #[serde(default)]
    pub snow_line: bool,
    #[serde(default = "default_true")]
    pub belts: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ViewFeatures {
    fn default() -> Self {
        Self {
            orbit_paths: true,
            labels: true,
            habitable_zone: false,
            snow_line: false,
            belts: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModeDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ViewModeCategory,
    pub scaling: ScalingConfig,
    pub camera: CameraConfig,
    pub layout: OrbitLayout,
    #[serde(default = "default_framing")]
    pub framing: FramingStrategy,
    #[serde(default)]
    pub features: ViewFeatures,
}

fn default_framing() -> FramingStrategy {
    FramingStrategy::Standard
}

impl ViewModeDefinition {
    /// Logarithmic sizes with physically styled orbits
    pub fn explorational() -> Self {
        Self {
            id: EXPLORATIONAL.to_string(),
            name: "Explorational".to_string(),
            description: "Realistic proportions compressed onto a log scale".to_string(),
            category: ViewModeCategory::Educational,
            scaling: ScalingConfig {
                max_visual_size: 5.0,
                min_visual_size: 0.05,
                orbit_scaling: 50.0,
                safety_multiplier: 2.5,
                min_distance: 0.1,
                fixed_sizes: None,
            },
            camera: CameraConfig {
                radius_multiplier: 4.0,
                min_distance_multiplier: 2.5,
                max_distance_multiplier: 20.0,
                absolute_min_distance: 0.5,
                absolute_max_distance: 10_000.0,
                viewing_angles: ViewingAngles {
                    default_elevation: 20.0,
                    birds_eye_elevation: 60.0,
                },
                animation: AnimationConfig {
                    focus_duration: 1.5,
                    birds_eye_duration: 2.0,
                    easing: Easing::EaseInOut,
                },
            },
            layout: OrbitLayout::Physical,
            framing: FramingStrategy::Standard,
            features: ViewFeatures::default(),
        }
    }

    /// Log scale with tighter spacing and every zone overlay on
    pub fn scientific() -> Self {
        Self {
            id: SCIENTIFIC.to_string(),
            name: "Scientific".to_string(),
            description: "Physical orbits with habitable zone and snow line overlays".to_string(),
            category: ViewModeCategory::Scientific,
            scaling: ScalingConfig {
                max_visual_size: 3.0,
                min_visual_size: 0.02,
                orbit_scaling: 40.0,
                safety_multiplier: 2.0,
                min_distance: 0.05,
                fixed_sizes: None,
            },
            camera: CameraConfig {
                radius_multiplier: 5.0,
                min_distance_multiplier: 2.0,
                max_distance_multiplier: 30.0,
                absolute_min_distance: 0.2,
                absolute_max_distance: 8_000.0,
                viewing_angles: ViewingAngles {
                    default_elevation: 15.0,
                    birds_eye_elevation: 70.0,
                },
                animation: AnimationConfig {
                    focus_duration: 1.2,
                    birds_eye_duration: 1.8,
                    easing: Easing::EaseOut,
                },
            },
            layout: OrbitLayout::Physical,
            framing: FramingStrategy::Standard,
            features: ViewFeatures {
                habitable_zone: true,
                snow_line: true,
                ..ViewFeatures::default()
            },
        }
    }

    /// Uniform icon sizes on clean circular orbits
    pub fn navigational() -> Self {
        Self {
            id: NAVIGATIONAL.to_string(),
            name: "Navigational".to_string(),
            description: "Consistent icon sizes on clean circular orbits".to_string(),
            category: ViewModeCategory::Navigation,
            scaling: ScalingConfig {
                max_visual_size: 3.0,
                min_visual_size: 0.1,
                orbit_scaling: 40.0,
                safety_multiplier: 3.0,
                min_distance: 0.5,
                fixed_sizes: Some(FixedSizes {
                    star: 2.0,
                    planet: 1.2,
                    moon: 0.6,
                    asteroid: 0.3,
                    belt: 0.2,
                }),
            },
            camera: CameraConfig {
                radius_multiplier: 4.0,
                min_distance_multiplier: 3.0,
                max_distance_multiplier: 12.0,
                absolute_min_distance: 1.0,
                absolute_max_distance: 6_000.0,
                viewing_angles: ViewingAngles {
                    default_elevation: 30.0,
                    birds_eye_elevation: 75.0,
                },
                animation: AnimationConfig {
                    focus_duration: 1.0,
                    birds_eye_duration: 1.5,
                    easing: Easing::EaseOut,
                },
            },
            layout: OrbitLayout::Clean,
            framing: FramingStrategy::Standard,
            features: ViewFeatures::default(),
        }
    }

    /// Side-on view of an object and everything orbiting it
    pub fn profile() -> Self {
        Self {
            id: PROFILE.to_string(),
            name: "Profile".to_string(),
            description: "Side-on view lining up an object's orbiting bodies".to_string(),
            category: ViewModeCategory::Educational,
            scaling: ScalingConfig {
                max_visual_size: 4.0,
                min_visual_size: 0.1,
                orbit_scaling: 30.0,
                safety_multiplier: 3.0,
                min_distance: 1.0,
                fixed_sizes: Some(FixedSizes {
                    star: 2.5,
                    planet: 1.5,
                    moon: 0.8,
                    asteroid: 0.4,
                    belt: 0.25,
                }),
            },
            camera: CameraConfig {
                radius_multiplier: 3.0,
                min_distance_multiplier: 2.5,
                max_distance_multiplier: 10.0,
                absolute_min_distance: 2.0,
                absolute_max_distance: 5_000.0,
                viewing_angles: ViewingAngles {
                    default_elevation: 10.0,
                    birds_eye_elevation: 45.0,
                },
                animation: AnimationConfig {
                    focus_duration: 1.2,
                    birds_eye_duration: 1.5,
                    easing: Easing::Leap,
                },
            },
            layout: OrbitLayout::Clean,
            framing: FramingStrategy::Profile,
            features: ViewFeatures {
                orbit_paths: false,
                ..ViewFeatures::default()
            },
        }
    }

    /// The built-in catalog in registration order
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::explorational(),
            Self::navigational(),
            Self::profile(),
            Self::scientific(),
        ]
    }

    pub fn is_fixed_size(&self) -> bool {
        self.scaling.fixed_sizes.is_some()
    }

    /// Check every numeric invariant a definition must satisfy
    pub fn validate(&self) -> Result<(), ViewModeError> {
        if self.id.trim().is_empty() {
            return Err(ViewModeError::EmptyId);
        }
        let scaling = &self.scaling;
        let camera = &self.camera;
        let animation = &camera.animation;
        let numbers = [
            ("max_visual_size", scaling.max_visual_size),
            ("min_visual_size", scaling.min_visual_size),
            ("orbit_scaling", scaling.orbit_scaling),
            ("safety_multiplier", scaling.safety_multiplier),
            ("min_distance", scaling.min_distance),
            ("radius_multiplier", camera.radius_multiplier),
            ("min_distance_multiplier", camera.min_distance_multiplier),
            ("max_distance_multiplier", camera.max_distance_multiplier),
            ("absolute_min_distance", camera.absolute_min_distance),
            ("absolute_max_distance", camera.absolute_max_distance),
            ("default_elevation", camera.viewing_angles.default_elevation),
            ("birds_eye_elevation", camera.viewing_angles.birds_eye_elevation),
            ("focus_duration", animation.focus_duration),
            ("birds_eye_duration", animation.birds_eye_duration),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(ViewModeError::NonFinite {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }

        if !(scaling.min_visual_size > 0.0 && scaling.max_visual_size > scaling.min_visual_size) {
            return Err(ViewModeError::InvalidSizeRange {
                id: self.id.clone(),
                min: scaling.min_visual_size,
                max: scaling.max_visual_size,
            });
        }
        if !(camera.absolute_min_distance > 0.0
            && camera.absolute_max_distance > camera.absolute_min_distance)
        {
            return Err(ViewModeError::InvalidDistanceRange {
                id: self.id.clone(),
                min: camera.absolute_min_distance,
                max: camera.absolute_max_distance,
            });
        }

        let mut positive = vec![
            ("orbit_scaling", scaling.orbit_scaling),
            ("safety_multiplier", scaling.safety_multiplier),
            ("min_distance", scaling.min_distance),
            ("radius_multiplier", camera.radius_multiplier),
            ("min_distance_multiplier", camera.min_distance_multiplier),
            ("max_distance_multiplier", camera.max_distance_multiplier),
        ];
        if let Some(fixed) = &scaling.fixed_sizes {
            positive.extend([
                ("fixed_sizes.star", fixed.star),
                ("fixed_sizes.planet", fixed.planet),
                ("fixed_sizes.moon", fixed.moon),
                ("fixed_sizes.asteroid", fixed.asteroid),
                ("fixed_sizes.belt", fixed.belt),
            ]);
        }
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ViewModeError::NotPositive {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        if animation.focus_duration < 0.0 || animation.birds_eye_duration < 0.0 {
            return Err(ViewModeError::NotPositive {
                id: self.id.clone(),
                field: "animation duration",
                value: animation.focus_duration.min(animation.birds_eye_duration),
            });
        }
        Ok(())
    }
}
