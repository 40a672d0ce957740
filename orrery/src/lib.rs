//! Orrery - orbital layout and camera core for star-system visualizers
//!
//! Turns physical catalog data into a legible scene:
//! - View-mode registry with validated scaling and camera settings
//! - Orbital mechanics calculator producing non-overlapping visual layouts
//! - Kepler position solver and per-frame orbital motion
//! - Camera focus state machine with animated framing and follow
//! - Habitable zone and snow line estimates from stellar data
//!
//! Everything here runs on the host's frame callback; nothing blocks and
//! nothing in the frame path returns an error.

pub mod cache;
pub mod camera_controller;
pub mod catalog;
pub mod config;
pub mod easing;
pub mod error;
pub mod framing;
pub mod hierarchy;
pub mod kepler;
pub mod mechanics;
pub mod motion;
pub mod object;
pub mod registry;
pub mod render_data;
pub mod system;
pub mod view_mode;
pub mod zones;

pub use cache::LayoutCache;
pub use camera_controller::{
    AnimationToken, CameraController, CameraEvent, CameraState, FocusRequest, FocusResponse, FocusedObject,
    FramingIndicator, Scene,
};
pub use config::OrreryConfig;
pub use easing::Easing;
pub use error::{ConfigError, ViewModeError};
pub use hierarchy::SystemHierarchy;
pub use mechanics::{compute_layout, BeltData, OrbitalMechanicsResult, Placement, SystemLayout};
pub use motion::{ObjectLocator, OrbitalMotion, WorldPositions};
pub use object::{
    BeltOrbitData, CelestialObject, Classification, Lighting, Orbit, OrbitData, PhysicalProperties, PlanetKind,
    SystemDescription,
};
pub use registry::{RegistrationPolicy, ViewModeRegistry};
pub use render_data::{BeltInstance, BodyInstance, FrameSnapshot};
pub use system::StarSystem;
pub use view_mode::{OrbitLayout, ViewModeDefinition};
pub use zones::StellarZones;
