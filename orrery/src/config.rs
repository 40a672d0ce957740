//! Session configuration and RON loaders for systems and custom view modes
//!
//! `orrery.ron` in the working directory holds the session settings. A missing
//! or broken settings file is never fatal; system and view-mode files named
//! in it are loaded with errors reported to the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::object::SystemDescription;
use crate::registry::{RegistrationPolicy, ViewModeRegistry};
use crate::system::StarSystem;
use crate::view_mode::{ViewModeDefinition, EXPLORATIONAL};

pub const CONFIG_FILE: &str = "orrery.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrreryConfig {
    /// View mode to start in; unknown ids fall back to explorational
    #[serde(default = "default_view_mode")]
    pub default_view_mode: String,
    /// Seed for starting angles. Absent means a new layout every run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Simulated days per wall-clock second
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Frames the headless driver runs
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Object to focus once the system is loaded
    #[serde(default)]
    pub focus: Option<String>,
    /// RON system description; the built-in solar system when absent
    #[serde(default)]
    pub system_file: Option<PathBuf>,
    /// RON list of extra view modes
    #[serde(default)]
    pub custom_modes_file: Option<PathBuf>,
    /// Let custom modes replace existing ids
    #[serde(default)]
    pub live_reload: bool,
}

fn default_view_mode() -> String {
    EXPLORATIONAL.to_string()
}
fn default_time_scale() -> f64 {
    10.0
}
fn default_frames() -> u32 {
    600
}
fn default_frame_rate() -> f64 {
    60.0
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            default_view_mode: default_view_mode(),
            seed: None,
            time_scale: default_time_scale(),
            frames: default_frames(),
            frame_rate: default_frame_rate(),
            focus: None,
            system_file: None,
            custom_modes_file: None,
            live_reload: false,
        }
    }
}

impl OrreryConfig {
    /// Load `orrery.ron` from the working directory, or defaults
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load settings from `path`. Missing or invalid files give defaults.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match Self::parse(&data) {
                Ok(config) => return config,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        Ok(config.sanitized())
    }

    /// Seconds of wall-clock time per frame
    pub fn frame_time(&self) -> f64 {
        1.0 / self.frame_rate
    }

    pub fn registration_policy(&self) -> RegistrationPolicy {
        if self.live_reload {
            RegistrationPolicy::LiveReload
        } else {
            RegistrationPolicy::Strict
        }
    }

    fn sanitized(mut self) -> Self {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            log::warn!("frame_rate {} is not usable, using {}", self.frame_rate, default_frame_rate());
            self.frame_rate = default_frame_rate();
        }
        if !self.time_scale.is_finite() {
            log::warn!("time_scale {} is not finite, using {}", self.time_scale, default_time_scale());
            self.time_scale = default_time_scale();
        }
        self
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(CONFIG_FILE)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a system from a RON `SystemDescription`
pub fn parse_system(data: &str) -> Result<StarSystem, ConfigError> {
    let description: SystemDescription = ron::from_str(data)?;
    Ok(StarSystem::new(description))
}

pub fn load_system(path: &Path) -> Result<StarSystem, ConfigError> {
    let system = parse_system(&read(path)?)?;
    log::info!("loaded system '{}' from {:?} ({} objects)", system.id, path, system.objects().len());
    Ok(system)
}

/// Parse a RON list of view modes, rejecting the first invalid one
pub fn parse_view_modes(data: &str) -> Result<Vec<ViewModeDefinition>, ConfigError> {
    let modes: Vec<ViewModeDefinition> = ron::from_str(data)?;
    for mode in &modes {
        mode.validate()?;
    }
    Ok(modes)
}

pub fn load_view_modes(path: &Path) -> Result<Vec<ViewModeDefinition>, ConfigError> {
    parse_view_modes(&read(path)?)
}

/// Register every mode in `modes`, stopping at the first rejection
pub fn register_view_modes(
    registry: &mut ViewModeRegistry,
    modes: Vec<ViewModeDefinition>,
) -> Result<usize, ConfigError> {
    let count = modes.len();
    for mode in modes {
        log::debug!("registering view mode '{}'", mode.id);
        registry.register(mode)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewModeError;
    use crate::object::{Classification, Orbit};

    const SYSTEM: &str = r#"(
        id: "kepler-test",
        name: "Test System",
        lighting: (primary_star: Some("a")),
        objects: [
            (id: "a", name: "Primary", classification: star,
             properties: (radius: 600000.0, spectral_type: Some("K2V"))),
            (id: "b", classification: planet,
             properties: (radius: 5000.0, kind: Some(terrestrial)),
             orbit: Keplerian((parent: "a", semi_major_axis: 0.7, eccentricity: 0.1))),
            (id: "dust", classification: belt,
             properties: (radius: 1.0),
             orbit: Belt((parent: "a", inner_radius: 2.0, outer_radius: 2.6))),
        ],
    )"#;

    #[test]
    fn system_parses_from_ron() {
        let system = parse_system(SYSTEM).unwrap();
        assert_eq!(system.id, "kepler-test");
        assert_eq!(system.objects().len(), 3);
        assert_eq!(system.primary_star().map(|s| s.id.as_str()), Some("a"));
        let planet = system.get("b").unwrap();
        assert_eq!(planet.display_name(), "b");
        assert!(matches!(&planet.orbit, Orbit::Keplerian(o) if o.parent == "a"));
        assert_eq!(system.get("dust").unwrap().classification, Classification::Belt);
    }

    #[test]
    fn unknown_classification_loads_as_a_plain_body() {
        let system = parse_system(
            r#"(
                id: "visitor",
                objects: [
                    (id: "sun", classification: star, properties: (radius: 695700.0)),
                    (id: "halley", classification: comet, properties: (radius: 5.5),
                     orbit: Keplerian((parent: "sun", semi_major_axis: 17.8, eccentricity: 0.967))),
                ],
            )"#,
        )
        .unwrap();
        let comet = system.get("halley").unwrap();
        assert_eq!(comet.classification, Classification::Other);
        assert!(comet.classification.has_body());

        for mode in ViewModeDefinition::builtin() {
            let layout = crate::mechanics::compute_layout(&system, &mode);
            assert!(layout.visual_radius("halley").unwrap() > 0.0, "{}", mode.id);
            assert!(layout.orbit_distance("halley").is_some());
        }
    }

    #[test]
    fn broken_system_is_an_error() {
        assert!(matches!(parse_system("(id: \"x\", objects: [(id: 3)])"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_system_file_is_an_io_error() {
        let err = load_system(Path::new("/nonexistent/system.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn config_fields_default_individually() {
        let config = OrreryConfig::parse("(seed: Some(7), focus: Some(\"earth\"))").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.focus.as_deref(), Some("earth"));
        assert_eq!(config.default_view_mode, EXPLORATIONAL);
        assert_eq!(config.frames, 600);
        assert_eq!(config.registration_policy(), RegistrationPolicy::Strict);
    }

    #[test]
    fn unusable_frame_rate_is_replaced() {
        let config = OrreryConfig::parse("(frame_rate: 0.0)").unwrap();
        assert_eq!(config.frame_rate, 60.0);
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let config = OrreryConfig::load_from(Path::new("/nonexistent/orrery.ron"));
        assert_eq!(config, OrreryConfig::default());
    }

    #[test]
    fn custom_modes_round_trip_through_ron() {
        let mut custom = ViewModeDefinition::scientific();
        custom.id = "deep-field".to_string();
        custom.name = "Deep Field".to_string();
        let text = ron::ser::to_string_pretty(&vec![custom.clone()], ron::ser::PrettyConfig::default()).unwrap();

        let modes = parse_view_modes(&text).unwrap();
        assert_eq!(modes, vec![custom]);

        let mut registry = ViewModeRegistry::with_builtin_modes();
        assert_eq!(register_view_modes(&mut registry, modes).unwrap(), 1);
        assert!(registry.has("deep-field"));
    }

    #[test]
    fn invalid_custom_mode_is_rejected() {
        let mut broken = ViewModeDefinition::explorational();
        broken.id = "broken".to_string();
        broken.scaling.min_visual_size = 10.0;
        let text = ron::to_string(&vec![broken]).unwrap();
        assert!(matches!(
            parse_view_modes(&text),
            Err(ConfigError::ViewMode(ViewModeError::InvalidSizeRange { .. }))
        ));
    }

    #[test]
    fn builtin_id_collision_is_rejected_unless_live_reload() {
        let modes = vec![ViewModeDefinition::profile()];
        let mut registry = ViewModeRegistry::with_builtin_modes();
        assert!(matches!(
            register_view_modes(&mut registry, modes.clone()),
            Err(ConfigError::ViewMode(ViewModeError::DuplicateId(_)))
        ));
        registry.set_policy(RegistrationPolicy::LiveReload);
        assert_eq!(register_view_modes(&mut registry, modes).unwrap(), 1);
    }
}
