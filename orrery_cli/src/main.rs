//! Orrery - headless star-system layout driver
//!
//! Loads `orrery.ron` (or defaults), lays the system out in every registered
//! view mode, then runs a fixed-step frame loop that advances orbital motion
//! and drives the camera through a focus, a follow and a birds-eye overview.
//!
//! Set `RUST_LOG=debug` for per-frame diagnostics.

use std::sync::Arc;

use anyhow::{Context, Result};
use common::{Camera3D, CameraUniform};
use orrery::config::{self, OrreryConfig};
use orrery::zones::StellarZones;
use orrery::{
    catalog, CameraController, CameraEvent, Classification, FocusRequest, FrameSnapshot, LayoutCache,
    OrbitalMotion, Placement, Scene, StarSystem, SystemLayout, ViewModeDefinition, ViewModeRegistry,
};

struct App {
    config: OrreryConfig,
    system: StarSystem,
    mode: ViewModeDefinition,
    layout: Arc<SystemLayout>,
    motion: OrbitalMotion,
    controller: CameraController,

    // Clock
    time: f64,
    frame: u32,
}

impl App {
    fn new(config: OrreryConfig, system: StarSystem, registry: &ViewModeRegistry, cache: &mut LayoutCache) -> Self {
        let mode = registry.get_or_default(&config.default_view_mode).clone();
        let layout = cache.get_or_compute(&system, &mode);
        let motion = OrbitalMotion::new(&system, mode.layout, config.seed);

        let extent = layout.max_orbit_radius().max(1.0);
        let camera = Camera3D::looking_at(
            glam::DVec3::new(0.0, extent * 0.5, extent * 2.0),
            glam::DVec3::ZERO,
            16.0 / 9.0,
        );

        Self {
            config,
            system,
            mode,
            layout,
            motion,
            controller: CameraController::new(camera),
            time: 0.0,
            frame: 0,
        }
    }

    /// Object to look at first: the configured one, else the first planet
    fn focus_target(&self) -> Option<String> {
        if let Some(id) = &self.config.focus {
            return Some(id.clone());
        }
        let primary = self.system.primary_star()?;
        self.system
            .children_of(&primary.id)
            .find(|o| o.classification == Classification::Planet)
            .map(|o| o.id.clone())
    }

    fn focus(&mut self, id: &str) {
        let Some(request) = FocusRequest::from_layout(&self.system, &self.layout, id) else {
            log::warn!("cannot focus '{id}': not in system '{}'", self.system.id);
            return;
        };
        let positions = self.motion.positions(&self.system, &self.layout);
        let scene = Scene {
            system: &self.system,
            layout: &self.layout,
            locator: &positions,
        };
        self.controller.request_focus(request, &self.mode, &scene, self.time);
    }

    fn update(&mut self, dt: f64) {
        self.time += dt;
        self.frame += 1;
        self.motion.advance(dt * self.config.time_scale);

        let positions = self.motion.positions(&self.system, &self.layout);
        self.controller.tick(self.time, &positions);

        // What a renderer would upload this frame
        let snapshot = FrameSnapshot::build(&self.system, &self.layout, &positions);
        let uniform_bytes = self
            .controller
            .camera()
            .map(|camera| bytemuck::bytes_of(&CameraUniform::from_camera_3d(camera)).len())
            .unwrap_or(0);
        log::debug!(
            "frame {}: {} bodies ({} B), {} belts ({} B), camera {} B",
            self.frame,
            snapshot.bodies.len(),
            snapshot.body_bytes().len(),
            snapshot.belts.len(),
            snapshot.belt_bytes().len(),
            uniform_bytes
        );

        for event in self.controller.drain_events() {
            report(&event);
        }
    }

    fn status(&self) {
        let Some(camera) = self.controller.camera() else {
            return;
        };
        let state = if self.controller.is_animating() {
            "animating"
        } else if self.controller.is_following() {
            "following"
        } else {
            "idle"
        };
        let focus = self
            .controller
            .get_object_properties()
            .map(|o| o.name.as_str())
            .unwrap_or("-");
        println!(
            "t={:6.2}s  day {:8.1}  camera {:9}  focus {:10}  distance {:8.2}",
            self.time,
            self.motion.elapsed_days(),
            state,
            focus,
            camera.distance()
        );
    }
}

fn report(event: &CameraEvent) {
    match event {
        CameraEvent::FocusStarted { object_id, .. } => println!("  -> flying to {object_id}"),
        CameraEvent::FocusCompleted { object_id, .. } => println!("  -> following {object_id}"),
        CameraEvent::OverviewStarted { .. } => println!("  -> birds-eye view"),
        CameraEvent::IndicatorShown { text, .. } => println!("  -> label: {text}"),
        CameraEvent::FollowLost { object_id } => println!("  -> lost {object_id}"),
        other => log::debug!("camera event {other:?}"),
    }
}

fn print_layouts(system: &StarSystem, registry: &ViewModeRegistry, cache: &mut LayoutCache) {
    let zones = system.primary_star().map(StellarZones::for_star);

    for mode in registry.all() {
        let layout = cache.get_or_compute(system, mode);
        println!();
        println!("== {} ({}) ==  extent {:.1}", mode.name, mode.id, layout.max_orbit_radius());
        for &node in system.hierarchy().depth_first() {
            let object = &system.objects()[node];
            let Some(result) = layout.result(node) else {
                continue;
            };
            let indent = "  ".repeat(system.hierarchy().depth(node) + 1);
            match result.placement {
                Placement::Root => println!("{indent}{:<16} r={:.3}", object.display_name(), result.visual_radius),
                Placement::Orbit { distance } => println!(
                    "{indent}{:<16} r={:.3}  orbit {:.2}",
                    object.display_name(),
                    result.visual_radius,
                    distance
                ),
                Placement::Belt(belt) => println!(
                    "{indent}{:<16} {:.2}..{:.2}",
                    object.display_name(),
                    belt.inner_radius,
                    belt.outer_radius
                ),
            }
        }
        if let Some(zones) = zones {
            let scaled = zones.scaled(mode.scaling.orbit_scaling);
            if mode.features.habitable_zone {
                println!(
                    "  habitable zone {:.2}..{:.2} AU ({:.1}..{:.1})",
                    zones.habitable_zone.inner, zones.habitable_zone.outer, scaled.habitable_zone.inner, scaled.habitable_zone.outer
                );
            }
            if mode.features.snow_line {
                println!("  snow line {:.2} AU ({:.1})", zones.snow_line, scaled.snow_line);
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = OrreryConfig::load();

    let mut registry = ViewModeRegistry::with_builtin_modes();
    registry.set_policy(config.registration_policy());
    if let Some(path) = &config.custom_modes_file {
        let modes = config::load_view_modes(path).with_context(|| format!("loading view modes from {path:?}"))?;
        let count = config::register_view_modes(&mut registry, modes)
            .with_context(|| format!("registering view modes from {path:?}"))?;
        log::info!("registered {count} custom view modes");
    }

    let system = match &config.system_file {
        Some(path) => config::load_system(path).with_context(|| format!("loading system from {path:?}"))?,
        None => catalog::sol(),
    };

    println!("Orrery - {} ({} objects)", system.name, system.objects().len());

    let mut cache = LayoutCache::new();
    print_layouts(&system, &registry, &mut cache);

    let frames = config.frames;
    let dt = config.frame_time();
    let fps = config.frame_rate.round().max(1.0) as u32;
    let mut app = App::new(config, system, &registry, &mut cache);

    println!();
    println!("Running {frames} frames in {} mode", app.mode.name);
    match app.focus_target() {
        Some(id) => app.focus(&id),
        None => log::info!("nothing to focus in '{}'", app.system.id),
    }

    for frame in 0..frames {
        if frame == frames / 2 {
            let layout = Arc::clone(&app.layout);
            app.controller.set_birds_eye_view(&app.mode, &layout, app.time);
        }
        app.update(dt);
        if app.frame % fps == 0 {
            app.status();
        }
    }

    let (hits, misses) = cache.stats();
    log::info!("layout cache: {hits} hits, {misses} misses");
    Ok(())
}
