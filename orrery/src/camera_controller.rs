//! Camera focus state machine
//!
//! `Idle` → `Animating` → `Following` → `Idle`. Exactly one animation runs at a
//! time; starting a new one replaces the old state and with it the old token,
//! so a superseded animation simply stops being ticked.
//!
//! All mutation happens from the host's per-frame callback: requests, `tick`
//! and the free-orbit controls.

use common::Camera3D;
use glam::DVec3;

use crate::easing::Easing;
use crate::framing::{self, CameraPose, NO_ORBITING_BODIES};
use crate::mechanics::{Placement, SystemLayout};
use crate::motion::ObjectLocator;
use crate::system::StarSystem;
use crate::view_mode::{FramingStrategy, ViewModeDefinition};

/// Follow mode ignores target movement smaller than this
pub const FOLLOW_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum FocusTarget {
    Object(String),
    Overview,
    Home,
}

/// One in-flight camera animation
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFocusState {
    pub token: AnimationToken,
    pub target: FocusTarget,
    pub start: CameraPose,
    pub end: CameraPose,
    /// Seconds on the host clock
    pub start_time: f64,
    pub duration: f64,
    pub easing: Easing,
    /// Where the focused object was when the animation was planned
    anchor: Option<DVec3>,
}

impl CameraFocusState {
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration > 0.0 {
            ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowState {
    pub object_id: String,
    pub last_position: DVec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraState {
    /// Free orbit control, nothing focused
    Idle,
    Animating(CameraFocusState),
    /// Rigidly tracking a moving object
    Following(FollowState),
}

/// What the camera needs to know about the object being focused
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRequest {
    pub object_id: String,
    pub name: String,
    pub visual_radius: f64,
    pub mass: f64,
    pub orbit_radius: f64,
    /// Re-run even if already animating towards this object
    pub force: bool,
}

impl FocusRequest {
    /// Build a request from the calculator's output for `id`
    pub fn from_layout(system: &StarSystem, layout: &SystemLayout, id: &str) -> Option<Self> {
        let object = system.get(id)?;
        let result = layout.get(id)?;
        let orbit_radius = match result.placement {
            Placement::Root => 0.0,
            Placement::Orbit { distance } => distance,
            Placement::Belt(belt) => belt.center_radius,
        };
        Some(Self {
            object_id: object.id.clone(),
            name: object.display_name().to_string(),
            visual_radius: result.visual_radius,
            mass: object.properties.mass,
            orbit_radius,
            force: false,
        })
    }

    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusResponse {
    Started(AnimationToken),
    /// Already animating towards the same object
    Ignored,
    /// No camera attached or the object is not in the scene
    Unavailable,
}

/// Properties of the focused object for the sidebar
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedObject {
    pub object_id: String,
    pub name: String,
    pub visual_radius: f64,
    pub mass: f64,
    pub orbit_radius: f64,
    /// Camera distance chosen for this object
    pub view_distance: f64,
}

/// Text label the renderer should draw in world space
#[derive(Debug, Clone, PartialEq)]
pub struct FramingIndicator {
    pub text: &'static str,
    pub position: DVec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraEvent {
    FocusStarted { object_id: String, token: AnimationToken },
    FocusIgnored { object_id: String },
    FocusCompleted { object_id: String, token: AnimationToken },
    OverviewStarted { token: AnimationToken },
    ResetStarted { token: AnimationToken },
    AnimationCompleted { token: AnimationToken },
    AnimationAborted { token: AnimationToken },
    FocusCleared,
    FollowLost { object_id: String },
    IndicatorShown { text: &'static str, position: DVec3 },
}

/// Everything a focus request reads from the current frame
pub struct Scene<'a> {
    pub system: &'a StarSystem,
    pub layout: &'a SystemLayout,
    pub locator: &'a dyn ObjectLocator,
}

enum Transition {
    Follow {
        token: AnimationToken,
        object_id: String,
        position: DVec3,
    },
    Settle(AnimationToken),
    Lost(String),
}

#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Option<Camera3D>,
    state: CameraState,
    next_token: u64,
    focused: Option<FocusedObject>,
    home: Option<CameraPose>,
    indicator: Option<FramingIndicator>,
    events: Vec<CameraEvent>,
}

impl CameraController {
    pub fn new(camera: Camera3D) -> Self {
        Self {
            camera: Some(camera),
            state: CameraState::Idle,
            next_token: 1,
            focused: None,
            home: None,
            indicator: None,
            events: Vec::new(),
        }
    }

    pub fn camera(&self) -> Option<&Camera3D> {
        self.camera.as_ref()
    }

    pub fn attach_camera(&mut self, camera: Camera3D) {
        self.camera = Some(camera);
    }

    /// Take the camera away, e.g. when the view using it is torn down
    pub fn detach_camera(&mut self) -> Option<Camera3D> {
        self.camera.take()
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, CameraState::Animating(_))
    }

    pub fn is_following(&self) -> bool {
        matches!(self.state, CameraState::Following(_))
    }

    pub fn current_token(&self) -> Option<AnimationToken> {
        match &self.state {
            CameraState::Animating(animation) => Some(animation.token),
            _ => None,
        }
    }

    /// Whether `token` still names the running animation
    pub fn is_current(&self, token: AnimationToken) -> bool {
        self.current_token() == Some(token)
    }

    /// Free orbit/zoom input is accepted unless an animation is running
    pub fn controls_enabled(&self) -> bool {
        self.camera.is_some() && !self.is_animating()
    }

    /// Distance the camera keeps from the focused object
    pub fn get_current_orbit_radius(&self) -> Option<f64> {
        self.focused.as_ref().map(|focused| focused.view_distance)
    }

    pub fn get_object_properties(&self) -> Option<&FocusedObject> {
        self.focused.as_ref()
    }

    pub fn home(&self) -> Option<&CameraPose> {
        self.home.as_ref()
    }

    pub fn framing_indicator(&self) -> Option<&FramingIndicator> {
        self.indicator.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<CameraEvent> {
        std::mem::take(&mut self.events)
    }

    fn issue_token(&mut self) -> AnimationToken {
        let token = AnimationToken(self.next_token);
        self.next_token += 1;
        token
    }

    fn current_pose(&self) -> Option<CameraPose> {
        self.camera.as_ref().map(|camera| CameraPose {
            position: camera.position,
            target: camera.target,
        })
    }

    fn start_animation(
        &mut self,
        target: FocusTarget,
        start: CameraPose,
        end: CameraPose,
        now: f64,
        duration: f64,
        easing: Easing,
        anchor: Option<DVec3>,
    ) -> AnimationToken {
        let token = self.issue_token();
        if let CameraState::Animating(previous) = &self.state {
            log::debug!("animation {:?} superseded by {:?}", previous.token, token);
        }
        self.state = CameraState::Animating(CameraFocusState {
            token,
            target,
            start,
            end,
            start_time: now,
            duration: duration.max(0.0),
            easing,
            anchor,
        });
        token
    }

    /// Start flying towards an object, superseding any running animation
    pub fn request_focus(
        &mut self,
        request: FocusRequest,
        mode: &ViewModeDefinition,
        scene: &Scene<'_>,
        now: f64,
    ) -> FocusResponse {
        if let CameraState::Animating(animation) = &self.state {
            if !request.force && animation.target == FocusTarget::Object(request.object_id.clone()) {
                log::debug!("already animating towards '{}'", request.object_id);
                self.events.push(CameraEvent::FocusIgnored {
                    object_id: request.object_id,
                });
                return FocusResponse::Ignored;
            }
        }

        let Some(start) = self.current_pose() else {
            log::warn!("focus on '{}' requested without a camera", request.object_id);
            return FocusResponse::Unavailable;
        };
        let Some(focus) = scene.locator.locate(&request.object_id) else {
            log::warn!("focus target '{}' is not in the scene", request.object_id);
            return FocusResponse::Unavailable;
        };

        let camera = &mode.camera;
        let (end, indicator) = match mode.framing {
            FramingStrategy::Standard => (
                framing::standard_pose(focus, request.visual_radius, camera, start.position - start.target),
                None,
            ),
            FramingStrategy::Profile => {
                let outermost = scene
                    .layout
                    .outermost_child(scene.system, &request.object_id)
                    .map(|(child, edge)| {
                        let placement = scene.layout.result(child).map(|r| r.placement);
                        let located = scene
                            .system
                            .objects()
                            .get(child)
                            .and_then(|object| scene.locator.locate(&object.id));
                        match (placement, located) {
                            (Some(Placement::Orbit { .. }), Some(position)) => position,
                            _ => focus + DVec3::new(edge, 0.0, 0.0),
                        }
                    });
                let profile = framing::profile_framing(
                    focus,
                    request.visual_radius,
                    outermost,
                    camera.viewing_angles.default_elevation,
                );
                let indicator = profile.synthetic.then(|| FramingIndicator {
                    text: NO_ORBITING_BODIES,
                    position: profile.outermost,
                });
                (profile.pose, indicator)
            }
        };

        if let Some(indicator) = &indicator {
            self.events.push(CameraEvent::IndicatorShown {
                text: indicator.text,
                position: indicator.position,
            });
        }
        self.indicator = indicator;
        self.focused = Some(FocusedObject {
            object_id: request.object_id.clone(),
            name: request.name,
            visual_radius: request.visual_radius,
            mass: request.mass,
            orbit_radius: request.orbit_radius,
            view_distance: end.distance(),
        });

        let token = self.start_animation(
            FocusTarget::Object(request.object_id.clone()),
            start,
            end,
            now,
            camera.animation.focus_duration,
            camera.animation.easing,
            Some(focus),
        );
        log::info!(
            "focusing '{}' at distance {:.2} ({} mode)",
            request.object_id,
            end.distance(),
            mode.id
        );
        self.events.push(CameraEvent::FocusStarted {
            object_id: request.object_id,
            token,
        });
        FocusResponse::Started(token)
    }

    /// Fly to an overview of the whole system
    pub fn set_birds_eye_view(
        &mut self,
        mode: &ViewModeDefinition,
        layout: &SystemLayout,
        now: f64,
    ) -> Option<AnimationToken> {
        let Some(start) = self.current_pose() else {
            log::warn!("birds-eye view requested without a camera");
            return None;
        };
        let end = framing::birds_eye_pose(
            layout.max_orbit_radius(),
            &mode.camera,
            start.position - start.target,
        );
        self.focused = None;
        self.indicator = None;
        let animation = &mode.camera.animation;
        let token = self.start_animation(
            FocusTarget::Overview,
            start,
            end,
            now,
            animation.birds_eye_duration,
            animation.easing,
            None,
        );
        log::info!("birds-eye view at distance {:.1}", end.distance());
        self.events.push(CameraEvent::OverviewStarted { token });
        Some(token)
    }

    /// Fly back to the pose saved when the last focus completed
    pub fn reset_to_home(&mut self, mode: &ViewModeDefinition, now: f64) -> Option<AnimationToken> {
        let end = self.home?;
        let start = self.current_pose()?;
        self.focused = None;
        self.indicator = None;
        let animation = &mode.camera.animation;
        let token = self.start_animation(
            FocusTarget::Home,
            start,
            end,
            now,
            animation.focus_duration,
            animation.easing,
            None,
        );
        self.events.push(CameraEvent::ResetStarted { token });
        Some(token)
    }

    /// Drop any focus and hand control back to the user
    pub fn clear_focus(&mut self) {
        if let CameraState::Animating(animation) = &self.state {
            log::debug!("animation {:?} cancelled by clear", animation.token);
        }
        self.state = CameraState::Idle;
        self.focused = None;
        self.indicator = None;
        self.events.push(CameraEvent::FocusCleared);
    }

    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        match self.camera.as_mut() {
            Some(camera) => {
                camera.orbit(delta_yaw, delta_pitch);
                true
            }
            None => false,
        }
    }

    pub fn zoom(&mut self, delta: f64) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        match self.camera.as_mut() {
            Some(camera) => {
                camera.zoom(delta);
                true
            }
            None => false,
        }
    }

    /// Advance the running animation or follow, once per rendered frame
    pub fn tick(&mut self, now: f64, locator: &dyn ObjectLocator) {
        let Some(camera) = self.camera.as_mut() else {
            if let CameraState::Animating(animation) = &self.state {
                log::warn!("camera went away during animation {:?}, aborting", animation.token);
                self.events.push(CameraEvent::AnimationAborted {
                    token: animation.token,
                });
            }
            if !matches!(self.state, CameraState::Idle) {
                self.state = CameraState::Idle;
            }
            return;
        };

        let transition = match &mut self.state {
            CameraState::Idle => None,
            CameraState::Animating(animation) => {
                let progress = animation.progress(now);
                let drift = match (&animation.target, animation.anchor) {
                    (FocusTarget::Object(id), Some(anchor)) => {
                        locator.locate(id).map(|p| p - anchor).unwrap_or(DVec3::ZERO)
                    }
                    _ => DVec3::ZERO,
                };
                let end = animation.end.translated(drift);
                let pose = animation.start.lerp(&end, animation.easing.apply(progress));
                camera.position = pose.position;
                camera.target = pose.target;

                if progress >= 1.0 {
                    Some(match &animation.target {
                        FocusTarget::Object(id) => Transition::Follow {
                            token: animation.token,
                            object_id: id.clone(),
                            position: animation.anchor.unwrap_or(DVec3::ZERO) + drift,
                        },
                        FocusTarget::Overview | FocusTarget::Home => Transition::Settle(animation.token),
                    })
                } else {
                    None
                }
            }
            CameraState::Following(follow) => match locator.locate(&follow.object_id) {
                Some(position) => {
                    let delta = position - follow.last_position;
                    if delta.length() > FOLLOW_EPSILON {
                        camera.translate(delta);
                        follow.last_position = position;
                    }
                    None
                }
                None => Some(Transition::Lost(follow.object_id.clone())),
            },
        };

        let pose = CameraPose {
            position: camera.position,
            target: camera.target,
        };
        match transition {
            None => {}
            Some(Transition::Follow {
                token,
                object_id,
                position,
            }) => {
                log::debug!("focus on '{object_id}' complete, following");
                self.home = Some(pose);
                self.events.push(CameraEvent::FocusCompleted {
                    object_id: object_id.clone(),
                    token,
                });
                self.state = CameraState::Following(FollowState {
                    object_id,
                    last_position: position,
                });
            }
            Some(Transition::Settle(token)) => {
                self.events.push(CameraEvent::AnimationCompleted { token });
                self.state = CameraState::Idle;
            }
            Some(Transition::Lost(object_id)) => {
                log::warn!("lost follow target '{object_id}', releasing camera");
                self.events.push(CameraEvent::FollowLost { object_id });
                self.focused = None;
                self.state = CameraState::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::mechanics::compute_layout;
    use crate::object::CelestialObject;

    fn earth_moon() -> StarSystem {
        StarSystem::from_objects(
            "earth-moon",
            vec![
                CelestialObject::star("sol", "Sun", 695_700.0),
                CelestialObject::planet("earth", "Earth", 6_371.0).orbiting("sol", 1.0, 0.0167, 0.0),
                CelestialObject::moon("moon", "Moon", 1_737.0).orbiting("earth", 0.00257, 0.0549, 5.1),
            ],
        )
    }

    fn positions(layout: &SystemLayout) -> HashMap<String, DVec3> {
        let earth = DVec3::new(layout.orbit_distance("earth").unwrap(), 0.0, 0.0);
        let moon = earth + DVec3::new(0.0, 0.0, layout.orbit_distance("moon").unwrap());
        HashMap::from([
            ("sol".to_string(), DVec3::ZERO),
            ("earth".to_string(), earth),
            ("moon".to_string(), moon),
        ])
    }

    fn controller() -> CameraController {
        CameraController::new(Camera3D::looking_at(DVec3::new(0.0, 50.0, 200.0), DVec3::ZERO, 1.5))
    }

    fn focus(
        controller: &mut CameraController,
        system: &StarSystem,
        layout: &SystemLayout,
        locator: &HashMap<String, DVec3>,
        mode: &ViewModeDefinition,
        id: &str,
        now: f64,
    ) -> FocusResponse {
        let request = FocusRequest::from_layout(system, layout, id).unwrap();
        let scene = Scene {
            system,
            layout,
            locator,
        };
        controller.request_focus(request, mode, &scene, now)
    }

    #[test]
    fn focus_animates_then_follows() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let locator = positions(&layout);
        let mut controller = controller();

        let response = focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0);
        assert!(matches!(response, FocusResponse::Started(_)));
        controller.tick(0.5, &locator);
        assert!(controller.is_animating());
        assert!(!controller.controls_enabled());

        controller.tick(mode.camera.animation.focus_duration, &locator);
        assert!(controller.is_following());
        let camera = controller.camera().unwrap();
        let expected = framing::focus_distance(layout.visual_radius("earth").unwrap(), &mode.camera);
        assert!((camera.distance() - expected).abs() < 1e-9);
        assert!((camera.target - locator["earth"]).length() < 1e-9);
        assert!((controller.get_current_orbit_radius().unwrap() - expected).abs() < 1e-9);
        assert_eq!(controller.get_object_properties().unwrap().name, "Earth");

        let events = controller.drain_events();
        assert!(matches!(events.first(), Some(CameraEvent::FocusStarted { .. })));
        assert!(matches!(events.last(), Some(CameraEvent::FocusCompleted { .. })));
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn repeated_focus_is_debounced_unless_forced() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let locator = positions(&layout);
        let mut controller = controller();

        let FocusResponse::Started(first) = focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0)
        else {
            panic!("focus did not start");
        };
        let again = focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.1);
        assert_eq!(again, FocusResponse::Ignored);
        assert!(controller.is_current(first));

        let request = FocusRequest::from_layout(&system, &layout, "earth").unwrap().forced();
        let scene = Scene {
            system: &system,
            layout: &layout,
            locator: &locator,
        };
        let FocusResponse::Started(second) = controller.request_focus(request, &mode, &scene, 0.2) else {
            panic!("forced focus did not start");
        };
        assert_ne!(first, second);
        assert!(!controller.is_current(first));
    }

    #[test]
    fn newer_request_supersedes_running_animation() {
        let system = earth_moon();
        let mode = ViewModeDefinition::scientific();
        let layout = compute_layout(&system, &mode);
        let locator = positions(&layout);
        let mut controller = controller();

        let FocusResponse::Started(earth) = focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0)
        else {
            panic!("focus did not start");
        };
        controller.tick(0.3, &locator);
        let FocusResponse::Started(moon) = focus(&mut controller, &system, &layout, &locator, &mode, "moon", 0.4)
        else {
            panic!("focus did not start");
        };
        assert!(!controller.is_current(earth));
        assert!(controller.is_current(moon));

        controller.tick(10.0, &locator);
        match controller.state() {
            CameraState::Following(follow) => assert_eq!(follow.object_id, "moon"),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn animation_tracks_a_target_that_moves() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let mut locator = positions(&layout);
        let mut controller = controller();

        focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0);
        let moved = locator["earth"] + DVec3::new(0.0, 0.0, 7.0);
        locator.insert("earth".to_string(), moved);
        controller.tick(5.0, &locator);
        assert!((controller.camera().unwrap().target - moved).length() < 1e-9);
    }

    #[test]
    fn following_translates_rigidly() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let mut locator = positions(&layout);
        let mut controller = controller();

        focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0);
        controller.tick(5.0, &locator);
        let before = controller.camera().unwrap().offset();

        let step = DVec3::new(-3.0, 0.0, 4.0);
        let moved = locator["earth"] + step;
        locator.insert("earth".to_string(), moved);
        controller.tick(5.1, &locator);

        let camera = controller.camera().unwrap();
        assert!((camera.target - moved).length() < 1e-9);
        assert!((camera.offset() - before).length() < 1e-9);
        assert!(controller.controls_enabled());
    }

    #[test]
    fn losing_the_followed_object_releases_the_camera() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let mut locator = positions(&layout);
        let mut controller = controller();

        focus(&mut controller, &system, &layout, &locator, &mode, "moon", 0.0);
        controller.tick(5.0, &locator);
        locator.remove("moon");
        controller.tick(5.1, &locator);

        assert_eq!(controller.state(), &CameraState::Idle);
        assert!(controller.get_object_properties().is_none());
        assert!(controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, CameraEvent::FollowLost { object_id } if object_id == "moon")));
    }

    #[test]
    fn detaching_the_camera_aborts_animation() {
        let system = earth_moon();
        let mode = ViewModeDefinition::navigational();
        let layout = compute_layout(&system, &mode);
        let locator = positions(&layout);
        let mut controller = controller();

        focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0);
        assert!(controller.detach_camera().is_some());
        controller.tick(0.2, &locator);

        assert_eq!(controller.state(), &CameraState::Idle);
        assert!(controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, CameraEvent::AnimationAborted { .. })));
        assert_eq!(
            focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.3),
            FocusResponse::Unavailable
        );
    }

    #[test]
    fn unknown_target_is_unavailable() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let mut locator = positions(&layout);
        locator.remove("earth");
        let mut controller = controller();

        assert_eq!(
            focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0),
            FocusResponse::Unavailable
        );
        assert_eq!(controller.state(), &CameraState::Idle);
    }

    #[test]
    fn birds_eye_looks_at_the_origin() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let locator = positions(&layout);
        let mut controller = controller();

        focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0);
        controller.tick(5.0, &locator);
        assert!(controller.set_birds_eye_view(&mode, &layout, 6.0).is_some());
        controller.tick(6.0 + mode.camera.animation.birds_eye_duration, &locator);

        assert_eq!(controller.state(), &CameraState::Idle);
        assert!(controller.get_object_properties().is_none());
        let camera = controller.camera().unwrap();
        assert!(camera.target.length() < 1e-9);
        let expected = (layout.max_orbit_radius() * framing::BIRDS_EYE_MARGIN)
            .clamp(mode.camera.absolute_min_distance, mode.camera.absolute_max_distance);
        assert!((camera.distance() - expected).abs() < 1e-6);
    }

    #[test]
    fn childless_object_in_profile_mode_gets_indicator() {
        let system = earth_moon();
        let mode = ViewModeDefinition::profile();
        let layout = compute_layout(&system, &mode);
        let locator = positions(&layout);
        let mut controller = controller();

        focus(&mut controller, &system, &layout, &locator, &mode, "moon", 0.0);
        let indicator = controller.framing_indicator().unwrap();
        assert_eq!(indicator.text, NO_ORBITING_BODIES);
        let size = layout.visual_radius("moon").unwrap();
        let expected = locator["moon"] + DVec3::new(framing::SYNTHETIC_OFFSET_FACTOR * size, 0.0, 0.0);
        assert!((indicator.position - expected).length() < 1e-9);

        focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.1);
        assert!(controller.framing_indicator().is_none());
    }

    #[test]
    fn reset_returns_to_the_saved_pose() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let locator = positions(&layout);
        let mut controller = controller();
        assert!(controller.reset_to_home(&mode, 0.0).is_none());

        focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0);
        controller.tick(5.0, &locator);
        let home = *controller.home().unwrap();

        assert!(controller.zoom(3.0));
        assert!(controller.orbit(0.4, 0.1));
        controller.reset_to_home(&mode, 6.0).unwrap();
        assert!(!controller.zoom(1.0));
        controller.tick(10.0, &locator);

        let camera = controller.camera().unwrap();
        assert!((camera.position - home.position).length() < 1e-9);
        assert_eq!(controller.state(), &CameraState::Idle);
    }

    #[test]
    fn clear_focus_returns_to_idle() {
        let system = earth_moon();
        let mode = ViewModeDefinition::explorational();
        let layout = compute_layout(&system, &mode);
        let locator = positions(&layout);
        let mut controller = controller();

        focus(&mut controller, &system, &layout, &locator, &mode, "earth", 0.0);
        controller.clear_focus();
        assert_eq!(controller.state(), &CameraState::Idle);
        assert!(controller.current_token().is_none());
        assert!(controller.controls_enabled());
    }
}
