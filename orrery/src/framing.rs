//! Camera framing math: how far to stand and where to look
//!
//! Pure functions over visual sizes and view-mode camera settings. The state
//! machine in [`crate::camera_controller`] decides when to use them.

use glam::DVec3;

use crate::view_mode::CameraConfig;

/// The camera never ends up closer than this many visual radii
pub const SAFETY_FLOOR_MULTIPLIER: f64 = 2.0;

/// Profile distance when the focal object has nothing orbiting it
pub const PROFILE_SINGLE_DISTANCE: f64 = 15.0;
pub const PROFILE_SPAN_FACTOR: f64 = 1.2;
pub const PROFILE_MIN_SPAN_DISTANCE: f64 = 20.0;

/// Synthetic outermost point offset, in visual radii along +x
pub const SYNTHETIC_OFFSET_FACTOR: f64 = 3.0;

pub const NO_ORBITING_BODIES: &str = "No orbiting bodies";

/// Overview distance as a multiple of the system's extent
pub const BIRDS_EYE_MARGIN: f64 = 2.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub target: DVec3,
}

impl CameraPose {
    pub fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }

    pub fn translated(&self, delta: DVec3) -> Self {
        Self {
            position: self.position + delta,
            target: self.target + delta,
        }
    }

    pub fn lerp(&self, end: &CameraPose, t: f64) -> Self {
        Self {
            position: self.position.lerp(end.position, t),
            target: self.target.lerp(end.target, t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBounds {
    pub min: f64,
    pub max: f64,
}

fn sanitize_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

/// `[max(minMul·size, absMin), min(maxMul·size, absMax)]`
pub fn distance_bounds(size: f64, camera: &CameraConfig) -> DistanceBounds {
    let size = sanitize_size(size);
    DistanceBounds {
        min: (camera.min_distance_multiplier * size).max(camera.absolute_min_distance),
        max: (camera.max_distance_multiplier * size).min(camera.absolute_max_distance),
    }
}

/// Camera distance for focusing an object of visual radius `size`.
///
/// When the bounds cross (tiny or huge objects) the lower bound wins; the
/// result is never below twice the visual radius.
pub fn focus_distance(size: f64, camera: &CameraConfig) -> f64 {
    let size = sanitize_size(size);
    let bounds = distance_bounds(size, camera);
    let desired = size * camera.radius_multiplier;
    let distance = if bounds.min <= bounds.max {
        desired.clamp(bounds.min, bounds.max)
    } else {
        bounds.min
    };
    distance.max(SAFETY_FLOOR_MULTIPLIER * size)
}

/// Unit vector from the target towards the camera, keeping the current
/// horizontal bearing but lifted to `elevation` degrees
pub fn approach_direction(current_offset: DVec3, elevation: f64) -> DVec3 {
    let horizontal = DVec3::new(current_offset.x, 0.0, current_offset.z);
    let horizontal = if horizontal.length() > 1e-9 {
        horizontal.normalize()
    } else {
        DVec3::Z
    };
    let elevation = elevation.to_radians();
    horizontal * elevation.cos() + DVec3::Y * elevation.sin()
}

/// End pose for a standard focus on an object at `focus`
pub fn standard_pose(focus: DVec3, size: f64, camera: &CameraConfig, current_offset: DVec3) -> CameraPose {
    let distance = focus_distance(size, camera);
    let direction = approach_direction(current_offset, camera.viewing_angles.default_elevation);
    CameraPose {
        position: focus + direction * distance,
        target: focus,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileFraming {
    pub pose: CameraPose,
    pub outermost: DVec3,
    /// The outermost point was made up because nothing orbits the focal object
    pub synthetic: bool,
}

/// Frame the midpoint between the focal object and its outermost child, side on
pub fn profile_framing(focal: DVec3, size: f64, outermost: Option<DVec3>, elevation: f64) -> ProfileFraming {
    let size = sanitize_size(size);
    let (outermost, synthetic) = match outermost {
        Some(point) => (point, false),
        None => (
            focal + DVec3::new(SYNTHETIC_OFFSET_FACTOR * size, 0.0, 0.0),
            true,
        ),
    };
    let span = outermost - focal;
    let distance = if synthetic {
        PROFILE_SINGLE_DISTANCE
    } else {
        (PROFILE_SPAN_FACTOR * span.length()).max(PROFILE_MIN_SPAN_DISTANCE)
    }
    .max(SAFETY_FLOOR_MULTIPLIER * size);

    let along = DVec3::new(span.x, 0.0, span.z);
    let side = if along.length() > 1e-9 {
        along.normalize().cross(DVec3::Y).normalize()
    } else {
        DVec3::Z
    };
    let elevation = elevation.to_radians();
    let direction = side * elevation.cos() + DVec3::Y * elevation.sin();
    let midpoint = focal + span / 2.0;

    ProfileFraming {
        pose: CameraPose {
            position: midpoint + direction * distance,
            target: midpoint,
        },
        outermost,
        synthetic,
    }
}

/// Overview pose looking down on the origin
pub fn birds_eye_pose(max_orbit_radius: f64, camera: &CameraConfig, current_offset: DVec3) -> CameraPose {
    let extent = sanitize_size(max_orbit_radius);
    let distance = (extent * BIRDS_EYE_MARGIN)
        .clamp(camera.absolute_min_distance, camera.absolute_max_distance);
    let direction = approach_direction(current_offset, camera.viewing_angles.birds_eye_elevation);
    CameraPose {
        position: direction * distance,
        target: DVec3::ZERO,
    }
}
