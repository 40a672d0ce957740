//! Kepler position solver
//!
//! Pure functions: the same inputs always give bit-identical outputs.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use crate::view_mode::OrbitLayout;

/// Newton-Raphson iteration cap
pub const MAX_ITERATIONS: usize = 10;

/// Stop once the correction term drops below this
pub const TOLERANCE: f64 = 1e-6;

/// Highest eccentricity the solver accepts; anything above is clamped
pub const MAX_ECCENTRICITY: f64 = 0.99;

/// Wrap an angle into [-π, π], leaving in-range values untouched
pub fn wrap_angle(angle: f64) -> f64 {
    if (-PI..=PI).contains(&angle) {
        angle
    } else {
        (angle + PI).rem_euclid(TAU) - PI
    }
}

fn sanitize_eccentricity(eccentricity: f64) -> f64 {
    if eccentricity.is_finite() {
        eccentricity.clamp(0.0, MAX_ECCENTRICITY)
    } else {
        0.0
    }
}

/// Solve Kepler's equation M = E - e·sin(E) for the eccentric anomaly E.
///
/// Starts from `M + 0.85·e·sign(sin M)` and runs at most [`MAX_ITERATIONS`]
/// Newton steps. If it has not converged by then the current estimate is
/// returned as is. The iteration runs on `M` wrapped into [-π, π]; the
/// whole turns taken off are added back, so `E - e·sin(E)` gives `M` itself.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let e = sanitize_eccentricity(eccentricity);
    if e == 0.0 {
        return mean_anomaly;
    }
    let m = wrap_angle(mean_anomaly);

    let mut ecc_anomaly = m + 0.85 * e * m.sin().signum();
    for _ in 0..MAX_ITERATIONS {
        let f = ecc_anomaly - e * ecc_anomaly.sin() - m;
        let f_prime = 1.0 - e * ecc_anomaly.cos();
        let delta = f / f_prime;
        ecc_anomaly -= delta;
        if delta.abs() < TOLERANCE {
            break;
        }
    }
    ecc_anomaly + (mean_anomaly - m)
}

/// ν = 2·atan2(√(1+e)·sin(E/2), √(1-e)·cos(E/2))
pub fn eccentric_to_true_anomaly(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    let e = sanitize_eccentricity(eccentricity);
    let half = ecc_anomaly / 2.0;
    let y = (1.0 + e).sqrt() * half.sin();
    let x = (1.0 - e).sqrt() * half.cos();
    2.0 * y.atan2(x)
}

/// Mean anomaly back from an eccentric anomaly
pub fn eccentric_to_mean_anomaly(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    let e = sanitize_eccentricity(eccentricity);
    ecc_anomaly - e * ecc_anomaly.sin()
}

/// True anomaly for a mean anomaly; circular orbits return `M` unchanged
pub fn true_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let e = sanitize_eccentricity(eccentricity);
    if e == 0.0 {
        return mean_anomaly;
    }
    eccentric_to_true_anomaly(solve_eccentric_anomaly(mean_anomaly, e), e)
}

/// Distance from the focus: r = a(1 - e²) / (1 + e·cos ν)
pub fn orbital_radius(semi_major_axis: f64, eccentricity: f64, true_anomaly: f64) -> f64 {
    let e = sanitize_eccentricity(eccentricity);
    semi_major_axis * (1.0 - e * e) / (1.0 + e * true_anomaly.cos())
}

/// Position relative to the parent.
///
/// `Clean` layouts put the body on a circle of radius `semi_major_axis` in the
/// y = 0 plane at angle `angle`. `Physical` layouts read `angle` as the mean
/// anomaly, follow the ellipse, and tilt it by `inclination` degrees about the x axis.
pub fn position(
    angle: f64,
    semi_major_axis: f64,
    eccentricity: f64,
    inclination: f64,
    layout: OrbitLayout,
) -> DVec3 {
    match layout {
        OrbitLayout::Clean => DVec3::new(
            semi_major_axis * angle.cos(),
            0.0,
            semi_major_axis * angle.sin(),
        ),
        OrbitLayout::Physical => {
            let nu = true_anomaly(angle, eccentricity);
            let r = orbital_radius(semi_major_axis, eccentricity, nu);
            let (flat_x, flat_z) = (r * nu.cos(), r * nu.sin());
            let tilt = if inclination.is_finite() {
                inclination.to_radians()
            } else {
                0.0
            };
            DVec3::new(flat_x, flat_z * tilt.sin(), flat_z * tilt.cos())
        }
    }
}
