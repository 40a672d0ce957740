//! Common utilities for the orrery workspace
//!
//! This crate provides the shared camera model and the physical constants used by
//! both the layout core and the headless driver.

pub mod camera;

pub use camera::*;

/// Physical constants used when converting catalog data
pub mod constants {
    /// Astronomical Unit in km
    pub const AU_KM: f64 = 149_597_870.7;

    /// Solar radius in km
    pub const SOLAR_RADIUS_KM: f64 = 695_700.0;

    /// Days in a Julian year
    pub const DAYS_PER_YEAR: f64 = 365.25;
}
