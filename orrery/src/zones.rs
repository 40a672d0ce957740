//! Habitable zone and snow line around a star
//!
//! Luminosity comes from the catalog when present, otherwise from the spectral
//! type, otherwise from the temperature; a Sun-like G2V star is the last resort.

use crate::object::CelestialObject;

pub const DEFAULT_SPECTRAL_TYPE: &str = "G2V";

/// Main-sequence anchor points: (class index × 10 + subclass, log10 L/L☉)
const LUMINOSITY_ANCHORS: [(f64, f64); 15] = [
    (5.0, 5.6),   // O5V
    (10.0, 4.3),  // B0V
    (15.0, 2.9),  // B5V
    (20.0, 1.6),  // A0V
    (25.0, 1.08), // A5V
    (30.0, 0.78), // F0V
    (35.0, 0.4),  // F5V
    (40.0, 0.1),  // G0V
    (42.0, 0.0),  // G2V
    (45.0, -0.1), // G5V
    (50.0, -0.4), // K0V
    (55.0, -0.8), // K5V
    (60.0, -1.14), // M0V
    (65.0, -2.57), // M5V
    (69.0, -3.5), // M9V
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub inner: f64,
    pub outer: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StellarZones {
    pub habitable_zone: Zone,
    pub snow_line: f64,
}

impl StellarZones {
    pub fn from_luminosity(luminosity: f64) -> Self {
        let luminosity = if luminosity.is_finite() && luminosity > 0.0 {
            luminosity
        } else {
            1.0
        };
        Self {
            habitable_zone: Zone {
                inner: (luminosity / 1.1).sqrt(),
                outer: (luminosity / 0.36).sqrt(),
            },
            snow_line: 2.7 * luminosity.sqrt(),
        }
    }

    /// Zones of `star` in AU
    pub fn for_star(star: &CelestialObject) -> Self {
        Self::from_luminosity(star_luminosity(star))
    }

    /// Convert AU to scene units
    pub fn scaled(&self, orbit_scaling: f64) -> Self {
        Self {
            habitable_zone: Zone {
                inner: self.habitable_zone.inner * orbit_scaling,
                outer: self.habitable_zone.outer * orbit_scaling,
            },
            snow_line: self.snow_line * orbit_scaling,
        }
    }
}

/// Best available luminosity of a star in solar units
pub fn star_luminosity(star: &CelestialObject) -> f64 {
    let properties = &star.properties;
    if let Some(luminosity) = properties.luminosity.filter(|l| l.is_finite() && *l > 0.0) {
        return luminosity;
    }
    let spectral_type = match properties.spectral_type.as_deref() {
        Some(spectral_type) => spectral_type,
        None => match properties.temperature {
            Some(temperature) => spectral_type_for_temperature(temperature),
            None => DEFAULT_SPECTRAL_TYPE,
        },
    };
    spectral_luminosity(spectral_type).unwrap_or_else(|| {
        log::warn!(
            "unrecognized spectral type '{spectral_type}' for '{}', assuming {DEFAULT_SPECTRAL_TYPE}",
            star.id
        );
        1.0
    })
}

/// Main-sequence type for an effective temperature in K
pub fn spectral_type_for_temperature(temperature: f64) -> &'static str {
    if !temperature.is_finite() || temperature <= 0.0 {
        log::warn!("temperature {temperature} K is unusable, assuming {DEFAULT_SPECTRAL_TYPE}");
        return DEFAULT_SPECTRAL_TYPE;
    }
    match temperature {
        t if t > 30_000.0 => "O5V",
        t if t > 10_000.0 => "B5V",
        t if t > 7_500.0 => "A5V",
        t if t > 6_000.0 => "F5V",
        t if t > 5_200.0 => "G2V",
        t if t > 3_700.0 => "K5V",
        _ => "M5V",
    }
}

/// Main-sequence luminosity for a spectral type such as "K1V" or "M4.5Ve"
pub fn spectral_luminosity(spectral_type: &str) -> Option<f64> {
    let mut chars = spectral_type.trim().chars();
    let class = match chars.next()?.to_ascii_uppercase() {
        'O' => 0.0,
        'B' => 1.0,
        'A' => 2.0,
        'F' => 3.0,
        'G' => 4.0,
        'K' => 5.0,
        'M' => 6.0,
        _ => return None,
    };
    let rest = chars.as_str();
    let digits: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let subclass = digits.parse::<f64>().unwrap_or(5.0).clamp(0.0, 9.9);
    Some(10f64.powf(interpolate_log_luminosity(class * 10.0 + subclass)))
}

fn interpolate_log_luminosity(key: f64) -> f64 {
    let first = LUMINOSITY_ANCHORS[0];
    let last = LUMINOSITY_ANCHORS[LUMINOSITY_ANCHORS.len() - 1];
    if key <= first.0 {
        return first.1;
    }
    if key >= last.0 {
        return last.1;
    }
    LUMINOSITY_ANCHORS
        .windows(2)
        .find(|pair| key <= pair[1].0)
        .map(|pair| {
            let (k0, l0) = pair[0];
            let (k1, l1) = pair[1];
            l0 + (key - k0) / (k1 - k0) * (l1 - l0)
        })
        .unwrap_or(last.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_almost_eq(a: f64, b: f64, what: &str) {
        assert!((a - b).abs() < 1e-9, "{what}: {a} vs {b}");
    }

    #[test]
    fn sun_like_zones() {
        let zones = StellarZones::for_star(&CelestialObject::star("sol", "Sun", 695_700.0).with_spectral_type("G2V"));
        assert_almost_eq(zones.habitable_zone.inner, (1.0f64 / 1.1).sqrt(), "inner edge");
        assert_almost_eq(zones.habitable_zone.outer, (1.0f64 / 0.36).sqrt(), "outer edge");
        assert_almost_eq(zones.snow_line, 2.7, "snow line");
    }

    #[test]
    fn explicit_luminosity_wins() {
        let star = CelestialObject::star("s", "S", 1.0)
            .with_spectral_type("M5V")
            .with_luminosity(4.0);
        assert_almost_eq(StellarZones::for_star(&star).snow_line, 5.4, "snow line");
    }

    #[test]
    fn temperature_breakpoints() {
        assert_eq!(spectral_type_for_temperature(40_000.0), "O5V");
        assert_eq!(spectral_type_for_temperature(5_778.0), "G2V");
        assert_eq!(spectral_type_for_temperature(3_000.0), "M5V");
        assert_eq!(spectral_type_for_temperature(f64::NAN), "G2V");
    }

    #[test]
    fn nan_temperature_falls_back_to_the_sun() {
        let star = CelestialObject::star("s", "S", 1.0).with_temperature(f64::NAN);
        assert_almost_eq(star_luminosity(&star), 1.0, "luminosity");
    }

    #[test]
    fn hotter_types_are_brighter() {
        let types = ["O5V", "B5V", "A5V", "F5V", "G2V", "K5V", "M5V"];
        let luminosities: Vec<f64> = types.iter().map(|t| spectral_luminosity(t).unwrap()).collect();
        assert!(luminosities.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn unknown_spectral_type_falls_back() {
        let star = CelestialObject::star("s", "S", 1.0).with_spectral_type("WR");
        assert_eq!(spectral_luminosity("WR"), None);
        assert_almost_eq(star_luminosity(&star), 1.0, "luminosity");
    }

    #[test]
    fn scaling_multiplies_every_radius() {
        let zones = StellarZones::from_luminosity(1.0).scaled(50.0);
        assert_almost_eq(zones.snow_line, 135.0, "snow line");
        assert!(zones.habitable_zone.inner < zones.habitable_zone.outer);
    }
}
