use serde::{Deserialize, Serialize};

/// Reference ellipsoid, given by its semi-major axis in meters and its
/// flattening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ellipsoid {
    pub semi_major_axis: f64,
    pub flattening: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        flattening: 1.0 / 298.257223563,
    };

    /// First eccentricity squared: e² = 2f − f².
    pub fn eccentricity_squared(&self) -> f64 {
        2.0 * self.flattening - self.flattening * self.flattening
    }

    /// e² / (1 − e²), the ratio both transform series use in their
    /// higher-order correction terms.
    pub fn second_eccentricity_squared(&self) -> f64 {
        let e2 = self.eccentricity_squared();
        e2 / (1.0 - e2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Northing of the equator in this hemisphere.
    pub fn false_northing(&self) -> f64 {
        match self {
            Hemisphere::North => 0.0,
            Hemisphere::South => 10_000_000.0,
        }
    }
}

/// Immutable projection parameters for a single UTM zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    pub ellipsoid: Ellipsoid,
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub scale_factor: f64,
}

/// The zone every caller in this workspace projects through.
pub const ZONE_39N: ZoneConfig = ZoneConfig::utm(39, Hemisphere::North);

impl ZoneConfig {
    /// Standard UTM parameters on the WGS84 ellipsoid.
    pub const fn utm(zone: u8, hemisphere: Hemisphere) -> Self {
        Self {
            ellipsoid: Ellipsoid::WGS84,
            zone,
            hemisphere,
            scale_factor: 0.9996,
        }
    }

    /// Longitude the zone is centered on, in degrees.
    pub fn central_meridian_deg(&self) -> f64 {
        (self.zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_39_is_centered_on_51_east() {
        assert_eq!(ZONE_39N.central_meridian_deg(), 51.0);
    }

    #[test]
    fn zone_30_is_centered_on_3_west() {
        let config = ZoneConfig::utm(30, Hemisphere::North);
        assert_eq!(config.central_meridian_deg(), -3.0);
    }

    #[test]
    fn wgs84_eccentricity() {
        let e2 = Ellipsoid::WGS84.eccentricity_squared();
        assert!((e2 - 0.00669437999).abs() < 1e-9);
    }

    #[test]
    fn false_northing_per_hemisphere() {
        assert_eq!(Hemisphere::North.false_northing(), 0.0);
        assert_eq!(Hemisphere::South.false_northing(), 10_000_000.0);
    }
}
