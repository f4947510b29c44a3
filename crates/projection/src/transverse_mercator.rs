//! Closed-form Transverse Mercator series between projected easting/northing
//! and geographic latitude/longitude, both on the configured ellipsoid.
//!
//! The two directions are independent series, not algebraic inverses of each
//! other; a round trip reproduces the input to within a centimeter near the
//! zone but never exactly.

use crate::zone::ZoneConfig;

const FALSE_EASTING: f64 = 500_000.0;

/// Projected → geographic. Returns `(latitude, longitude)` in decimal
/// degrees.
///
/// Pure and total over all real inputs; results are only meaningful for
/// coordinates near the configured zone, which the caller is responsible
/// for. No zone-applicability check is performed.
pub fn utm_to_geographic(config: &ZoneConfig, easting: f64, northing: f64) -> (f64, f64) {
    let a = config.ellipsoid.semi_major_axis;
    let e2 = config.ellipsoid.eccentricity_squared();
    let e1sq = config.ellipsoid.second_eccentricity_squared();
    let k0 = config.scale_factor;

    let x = easting - FALSE_EASTING;
    let y = northing - config.hemisphere.false_northing();

    // Footprint latitude from the meridional arc.
    let m = y / k0;
    let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));

    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());
    let j1 = 3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0;
    let j2 = 21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0;
    let j3 = 151.0 * e1.powi(3) / 96.0;
    let j4 = 1097.0 * e1.powi(4) / 512.0;
    let phi1 = mu
        + j1 * (2.0 * mu).sin()
        + j2 * (4.0 * mu).sin()
        + j3 * (6.0 * mu).sin()
        + j4 * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let c1 = e1sq * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let n1 = a / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
    let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
    let d = x / (n1 * k0);

    let q1 = n1 * tan_phi1 / r1;
    let q2 = d * d / 2.0;
    let q3 = (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * e1sq) * d.powi(4) / 24.0;
    let q4 = (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 1.6 * e1sq - 37.0 * e1sq * c1)
        * d.powi(6)
        / 720.0;
    let latitude = phi1 - q1 * (q2 - q3 + q4);

    let q5 = d;
    let q6 = (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0;
    let q7 = (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * e1sq + 24.0 * t1 * t1)
        * d.powi(5)
        / 120.0;
    let longitude = config.central_meridian_deg().to_radians() + (q5 - q6 + q7) / cos_phi1;

    (latitude.to_degrees(), longitude.to_degrees())
}

/// Geographic → projected. Returns `(easting, northing)` in meters.
///
/// A negative raw northing is shifted by 10 000 000 m, the southern
/// convention, without consulting the configured hemisphere.
pub fn geographic_to_utm(config: &ZoneConfig, latitude: f64, longitude: f64) -> (f64, f64) {
    let a = config.ellipsoid.semi_major_axis;
    let e2 = config.ellipsoid.eccentricity_squared();
    let e1sq = config.ellipsoid.second_eccentricity_squared();
    let k0 = config.scale_factor;

    let lat_rad = latitude.to_radians();
    let delta_lon = longitude.to_radians() - config.central_meridian_deg().to_radians();

    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let tan_lat = lat_rad.tan();

    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = e1sq * cos_lat * cos_lat;
    let a_term = cos_lat * delta_lon;

    // Meridional arc from the equator to the given latitude.
    let m = a
        * ((1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0) * lat_rad
            - (3.0 * e2 / 8.0 + 3.0 * e2 * e2 / 32.0 + 45.0 * e2 * e2 * e2 / 1024.0)
                * (2.0 * lat_rad).sin()
            + (15.0 * e2 * e2 / 256.0 + 45.0 * e2 * e2 * e2 / 1024.0) * (4.0 * lat_rad).sin()
            - (35.0 * e2 * e2 * e2 / 3072.0) * (6.0 * lat_rad).sin());

    let easting = FALSE_EASTING
        + k0 * n
            * (a_term
                + (1.0 - t + c) * a_term.powi(3) / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * e1sq) * a_term.powi(5) / 120.0);

    let northing = k0
        * (m + n
            * tan_lat
            * (a_term * a_term / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a_term.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * e1sq) * a_term.powi(6) / 720.0));

    if northing < 0.0 {
        (easting, northing + 10_000_000.0)
    } else {
        (easting, northing)
    }
}
