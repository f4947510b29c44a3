pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance between two geographic points in meters.
/// Spherical approximation; good to a few meters over the distances
/// this workspace deals with.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let forward = haversine_distance(36.55, 53.089, 36.56, 53.1);
        let backward = haversine_distance(36.56, 53.1, 36.55, 53.089);
        assert_eq!(forward, backward);
    }

    #[test]
    fn identical_points_have_zero_distance() {
        assert_eq!(haversine_distance(36.55, 53.089, 36.55, 53.089), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 1.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((distance - expected).abs() < 1e-6);
    }
}
