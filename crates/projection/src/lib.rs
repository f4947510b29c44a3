pub mod transverse_mercator;
pub mod zone;

pub use transverse_mercator::{geographic_to_utm, utm_to_geographic};
pub use zone::{Ellipsoid, Hemisphere, ZoneConfig, ZONE_39N};
