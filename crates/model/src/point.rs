use projection::{geographic_to_utm, ZONE_39N};
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// One labelled coordinate entry.
///
/// The two text fields hold whatever the user typed in the active input
/// format: easting/northing meters in UTM mode, latitude/longitude degrees
/// in geographic mode. `geographic` is the derived position; `None` means
/// the entry has not produced a usable coordinate. An equatorial (0, 0)
/// position is therefore a perfectly valid point, unlike in sentinel-based
/// representations.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: Id<Point>,
    pub easting: String,
    pub northing: String,
    pub geographic: Option<Location>,
    pub label: char,
}

impl HasId for Point {
    type IdType = u64;
}

impl Point {
    pub fn empty(id: Id<Point>, label: char) -> Self {
        Self {
            id,
            easting: String::new(),
            northing: String::new(),
            geographic: None,
            label,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.geographic.is_some()
    }

    /// Projected easting/northing for display, derived from the
    /// geographic position. `None` while the point is invalid.
    pub fn projected(&self) -> Option<(f64, f64)> {
        self.geographic
            .map(|location| geographic_to_utm(&ZONE_39N, location.latitude, location.longitude))
    }
}

/// Label of the point at `index`: 'A' for the first entry, 'B' for the
/// second and so on. Sets never grow past 'J'.
pub fn label_for(index: usize) -> char {
    (b'A' + index as u8) as char
}
