use serde::{Deserialize, Serialize};

pub mod point;
pub mod point_set;

pub use point::{label_for, Location, Point};
pub use point_set::{
    CoordinateField, CoordinateFormat, PointSet, MAX_POINTS, MIN_POINTS,
};

/// Shape a point sequence is exported and displayed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryKind {
    /// Open polyline.
    Path,
    /// Closed ring; the edge from the last point back to the first is
    /// implied everywhere and made explicit at the geometry boundary.
    Polygon,
}

/// Effective geometry for a number of valid points under the selected
/// kind. Fewer than two points draw nothing, exactly two are always a
/// path, three or more follow the selection.
pub fn resolve_geometry(valid_count: usize, kind: GeometryKind) -> Option<GeometryKind> {
    match valid_count {
        0 | 1 => None,
        2 => Some(GeometryKind::Path),
        _ => Some(kind),
    }
}
