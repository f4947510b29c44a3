//! Derived statistics over an ordered point sequence: consecutive edge
//! lengths and the enclosed polygon area.
//!
//! Distances are great-circle meters on the sphere. Areas are computed in
//! the planar projection instead: the shoelace sum is run over re-projected
//! UTM coordinates because it is not area-preserving over raw degrees.

use itertools::Itertools;
use model::{resolve_geometry, GeometryKind, Location, Point};
use projection::{geographic_to_utm, ZONE_39N};
use serde::Serialize;
use utility::geo::haversine_distance;

/// Distance between two labelled points, in meters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeLength {
    pub from: char,
    pub to: char,
    pub meters: f64,
}

/// Everything the statistics panel shows for the current set.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub edges: Vec<EdgeLength>,
    /// Square meters; absent for paths and underfull sets.
    pub area: Option<f64>,
}

/// Statistics for the given valid points under the selected geometry kind.
pub fn statistics(valid_points: &[&Point], kind: GeometryKind) -> Statistics {
    let Some(resolved) = resolve_geometry(valid_points.len(), kind) else {
        return Statistics {
            edges: Vec::new(),
            area: None,
        };
    };
    let closed = resolved == GeometryKind::Polygon;
    let edges = edge_lengths(valid_points, closed);
    let area = if closed {
        let vertices: Vec<Location> = valid_points
            .iter()
            .filter_map(|point| point.geographic)
            .collect();
        Some(polygon_area(&close_ring(&vertices)))
    } else {
        None
    };
    Statistics { edges, area }
}

/// Consecutive-pair distances for an ordered sequence; `closed` appends
/// the edge from the last point back to the first.
pub fn edge_lengths(points: &[&Point], closed: bool) -> Vec<EdgeLength> {
    let mut edges: Vec<EdgeLength> = points
        .iter()
        .copied()
        .tuple_windows()
        .filter_map(|(a, b)| edge_between(a, b))
        .collect();
    if closed && points.len() > 2 {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if let Some(edge) = edge_between(last, first) {
                edges.push(edge);
            }
        }
    }
    edges
}

fn edge_between(a: &Point, b: &Point) -> Option<EdgeLength> {
    let from = a.geographic?;
    let to = b.geographic?;
    Some(EdgeLength {
        from: a.label,
        to: b.label,
        meters: haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude),
    })
}

/// Explicit closed ring: the first vertex repeated at the end. Area and
/// export always receive rings in this form.
pub fn close_ring(vertices: &[Location]) -> Vec<Location> {
    let mut ring = vertices.to_vec();
    if let Some(first) = vertices.first() {
        ring.push(*first);
    }
    ring
}

/// Planar shoelace area of an explicitly closed ring, in square meters.
///
/// Rings with fewer than four entries (fewer than three distinct
/// vertices) have no area.
pub fn polygon_area(ring: &[Location]) -> f64 {
    if ring.len() < 4 {
        return 0.0;
    }
    let projected: Vec<(f64, f64)> = ring
        .iter()
        .map(|location| geographic_to_utm(&ZONE_39N, location.latitude, location.longitude))
        .collect();
    let sum: f64 = projected
        .iter()
        .copied()
        .tuple_windows()
        .map(|((x1, y1), (x2, y2))| x1 * y2 - x2 * y1)
        .sum();
    sum.abs() / 2.0
}
