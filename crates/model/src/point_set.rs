use projection::{utm_to_geographic, ZONE_39N};
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::point::{label_for, Location, Point};

/// Most points a set will hold, labels 'A' through 'J'.
pub const MAX_POINTS: usize = 10;
/// A set never shrinks below one entry.
pub const MIN_POINTS: usize = 1;

/// How the two raw text fields of every point are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoordinateFormat {
    /// Easting/northing meters in the fixed UTM zone.
    Utm,
    /// Latitude/longitude decimal degrees. The first field holds latitude.
    Geographic,
}

/// Which of the two raw fields an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    Easting,
    Northing,
}

/// Ordered, labelled collection of coordinate entries.
///
/// The set owns id allocation (ids are never reused, even after removal),
/// label assignment (always 'A' + index, reassigned on every membership
/// change) and the derivation of geographic positions from the raw text.
/// It is a plain owned value: callers that share work across threads clone
/// it instead of locking it.
#[derive(Debug, Clone)]
pub struct PointSet {
    points: Vec<Point>,
    format: CoordinateFormat,
    next_id: u64,
}

impl PointSet {
    /// A fresh set with a single empty entry labelled 'A'.
    pub fn new(format: CoordinateFormat) -> Self {
        let mut set = Self {
            points: Vec::new(),
            format,
            next_id: 1,
        };
        let id = set.mint_id();
        set.points.push(Point::empty(Id::new(id), label_for(0)));
        set
    }

    /// Replace the whole set with points produced by the KML codec.
    ///
    /// Ids are re-minted and labels reassigned by position; the parsed
    /// geographic values are kept as-is, since the codec already filled
    /// both representations. Imported text fields are UTM meters, so the
    /// set is fixed to UTM format. Anything beyond capacity is dropped.
    pub fn from_imported(points: Vec<Point>) -> Self {
        let mut set = Self {
            points: Vec::new(),
            format: CoordinateFormat::Utm,
            next_id: 1,
        };
        if points.len() > MAX_POINTS {
            log::warn!(
                "import of {} points truncated to {MAX_POINTS}",
                points.len()
            );
        }
        for mut point in points.into_iter().take(MAX_POINTS) {
            point.id = Id::new(set.mint_id());
            point.label = label_for(set.points.len());
            set.points.push(point);
        }
        if set.points.is_empty() {
            let id = set.mint_id();
            set.points.push(Point::empty(Id::new(id), label_for(0)));
        }
        set
    }

    pub fn format(&self) -> CoordinateFormat {
        self.format
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The in-order valid subset, the input to statistics and export.
    pub fn valid_points(&self) -> Vec<&Point> {
        self.points.iter().filter(|point| point.is_valid()).collect()
    }

    /// Append an empty entry. Refused once the set is at capacity.
    pub fn push(&mut self) -> Option<Id<Point>> {
        if self.points.len() >= MAX_POINTS {
            return None;
        }
        let id = Id::new(self.mint_id());
        let label = label_for(self.points.len());
        self.points.push(Point::empty(id, label));
        Some(id)
    }

    /// Remove the entry with the given id and relabel the remainder.
    /// Refused while the set is at its minimum size.
    pub fn remove(&mut self, id: Id<Point>) -> bool {
        if self.points.len() <= MIN_POINTS {
            return false;
        }
        let before = self.points.len();
        self.points.retain(|point| point.id != id);
        if self.points.len() == before {
            return false;
        }
        self.relabel();
        true
    }

    /// Rewrite one raw text field, then recompute the whole set.
    pub fn update(&mut self, id: Id<Point>, field: CoordinateField, value: &str) -> bool {
        let Some(point) = self.points.iter_mut().find(|point| point.id == id) else {
            return false;
        };
        match field {
            CoordinateField::Easting => point.easting = value.to_owned(),
            CoordinateField::Northing => point.northing = value.to_owned(),
        }
        self.recompute();
        true
    }

    /// Switch how the raw fields are interpreted, then recompute.
    pub fn set_format(&mut self, format: CoordinateFormat) {
        if self.format != format {
            self.format = format;
            self.recompute();
        }
    }

    /// Recompute the derived position and label of every point from its
    /// raw text. Total and idempotent over the whole set; there is no
    /// incremental path.
    fn recompute(&mut self) {
        let format = self.format;
        for (index, point) in self.points.iter_mut().enumerate() {
            point.label = label_for(index);
            point.geographic = derive_location(format, &point.easting, &point.northing);
        }
    }

    fn relabel(&mut self) {
        for (index, point) in self.points.iter_mut().enumerate() {
            point.label = label_for(index);
        }
    }

    fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn derive_location(
    format: CoordinateFormat,
    easting: &str,
    northing: &str,
) -> Option<Location> {
    let first = parse_finite(easting)?;
    let second = parse_finite(northing)?;
    match format {
        CoordinateFormat::Utm => {
            let (latitude, longitude) = utm_to_geographic(&ZONE_39N, first, second);
            Some(Location {
                latitude,
                longitude,
            })
        }
        CoordinateFormat::Geographic => {
            if first.abs() > 90.0 || second.abs() > 180.0 {
                log::debug!("geographic input out of range: {first}, {second}");
                return None;
            }
            Some(Location {
                latitude: first,
                longitude: second,
            })
        }
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_utm_set(count: usize) -> PointSet {
        let mut set = PointSet::new(CoordinateFormat::Utm);
        while set.len() < count {
            set.push().unwrap();
        }
        let ids: Vec<_> = set.points().iter().map(|p| p.id).collect();
        for (offset, id) in ids.into_iter().enumerate() {
            let easting = format!("{}", 686_000.0 + offset as f64 * 100.0);
            let northing = format!("{}", 4_046_000.0 + offset as f64 * 100.0);
            set.update(id, CoordinateField::Easting, &easting);
            set.update(id, CoordinateField::Northing, &northing);
        }
        set
    }

    #[test]
    fn new_set_has_one_empty_point_labelled_a() {
        let set = PointSet::new(CoordinateFormat::Utm);
        assert_eq!(set.len(), 1);
        assert_eq!(set.points()[0].label, 'A');
        assert!(!set.points()[0].is_valid());
        assert!(set.valid_points().is_empty());
    }

    #[test]
    fn labels_stay_contiguous_after_removal() {
        let mut set = filled_utm_set(4);
        let second = set.points()[1].id;
        assert!(set.remove(second));
        let labels: Vec<char> = set.points().iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!['A', 'B', 'C']);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut set = filled_utm_set(3);
        let removed = set.points()[2].id;
        let removed_raw = removed.raw();
        assert!(set.remove(removed));
        let replacement = set.push().unwrap();
        assert!(replacement.raw() > removed_raw);
    }

    #[test]
    fn capacity_is_ten_points() {
        let mut set = PointSet::new(CoordinateFormat::Utm);
        for _ in 1..MAX_POINTS {
            assert!(set.push().is_some());
        }
        assert_eq!(set.len(), MAX_POINTS);
        assert!(set.push().is_none());
        assert_eq!(set.points().last().unwrap().label, 'J');
    }

    #[test]
    fn last_point_can_not_be_removed() {
        let mut set = PointSet::new(CoordinateFormat::Utm);
        let only = set.points()[0].id;
        assert!(!set.remove(only));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn utm_text_derives_a_geographic_position() {
        let mut set = PointSet::new(CoordinateFormat::Utm);
        let id = set.points()[0].id;
        set.update(id, CoordinateField::Easting, "686989.37");
        set.update(id, CoordinateField::Northing, "4046996.29");
        let location = set.points()[0].geographic.unwrap();
        assert!((location.latitude - 36.55010145).abs() < 1e-6);
        assert!((location.longitude - 53.08918844).abs() < 1e-6);
    }

    #[test]
    fn blank_and_garbage_fields_are_invalid() {
        let mut set = PointSet::new(CoordinateFormat::Utm);
        let id = set.points()[0].id;
        set.update(id, CoordinateField::Easting, "  ");
        set.update(id, CoordinateField::Northing, "4046996.29");
        assert!(!set.points()[0].is_valid());

        set.update(id, CoordinateField::Easting, "not a number");
        assert!(!set.points()[0].is_valid());

        set.update(id, CoordinateField::Easting, "inf");
        assert!(!set.points()[0].is_valid());
    }

    #[test]
    fn geographic_mode_reads_fields_as_lat_lon_with_bounds() {
        let mut set = PointSet::new(CoordinateFormat::Geographic);
        let id = set.points()[0].id;
        set.update(id, CoordinateField::Easting, "36.55");
        set.update(id, CoordinateField::Northing, "53.09");
        let location = set.points()[0].geographic.unwrap();
        assert_eq!(location.latitude, 36.55);
        assert_eq!(location.longitude, 53.09);

        set.update(id, CoordinateField::Easting, "91.0");
        assert!(!set.points()[0].is_valid());

        set.update(id, CoordinateField::Easting, "36.55");
        set.update(id, CoordinateField::Northing, "181.0");
        assert!(!set.points()[0].is_valid());
    }

    #[test]
    fn equator_prime_meridian_is_a_valid_point() {
        let mut set = PointSet::new(CoordinateFormat::Geographic);
        let id = set.points()[0].id;
        set.update(id, CoordinateField::Easting, "0");
        set.update(id, CoordinateField::Northing, "0");
        assert!(set.points()[0].is_valid());
    }

    #[test]
    fn format_switch_recomputes_every_point() {
        let mut set = filled_utm_set(2);
        assert_eq!(set.valid_points().len(), 2);
        // UTM meter strings are far outside geographic bounds.
        set.set_format(CoordinateFormat::Geographic);
        assert!(set.valid_points().is_empty());
        set.set_format(CoordinateFormat::Utm);
        assert_eq!(set.valid_points().len(), 2);
    }

    #[test]
    fn import_replaces_relabels_and_truncates() {
        let points: Vec<Point> = (0..12)
            .map(|index| {
                let mut point = Point::empty(Id::new(1000 + index), 'Z');
                point.geographic = Some(Location {
                    latitude: 36.0 + index as f64 * 0.001,
                    longitude: 53.0,
                });
                point
            })
            .collect();
        let set = PointSet::from_imported(points);
        assert_eq!(set.len(), MAX_POINTS);
        assert_eq!(set.format(), CoordinateFormat::Utm);
        let labels: Vec<char> = set.points().iter().map(|p| p.label).collect();
        assert_eq!(labels, ('A'..='J').collect::<Vec<char>>());
        // Parsed positions survive the import untouched.
        let kept = set.points()[3].geographic.unwrap().latitude;
        assert!((kept - 36.003).abs() < 1e-12);
    }

    #[test]
    fn empty_import_falls_back_to_a_single_empty_point() {
        let set = PointSet::from_imported(Vec::new());
        assert_eq!(set.len(), 1);
        assert!(!set.points()[0].is_valid());
    }
}
